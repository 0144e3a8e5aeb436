//! Line-of-sight testing by grid raycasting
//!
//! Amanatides–Woo voxel traversal: step cell-by-cell along the segment,
//! advancing on whichever axis crosses its next cell boundary first. Axis
//! components of zero get an infinite step threshold so axis-aligned rays
//! never divide by zero.

use glam::Vec2;

use crate::core::types::GridPos;
use crate::nav::PassabilityMap;

/// True iff no blocked cell lies on the segment from `origin` to `target`
///
/// Endpoints are rounded to cells; the origin cell itself is never tested,
/// so a caster standing inside a wall can still see out of it.
pub fn check_visible(map: &mut impl PassabilityMap, origin: Vec2, target: Vec2) -> bool {
    let mut cursor = GridPos::round(origin);
    let target_cell = GridPos::round(target);

    let ray = (target - origin).normalize_or_zero();

    let steps = cursor.manhattan(target_cell);
    let step_x = if ray.x >= 0.0 { 1 } else { -1 };
    let step_y = if ray.y >= 0.0 { 1 } else { -1 };

    let mut t_max_x = f32::INFINITY;
    let mut t_max_y = f32::INFINITY;
    let mut t_delta_x = f32::INFINITY;
    let mut t_delta_y = f32::INFINITY;

    if ray.x != 0.0 {
        t_delta_x = step_x as f32 / ray.x;
        t_max_x = (origin.x.round() - (origin.x + 0.5) + if ray.x > 0.0 { 1.0 } else { 0.0 })
            / ray.x;
    }
    if ray.y != 0.0 {
        t_delta_y = step_y as f32 / ray.y;
        t_max_y = (origin.y.round() - (origin.y + 0.5) + if ray.y > 0.0 { 1.0 } else { 0.0 })
            / ray.y;
    }

    for _ in 0..steps {
        if t_max_x < t_max_y {
            cursor.x += step_x;
            t_max_x += t_delta_x;
        } else {
            cursor.y += step_y;
            t_max_y += t_delta_y;
        }

        if !map.is_passable(cursor) {
            return false;
        }
    }

    true
}
