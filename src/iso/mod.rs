//! World/screen coordinate transform
//!
//! 2:1 isometric projection: a step of +x in the grid moves right-and-down
//! on screen, +y moves left-and-down. The transform and its inverse are
//! exact up to pixel rounding, so picking (screen to world) and rendering
//! (world to screen) agree.

use glam::Vec2;

use crate::core::types::GridPos;

/// Camera + viewport state for the isometric projection
#[derive(Debug, Clone)]
pub struct IsoProjection {
    /// Pixel width of one tile diamond
    pub tile_pixels: i32,
    /// Render target size in pixels
    pub viewport: GridPos,
    /// World position projected to the viewport center
    pub camera: Vec2,
}

impl IsoProjection {
    pub fn new(tile_pixels: i32, viewport: GridPos) -> Self {
        Self {
            tile_pixels,
            viewport,
            camera: Vec2::ZERO,
        }
    }

    /// Convert world grid coordinates to screen pixel coordinates
    pub fn world_to_screen(&self, pos: Vec2) -> GridPos {
        let v = (pos - self.camera) * self.tile_pixels as f32;
        GridPos::new(
            ((v.x - v.y) / 2.0).round() as i32,
            ((v.x + v.y) / 4.0).round() as i32,
        ) + self.viewport / 2
    }

    /// Convert screen pixel coordinates to world grid coordinates
    pub fn screen_to_world(&self, pos: GridPos) -> Vec2 {
        let v = pos - self.viewport / 2;
        Vec2::new((2 * v.y + v.x) as f32, (2 * v.y - v.x) as f32) / self.tile_pixels as f32
            + self.camera
    }
}
