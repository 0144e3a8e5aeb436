//! Core type definitions used throughout the codebase

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Unique identifier for entities
///
/// Assigned from a monotonically increasing counter owned by the world,
/// never reused for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Integer grid coordinate in tile space
///
/// World-space positions are `glam::Vec2`; every spatial structure keyed by
/// a cell (chunk map, pathfinding arena) uses `GridPos`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub const ZERO: GridPos = GridPos { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Round a world position to its containing cell
    pub fn round(pos: Vec2) -> Self {
        Self {
            x: pos.x.round() as i32,
            y: pos.y.round() as i32,
        }
    }

    /// Floor a world position (used for tile scans, not cell membership)
    pub fn floor(pos: Vec2) -> Self {
        Self {
            x: pos.x.floor() as i32,
            y: pos.y.floor() as i32,
        }
    }

    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x as f32, self.y as f32)
    }

    /// Decompose into (chunk origin, local offset) for a chunk edge length
    ///
    /// The local offset is normalized into `[0, size)` for negative
    /// coordinates as well.
    pub fn chunk_decompose(self, size: i32) -> (GridPos, GridPos) {
        let local = GridPos::new(self.x.rem_euclid(size), self.y.rem_euclid(size));
        (self - local, local)
    }

    /// Manhattan distance to another cell
    pub fn manhattan(self, other: GridPos) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Diagonal sum, the secondary paint-order key in isometric space
    pub fn diagonal(self) -> i32 {
        self.x + self.y
    }
}

impl std::ops::Add for GridPos {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for GridPos {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Neg for GridPos {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl std::ops::Mul<i32> for GridPos {
    type Output = Self;
    fn mul(self, rhs: i32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl std::ops::Div<i32> for GridPos {
    type Output = Self;
    fn div(self, rhs: i32) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}
