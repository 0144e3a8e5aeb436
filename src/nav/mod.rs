//! Grid navigation: pathfinding and line-of-sight

pub mod pathfinding;
pub mod visibility;

pub use pathfinding::build_path;
pub use visibility::check_visible;

use crate::core::types::GridPos;
use crate::terrain::TerrainGenerator;

/// Source of per-cell passability
///
/// Takes `&mut self` because the terrain generator materializes chunks on
/// first query; test fixtures ignore the mutability.
pub trait PassabilityMap {
    fn is_passable(&mut self, pos: GridPos) -> bool;
}

impl PassabilityMap for TerrainGenerator {
    fn is_passable(&mut self, pos: GridPos) -> bool {
        TerrainGenerator::is_passable(self, pos)
    }
}
