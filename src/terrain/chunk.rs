//! Tile and chunk storage for the lazily-paged terrain

use std::time::Instant;

/// Number of stacked sprite layers per tile (ground, overlay, obstacle)
pub const TILE_LAYERS: usize = 3;

/// Edge length of a square chunk in tiles
pub const CHUNK_SIZE: i32 = 64;

/// Ground sprite id (always present in layer 0)
pub const SPRITE_GROUND: u16 = 0;

/// Tree decoration sprite id; wall sprites occupy ids 1..=15
pub const SPRITE_TREE: u16 = 16;

/// One grid cell: stacked sprite layers plus passability
///
/// Generated exactly once as a pure function of (position, seed) and never
/// mutated afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tile {
    pub layers: [Option<u16>; TILE_LAYERS],
    pub passable: bool,
}

/// A fixed-size block of tiles, the unit of lazy terrain materialization
///
/// `last_access` is `None` until first touch (the generation trigger) and
/// restamped on every read afterwards. Nothing evicts on it yet; it is the
/// hook for a future LRU policy.
pub struct Chunk {
    pub tiles: Vec<Tile>,
    pub last_access: Option<Instant>,
}

impl Default for Chunk {
    fn default() -> Self {
        Self {
            tiles: vec![Tile::default(); (CHUNK_SIZE * CHUNK_SIZE) as usize],
            last_access: None,
        }
    }
}

impl Chunk {
    /// Tile at a local offset, which must lie in `[0, CHUNK_SIZE)` per axis
    #[inline]
    pub fn tile(&self, local_x: i32, local_y: i32) -> &Tile {
        &self.tiles[(local_y * CHUNK_SIZE + local_x) as usize]
    }

    #[inline]
    pub fn tile_mut(&mut self, local_x: i32, local_y: i32) -> &mut Tile {
        &mut self.tiles[(local_y * CHUNK_SIZE + local_x) as usize]
    }
}
