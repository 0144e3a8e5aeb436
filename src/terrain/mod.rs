//! Procedural chunked terrain

pub mod chunk;
pub mod generator;
pub mod hash;

pub use chunk::{Chunk, Tile, CHUNK_SIZE, SPRITE_GROUND, SPRITE_TREE, TILE_LAYERS};
pub use generator::TerrainGenerator;
