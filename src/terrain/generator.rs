//! Procedural terrain generation
//!
//! Terrain is an infinite field of tiles derived deterministically from the
//! world seed, organized into 64x64 chunks materialized on first touch.
//! Walls come from a vertex noise field: each grid vertex is "high" or
//! "low", a tile's 4-bit wall code collects its four corner vertices, and a
//! non-zero code selects one of fifteen directional wall sprites and blocks
//! the cell. Open cells roll a second, independently-salted noise for
//! sparse tree decoration.

use std::time::Instant;

use ahash::AHashMap;

use crate::core::config::WorldConfig;
use crate::core::types::GridPos;
use crate::terrain::chunk::{Chunk, Tile, CHUNK_SIZE, SPRITE_GROUND, SPRITE_TREE};
use crate::terrain::hash::{mix, DECORATION_SALT};

/// Lazily-paged chunk map plus the noise parameters that fill it
pub struct TerrainGenerator {
    seed: u64,
    wall_density: u64,
    decoration_density: u64,
    flat_radius: i32,
    chunks: AHashMap<GridPos, Chunk>,
}

impl TerrainGenerator {
    pub fn new(config: &WorldConfig) -> Self {
        Self {
            seed: config.seed,
            wall_density: config.wall_density,
            decoration_density: config.decoration_density,
            flat_radius: config.flat_radius,
            chunks: AHashMap::new(),
        }
    }

    /// Whether the wall-noise vertex at `pos` is high
    ///
    /// Each vertex is shared by the four surrounding tiles. The raw 1-in-N
    /// hash is smoothed with an AND over the 3x3 vertex neighborhood so
    /// wall boundaries stay locally consistent instead of single-cell
    /// noise. The spawn region around the origin is forced low.
    fn vertex_high(&self, pos: GridPos) -> bool {
        if pos.x.abs() <= self.flat_radius && pos.y.abs() <= self.flat_radius {
            return false;
        }

        const STEPS: [GridPos; 9] = [
            GridPos::new(0, 0),
            GridPos::new(0, -1),
            GridPos::new(-1, 0),
            GridPos::new(1, 0),
            GridPos::new(0, 1),
            GridPos::new(-1, -1),
            GridPos::new(1, -1),
            GridPos::new(-1, 1),
            GridPos::new(1, 1),
        ];
        STEPS
            .iter()
            .all(|&step| mix(pos + step, self.seed) % self.wall_density != 0)
    }

    /// 4-bit wall code from the tile's corner vertices; zero means open
    fn wall_code(&self, pos: GridPos) -> u8 {
        (self.vertex_high(pos + GridPos::new(1, 0)) as u8)
            | (self.vertex_high(pos) as u8) << 1
            | (self.vertex_high(pos + GridPos::new(1, 1)) as u8) << 2
            | (self.vertex_high(pos + GridPos::new(0, 1)) as u8) << 3
    }

    /// Generate one tile; pure in (pos, seed)
    fn generate(&self, pos: GridPos) -> Tile {
        let code = self.wall_code(pos);

        // the spawn region is kept clear of decoration as well as walls
        let in_flat_region =
            pos.x.abs() <= self.flat_radius && pos.y.abs() <= self.flat_radius;

        let obstacle = if code != 0 {
            Some(code as u16)
        } else if !in_flat_region
            && mix(pos, self.seed ^ DECORATION_SALT) % self.decoration_density == 0
            // leave trees out of wall corners: both diagonal neighbors open
            && self.wall_code(pos + GridPos::new(-1, 1)) == 0
            && self.wall_code(pos + GridPos::new(1, -1)) == 0
        {
            Some(SPRITE_TREE)
        } else {
            None
        };

        Tile {
            layers: [Some(SPRITE_GROUND), None, obstacle],
            passable: obstacle.is_none(),
        }
    }

    /// Get or generate the tile at `pos`
    ///
    /// First touch of a chunk fills all of its tiles eagerly; every touch
    /// restamps the chunk's access time.
    pub fn tile(&mut self, pos: GridPos) -> &Tile {
        let (chunk_origin, local) = pos.chunk_decompose(CHUNK_SIZE);

        if !self.chunks.contains_key(&chunk_origin) {
            tracing::debug!(
                "materialize chunk [{},{}]..[{},{}]",
                chunk_origin.x,
                chunk_origin.y,
                chunk_origin.x + CHUNK_SIZE,
                chunk_origin.y + CHUNK_SIZE
            );
            let mut chunk = Chunk::default();
            for x in 0..CHUNK_SIZE {
                for y in 0..CHUNK_SIZE {
                    *chunk.tile_mut(x, y) = self.generate(chunk_origin + GridPos::new(x, y));
                }
            }
            self.chunks.insert(chunk_origin, chunk);
        }

        let chunk = self
            .chunks
            .get_mut(&chunk_origin)
            .expect("chunk inserted above");
        chunk.last_access = Some(Instant::now());
        chunk.tile(local.x, local.y)
    }

    /// Whether objects can occupy the cell
    pub fn is_passable(&mut self, pos: GridPos) -> bool {
        self.tile(pos).passable
    }

    /// Number of chunks materialized so far
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Access stamp of the chunk containing `pos`, if it exists
    pub fn chunk_access_time(&self, pos: GridPos) -> Option<Instant> {
        let (chunk_origin, _) = pos.chunk_decompose(CHUNK_SIZE);
        self.chunks.get(&chunk_origin).and_then(|c| c.last_access)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator(seed: u64) -> TerrainGenerator {
        let config = WorldConfig {
            seed,
            ..WorldConfig::default()
        };
        TerrainGenerator::new(&config)
    }

    #[test]
    fn test_tiles_deterministic() {
        let mut a = generator(7);
        let mut b = generator(7);
        for x in -40..40 {
            for y in -40..40 {
                let pos = GridPos::new(x, y);
                assert_eq!(a.tile(pos), b.tile(pos), "tile mismatch at {pos:?}");
            }
        }
    }

    #[test]
    fn test_repeated_reads_identical() {
        let mut gen = generator(11);
        let pos = GridPos::new(-100, 73);
        let first = *gen.tile(pos);
        assert_eq!(first, *gen.tile(pos));
    }

    #[test]
    fn test_seeds_diverge() {
        let mut a = generator(1);
        let mut b = generator(2);
        let mut differing = 0;
        for x in 16..48 {
            for y in 16..48 {
                let pos = GridPos::new(x, y);
                if a.tile(pos) != b.tile(pos) {
                    differing += 1;
                }
            }
        }
        assert!(differing > 0, "two seeds produced identical terrain");
    }

    #[test]
    fn test_spawn_area_open() {
        for seed in [0, 1, 12345, u64::MAX] {
            let mut gen = generator(seed);
            // vertices up to flat_radius are low, so tiles strictly inside
            // the radius have a zero wall code on all four corners
            for x in -7..=7 {
                for y in -7..=7 {
                    assert!(
                        gen.is_passable(GridPos::new(x, y)),
                        "blocked spawn cell ({x},{y}) for seed {seed}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_no_decoration_in_spawn_area() {
        // trees roll independently of walls, so they need their own gate
        for seed in [0, 7, 99, u64::MAX] {
            let mut gen = generator(seed);
            for x in -8..=8 {
                for y in -8..=8 {
                    let obstacle = gen.tile(GridPos::new(x, y)).layers[2];
                    assert_ne!(
                        obstacle,
                        Some(SPRITE_TREE),
                        "tree in spawn area at ({x},{y}) for seed {seed}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_walls_exist_somewhere() {
        let mut gen = generator(3);
        let mut blocked = 0;
        for x in 20..80 {
            for y in 20..80 {
                if !gen.is_passable(GridPos::new(x, y)) {
                    blocked += 1;
                }
            }
        }
        assert!(blocked > 0, "no walls in a 60x60 sample far from spawn");
    }

    #[test]
    fn test_wall_codes_in_sprite_range() {
        let mut gen = generator(9);
        for x in -64..64 {
            for y in -64..64 {
                if let Some(id) = gen.tile(GridPos::new(x, y)).layers[2] {
                    assert!(
                        (1..=15).contains(&id) || id == SPRITE_TREE,
                        "obstacle sprite {id} out of range"
                    );
                }
            }
        }
    }

    #[test]
    fn test_chunk_materialization_is_lazy() {
        let mut gen = generator(5);
        assert_eq!(gen.chunk_count(), 0);
        gen.tile(GridPos::new(0, 0));
        assert_eq!(gen.chunk_count(), 1);
        gen.tile(GridPos::new(1, 1));
        assert_eq!(gen.chunk_count(), 1);
        gen.tile(GridPos::new(-1, 0));
        assert_eq!(gen.chunk_count(), 2);
    }

    #[test]
    fn test_access_time_stamped() {
        let mut gen = generator(5);
        let pos = GridPos::new(0, 0);
        assert!(gen.chunk_access_time(pos).is_none());
        gen.tile(pos);
        let first = gen.chunk_access_time(pos).expect("stamped on generate");
        gen.tile(GridPos::new(2, 2));
        let second = gen.chunk_access_time(pos).expect("still stamped");
        assert!(second >= first);
    }
}
