//! Pathfinding and raycast benchmarks over generated terrain

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::Vec2;

use snowfield::core::config::WorldConfig;
use snowfield::core::types::GridPos;
use snowfield::nav::{build_path, check_visible};
use snowfield::terrain::TerrainGenerator;

fn terrain() -> TerrainGenerator {
    let config = WorldConfig {
        seed: 42,
        ..WorldConfig::default()
    };
    let mut terrain = TerrainGenerator::new(&config);
    // touch the corners so chunk materialization stays out of the timings
    for pos in [
        GridPos::new(-64, -64),
        GridPos::new(64, -64),
        GridPos::new(-64, 64),
        GridPos::new(64, 64),
        GridPos::ZERO,
    ] {
        terrain.is_passable(pos);
    }
    terrain
}

fn bench_pathfinding(c: &mut Criterion) {
    let mut map = terrain();

    c.bench_function("path_short_open", |b| {
        b.iter(|| {
            build_path(
                &mut map,
                black_box(Vec2::ZERO),
                black_box(Vec2::new(6.0, 6.0)),
                50,
            )
        })
    });

    // distant goal: the frontier cap turns this into the worst case
    // (exhaust, then fallback scan)
    c.bench_function("path_capped_distant", |b| {
        b.iter(|| {
            build_path(
                &mut map,
                black_box(Vec2::ZERO),
                black_box(Vec2::new(40.0, 25.0)),
                50,
            )
        })
    });

    c.bench_function("path_wide_cap", |b| {
        b.iter(|| {
            build_path(
                &mut map,
                black_box(Vec2::ZERO),
                black_box(Vec2::new(40.0, 25.0)),
                2000,
            )
        })
    });
}

fn bench_visibility(c: &mut Criterion) {
    let mut map = terrain();

    c.bench_function("raycast_30_cells", |b| {
        b.iter(|| {
            check_visible(
                &mut map,
                black_box(Vec2::ZERO),
                black_box(Vec2::new(21.0, 21.0)),
            )
        })
    });
}

fn bench_chunk_generation(c: &mut Criterion) {
    let config = WorldConfig {
        seed: 42,
        ..WorldConfig::default()
    };

    c.bench_function("materialize_chunk", |b| {
        b.iter(|| {
            let mut fresh = TerrainGenerator::new(&config);
            fresh.is_passable(black_box(GridPos::new(100, 100)))
        })
    });
}

criterion_group!(
    benches,
    bench_pathfinding,
    bench_visibility,
    bench_chunk_generation
);
criterion_main!(benches);
