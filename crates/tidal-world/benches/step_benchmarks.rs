use criterion::{Criterion, black_box, criterion_group, criterion_main};
use tidal_world::{DiffusionSimulator, Grid, SimulationRates, TileState};

fn mixed_grid(width: u32, height: u32) -> Grid {
    Grid::from_fn(width, height, 16.0, |x, y| TileState {
        water: ((x * 13 + y * 7) % 100) as f32 / 100.0,
        heat: 285.0 + ((x + y) % 40) as f32,
        vegetation: ((x ^ y) % 6) as f32,
    })
    .unwrap()
}

fn bench_step_budget_6000(c: &mut Criterion) {
    let mut sim = DiffusionSimulator::new(mixed_grid(150, 150), SimulationRates::default());
    c.bench_function("step_budget_6000", |bencher| {
        bencher.iter(|| black_box(sim.step(black_box(6000))))
    });
}

fn bench_full_pass_64(c: &mut Criterion) {
    let mut sim = DiffusionSimulator::new(mixed_grid(64, 64), SimulationRates::default());
    c.bench_function("full_pass_64x64", |bencher| {
        bencher.iter(|| black_box(sim.step(64 * 64)))
    });
}

fn bench_visible_tiles(c: &mut Criterion) {
    let grid = mixed_grid(150, 150);
    let view = tidal_math::Rect::new(
        glam::Vec2::new(800.0, 800.0),
        glam::Vec2::new(1200.0, 720.0),
    );
    c.bench_function("visible_tiles_1200x720", |bencher| {
        bencher.iter(|| black_box(grid.visible_tiles(black_box(view)).count()))
    });
}

criterion_group!(
    benches,
    bench_step_budget_6000,
    bench_full_pass_64,
    bench_visible_tiles
);
criterion_main!(benches);
