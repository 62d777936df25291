use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use torus_life::LifeGrid;

fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_step");
    for &size in &[50_usize, 200, 1000] {
        let mut seeded = LifeGrid::new(size).expect("grid");
        seeded
            .randomize_with(&mut SmallRng::seed_from_u64(0x5EED_CE11), 0.2)
            .expect("density");
        group.bench_function(format!("size_{size}"), |b| {
            b.iter_batched(
                || seeded.clone(),
                |mut grid| {
                    grid.step();
                    grid
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_step);
criterion_main!(benches);
