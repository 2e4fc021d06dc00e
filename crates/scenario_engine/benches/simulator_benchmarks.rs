//! Criterion benchmarks for the scenario simulator.
//!
//! Run with: `cargo bench -p scenario_engine`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use scenario_core::{PortfolioWeights, ReturnModel, ScenarioParameters};
use scenario_engine::mc::{simulate_seeded, SimulationConfig};

const SECTORS: [&str; 4] = ["Defense", "Energy", "Gold", "Utilities"];

fn scenario(model: ReturnModel) -> ScenarioParameters {
    ScenarioParameters::from_vectors(
        "Bench",
        &SECTORS,
        &[0.28, 0.32, 0.35, 0.09],
        &[0.22, 0.35, 0.18, 0.12],
        &[
            vec![1.00, 0.45, -0.15, 0.10],
            vec![0.45, 1.00, -0.25, 0.05],
            vec![-0.15, -0.25, 1.00, -0.10],
            vec![0.10, 0.05, -0.10, 1.00],
        ],
        0.5,
        model,
    )
    .expect("valid benchmark scenario")
}

fn bench_simulate(c: &mut Criterion) {
    let weights =
        PortfolioWeights::new(&SECTORS, &[0.40, 0.25, 0.20, 0.15]).expect("valid weights");
    let mut group = c.benchmark_group("simulate");

    for &n_paths in &[1_000usize, 10_000, 100_000] {
        let config = SimulationConfig::builder()
            .n_paths(n_paths)
            .build()
            .expect("valid config");

        for model in [ReturnModel::Normal, ReturnModel::LogNormal] {
            let s = scenario(model);
            group.bench_with_input(
                BenchmarkId::new(model.name(), n_paths),
                &n_paths,
                |b, _| b.iter(|| simulate_seeded(black_box(&s), &weights, &config, 42)),
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_simulate);
criterion_main!(benches);
