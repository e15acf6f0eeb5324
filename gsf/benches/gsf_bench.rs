use std::hint::black_box;
use std::path::Path;

use criterion::{Criterion, criterion_group, criterion_main};
use gsf::config::GSFConfig;
use gsf::gsf_optimizer::GSFOptimizer;
use gsf::io;
use gsf::opt::validator::CandidateValidator;
use polyplan::geometry::PlanarGeometry;

criterion_main!(benches);
criterion_group!(benches, solve_bench, validate_bench);

const SQUARE_PATH: &str = "../assets/square_1ha.json";
const FARM_PATH: &str = "../assets/farm_with_well.json";

fn create_optimizer(path: &str) -> GSFOptimizer {
    let request = io::read_request(Path::new(path)).unwrap();
    GSFOptimizer::from_request(&request, GSFConfig::default()).unwrap()
}

fn solve_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("gsf_solve");
    group.sample_size(10);
    for (name, path) in [("square_1ha", SQUARE_PATH), ("farm_with_well", FARM_PATH)] {
        let mut optimizer = create_optimizer(path);
        group.bench_function(name, |b| b.iter(|| black_box(optimizer.solve().unwrap())));
    }
    group.finish();
}

/// Validation of every placed structure against a filled layout, the inner loop of the search
fn validate_bench(c: &mut Criterion) {
    let mut optimizer = create_optimizer(FARM_PATH);
    optimizer.solve().unwrap();

    let plan = &optimizer.config.plan;
    let geometry = PlanarGeometry;
    let validator = CandidateValidator::new(
        &geometry,
        plan.gutter_width,
        plan.corridor_gap,
        optimizer.config.corridor_tolerance,
    );
    let placed: Vec<_> = optimizer
        .layout
        .placements()
        .map(|(key, c)| (key, *c))
        .collect();

    c.bench_function("gsf_validate_placed", |b| {
        b.iter(|| {
            for (key, candidate) in placed.iter() {
                let _ = black_box(validator.validate(&optimizer.layout, candidate, Some(*key)));
            }
        })
    });
}
