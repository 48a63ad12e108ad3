use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use tp_core::{BarrierKind, ExerciseStyle, OptionType, TreeParams};
use tp_lattice::{AdditiveTrinomial, BarrierTree, OptionTree, Trigeorgis};

fn params(steps: usize) -> TreeParams {
    TreeParams::new(100.0, 100.0, 1.0, 0.06, 0.2, steps).with_dividend(0.03)
}

fn bench_trigeorgis_american_put(c: &mut Criterion) {
    let mut group = c.benchmark_group("trigeorgis_american_put");
    for steps in [100_usize, 500, 1000] {
        let p = params(steps);
        group.bench_with_input(BenchmarkId::from_parameter(steps), &p, |b, p| {
            b.iter(|| {
                let tree = Trigeorgis::new(black_box(p), OptionType::Put, ExerciseStyle::American)
                    .expect("tree should build");
                black_box(tree.instrument_value())
            })
        });
    }
    group.finish();
}

fn bench_trinomial_other_style(c: &mut Criterion) {
    let tree = AdditiveTrinomial::new(&params(500), OptionType::Put, ExerciseStyle::European)
        .expect("tree should build");
    c.bench_function("trinomial_other_style_500", |b| {
        b.iter(|| {
            black_box(
                tree.compute_other_style_price(black_box(ExerciseStyle::American))
                    .expect("backward pass should succeed"),
            )
        })
    });
}

fn bench_barrier_knock_in(c: &mut Criterion) {
    let p = TreeParams::new(10.0, 10.0, 0.3, 0.01, 0.2, 500);
    c.bench_function("barrier_up_and_in_call_500", |b| {
        b.iter(|| {
            let tree = BarrierTree::new(
                black_box(&p),
                11.0,
                BarrierKind::In,
                OptionType::Call,
                ExerciseStyle::European,
            )
            .expect("tree should build");
            black_box(tree.instrument_value())
        })
    });
}

criterion_group!(
    benches,
    bench_trigeorgis_american_put,
    bench_trinomial_other_style,
    bench_barrier_knock_in
);
criterion_main!(benches);
