use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use toolbelt::math::{cartesian_product, safe_div};
use toolbelt::metrics::calibration_curve;
use toolbelt::plot::MultipleTicks;
use toolbelt::profiler::Profiler;

/// Benchmark full enumeration of products of equally sized sequences
fn bench_cartesian_product(c: &mut Criterion) {
    let mut group = c.benchmark_group("cartesian_product");

    for n_seqs in [2usize, 4, 6] {
        let sequences: Vec<Vec<u32>> = (0..n_seqs).map(|_| (0..8).collect()).collect();
        let n_tuples = 8u64.pow(n_seqs as u32);
        group.throughput(Throughput::Elements(n_tuples));

        group.bench_with_input(
            BenchmarkId::new("sequences", n_seqs),
            &sequences,
            |b, sequences| {
                b.iter(|| {
                    let count = cartesian_product::<u32, _>(black_box(sequences.as_slice())).count();
                    black_box(count)
                })
            },
        );
    }

    group.finish();
}

/// Benchmark elementwise division with a share of zero denominators
fn bench_safe_div(c: &mut Criterion) {
    let mut group = c.benchmark_group("safe_div");

    for len in [1_000usize, 100_000] {
        let num: Vec<f64> = (0..len).map(|i| i as f64).collect();
        let den: Vec<f64> = (0..len).map(|i| (i % 7) as f64).collect();
        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::new("len", len), &len, |b, _| {
            b.iter(|| black_box(safe_div(black_box(&num), black_box(&den), 0.0)))
        });
    }

    group.finish();
}

/// Benchmark the overhead of a start/stop pair on existing timers
fn bench_profiler(c: &mut Criterion) {
    let mut group = c.benchmark_group("profiler");

    for n_timers in [1usize, 16, 256] {
        let names: Vec<String> = (0..n_timers).map(|i| format!("section_{}", i)).collect();
        group.throughput(Throughput::Elements(n_timers as u64));

        group.bench_with_input(
            BenchmarkId::new("start_stop", n_timers),
            &names,
            |b, names| {
                let mut profiler = Profiler::new();
                b.iter(|| {
                    for name in names {
                        profiler.start(black_box(name));
                        let _ = black_box(profiler.stop(name));
                    }
                })
            },
        );
    }

    group.bench_function("scope", |b| {
        let mut profiler = Profiler::new();
        b.iter(|| {
            let mut outer = profiler.scope("outer");
            let _inner = outer.scope("inner");
        })
    });

    group.finish();
}

/// Benchmark binned calibration statistics
fn bench_calibration(c: &mut Criterion) {
    let mut group = c.benchmark_group("calibration_curve");

    for len in [1_000usize, 100_000] {
        let y_pred: Vec<f64> = (0..len).map(|i| (i % 101) as f64 / 100.0).collect();
        let y_true: Vec<f64> = (0..len).map(|i| (i % 3 == 0) as u8 as f64).collect();
        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::new("len", len), &len, |b, _| {
            b.iter(|| black_box(calibration_curve(black_box(&y_true), black_box(&y_pred), 10)))
        });
    }

    group.finish();
}

/// Benchmark π tick placement and labelling over a wide range
fn bench_pi_ticks(c: &mut Criterion) {
    let ticks = MultipleTicks::pi(4);
    let hi = 20.0 * std::f64::consts::PI;

    c.bench_function("pi_ticks_format", |b| {
        b.iter(|| {
            let labels: Vec<String> = ticks
                .locate(black_box(-hi), black_box(hi))
                .into_iter()
                .map(|x| ticks.format(x))
                .collect();
            black_box(labels)
        })
    });
}

criterion_group!(
    benches,
    bench_cartesian_product,
    bench_safe_div,
    bench_profiler,
    bench_calibration,
    bench_pi_ticks,
);
criterion_main!(benches);
