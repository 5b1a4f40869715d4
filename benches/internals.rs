use std::path::Path;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use ompsweep::display;
use ompsweep::invoke;
use ompsweep::output;
use ompsweep::plot;
use ompsweep::threads;
use ompsweep::types::ConfigurationResult;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Synthetic sweep with roughly linear scaling and a little jitter.
fn make_results(size: u32) -> Vec<ConfigurationResult> {
    (1..=size)
        .map(|t| {
            let base = 4.0 / t as f64;
            ConfigurationResult::from_samples(t, vec![base * 0.98, base, base * 1.03]).unwrap()
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Benchmarks: invoke
// ---------------------------------------------------------------------------

fn bench_parse_elapsed(c: &mut Criterion) {
    let noisy: String = (0..200)
        .map(|i| format!("iteration {} residual ok\n", i))
        .collect::<String>()
        + "1.234567\n";

    let inputs = [
        ("last_line", "3.14159\n".to_string()),
        ("scientific", "setup complete\n2.5e-3\n".to_string()),
        ("fallback", "elapsed=2.5e-3 seconds".to_string()),
        ("long_diagnostics", noisy),
    ];

    let mut group = c.benchmark_group("parse_elapsed");
    for (name, input) in &inputs {
        group.bench_with_input(BenchmarkId::new("input", name), input, |b, s| {
            b.iter(|| invoke::parse_elapsed(s).unwrap());
        });
    }
    group.finish();
}

// ---------------------------------------------------------------------------
// Benchmarks: threads / output
// ---------------------------------------------------------------------------

fn bench_thread_plan(c: &mut Criterion) {
    let mut group = c.benchmark_group("thread_plan");
    group.bench_function("range_default", |b| {
        b.iter(|| threads::expand_range(2, 20, 2).unwrap());
    });
    group.bench_function("list_16", |b| {
        b.iter(|| threads::parse_thread_list("1,2,3,4,6,8,10,12,16,20,24,32,40,48,56,64").unwrap());
    });
    group.finish();
}

fn bench_output_name(c: &mut Criterion) {
    let pass_args = vec![
        "--size 1000000 --mode fast".to_string(),
        "--label='two words' --seed=42".to_string(),
    ];
    c.bench_function("make_output_name", |b| {
        b.iter(|| output::make_output_name(Path::new("bench/sht.py"), &pass_args).unwrap());
    });
}

// ---------------------------------------------------------------------------
// Benchmarks: rendering
// ---------------------------------------------------------------------------

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    for &size in &[10u32, 64] {
        let results = make_results(size);
        group.bench_with_input(BenchmarkId::new("svg", size), &results, |b, r| {
            b.iter(|| plot::render_svg(r, "bench"));
        });
        group.bench_with_input(BenchmarkId::new("csv", size), &results, |b, r| {
            b.iter(|| output::format_csv(r));
        });
        group.bench_with_input(BenchmarkId::new("summary", size), &results, |b, r| {
            b.iter(|| display::format_summary(r));
        });
    }
    group.finish();
}

// ---------------------------------------------------------------------------
// Criterion groups
// ---------------------------------------------------------------------------

criterion_group!(
    benches,
    bench_parse_elapsed,
    bench_thread_plan,
    bench_output_name,
    bench_render,
);
criterion_main!(benches);
