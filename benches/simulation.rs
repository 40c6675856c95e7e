//! Cost of the per-frame poll path and of building the render snapshot.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use demo_engine::{parse_numeric_base, Catalog, DemoSettings, DemoSimulation};
use std::time::{Duration, Instant};

fn bench_poll(c: &mut Criterion) {
    let mut group = c.benchmark_group("Poll");

    // Idle frames (no timer due) vs frames where the tick timer fires.
    for step_ms in [16u64, 1_500] {
        group.bench_with_input(BenchmarkId::new("frame_ms", step_ms), &step_ms, |b, &step_ms| {
            let t0 = Instant::now();
            let mut sim = DemoSimulation::open(
                Catalog::builtin(),
                "commerce",
                "IB Commerce",
                &DemoSettings {
                    advance_interval_ms: 3_600_000_000,
                    ..DemoSettings::default()
                },
                t0,
            );
            let mut now = t0;
            b.iter(|| {
                now += Duration::from_millis(step_ms);
                black_box(sim.poll(now))
            })
        });
    }
    group.finish();
}

fn bench_view(c: &mut Criterion) {
    let t0 = Instant::now();
    let mut sim = DemoSimulation::open(
        Catalog::builtin(),
        "finance",
        "IB Finance",
        &DemoSettings::default(),
        t0,
    );
    sim.poll(t0 + Duration::from_millis(1_500));

    c.bench_function("view_snapshot", |b| b.iter(|| black_box(sim.view())));
}

fn bench_parse(c: &mut Criterion) {
    let values = ["₹2.4Cr", "23.4%", "28 days", "N/A", "v1.2.3"];
    c.bench_function("parse_numeric_base", |b| {
        b.iter(|| {
            for v in &values {
                black_box(parse_numeric_base(black_box(v)));
            }
        })
    });
}

criterion_group!(benches, bench_poll, bench_view, bench_parse);
criterion_main!(benches);
