// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for queue admission.
//!
//! Measures the performance of:
//! - Admission under capacity pressure (every add evicts)
//! - Dedupe refresh of a single notification
//! - Pause/resume cycles on a full queue

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use std::time::Duration;
use toast_queue::notifications::{Manager, NotificationRequest, QueueSettings};

/// Benchmark admission when the queue is always full.
fn bench_admit_with_eviction(c: &mut Criterion) {
    let mut group = c.benchmark_group("queue_churn");

    group.bench_function("admit_1000_evicting", |b| {
        b.iter(|| {
            let mut manager = Manager::manual(QueueSettings::default());
            for i in 0..1000 {
                manager.add(NotificationRequest::info(format!("n{i}")));
            }
            black_box(manager.len());
        });
    });

    group.finish();
}

/// Benchmark repeated triggers collapsing into one notification.
fn bench_dedupe_refresh(c: &mut Criterion) {
    let mut group = c.benchmark_group("queue_churn");

    group.bench_function("dedupe_refresh_1000", |b| {
        b.iter(|| {
            let mut manager = Manager::manual(QueueSettings::default());
            for i in 0..1000 {
                manager.add(
                    NotificationRequest::info(format!("progress {i}"))
                        .with_dedupe_key("progress"),
                );
            }
            black_box(manager.len());
        });
    });

    group.finish();
}

/// Benchmark hover in/out over every toast of a full queue.
fn bench_pause_resume(c: &mut Criterion) {
    let mut group = c.benchmark_group("queue_churn");

    let mut manager = Manager::manual(QueueSettings::default());
    let ids: Vec<_> = (0..5)
        .map(|i| {
            manager
                .add(NotificationRequest::info(format!("n{i}")).with_duration(Duration::from_secs(3)))
                .into_id()
        })
        .collect();

    group.bench_function("pause_resume_full_queue", |b| {
        b.iter(|| {
            for id in &ids {
                manager.pause_timer(id);
                manager.resume_timer(id);
            }
            black_box(manager.pending_timers());
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_admit_with_eviction,
    bench_dedupe_refresh,
    bench_pause_resume
);
criterion_main!(benches);
