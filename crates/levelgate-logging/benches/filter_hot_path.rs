//! Filter Hot Path Benchmarks
//!
//! Measures the cost of the gate on every log call:
//!
//! - **allows**: one atomic load on a cached filter
//! - **rejected**: full `FilteringSink::log_event` for a filtered-out call
//! - **accepted**: full `FilteringSink::log_event` reaching a no-op sink
//! - **reload**: publishing a snapshot to many subscribed filters

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use levelgate_logging::{
    ConfigSection, ConfigSnapshot, ConfigStore, EventId, FilterRegistry, FilteringSink, LogSink,
    Record, Severity,
};
use std::sync::Arc;

struct NullSink;

impl LogSink for NullSink {
    fn log(&self, record: &Record<'_>) {
        black_box(record.severity());
    }
}

fn snapshot(level: &str) -> ConfigSnapshot {
    ConfigSnapshot::from_sections([("Net.Client", ConfigSection::scalar(level))])
}

fn bench_gate(c: &mut Criterion) {
    let store = Arc::new(ConfigStore::new(snapshot("Warning")));
    let registry = Arc::new(FilterRegistry::new(Arc::clone(&store)));
    let sink = FilteringSink::new(NullSink, Arc::clone(&registry));
    let filter = registry.filter_for("Net.Client");

    let mut group = c.benchmark_group("gate");

    group.bench_function("allows", |b| {
        b.iter(|| filter.allows(black_box(Severity::Debug)))
    });

    group.bench_function("rejected", |b| {
        b.iter(|| {
            sink.log_event(
                black_box("Net.Client"),
                Severity::Debug,
                EventId::default(),
                format_args!("request {} took {}ms", 42, 17),
                None,
            )
        })
    });

    group.bench_function("accepted", |b| {
        b.iter(|| {
            sink.log_event(
                black_box("Net.Client"),
                Severity::Error,
                EventId::default(),
                format_args!("request {} took {}ms", 42, 17),
                None,
            )
        })
    });

    let logger = sink.create_logger("Net.Client");
    group.bench_function("logger_rejected", |b| {
        b.iter(|| logger.debug(format_args!("request {} took {}ms", 42, 17)))
    });

    group.finish();
}

fn bench_reload(c: &mut Criterion) {
    let mut group = c.benchmark_group("reload");

    for filters in [10usize, 100, 1_000] {
        let store = Arc::new(ConfigStore::new(snapshot("Warning")));
        let registry = FilterRegistry::new(Arc::clone(&store));
        for i in 0..filters {
            registry.filter_for(&format!("Category{i}"));
        }

        group.bench_with_input(BenchmarkId::new("publish", filters), &filters, |b, _| {
            b.iter(|| store.publish(snapshot("Error")))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_gate, bench_reload);
criterion_main!(benches);
