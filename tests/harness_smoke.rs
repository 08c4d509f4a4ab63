//! End-to-end harness runs at a small size

use std::time::Duration;

use parmul::{BenchmarkConfig, MatrixBenchmark};

#[test]
fn small_iteration_produces_consistent_report() {
    let config = BenchmarkConfig {
        size: 48,
        seed: Some(7),
    };
    let bench = MatrixBenchmark::new(config).unwrap();
    let report = bench.run().unwrap();

    assert!(report.elapsed > Duration::ZERO);
    assert!(report.sequential > Duration::ZERO);
    assert_eq!(report.worker_nanos.len(), rayon::current_num_threads());
    assert!(report.total_worker_nanos() > 0);
    assert!(report.average_worker_millis() > 0.0);

    let rendered = report.to_string();
    assert!(rendered.starts_with("Total time:"));
    assert!(rendered.contains("Sequential baseline:"));
    assert!(rendered.contains("Per-worker accumulated time:"));
    assert!(rendered.ends_with(&format!(
        "Average time per worker: {:.2} ms",
        report.average_worker_millis()
    )));
    // Summary, baseline, per-worker header and one line per slot, average.
    assert_eq!(rendered.lines().count(), 4 + report.worker_nanos.len());
}

#[test]
fn timing_table_resets_between_iterations() {
    let bench = MatrixBenchmark::new(BenchmarkConfig {
        size: 32,
        seed: Some(9),
    })
    .unwrap();

    // Pre-seed a slot with an hour of fake work; run() must clear it before
    // accumulating, or the report would carry it.
    bench
        .timing_table()
        .record(0, Duration::from_secs(3600));

    let report = bench.run().unwrap();
    let hour_nanos = Duration::from_secs(3600).as_nanos() as u64;
    assert!(report.total_worker_nanos() < hour_nanos);
}
