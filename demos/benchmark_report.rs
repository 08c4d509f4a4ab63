//! Runs one full benchmark iteration at the default size and prints the report.
//!
//! ```bash
//! cargo run --release --example benchmark_report
//! ```

use parmul::{BenchmarkConfig, MatrixBenchmark, TrackingAllocator, DEFAULT_SIZE};

#[global_allocator]
static ALLOC: TrackingAllocator = TrackingAllocator;

fn main() {
    println!("Generating two {DEFAULT_SIZE}x{DEFAULT_SIZE} matrices...");
    let bench = MatrixBenchmark::new(BenchmarkConfig::default())
        .expect("Failed to build benchmark inputs");

    println!("Workers available: {}", rayon::current_num_threads());
    println!("Running sequential baseline and parallel multiply...\n");

    let report = bench.run().expect("Benchmark iteration failed");
    println!("{report}");
}
