//! Benchmark harness: input generation, timed multiplies, and reporting
//!
//! One [`MatrixBenchmark`] iteration generates two random square matrices,
//! times the sequential multiply as a baseline, times the row-parallel
//! multiply with per-worker accounting, and renders a [`RunReport`].

use std::fmt;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::Result;
use crate::matrix::Matrix;
use crate::memory;
use crate::timing::WorkerTimingTable;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Default edge length for the benchmark's square matrices
pub const DEFAULT_SIZE: usize = 1024;

/// Configuration for one benchmark instance
#[derive(Debug, Clone, Copy)]
pub struct BenchmarkConfig {
    /// Edge length of the two square input matrices
    pub size: usize,
    /// Seed for input generation; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        BenchmarkConfig {
            size: DEFAULT_SIZE,
            seed: None,
        }
    }
}

/// Owns the benchmark inputs and timing state for repeated iterations
///
/// # Example
///
/// ```
/// use parmul::{BenchmarkConfig, MatrixBenchmark};
///
/// let config = BenchmarkConfig { size: 16, seed: Some(42) };
/// let bench = MatrixBenchmark::new(config).unwrap();
/// let report = bench.run().unwrap();
/// assert_eq!(report.worker_nanos.len(), rayon::current_num_threads());
/// ```
#[derive(Debug)]
pub struct MatrixBenchmark {
    a: Matrix,
    b: Matrix,
    timings: WorkerTimingTable,
}

impl MatrixBenchmark {
    /// Generates the two input matrices and sizes the timing table to the pool
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the configured size is zero
    pub fn new(config: BenchmarkConfig) -> Result<Self> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let a = Matrix::random(config.size, config.size, &mut rng)?;
        let b = Matrix::random(config.size, config.size, &mut rng)?;

        Ok(MatrixBenchmark {
            a,
            b,
            timings: WorkerTimingTable::for_current_pool(),
        })
    }

    /// Returns the per-worker timing table
    pub fn timing_table(&self) -> &WorkerTimingTable {
        &self.timings
    }

    /// Runs the sequential multiply once, discarding the result
    ///
    /// The returned duration is the baseline the report's speedup figure is
    /// computed against.
    ///
    /// # Errors
    ///
    /// Propagates dimension errors from the multiply (not reachable for
    /// inputs built by [`MatrixBenchmark::new`]).
    pub fn measure_sequential(&self) -> Result<Duration> {
        let started = Instant::now();
        let _ = self.a.matmul(&self.b)?;
        Ok(started.elapsed())
    }

    /// Executes one full benchmark iteration and returns its report
    ///
    /// Order of operations: reset the timing table, time the sequential
    /// baseline, snapshot heap usage, time the parallel multiply, snapshot
    /// heap usage again. The parallel result itself is discarded; only the
    /// measurements survive.
    ///
    /// # Errors
    ///
    /// Propagates dimension errors from the multiplies (not reachable for
    /// inputs built by [`MatrixBenchmark::new`]).
    #[cfg_attr(feature = "tracing", instrument(skip(self), fields(size = self.a.rows())))]
    pub fn run(&self) -> Result<RunReport> {
        self.timings.reset();

        let sequential = self.measure_sequential()?;

        let heap_before = memory::used_bytes();
        let started = Instant::now();
        let result = self.a.matmul_parallel(&self.b, &self.timings)?;
        let elapsed = started.elapsed();
        let heap_after = memory::used_bytes();
        drop(result);

        Ok(RunReport {
            elapsed,
            sequential,
            heap_delta_bytes: heap_after as i64 - heap_before as i64,
            worker_nanos: self.timings.snapshot(),
        })
    }
}

/// Measurements from one benchmark iteration
///
/// Printed via `Display`, never persisted.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Wall-clock time of the parallel multiply
    pub elapsed: Duration,
    /// Wall-clock time of the sequential baseline
    pub sequential: Duration,
    /// Heap bytes retained across the parallel multiply (may be negative)
    pub heap_delta_bytes: i64,
    /// Accumulated busy nanoseconds per worker slot
    pub worker_nanos: Vec<u64>,
}

impl RunReport {
    /// Sum of all worker slots, in nanoseconds
    pub fn total_worker_nanos(&self) -> u64 {
        self.worker_nanos.iter().sum()
    }

    /// Mean accumulated busy time per worker slot, in milliseconds
    ///
    /// Total slot time divided by slot count. Workers run concurrently, so
    /// this is not comparable to the elapsed wall-clock time.
    pub fn average_worker_millis(&self) -> f64 {
        self.total_worker_nanos() as f64 / (1e6 * self.worker_nanos.len() as f64)
    }

    /// Sequential baseline time divided by parallel elapsed time
    pub fn speedup(&self) -> f64 {
        self.sequential.as_secs_f64() / self.elapsed.as_secs_f64()
    }

    /// Heap delta in mebibytes
    pub fn heap_delta_mb(&self) -> f64 {
        self.heap_delta_bytes as f64 / (1024.0 * 1024.0)
    }

    fn elapsed_millis(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1e3
    }

    fn sequential_millis(&self) -> f64 {
        self.sequential.as_secs_f64() * 1e3
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Total time: {:.2} ms, memory delta: {:.2} MB",
            self.elapsed_millis(),
            self.heap_delta_mb()
        )?;
        writeln!(
            f,
            "Sequential baseline: {:.2} ms ({:.2}x speedup)",
            self.sequential_millis(),
            self.speedup()
        )?;
        writeln!(f, "Per-worker accumulated time:")?;
        for (worker, &nanos) in self.worker_nanos.iter().enumerate() {
            writeln!(f, "  worker {}: {:.2} ms", worker, nanos as f64 / 1e6)?;
        }
        write!(
            f,
            "Average time per worker: {:.2} ms",
            self.average_worker_millis()
        )
    }
}
