//! Parmul: Sequential vs Row-Parallel Dense Matrix Multiply Micro-Benchmark
//!
//! **Parmul** measures how a classic triple-loop `f64` matrix multiply
//! behaves when its outer row loop is fanned out across rayon's worker
//! pool. One benchmark iteration:
//!
//! 1. Generates two random square matrices (uniform `[0, 1)` cells).
//! 2. Times the sequential multiply as a baseline.
//! 3. Times the parallel multiply, accumulating each row's compute time
//!    into a fixed-size per-worker table.
//! 4. Reports wall-clock time, heap memory delta, and the per-worker
//!    time distribution.
//!
//! # Design Principles
//!
//! - **Identical arithmetic on both paths**: sequential and parallel runs
//!   share one row-accumulation loop, so their results match bit for bit.
//! - **Disjoint writes, no locks**: each worker owns its output rows; the
//!   only shared state is the atomic timing table.
//! - **Measurements over machinery**: results are computed, timed, and
//!   discarded. Nothing is persisted.
//!
//! # Quick Start
//!
//! ```rust
//! use parmul::{Matrix, WorkerTimingTable};
//!
//! let a = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
//! let b = Matrix::from_vec(2, 2, vec![5.0, 6.0, 7.0, 8.0]).unwrap();
//!
//! let timings = WorkerTimingTable::for_current_pool();
//! let c = a.matmul_parallel(&b, &timings).unwrap();
//! assert_eq!(c.as_slice(), &[19.0, 22.0, 43.0, 50.0]);
//! ```
//!
//! # Running the Benchmark
//!
//! The full harness lives behind [`MatrixBenchmark`]; the
//! `benchmark_report` example runs one default-size iteration and prints
//! the report, and `benches/matmul_bench.rs` drives both paths under
//! Criterion.

pub mod error;
pub mod harness;
pub mod matrix;
pub mod memory;
pub mod timing;

pub use error::{ParmulError, Result};
pub use harness::{BenchmarkConfig, MatrixBenchmark, RunReport, DEFAULT_SIZE};
pub use matrix::Matrix;
pub use memory::TrackingAllocator;
pub use timing::WorkerTimingTable;
