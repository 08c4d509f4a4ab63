//! Dense matrix type and the two multiplication paths under benchmark
//!
//! Provides a row-major `f64` matrix with a classic triple-loop sequential
//! multiply and a rayon row-partitioned parallel multiply that records
//! per-row compute time into a [`WorkerTimingTable`].
//!
//! # Example
//!
//! ```
//! use parmul::Matrix;
//!
//! let a = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
//! let b = Matrix::from_vec(2, 2, vec![5.0, 6.0, 7.0, 8.0]).unwrap();
//! let c = a.matmul(&b).unwrap();
//! assert_eq!(c.get(0, 0), Some(&19.0));
//! ```

use std::time::Instant;

use rand::Rng;
use rayon::prelude::*;

use crate::error::{ParmulError, Result};
use crate::timing::WorkerTimingTable;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// A dense 2D matrix of `f64` with row-major storage
///
/// Data is stored in row-major format (C-style), where consecutive elements
/// in memory belong to the same row. The multiply loops assume this layout:
/// the parallel path hands each worker a contiguous output row.
///
/// # Storage Layout
///
/// For a 2x3 matrix:
/// ```text
/// [[a, b, c],
///  [d, e, f]]
/// ```
/// Data is stored as: [a, b, c, d, e, f]
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Creates a zero-initialized matrix with the given dimensions
    ///
    /// # Example
    ///
    /// ```
    /// use parmul::Matrix;
    ///
    /// let m = Matrix::new(3, 4);
    /// assert_eq!(m.rows(), 3);
    /// assert_eq!(m.cols(), 4);
    /// ```
    pub fn new(rows: usize, cols: usize) -> Self {
        Matrix {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Creates a matrix from a vector of data in row-major order
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `data.len() != rows * cols`
    ///
    /// # Example
    ///
    /// ```
    /// use parmul::Matrix;
    ///
    /// let m = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    /// assert_eq!(m.get(1, 0), Some(&3.0));
    /// ```
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(ParmulError::InvalidInput(format!(
                "Data length {} does not match matrix dimensions {}x{} (expected {})",
                data.len(),
                rows,
                cols,
                rows * cols
            )));
        }

        Ok(Matrix { rows, cols, data })
    }

    /// Creates a matrix from a slice by copying the data
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `data.len() != rows * cols`
    pub fn from_slice(rows: usize, cols: usize, data: &[f64]) -> Result<Self> {
        Self::from_vec(rows, cols, data.to_vec())
    }

    /// Creates a matrix filled with zeros
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Matrix::new(rows, cols)
    }

    /// Creates an identity matrix (square matrix with 1s on diagonal)
    ///
    /// # Example
    ///
    /// ```
    /// use parmul::Matrix;
    ///
    /// let m = Matrix::identity(3);
    /// assert_eq!(m.get(0, 0), Some(&1.0));
    /// assert_eq!(m.get(0, 1), Some(&0.0));
    /// ```
    pub fn identity(n: usize) -> Self {
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            data[i * n + i] = 1.0;
        }
        Matrix {
            rows: n,
            cols: n,
            data,
        }
    }

    /// Creates a matrix with every cell drawn independently from uniform `[0, 1)`
    ///
    /// The generator is injected so callers can seed it for reproducible runs;
    /// the benchmark harness defaults to entropy seeding.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `rows` or `cols` is zero
    ///
    /// # Example
    ///
    /// ```
    /// use parmul::Matrix;
    /// use rand::rngs::StdRng;
    /// use rand::SeedableRng;
    ///
    /// let mut rng = StdRng::seed_from_u64(42);
    /// let m = Matrix::random(2, 3, &mut rng).unwrap();
    /// assert!(m.as_slice().iter().all(|&x| (0.0..1.0).contains(&x)));
    /// ```
    pub fn random<R: Rng>(rows: usize, cols: usize, rng: &mut R) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(ParmulError::InvalidInput(format!(
                "Matrix dimensions must be positive, got {rows}x{cols}"
            )));
        }

        let data = (0..rows * cols).map(|_| rng.gen::<f64>()).collect();
        Ok(Matrix { rows, cols, data })
    }

    /// Returns the number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the matrix dimensions as (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns a reference to the element at (row, col), or `None` if out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<&f64> {
        if row < self.rows && col < self.cols {
            self.data.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Returns a mutable reference to the element at (row, col), or `None` if out of bounds
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut f64> {
        if row < self.rows && col < self.cols {
            self.data.get_mut(row * self.cols + col)
        } else {
            None
        }
    }

    /// Returns the underlying data as a flat row-major slice
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Sequential matrix multiplication
    ///
    /// Computes `C = A × B` with the classic triple nested loop:
    /// `C[i,j] = Σ_k A[i,k] × B[k,j]`. This is the baseline path the
    /// benchmark compares the parallel variant against.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if `self.cols != other.rows`
    ///
    /// # Example
    ///
    /// ```
    /// use parmul::Matrix;
    ///
    /// let a = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    /// let b = Matrix::from_vec(2, 2, vec![5.0, 6.0, 7.0, 8.0]).unwrap();
    /// let c = a.matmul(&b).unwrap();
    ///
    /// // [[1, 2],   [[5, 6],   [[19, 22],
    /// //  [3, 4]] ×  [7, 8]] =  [43, 50]]
    /// assert_eq!(c.as_slice(), &[19.0, 22.0, 43.0, 50.0]);
    /// ```
    #[cfg_attr(feature = "tracing", instrument(skip(self, other), fields(dims = %format!("{}x{} @ {}x{}", self.rows, self.cols, other.rows, other.cols))))]
    pub fn matmul(&self, other: &Matrix) -> Result<Matrix> {
        self.check_multiply_dims(other)?;

        let cols = other.cols;
        let mut result = Matrix::zeros(self.rows, cols);
        for i in 0..self.rows {
            let out_row = &mut result.data[i * cols..(i + 1) * cols];
            self.multiply_row_into(other, i, out_row);
        }

        Ok(result)
    }

    /// Row-partitioned parallel matrix multiplication
    ///
    /// Same algebraic contract as [`Matrix::matmul`], but the outer loop over
    /// output rows is fanned out across rayon's worker pool. Each unit of work
    /// is one full output row; the middle and inner loops for that row run
    /// serially within a worker. Rows map to disjoint output slices, so
    /// workers write without locking, and the rayon join guarantees all
    /// writes are visible once this returns.
    ///
    /// For every row the elapsed compute time is added atomically into
    /// `timings` at the executing worker's slot (worker index modulo table
    /// length). Slot totals are therefore aliased sums over all rows any
    /// worker mapping to that slot has processed, an approximation of
    /// per-worker busy time rather than a strict per-thread total.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if `self.cols != other.rows`
    ///
    /// # Example
    ///
    /// ```
    /// use parmul::{Matrix, WorkerTimingTable};
    ///
    /// let a = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    /// let b = Matrix::identity(2);
    /// let timings = WorkerTimingTable::new(4);
    /// let c = a.matmul_parallel(&b, &timings).unwrap();
    /// assert_eq!(c.as_slice(), a.as_slice());
    /// ```
    #[cfg_attr(feature = "tracing", instrument(skip(self, other, timings), fields(dims = %format!("{}x{} @ {}x{}", self.rows, self.cols, other.rows, other.cols))))]
    pub fn matmul_parallel(&self, other: &Matrix, timings: &WorkerTimingTable) -> Result<Matrix> {
        self.check_multiply_dims(other)?;

        let cols = other.cols;
        let mut result = Matrix::zeros(self.rows, cols);
        if self.rows == 0 || cols == 0 {
            return Ok(result);
        }

        result
            .data
            .par_chunks_mut(cols)
            .enumerate()
            .for_each(|(i, out_row)| {
                let started = Instant::now();
                self.multiply_row_into(other, i, out_row);
                timings.record_current_worker(started.elapsed());
            });

        Ok(result)
    }

    fn check_multiply_dims(&self, other: &Matrix) -> Result<()> {
        if self.cols != other.rows {
            return Err(ParmulError::DimensionMismatch {
                left_rows: self.rows,
                left_cols: self.cols,
                right_rows: other.rows,
                right_cols: other.cols,
            });
        }
        Ok(())
    }

    /// Computes one output row with the shared accumulation loop
    ///
    /// Both multiplication paths go through this, so sequential and parallel
    /// results are produced by the identical sequence of float operations.
    fn multiply_row_into(&self, other: &Matrix, row: usize, out: &mut [f64]) {
        let lhs = &self.data[row * self.cols..(row + 1) * self.cols];
        for (j, slot) in out.iter_mut().enumerate() {
            let mut sum = 0.0;
            for (k, &a_ik) in lhs.iter().enumerate() {
                sum += a_ik * other.data[k * other.cols + j];
            }
            *slot = sum;
        }
    }
}
