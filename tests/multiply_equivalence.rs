//! Cross-path correctness suite
//!
//! The interesting property of a sequential-vs-parallel benchmark is that
//! both paths compute the same product; this suite pins that down with
//! property tests, together with the algebraic identities around it and
//! the guarantees of the timing table.

use parmul::{Matrix, WorkerTimingTable};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use rand::rngs::StdRng;
use rand::SeedableRng;

const PROPTEST_CASES: u32 = 64;

/// Relative tolerance for comparing the two multiply paths
///
/// They currently share one accumulation loop and agree bit for bit, but
/// the contract only promises floating-point equivalence.
const REL_TOLERANCE: f64 = 1e-9;

fn assert_matrices_close(lhs: &Matrix, rhs: &Matrix) -> Result<(), TestCaseError> {
    prop_assert_eq!(lhs.shape(), rhs.shape());
    for (l, r) in lhs.as_slice().iter().zip(rhs.as_slice()) {
        let scale = l.abs().max(r.abs()).max(1.0);
        prop_assert!(
            (l - r).abs() <= REL_TOLERANCE * scale,
            "cells differ beyond tolerance: {} vs {}",
            l,
            r
        );
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(PROPTEST_CASES))]

    #[test]
    fn parallel_equals_sequential(
        rows in 1usize..24,
        inner in 1usize..24,
        cols in 1usize..24,
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let a = Matrix::random(rows, inner, &mut rng).unwrap();
        let b = Matrix::random(inner, cols, &mut rng).unwrap();

        let timings = WorkerTimingTable::for_current_pool();
        let sequential = a.matmul(&b).unwrap();
        let parallel = a.matmul_parallel(&b, &timings).unwrap();

        assert_matrices_close(&sequential, &parallel)?;
    }

    #[test]
    fn identity_is_neutral_on_both_paths(n in 1usize..16, seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let m = Matrix::random(n, n, &mut rng).unwrap();
        let identity = Matrix::identity(n);
        let timings = WorkerTimingTable::for_current_pool();

        assert_matrices_close(&m.matmul(&identity).unwrap(), &m)?;
        assert_matrices_close(&identity.matmul(&m).unwrap(), &m)?;
        assert_matrices_close(&m.matmul_parallel(&identity, &timings).unwrap(), &m)?;
        assert_matrices_close(&identity.matmul_parallel(&m, &timings).unwrap(), &m)?;
    }

    #[test]
    fn zero_matrix_annihilates(n in 1usize..16, seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let m = Matrix::random(n, n, &mut rng).unwrap();
        let zero = Matrix::zeros(n, n);
        let timings = WorkerTimingTable::for_current_pool();

        prop_assert_eq!(zero.matmul(&m).unwrap(), Matrix::zeros(n, n));
        prop_assert_eq!(zero.matmul_parallel(&m, &timings).unwrap(), Matrix::zeros(n, n));
    }

    #[test]
    fn random_cells_lie_in_unit_interval(
        rows in 1usize..32,
        cols in 1usize..32,
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let m = Matrix::random(rows, cols, &mut rng).unwrap();

        prop_assert_eq!(m.shape(), (rows, cols));
        for &cell in m.as_slice() {
            prop_assert!((0.0..1.0).contains(&cell), "cell {} outside [0, 1)", cell);
        }
    }

    #[test]
    fn timing_table_accumulates_nonzero_total(n in 16usize..32, seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let a = Matrix::random(n, n, &mut rng).unwrap();
        let b = Matrix::random(n, n, &mut rng).unwrap();

        let timings = WorkerTimingTable::for_current_pool();
        a.matmul_parallel(&b, &timings).unwrap();

        // Slots are unsigned, so non-negativity holds by construction; the
        // interesting claim is that some worker recorded work at all.
        prop_assert!(timings.total_nanos() > 0);
        prop_assert_eq!(timings.snapshot().len(), timings.len());
    }
}
