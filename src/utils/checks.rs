//! Decomposition audit predicates
//!
//! Checks that a factor pair actually behaves like a QR decomposition.
//! Used by the test suites and exported for callers that want to audit a
//! result themselves; the analyzer deliberately does not run these.

use mdarray::Tensor;

use crate::precision::Precision;
use crate::qr::Decomposition;
use super::norms;

/// Check that M^T·M is the identity within `tol`, entrywise
pub fn is_orthogonal<T: Precision>(matrix: &Tensor<T, (usize, usize)>, tol: T) -> bool {
    let (m, n) = *matrix.shape();

    for i in 0..n {
        for j in 0..n {
            let mut sum = T::zero();
            for row in 0..m {
                sum = sum + matrix[[row, i]] * matrix[[row, j]];
            }
            let expected = if i == j { T::one() } else { T::zero() };
            if Precision::abs(sum - expected) > tol {
                return false;
            }
        }
    }

    true
}

/// Check that every entry strictly below the main diagonal is exactly zero
pub fn is_upper_triangular<T: Precision>(matrix: &Tensor<T, (usize, usize)>) -> bool {
    let (m, n) = *matrix.shape();

    for j in 0..n {
        for i in (j + 1)..m {
            if matrix[[i, j]] != T::zero() {
                return false;
            }
        }
    }

    true
}

/// Check that ||Q·R - A||_F <= tol * ||A||_F (absolute when A is zero)
pub fn reconstructs<T: Precision>(
    original: &Tensor<T, (usize, usize)>,
    q: &Tensor<T, (usize, usize)>,
    r: &Tensor<T, (usize, usize)>,
    tol: T,
) -> bool {
    let (m, n) = *original.shape();
    let (qm, qn) = *q.shape();
    let (rm, rn) = *r.shape();

    if qm != m || rn != n || qn != rm {
        return false;
    }

    let mut diff_norm_sq = T::zero();
    for i in 0..m {
        for j in 0..n {
            let mut reconstructed = T::zero();
            for l in 0..qn {
                reconstructed = reconstructed + q[[i, l]] * r[[l, j]];
            }
            let diff = original[[i, j]] - reconstructed;
            diff_norm_sq = diff_norm_sq + diff * diff;
        }
    }

    let diff_norm = Precision::sqrt(diff_norm_sq);
    let orig_norm = norms::norm_frobenius(original);

    if orig_norm == T::zero() {
        diff_norm <= tol
    } else {
        diff_norm <= tol * orig_norm
    }
}

/// Full audit of a decomposition against its input: shapes line up, Q is
/// orthogonal, R is upper-triangular, and Q·R reconstructs the input.
pub fn audit<T: Precision>(
    original: &Tensor<T, (usize, usize)>,
    decomposition: &Decomposition<T>,
    tol: T,
) -> bool {
    let (m, _n) = *original.shape();
    let (qm, qn) = *decomposition.q.shape();
    if qm != m || qn != m {
        return false;
    }

    is_orthogonal(&decomposition.q, tol)
        && is_upper_triangular(&decomposition.r)
        && reconstructs(original, &decomposition.q, &decomposition.r, tol)
}
