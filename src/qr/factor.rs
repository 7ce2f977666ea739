//! Unpivoted Householder QR factorization

use mdarray::Tensor;

use crate::precision::Precision;
use crate::validate::{self, ValidationError};

use super::householder;

/// Packed QR factorization: R in and above the diagonal of `factors`,
/// Householder vectors below it, reflection coefficients in `taus`.
#[derive(Debug, Clone)]
pub struct QrFactors<T: Precision> {
    pub factors: Tensor<T, (usize, usize)>,
    pub taus: Tensor<T, (usize,)>,
}

/// Orthogonal/upper-triangular factor pair with Q·R equal to the input.
///
/// For an m×n input, `q` is m×m and `r` is m×n (upper-trapezoidal when
/// m < n). Entries of `r` strictly below the main diagonal are exact
/// zeros, and the diagonal of `r` is non-negative.
#[derive(Debug, Clone)]
pub struct Decomposition<T: Precision> {
    pub q: Tensor<T, (usize, usize)>,
    pub r: Tensor<T, (usize, usize)>,
}

/// Error types for the factorization stage
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecompositionError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] ValidationError),
}

/// Householder QR factorization in packed form.
///
/// Runs min(m, n) reflections over a working copy of `matrix`. A column
/// whose pivot and sub-diagonal entries are already zero gets τ = 0 (the
/// identity reflection) and is skipped; rank-deficient input factors
/// normally.
pub fn householder_qr<T: Precision>(matrix: &Tensor<T, (usize, usize)>) -> QrFactors<T> {
    let shape = *matrix.shape();
    let (m, n) = shape;
    let k = m.min(n);

    let mut factors = matrix.clone();
    let mut taus = Tensor::from_elem((k,), T::zero());

    // Scratch column, reused across reflections within this call
    let mut col = vec![T::zero(); m];

    for i in 0..k {
        let len = m - i;
        for idx in 0..len {
            col[idx] = factors[[i + idx, i]];
        }

        let (tau, _beta) = householder::reflector(&mut col[..len]);
        taus[[i]] = tau;

        for idx in 0..len {
            factors[[i + idx, i]] = col[idx];
        }

        if tau != T::zero() && i + 1 < n {
            householder::reflector_apply_to_block(&mut factors, i, i, tau, i + 1, n);
        }
    }

    QrFactors { factors, taus }
}

/// Accumulate the reflections of a packed factorization into the full
/// m×m orthogonal factor.
///
/// Q = H₀·H₁·…·H_{k-1}, built by left-multiplying the identity in reverse
/// order. Reflections with τ = 0 are skipped.
pub fn compute_q<T: Precision>(qr: &QrFactors<T>) -> Tensor<T, (usize, usize)> {
    let (m, _n) = *qr.factors.shape();
    let k = qr.taus.len();

    let mut q = Tensor::from_fn((m, m), |idx| {
        if idx[0] == idx[1] { T::one() } else { T::zero() }
    });

    for i in (0..k).rev() {
        let tau = qr.taus[[i]];
        if tau != T::zero() {
            for j in 0..m {
                let mut vbj = q[[i, j]];
                for ii in (i + 1)..m {
                    vbj = vbj + qr.factors[[ii, i]] * q[[ii, j]];
                }
                vbj = tau * vbj;
                q[[i, j]] = q[[i, j]] - vbj;
                for ii in (i + 1)..m {
                    q[[ii, j]] = q[[ii, j]] - qr.factors[[ii, i]] * vbj;
                }
            }
        }
    }

    q
}

/// Extract the full m×n upper-triangular factor from a packed
/// factorization. Entries below the main diagonal are written as exact
/// zeros, not copied.
pub fn compute_r<T: Precision>(qr: &QrFactors<T>) -> Tensor<T, (usize, usize)> {
    let (m, n) = *qr.factors.shape();

    Tensor::from_fn((m, n), |idx| {
        if idx[1] >= idx[0] {
            qr.factors[[idx[0], idx[1]]]
        } else {
            T::zero()
        }
    })
}

/// Factor a validated matrix into a [`Decomposition`].
///
/// Total over rectangular, non-empty, all-finite input; the emptiness and
/// finiteness checks are repeated here so the stage is safe standalone.
/// Wide input (m < n) is supported: R comes out upper-trapezoidal and Q
/// is still m×m orthogonal.
///
/// After extraction, row i of R and column i of Q are negated wherever
/// R[i,i] < 0. Q·R is unchanged and the diagonal of R comes out
/// non-negative, pinning the sign of the result: factoring twice over
/// equal input yields bit-identical factors.
pub fn factor<T: Precision>(
    matrix: &Tensor<T, (usize, usize)>,
) -> Result<Decomposition<T>, DecompositionError> {
    validate::check_tensor(matrix)?;

    let qr = householder_qr(matrix);
    let mut q = compute_q(&qr);
    let mut r = compute_r(&qr);

    let (m, n) = *r.shape();
    let k = m.min(n);
    for i in 0..k {
        if r[[i, i]] < T::zero() {
            for j in i..n {
                r[[i, j]] = -r[[i, j]];
            }
            for row in 0..m {
                q[[row, i]] = -q[[row, i]];
            }
        }
    }

    Ok(Decomposition { q, r })
}

/// Convenience function for f64 precision
pub fn factor_f64(matrix: &crate::Matrix) -> Result<Decomposition<f64>, DecompositionError> {
    factor(matrix)
}

impl<T: Precision> Decomposition<T> {
    /// Multiply the factors back together (Q·R).
    pub fn reconstruct(&self) -> Tensor<T, (usize, usize)> {
        let (m, inner) = *self.q.shape();
        let (_r_rows, n) = *self.r.shape();

        Tensor::from_fn((m, n), |idx| {
            let mut sum = T::zero();
            for l in 0..inner {
                sum = sum + self.q[[idx[0], l]] * self.r[[l, idx[1]]];
            }
            sum
        })
    }

    /// Count of diagonal entries of R above `rtol` relative to the
    /// largest diagonal magnitude.
    ///
    /// Rank deficiency is not an error anywhere in this crate; this is
    /// the numeric signal a caller can act on.
    pub fn effective_rank(&self, rtol: T) -> usize {
        let (m, n) = *self.r.shape();
        let k = m.min(n);

        let mut max_diag = T::zero();
        for i in 0..k {
            max_diag = Precision::max(max_diag, Precision::abs(self.r[[i, i]]));
        }
        if max_diag == T::zero() {
            return 0;
        }

        let mut rank = 0;
        for i in 0..k {
            if Precision::abs(self.r[[i, i]]) > rtol * max_diag {
                rank += 1;
            }
        }
        rank
    }
}
