//! Householder reflection utilities

use mdarray::Tensor;

use crate::precision::Precision;
use crate::utils::norms;

/// Compute a Householder reflection vector and coefficient in place.
///
/// Given a vector x, computes a reflection H = I - τvv^T such that
/// Hx = [β, 0, ..., 0]^T with β = -ν and ν = sign(x₀)·||x||. On return,
/// x[0] holds β and x[1..] holds the tail of v (the leading 1 is
/// implicit).
///
/// Taking the pivot sign from x₀ keeps the divisor x₀ + ν away from
/// cancellation. A zero vector yields τ = 0, the identity reflection.
///
/// Returns (τ, β).
pub fn reflector<T: Precision>(x: &mut [T]) -> (T, T) {
    let n = x.len();
    if n == 0 {
        return (T::zero(), T::zero());
    }

    let x0 = x[0];
    let norm_x = norms::norm_2(x);

    if norm_x == T::zero() {
        return (T::zero(), T::zero());
    }

    // ν = sign(x0) * ||x||, so x0 + ν never cancels
    let nu = if x0 >= T::zero() { norm_x } else { -norm_x };
    let x0_new = x0 + nu;
    x[0] = -nu;

    for i in 1..n {
        x[i] = x[i] / x0_new;
    }

    let tau = x0_new / nu;

    (tau, -nu)
}

/// Apply a packed Householder reflection to a block of columns.
///
/// The reflection vector lives in column `v_col` of `a`, rows
/// `row0 + 1..`, with an implicit leading 1 at `row0`. Applies
/// H = I - τvv^T from the left to columns `col_start..col_end`, rows
/// `row0..`.
pub fn reflector_apply_to_block<T: Precision>(
    a: &mut Tensor<T, (usize, usize)>,
    row0: usize,
    v_col: usize,
    tau: T,
    col_start: usize,
    col_end: usize,
) {
    let (m, _n) = *a.shape();

    for j in col_start..col_end {
        // vaj = τ * (A(row0, j) + v[row0+1..] · A[row0+1.., j])
        let mut vaj = a[[row0, j]];
        for i in (row0 + 1)..m {
            vaj = vaj + a[[i, v_col]] * a[[i, j]];
        }
        vaj = tau * vaj;

        a[[row0, j]] = a[[row0, j]] - vaj;
        for i in (row0 + 1)..m {
            a[[i, j]] = a[[i, j]] - vaj * a[[i, v_col]];
        }
    }
}
