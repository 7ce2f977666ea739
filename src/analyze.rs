//! Summary statistics and structure predicates over a factor pair
//!
//! Pools every element of two matrices into one multiset and derives
//! max/min/sum/average, plus a per-matrix diagonality flag. The inputs are
//! any two validated matrices; whether they actually form a QR pair is not
//! checked here.

use mdarray::Tensor;

use crate::precision::Precision;

/// Absolute tolerance below which an entry counts as zero.
///
/// Reflection arithmetic leaves rounding residue in the factors, so the
/// diagonality test compares against this rather than exact zero.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Pooled statistics and diagonality flags for a factor pair.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Specification<T> {
    pub max_val: T,
    pub min_val: T,
    pub average: T,
    pub sum_total: T,
    pub is_q_diagonal: bool,
    pub is_r_diagonal: bool,
}

/// Error types for the analysis stage
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    #[error("matrix has no elements")]
    EmptyInput,
}

/// Analyze a factor pair with [`DEFAULT_TOLERANCE`].
pub fn analyze<T: Precision>(
    q: &Tensor<T, (usize, usize)>,
    r: &Tensor<T, (usize, usize)>,
) -> Result<Specification<T>, AnalysisError> {
    analyze_with_tolerance(q, r, T::from_f64(DEFAULT_TOLERANCE))
}

/// Analyze a factor pair with an explicit diagonality tolerance.
///
/// Element order never affects the result, and repeated calls over the
/// same inputs return identical records. Zero-element input is rejected
/// here even though the validation stage normally precludes it, because
/// this stage is independently invokable.
pub fn analyze_with_tolerance<T: Precision>(
    q: &Tensor<T, (usize, usize)>,
    r: &Tensor<T, (usize, usize)>,
    tol: T,
) -> Result<Specification<T>, AnalysisError> {
    let (qm, qn) = *q.shape();
    let (rm, rn) = *r.shape();
    if qm * qn == 0 || rm * rn == 0 {
        return Err(AnalysisError::EmptyInput);
    }

    let mut max_val = q[[0, 0]];
    let mut min_val = q[[0, 0]];
    let mut sum_total = T::zero();

    for mat in [q, r] {
        let (m, n) = *mat.shape();
        for i in 0..m {
            for j in 0..n {
                let val = mat[[i, j]];
                max_val = Precision::max(max_val, val);
                min_val = Precision::min(min_val, val);
                sum_total = sum_total + val;
            }
        }
    }

    let count = qm * qn + rm * rn;
    let average = sum_total / T::from_f64(count as f64);

    Ok(Specification {
        max_val,
        min_val,
        average,
        sum_total,
        is_q_diagonal: is_diagonal(q, tol),
        is_r_diagonal: is_diagonal(r, tol),
    })
}

/// True iff every entry off the main diagonal is within `tol` of zero.
///
/// The row ≠ col rule is applied to rectangular matrices as-is; squareness
/// is not required.
pub fn is_diagonal<T: Precision>(matrix: &Tensor<T, (usize, usize)>, tol: T) -> bool {
    let (m, n) = *matrix.shape();

    for i in 0..m {
        for j in 0..n {
            if i != j && Precision::abs(matrix[[i, j]]) > tol {
                return false;
            }
        }
    }

    true
}
