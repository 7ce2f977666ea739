//! Input-boundary validation
//!
//! The only place untyped data enters the numeric core. Both entry points
//! produce a rectangular, non-empty, all-finite [`Matrix`] or a positioned
//! [`ValidationError`]; nothing downstream ever coerces or substitutes a
//! value.

use mdarray::Tensor;

use crate::Matrix;
use crate::precision::Precision;

/// Ways a candidate matrix can be malformed.
///
/// Every variant is a client-side input defect; none is retried or
/// recovered internally.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("matrix has no rows")]
    Empty,

    #[error("row {row} is empty")]
    EmptyRow { row: usize },

    #[error("row {row} has {found} elements, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("element ({row}, {col}) is not finite")]
    NonFinite { row: usize, col: usize },

    #[cfg(feature = "json")]
    #[error("input is not an array of rows")]
    NotAnArray,

    #[cfg(feature = "json")]
    #[error("row {row} is not an array")]
    RowNotAnArray { row: usize },

    #[cfg(feature = "json")]
    #[error("element ({row}, {col}) is not a number")]
    NotANumber { row: usize, col: usize },
}

/// Validate a row-of-rows candidate and convert it into a [`Matrix`].
///
/// Checks, in order: at least one row, every row non-empty and of the same
/// length as the first, every element finite. NaN and ±infinity are
/// rejected, never treated as zero.
pub fn matrix_from_rows(rows: &[Vec<f64>]) -> Result<Matrix, ValidationError> {
    if rows.is_empty() {
        return Err(ValidationError::Empty);
    }
    let ncols = rows[0].len();
    for (i, row) in rows.iter().enumerate() {
        if row.is_empty() {
            return Err(ValidationError::EmptyRow { row: i });
        }
        if row.len() != ncols {
            return Err(ValidationError::RaggedRow {
                row: i,
                expected: ncols,
                found: row.len(),
            });
        }
        for (j, &value) in row.iter().enumerate() {
            if !value.is_finite() {
                return Err(ValidationError::NonFinite { row: i, col: j });
            }
        }
    }
    Ok(Tensor::from_fn((rows.len(), ncols), |idx| {
        rows[idx[0]][idx[1]]
    }))
}

/// Validate a fully untyped JSON value and convert it into a [`Matrix`].
///
/// Rejects non-array input, non-array rows and non-numeric cells (string,
/// null, bool, nested array, object) with the failing position, then runs
/// the same shape and finiteness checks as [`matrix_from_rows`].
#[cfg(feature = "json")]
pub fn parse_matrix(value: &serde_json::Value) -> Result<Matrix, ValidationError> {
    let outer = value.as_array().ok_or(ValidationError::NotAnArray)?;
    if outer.is_empty() {
        return Err(ValidationError::Empty);
    }

    let mut rows: Vec<Vec<f64>> = Vec::with_capacity(outer.len());
    let mut ncols = 0;
    for (i, row_value) in outer.iter().enumerate() {
        let cells = row_value
            .as_array()
            .ok_or(ValidationError::RowNotAnArray { row: i })?;
        if cells.is_empty() {
            return Err(ValidationError::EmptyRow { row: i });
        }
        if i == 0 {
            ncols = cells.len();
        } else if cells.len() != ncols {
            return Err(ValidationError::RaggedRow {
                row: i,
                expected: ncols,
                found: cells.len(),
            });
        }

        let mut row = Vec::with_capacity(cells.len());
        for (j, cell) in cells.iter().enumerate() {
            let x = cell
                .as_f64()
                .ok_or(ValidationError::NotANumber { row: i, col: j })?;
            if !x.is_finite() {
                return Err(ValidationError::NonFinite { row: i, col: j });
            }
            row.push(x);
        }
        rows.push(row);
    }

    Ok(Tensor::from_fn((rows.len(), ncols), |idx| {
        rows[idx[0]][idx[1]]
    }))
}

/// Cheap revalidation of an already-constructed tensor.
///
/// Rectangularity is inherent to the tensor type, so only emptiness and
/// finiteness are checked. Lets the factorization and analysis stages stay
/// safe when invoked standalone.
pub(crate) fn check_tensor<T: Precision>(
    matrix: &Tensor<T, (usize, usize)>,
) -> Result<(), ValidationError> {
    let (m, n) = *matrix.shape();
    if m == 0 {
        return Err(ValidationError::Empty);
    }
    if n == 0 {
        return Err(ValidationError::EmptyRow { row: 0 });
    }
    for i in 0..m {
        for j in 0..n {
            if !Precision::is_finite(matrix[[i, j]]) {
                return Err(ValidationError::NonFinite { row: i, col: j });
            }
        }
    }
    Ok(())
}
