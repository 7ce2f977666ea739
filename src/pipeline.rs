//! One-call orchestration: validate, factor, analyze
//!
//! Chains the three stages over a single input and owns the crate-level
//! error surface. The stages stay independently callable; this module
//! only composes them.

use crate::Matrix;
use crate::analyze::{self, AnalysisError, Specification};
use crate::qr::{Decomposition, DecompositionError, factor};
use crate::validate::{self, ValidationError};

/// Any failure the pipeline can produce.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Decomposition(#[from] DecompositionError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

impl Error {
    /// True when the failure is the caller's malformed input rather than
    /// an internal condition. An embedding layer can map this to its
    /// client-error status without inspecting variants.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Error::Validation(_) | Error::Decomposition(DecompositionError::InvalidInput(_))
        )
    }
}

/// Factor pair plus its summary record.
#[derive(Debug, Clone)]
pub struct QrAnalysis {
    pub decomposition: Decomposition<f64>,
    pub specification: Specification<f64>,
}

/// Factor a validated matrix and summarize the factors in one call.
pub fn qr_specifications(matrix: &Matrix) -> Result<QrAnalysis, Error> {
    let decomposition = factor(matrix)?;
    let specification = analyze::analyze(&decomposition.q, &decomposition.r)?;
    Ok(QrAnalysis {
        decomposition,
        specification,
    })
}

/// Validate a row-of-rows candidate, then factor and summarize.
pub fn qr_specifications_rows(rows: &[Vec<f64>]) -> Result<QrAnalysis, Error> {
    let matrix = validate::matrix_from_rows(rows)?;
    qr_specifications(&matrix)
}

/// Validate a fully untyped JSON value, then factor and summarize.
#[cfg(feature = "json")]
pub fn qr_specifications_value(value: &serde_json::Value) -> Result<QrAnalysis, Error> {
    let matrix = validate::parse_matrix(value)?;
    qr_specifications(&matrix)
}
