//! # householder-qr: QR factorization with factor statistics
//!
//! Factors a dense real matrix A into an orthogonal Q and an
//! upper-triangular R via Householder reflections, then summarizes the
//! factor pair: pooled max/min/sum/average over every element of Q and R,
//! plus a diagonality flag for each factor.
//!
//! The crate is three stateless stages with no shared mutable state:
//!
//! 1. [`validate`] — the only place untyped data enters the numeric core;
//!    produces a rectangular, non-empty, all-finite [`Matrix`].
//! 2. [`qr`] — unpivoted Householder factorization; total over validated
//!    input, rank deficiency included.
//! 3. [`analyze`] — pooled statistics and diagonality over any validated
//!    matrix pair.
//!
//! [`pipeline`] chains the three and exposes a single error surface that
//! distinguishes malformed input from everything else, so an embedding
//! layer can map failures to its own status scheme without the core
//! knowing about transports.

pub mod analyze;
pub mod pipeline;
pub mod precision;
pub mod qr;
pub mod utils;
pub mod validate;

pub use analyze::{
    AnalysisError, Specification, DEFAULT_TOLERANCE, analyze, analyze_with_tolerance, is_diagonal,
};
pub use pipeline::{Error, QrAnalysis, qr_specifications, qr_specifications_rows};
#[cfg(feature = "json")]
pub use pipeline::qr_specifications_value;
pub use precision::{Precision, TwoFloatPrecision};
pub use qr::{
    Decomposition, DecompositionError, QrFactors, compute_q, compute_r, factor, factor_f64,
    householder_qr,
};
pub use utils::{is_orthogonal, is_upper_triangular, norm_2, norm_frobenius, norm_max};
pub use validate::{ValidationError, matrix_from_rows};
#[cfg(feature = "json")]
pub use validate::parse_matrix;

// Re-export mdarray types
pub use mdarray::{DTensor, Tensor};

// Type aliases for convenience
pub type Matrix = Tensor<f64, (usize, usize)>;
pub type Vector = Tensor<f64, (usize,)>;
