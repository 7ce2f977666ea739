//! Shared numeric utilities

pub mod checks;
pub mod norms;

pub use checks::{audit, is_orthogonal, is_upper_triangular, reconstructs};
pub use norms::{norm_2, norm_frobenius, norm_max};
