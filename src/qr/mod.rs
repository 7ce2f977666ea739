//! Unpivoted Householder QR decomposition

pub mod factor;
pub mod householder;

pub use factor::{
    Decomposition, DecompositionError, QrFactors, compute_q, compute_r, factor, factor_f64,
    householder_qr,
};
pub use householder::{reflector, reflector_apply_to_block};
