//! Factorization properties: reconstruction, orthogonality, triangularity,
//! determinism, sign convention, and shape edge cases

use approx::assert_abs_diff_eq;
use householder_qr::precision::TwoFloatPrecision;
use householder_qr::utils::{is_orthogonal, is_upper_triangular, norm_max, reconstructs};
use householder_qr::{Matrix, Tensor, factor, factor_f64};

// ===== Helper Functions =====

/// Build an f64 matrix from row slices
fn from_rows(rows: &[&[f64]]) -> Matrix {
    Tensor::from_fn((rows.len(), rows[0].len()), |idx| rows[idx[0]][idx[1]])
}

/// Create identity matrix
fn eye(n: usize) -> Matrix {
    Tensor::from_fn((n, n), |idx| if idx[0] == idx[1] { 1.0 } else { 0.0 })
}

/// Maximum absolute elementwise difference
fn max_abs_diff(a: &Matrix, b: &Matrix) -> f64 {
    let (m, n) = *a.shape();
    let mut max_val = 0.0_f64;
    for i in 0..m {
        for j in 0..n {
            max_val = max_val.max((a[[i, j]] - b[[i, j]]).abs());
        }
    }
    max_val
}

/// Convert an f64 matrix to TwoFloatPrecision
fn to_twofloat(matrix: &Matrix) -> Tensor<TwoFloatPrecision, (usize, usize)> {
    let (m, n) = *matrix.shape();
    Tensor::from_fn((m, n), |idx| {
        TwoFloatPrecision::from_f64(matrix[[idx[0], idx[1]]])
    })
}

// ===== Reconstruction and structure =====

#[test]
fn test_square_reconstruction() {
    let a = from_rows(&[&[2.0, -1.0, 3.0], &[4.0, 1.0, -2.0], &[-3.0, 5.0, 1.0]]);
    let d = factor_f64(&a).unwrap();

    assert!(is_orthogonal(&d.q, 1e-12));
    assert!(is_upper_triangular(&d.r));
    assert!(reconstructs(&a, &d.q, &d.r, 1e-12));

    // elementwise bound scaled by the input magnitude
    assert!(max_abs_diff(&a, &d.reconstruct()) < 1e-12 * norm_max(&a));
}

#[test]
fn test_tall_reconstruction_known_r() {
    // Golub & Van Loan worked example: R diagonal is (2, 5, 4)
    let a = from_rows(&[
        &[1.0, -1.0, 4.0],
        &[1.0, 4.0, -2.0],
        &[1.0, 4.0, 2.0],
        &[1.0, -1.0, 0.0],
    ]);
    let d = factor_f64(&a).unwrap();

    assert_eq!(*d.q.shape(), (4, 4));
    assert_eq!(*d.r.shape(), (4, 3));

    assert_abs_diff_eq!(d.r[[0, 0]], 2.0, epsilon = 1e-12);
    assert_abs_diff_eq!(d.r[[0, 1]], 3.0, epsilon = 1e-12);
    assert_abs_diff_eq!(d.r[[0, 2]], 2.0, epsilon = 1e-12);
    assert_abs_diff_eq!(d.r[[1, 1]], 5.0, epsilon = 1e-12);
    assert_abs_diff_eq!(d.r[[1, 2]], -2.0, epsilon = 1e-12);
    assert_abs_diff_eq!(d.r[[2, 2]], 4.0, epsilon = 1e-12);

    assert!(is_orthogonal(&d.q, 1e-12));
    assert!(is_upper_triangular(&d.r));
    assert!(reconstructs(&a, &d.q, &d.r, 1e-12));
}

#[test]
fn test_wide_reconstruction() {
    let a = from_rows(&[&[1.0, 2.0, 3.0, 4.0], &[5.0, 6.0, 7.0, 8.0]]);
    let d = factor_f64(&a).unwrap();

    // Q stays square; R is upper-trapezoidal
    assert_eq!(*d.q.shape(), (2, 2));
    assert_eq!(*d.r.shape(), (2, 4));
    assert!(is_orthogonal(&d.q, 1e-12));
    assert!(is_upper_triangular(&d.r));
    assert!(reconstructs(&a, &d.q, &d.r, 1e-12));
}

#[test]
fn test_single_element() {
    let a = from_rows(&[&[-7.0]]);
    let d = factor_f64(&a).unwrap();

    assert_abs_diff_eq!(d.r[[0, 0]], 7.0, epsilon = 1e-15);
    assert_abs_diff_eq!(d.q[[0, 0]], -1.0, epsilon = 1e-15);
}

#[test]
fn test_single_row_and_column() {
    let row = from_rows(&[&[3.0, -1.0, 2.0]]);
    let d = factor_f64(&row).unwrap();
    assert!(reconstructs(&row, &d.q, &d.r, 1e-12));
    assert!(d.r[[0, 0]] >= 0.0);

    let col = from_rows(&[&[3.0], &[4.0]]);
    let d = factor_f64(&col).unwrap();
    assert_abs_diff_eq!(d.r[[0, 0]], 5.0, epsilon = 1e-12);
    assert_abs_diff_eq!(d.r[[1, 0]], 0.0, epsilon = 1e-15);
    assert!(reconstructs(&col, &d.q, &d.r, 1e-12));
}

// ===== Triangularity is exact, not small =====

#[test]
fn test_below_diagonal_is_bitwise_zero() {
    let a = from_rows(&[&[2.0, -1.0], &[4.0, 1.0], &[-3.0, 5.0]]);
    let d = factor_f64(&a).unwrap();

    let (m, n) = *d.r.shape();
    for j in 0..n {
        for i in (j + 1)..m {
            assert_eq!(d.r[[i, j]], 0.0);
        }
    }
}

// ===== Sign convention =====

#[test]
fn test_identity_factors_to_identity() {
    let a = eye(3);
    let d = factor_f64(&a).unwrap();

    assert!(max_abs_diff(&d.q, &eye(3)) < 1e-15);
    assert!(max_abs_diff(&d.r, &eye(3)) < 1e-15);
}

#[test]
fn test_r_diagonal_never_negative() {
    let cases = [
        from_rows(&[&[-2.0, 1.0], &[0.0, -3.0]]),
        from_rows(&[&[0.0, 1.0], &[1.0, 0.0]]),
        from_rows(&[&[-1.0, -2.0, -3.0], &[-4.0, -5.0, -6.0]]),
    ];

    for a in &cases {
        let d = factor_f64(a).unwrap();
        let (m, n) = *d.r.shape();
        for i in 0..m.min(n) {
            assert!(d.r[[i, i]] >= 0.0);
        }
        assert!(reconstructs(a, &d.q, &d.r, 1e-12));
    }
}

// ===== Determinism =====

#[test]
fn test_factor_is_bitwise_deterministic() {
    let a = from_rows(&[&[0.1, 0.2, 0.3], &[0.4, 0.5, 0.6], &[0.7, 0.8, 10.0]]);
    let first = factor_f64(&a).unwrap();
    let second = factor_f64(&a).unwrap();

    for i in 0..3 {
        for j in 0..3 {
            assert_eq!(first.q[[i, j]].to_bits(), second.q[[i, j]].to_bits());
            assert_eq!(first.r[[i, j]].to_bits(), second.r[[i, j]].to_bits());
        }
    }
}

// ===== Degenerate and rank-deficient input =====

#[test]
fn test_zero_matrix() {
    let a = Tensor::from_elem((3, 2), 0.0);
    let d = factor_f64(&a).unwrap();

    assert!(max_abs_diff(&d.q, &eye(3)) < 1e-15);
    assert!(reconstructs(&a, &d.q, &d.r, 1e-12));
    assert_eq!(d.effective_rank(1e-10), 0);
}

#[test]
fn test_rank_deficient_still_factors() {
    // column 3 = 2*column 2 - column 1
    let a = from_rows(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0], &[7.0, 8.0, 9.0]]);
    let d = factor_f64(&a).unwrap();

    assert!(is_orthogonal(&d.q, 1e-12));
    assert!(is_upper_triangular(&d.r));
    assert!(reconstructs(&a, &d.q, &d.r, 1e-12));
    assert_eq!(d.effective_rank(1e-10), 2);
}

#[test]
fn test_already_triangular_input() {
    let a = from_rows(&[&[2.0, 1.0], &[0.0, 3.0]]);
    let d = factor_f64(&a).unwrap();

    assert!(max_abs_diff(&d.r, &a) < 1e-12);
    assert!(max_abs_diff(&d.q, &eye(2)) < 1e-12);
}

// ===== Extended precision =====

#[test]
fn test_twofloat_factorization() {
    let a = from_rows(&[&[2.0, -1.0], &[4.0, 1.0], &[-3.0, 5.0]]);
    let a_tf = to_twofloat(&a);
    let d = factor(&a_tf).unwrap();

    let tol = TwoFloatPrecision::from_f64(1e-20);
    assert!(is_orthogonal(&d.q, tol));
    assert!(is_upper_triangular(&d.r));
    assert!(reconstructs(&a_tf, &d.q, &d.r, tol));
}
