//! Vector and matrix norm computations

use mdarray::Tensor;

use crate::precision::Precision;

/// Compute the 2-norm (Euclidean norm) of a vector
pub fn norm_2<T: Precision>(vec: &[T]) -> T {
    let mut sum = T::zero();
    for &val in vec {
        sum = sum + val * val;
    }
    Precision::sqrt(sum)
}

/// Compute the Frobenius norm of a matrix
pub fn norm_frobenius<T: Precision>(mat: &Tensor<T, (usize, usize)>) -> T {
    let (m, n) = *mat.shape();
    let mut sum = T::zero();
    for i in 0..m {
        for j in 0..n {
            let val = mat[[i, j]];
            sum = sum + val * val;
        }
    }
    Precision::sqrt(sum)
}

/// Compute the maximum absolute value in a matrix
pub fn norm_max<T: Precision>(mat: &Tensor<T, (usize, usize)>) -> T {
    let (m, n) = *mat.shape();
    let mut max_val = T::zero();
    for i in 0..m {
        for j in 0..n {
            let abs_val = Precision::abs(mat[[i, j]]);
            if abs_val > max_val {
                max_val = abs_val;
            }
        }
    }
    max_val
}
