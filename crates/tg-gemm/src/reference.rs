use tg_tensor::{Element, Matrix, Shape};

use crate::error::{GemmError, Result};

/// Scalar reference for the tiled multiply.
///
/// Seeds every element of D with `seed`, then runs the textbook triple loop
/// `D[i][j] += A[i][k] * B[k][j]` in `f32`, `k` ascending.
pub fn reference_matmul<E: Element>(a: &Matrix<E>, b: &Matrix<E>, seed: f32) -> Result<Matrix<f32>> {
    let (m, k) = a.shape().dims();
    let n = b.cols();
    if b.rows() != k {
        return Err(GemmError::ShapeMismatch {
            name: "B",
            expected: (k, n),
            got: b.shape().dims(),
        });
    }

    let (a, b) = (a.data(), b.data());
    let mut d = Matrix::filled(Shape::new(m, n), seed);
    let out = d.data_mut();
    for i in 0..m {
        for j in 0..n {
            let mut sum = out[i * n + j];
            for p in 0..k {
                sum += a[i * k + p].to_f32() * b[p * n + j].to_f32();
            }
            out[i * n + j] = sum;
        }
    }
    Ok(d)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_basic() {
        // [1,2;3,4] @ [5,6;7,8] = [19,22;43,50]
        let a = Matrix::new(vec![1.0f32, 2.0, 3.0, 4.0], Shape::new(2, 2)).unwrap();
        let b = Matrix::new(vec![5.0f32, 6.0, 7.0, 8.0], Shape::new(2, 2)).unwrap();
        let d = reference_matmul(&a, &b, 0.0).unwrap();
        assert_eq!(d.data(), &[19.0, 22.0, 43.0, 50.0]);
    }

    #[test]
    fn test_reference_seed() {
        let a = Matrix::new(vec![1.0f32, 2.0, 3.0, 4.0], Shape::new(2, 2)).unwrap();
        let b = Matrix::new(vec![1.0f32, 0.0, 0.0, 1.0], Shape::new(2, 2)).unwrap();
        let d = reference_matmul(&a, &b, 1.0).unwrap();
        assert_eq!(d.data(), &[2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_reference_mismatch() {
        let a: Matrix<f32> = Matrix::zeros(Shape::new(1, 3));
        let b: Matrix<f32> = Matrix::zeros(Shape::new(2, 2));
        assert!(reference_matmul(&a, &b, 0.0).is_err());
    }
}
