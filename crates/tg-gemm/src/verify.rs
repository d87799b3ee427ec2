use tg_tensor::Matrix;

use crate::error::{GemmError, Result};

/// Outcome of comparing a computed matrix against its reference.
///
/// A failed comparison is a reportable result, not an error.
#[derive(Debug, Clone, PartialEq)]
pub struct Verification {
    pub passed: bool,
    /// Elements whose difference exceeds the tolerance.
    pub mismatches: usize,
    pub max_abs_diff: f32,
    /// `(row, col)` of the first mismatch in row-major order.
    pub first_mismatch: Option<(usize, usize)>,
    pub tolerance: f32,
}

/// Element-wise `|actual - expected| <= tolerance`.
///
/// NaN differences count as mismatches.
///
/// # Errors
/// Returns [`GemmError::ShapeMismatch`] when the shapes differ.
pub fn verify(actual: &Matrix<f32>, expected: &Matrix<f32>, tolerance: f32) -> Result<Verification> {
    if actual.shape() != expected.shape() {
        return Err(GemmError::ShapeMismatch {
            name: "C",
            expected: expected.shape().dims(),
            got: actual.shape().dims(),
        });
    }

    let shape = actual.shape();
    let mut mismatches = 0;
    let mut max_abs_diff = 0.0f32;
    let mut first_mismatch = None;

    for (i, (x, y)) in actual.data().iter().zip(expected.data()).enumerate() {
        let diff = (x - y).abs();
        max_abs_diff = max_abs_diff.max(diff);
        if diff.is_nan() || diff > tolerance {
            mismatches += 1;
            if first_mismatch.is_none() {
                first_mismatch = Some(shape.position(i));
            }
        }
    }

    if let Some((row, col)) = first_mismatch {
        log::warn!(
            "verification failed: {mismatches} element(s) off by more than {tolerance}, \
             first at ({row}, {col}), max diff {max_abs_diff}"
        );
    }

    Ok(Verification {
        passed: mismatches == 0,
        mismatches,
        max_abs_diff,
        first_mismatch,
        tolerance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tg_tensor::Shape;

    fn ones(rows: usize, cols: usize) -> Matrix<f32> {
        Matrix::filled(Shape::new(rows, cols), 1.0)
    }

    #[test]
    fn test_identical_passes() {
        let v = verify(&ones(2, 2), &ones(2, 2), 1e-5).unwrap();
        assert!(v.passed);
        assert_eq!(v.mismatches, 0);
        assert_eq!(v.max_abs_diff, 0.0);
        assert_eq!(v.first_mismatch, None);
    }

    #[test]
    fn test_within_tolerance_passes() {
        let mut c = ones(2, 2);
        c.set(0, 1, 1.0 + 5e-6).unwrap();
        assert!(verify(&c, &ones(2, 2), 1e-5).unwrap().passed);
    }

    #[test]
    fn test_single_corruption_fails() {
        let mut c = ones(3, 3);
        c.set(2, 1, 1.5).unwrap();
        let v = verify(&c, &ones(3, 3), 1e-5).unwrap();
        assert!(!v.passed);
        assert_eq!(v.mismatches, 1);
        assert_eq!(v.first_mismatch, Some((2, 1)));
        assert_eq!(v.max_abs_diff, 0.5);
    }

    #[test]
    fn test_nan_fails() {
        let mut c = ones(1, 2);
        c.set(0, 0, f32::NAN).unwrap();
        assert!(!verify(&c, &ones(1, 2), 1e-5).unwrap().passed);
    }

    #[test]
    fn test_shape_mismatch_is_error() {
        assert!(verify(&ones(2, 2), &ones(2, 3), 1e-5).is_err());
    }
}
