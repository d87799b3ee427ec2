use crate::dtype::{DType, Element};
use crate::error::{Result, TensorError};
use crate::shape::Shape;

/// A dense, row-major matrix that owns its elements.
///
/// Dimensions are fixed at construction. Multiplies borrow matrices; they
/// never take ownership.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T: Element> {
    data: Vec<T>,
    shape: Shape,
}

impl<T: Element> Matrix<T> {
    /// Create a matrix from row-major data.
    ///
    /// # Errors
    /// Returns [`TensorError::DataLength`] if `data.len() != shape.numel()`.
    pub fn new(data: Vec<T>, shape: Shape) -> Result<Self> {
        if data.len() != shape.numel() {
            return Err(TensorError::DataLength {
                len: data.len(),
                rows: shape.rows(),
                cols: shape.cols(),
            });
        }
        Ok(Matrix { data, shape })
    }

    /// Create a matrix with every element set to `value`.
    pub fn filled(shape: Shape, value: T) -> Self {
        Matrix {
            data: vec![value; shape.numel()],
            shape,
        }
    }

    /// Create a zero-filled matrix.
    pub fn zeros(shape: Shape) -> Self {
        Self::filled(shape, T::zero())
    }

    /// Create a matrix by evaluating `f(row, col)` for every element in
    /// row-major order.
    pub fn from_fn(shape: Shape, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(shape.numel());
        for row in 0..shape.rows() {
            for col in 0..shape.cols() {
                data.push(f(row, col));
            }
        }
        Matrix { data, shape }
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn rows(&self) -> usize {
        self.shape.rows()
    }

    pub fn cols(&self) -> usize {
        self.shape.cols()
    }

    pub fn dtype(&self) -> DType {
        T::DTYPE
    }

    /// Element at `(row, col)`, or `None` when out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        if row >= self.rows() || col >= self.cols() {
            return None;
        }
        Some(self.data[self.shape.offset(row, col)])
    }

    /// Overwrite the element at `(row, col)`.
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        if row >= self.rows() || col >= self.cols() {
            return Err(TensorError::OutOfBounds {
                offset: row * self.cols() + col,
                rows: 1,
                cols: 1,
                stride: self.cols(),
                len: self.data.len(),
            });
        }
        let offset = self.shape.offset(row, col);
        self.data[offset] = value;
        Ok(())
    }

    /// Row-major backing data.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use half::bf16;

    #[test]
    fn test_new_matrix() {
        let m = Matrix::new(vec![1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0], Shape::new(2, 3)).unwrap();
        assert_eq!(m.rows(), 2);
        assert_eq!(m.cols(), 3);
        assert_eq!(m.dtype(), DType::F32);
        assert_eq!(m.get(1, 2), Some(6.0));
        assert_eq!(m.get(2, 0), None);
    }

    #[test]
    fn test_new_length_mismatch() {
        let err = Matrix::new(vec![1.0f32, 2.0], Shape::new(3, 1)).unwrap_err();
        assert_eq!(
            err,
            TensorError::DataLength {
                len: 2,
                rows: 3,
                cols: 1
            }
        );
    }

    #[test]
    fn test_filled_and_zeros() {
        let ones = Matrix::filled(Shape::new(2, 2), 1.0f32);
        assert_eq!(ones.data(), &[1.0; 4]);

        let z: Matrix<bf16> = Matrix::zeros(Shape::new(1, 3));
        assert_eq!(z.dtype(), DType::BF16);
        assert!(z.data().iter().all(|v| v.to_f32() == 0.0));
    }

    #[test]
    fn test_from_fn_row_major() {
        let m = Matrix::from_fn(Shape::new(2, 3), |r, c| (r * 10 + c) as f32);
        assert_eq!(m.data(), &[0.0, 1.0, 2.0, 10.0, 11.0, 12.0]);
    }

    #[test]
    fn test_set() {
        let mut m: Matrix<f32> = Matrix::zeros(Shape::new(2, 2));
        m.set(1, 0, 42.0).unwrap();
        assert_eq!(m.data(), &[0.0, 0.0, 42.0, 0.0]);
        assert!(m.set(2, 0, 1.0).is_err());
    }
}
