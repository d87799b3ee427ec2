use rand::Rng;
use tg_tensor::{Element, Matrix, Shape};

/// A `rows x cols` matrix of uniform values in `[0, 1)`, rounded to `E`.
///
/// The caller owns the random source, so a seeded `StdRng` reproduces the
/// same matrix on every run.
pub fn random_matrix<E: Element, R: Rng>(rows: usize, cols: usize, rng: &mut R) -> Matrix<E> {
    Matrix::from_fn(Shape::new(rows, cols), |_, _| E::from_f32(rng.gen::<f32>()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tg_tensor::bf16;

    #[test]
    fn test_values_in_unit_interval() {
        let mut rng = StdRng::seed_from_u64(7);
        let m: Matrix<bf16> = random_matrix(16, 32, &mut rng);
        assert_eq!(m.shape(), Shape::new(16, 32));
        // bf16 rounding may land exactly on 1.0.
        assert!(m.data().iter().all(|v| (0.0..=1.0).contains(&v.to_f32())));
    }

    #[test]
    fn test_same_seed_same_matrix() {
        let a: Matrix<bf16> = random_matrix(8, 8, &mut StdRng::seed_from_u64(42));
        let b: Matrix<bf16> = random_matrix(8, 8, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seed_differs() {
        let a: Matrix<f32> = random_matrix(8, 8, &mut StdRng::seed_from_u64(1));
        let b: Matrix<f32> = random_matrix(8, 8, &mut StdRng::seed_from_u64(2));
        assert_ne!(a, b);
    }
}
