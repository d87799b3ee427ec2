use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GemmError {
    #[error("invalid configuration: {reason}")]
    Configuration { reason: String },
    #[error("{dim}={size} is not divisible by tile extent {tile}")]
    NotDivisible {
        dim: &'static str,
        size: usize,
        tile: usize,
    },
    #[error("group width {width} must equal tile width TN={tn}")]
    GroupWidthMismatch { width: usize, tn: usize },
    #[error("matrix {name} has shape {got:?}, expected {expected:?}")]
    ShapeMismatch {
        name: &'static str,
        expected: (usize, usize),
        got: (usize, usize),
    },
    #[error("backend error: {0}")]
    Backend(#[from] tg_tensor::TensorError),
}

impl GemmError {
    /// True for errors raised by validation before any group is dispatched.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, GemmError::Backend(_))
    }
}

pub type Result<T> = std::result::Result<T, GemmError>;
