use thiserror::Error;

use crate::tile::{Layout, MatrixRole};

/// Failures raised by matrices and tile-MAC engines.
///
/// From the multiply's point of view every variant is a backend error: it is
/// fatal for the call and is never retried.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TensorError {
    #[error("shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        got: (usize, usize),
    },
    #[error("data length {len} does not match shape [{rows}, {cols}]")]
    DataLength { len: usize, rows: usize, cols: usize },
    #[error("fragment role mismatch: expected {expected}, got {got}")]
    RoleMismatch {
        expected: MatrixRole,
        got: MatrixRole,
    },
    #[error(
        "out of bounds: tile of {rows}x{cols} at offset {offset} with stride {stride} \
         exceeds buffer of {len} elements"
    )]
    OutOfBounds {
        offset: usize,
        rows: usize,
        cols: usize,
        stride: usize,
        len: usize,
    },
    #[error("stride {stride} is narrower than tile width {cols}")]
    InvalidStride { stride: usize, cols: usize },
    #[error("fragment width {cols} cannot be split across {width} lanes")]
    LaneMismatch { cols: usize, width: usize },
    #[error("unsupported layout: {0}")]
    UnsupportedLayout(Layout),
    #[error("{0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, TensorError>;
