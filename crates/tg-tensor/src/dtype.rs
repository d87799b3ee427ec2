use std::fmt::{self, Debug};

use half::bf16;

/// Element types a matrix or tile fragment can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    /// 32-bit floating point. Used for accumulators and the output matrix.
    F32,
    /// 16-bit brain floating point (via the `half` crate). Used for the
    /// reduced-precision operands A and B.
    BF16,
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DType::F32 => write!(f, "f32"),
            DType::BF16 => write!(f, "bf16"),
        }
    }
}

/// A scalar that can live in a [`Matrix`](crate::Matrix) or a
/// [`Fragment`](crate::Fragment).
///
/// All arithmetic is carried out in `f32`; elements only convert in and out.
pub trait Element: Copy + Debug + PartialEq + Send + Sync + 'static {
    const DTYPE: DType;

    fn zero() -> Self;

    fn to_f32(self) -> f32;

    /// Rounds an `f32` to this element type (round-to-nearest-even for bf16).
    fn from_f32(value: f32) -> Self;
}

impl Element for f32 {
    const DTYPE: DType = DType::F32;

    fn zero() -> Self {
        0.0
    }

    fn to_f32(self) -> f32 {
        self
    }

    fn from_f32(value: f32) -> Self {
        value
    }
}

impl Element for bf16 {
    const DTYPE: DType = DType::BF16;

    fn zero() -> Self {
        bf16::ZERO
    }

    fn to_f32(self) -> f32 {
        bf16::to_f32(self)
    }

    fn from_f32(value: f32) -> Self {
        bf16::from_f32(value)
    }
}
