use std::fmt;

use crate::dtype::{DType, Element};

/// Memory layout of a tile inside its backing buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layout {
    /// Elements of one row are contiguous; consecutive rows are `stride` apart.
    RowMajor,
    /// Elements of one column are contiguous. Engines are not required to
    /// support it.
    ColMajor,
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layout::RowMajor => write!(f, "row_major"),
            Layout::ColMajor => write!(f, "col_major"),
        }
    }
}

/// Which operand of `acc += a * b` a fragment plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatrixRole {
    /// Left operand, `TM x TK`.
    A,
    /// Right operand, `TK x TN`.
    B,
    /// Running sum, `TM x TN`.
    Accumulator,
}

impl fmt::Display for MatrixRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixRole::A => write!(f, "a"),
            MatrixRole::B => write!(f, "b"),
            MatrixRole::Accumulator => write!(f, "accumulator"),
        }
    }
}

/// A tile held by one execution group.
///
/// Conceptually the elements are spread across the lanes of the group; the
/// storage here is a plain row-major block and engines decide how lanes map
/// onto it. Fragments are transient and never outlive one group's run.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment<T: Element> {
    role: MatrixRole,
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Element> Fragment<T> {
    /// Create a zeroed fragment of `rows x cols`.
    pub fn new(role: MatrixRole, rows: usize, cols: usize) -> Self {
        Fragment {
            role,
            rows,
            cols,
            data: vec![T::zero(); rows * cols],
        }
    }

    pub fn role(&self) -> MatrixRole {
        self.role
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn dtype(&self) -> DType {
        T::DTYPE
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Indexes directly; callers check bounds before touching a fragment.
    pub(crate) fn get(&self, row: usize, col: usize) -> T {
        self.data[row * self.cols + col]
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, value: T) {
        self.data[row * self.cols + col] = value;
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }
}
