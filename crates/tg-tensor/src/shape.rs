use std::fmt;

/// The shape of a dense, row-major 2-D matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: usize,
    cols: usize,
}

impl Shape {
    pub fn new(rows: usize, cols: usize) -> Self {
        Shape { rows, cols }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of elements.
    pub fn numel(&self) -> usize {
        self.rows * self.cols
    }

    /// Row stride of the row-major layout, i.e. the column count.
    pub fn stride(&self) -> usize {
        self.cols
    }

    /// Linear offset of element `(row, col)`.
    pub fn offset(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Inverse of [`Shape::offset`].
    pub fn position(&self, offset: usize) -> (usize, usize) {
        (offset / self.cols, offset % self.cols)
    }

    pub fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.rows, self.cols)
    }
}

impl From<(usize, usize)> for Shape {
    fn from((rows, cols): (usize, usize)) -> Self {
        Shape::new(rows, cols)
    }
}
