pub mod matmul;

use crate::backend::TileMacEngine;
use crate::dtype::Element;
use crate::error::{Result, TensorError};
use crate::group::SubGroup;
use crate::tile::{Fragment, Layout, MatrixRole};

/// Pure-Rust emulation of a cooperative tile-MAC unit.
///
/// Each operation validates its arguments the way matrix hardware would
/// reject them (wrong role, mismatched tile shapes, out-of-range access,
/// column-major layout) and then runs the per-lane kernels in
/// [`matmul`] for every lane of the group. Intended as the reference engine
/// and fallback.
#[derive(Debug, Clone)]
pub struct CpuTileEngine;

impl CpuTileEngine {
    pub fn new() -> Self {
        CpuTileEngine
    }
}

impl Default for CpuTileEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn check_role(expected: MatrixRole, got: MatrixRole) -> Result<()> {
    if expected != got {
        return Err(TensorError::RoleMismatch { expected, got });
    }
    Ok(())
}

fn check_layout(layout: Layout) -> Result<()> {
    match layout {
        Layout::RowMajor => Ok(()),
        other => Err(TensorError::UnsupportedLayout(other)),
    }
}

/// B and accumulator columns are spread evenly across the lanes.
fn check_lanes(cols: usize, group: &SubGroup) -> Result<()> {
    if group.width() == 0 || cols % group.width() != 0 {
        return Err(TensorError::LaneMismatch {
            cols,
            width: group.width(),
        });
    }
    Ok(())
}

/// A `rows x cols` tile at `offset` with row stride `stride` must fit in a
/// buffer of `len` elements.
fn check_bounds(offset: usize, rows: usize, cols: usize, stride: usize, len: usize) -> Result<()> {
    if rows == 0 || cols == 0 {
        return Ok(());
    }
    if stride < cols {
        return Err(TensorError::InvalidStride { stride, cols });
    }
    let end = (rows - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(offset))
        .and_then(|v| v.checked_add(cols));
    match end {
        Some(end) if end <= len => Ok(()),
        _ => Err(TensorError::OutOfBounds {
            offset,
            rows,
            cols,
            stride,
            len,
        }),
    }
}

impl<E: Element> TileMacEngine<E> for CpuTileEngine {
    fn name(&self) -> &str {
        "cpu"
    }

    fn fill(&self, group: &SubGroup, acc: &mut Fragment<f32>, value: f32) -> Result<()> {
        check_role(MatrixRole::Accumulator, acc.role())?;
        check_lanes(acc.cols(), group)?;
        acc.data_mut().fill(value);
        Ok(())
    }

    fn load(
        &self,
        group: &SubGroup,
        tile: &mut Fragment<E>,
        src: &[E],
        offset: usize,
        stride: usize,
        layout: Layout,
    ) -> Result<()> {
        match tile.role() {
            MatrixRole::A => {}
            MatrixRole::B => check_lanes(tile.cols(), group)?,
            other => {
                return Err(TensorError::Backend(format!(
                    "cannot load into a fragment of role {}",
                    other
                )))
            }
        }
        check_layout(layout)?;
        check_bounds(offset, tile.rows(), tile.cols(), stride, src.len())?;

        for lane in group.lanes() {
            matmul::load_lane(lane, group.width(), tile, src, offset, stride);
        }
        Ok(())
    }

    fn multiply_accumulate(
        &self,
        group: &SubGroup,
        acc: &mut Fragment<f32>,
        a: &Fragment<E>,
        b: &Fragment<E>,
    ) -> Result<()> {
        check_role(MatrixRole::Accumulator, acc.role())?;
        check_role(MatrixRole::A, a.role())?;
        check_role(MatrixRole::B, b.role())?;
        if a.cols() != b.rows() {
            return Err(TensorError::ShapeMismatch {
                expected: (a.cols(), b.cols()),
                got: (b.rows(), b.cols()),
            });
        }
        if acc.rows() != a.rows() || acc.cols() != b.cols() {
            return Err(TensorError::ShapeMismatch {
                expected: (a.rows(), b.cols()),
                got: (acc.rows(), acc.cols()),
            });
        }
        check_lanes(acc.cols(), group)?;

        for lane in group.lanes() {
            matmul::mac_lane(lane, group.width(), acc, a, b);
        }
        Ok(())
    }

    fn store(
        &self,
        group: &SubGroup,
        dst: &mut [f32],
        offset: usize,
        acc: &Fragment<f32>,
        stride: usize,
        layout: Layout,
    ) -> Result<()> {
        check_role(MatrixRole::Accumulator, acc.role())?;
        check_layout(layout)?;
        check_lanes(acc.cols(), group)?;
        check_bounds(offset, acc.rows(), acc.cols(), stride, dst.len())?;

        for lane in group.lanes() {
            matmul::store_lane(lane, group.width(), dst, offset, acc, stride);
        }
        Ok(())
    }
}
