use std::fmt::Debug;

use crate::dtype::Element;
use crate::error::Result;
use crate::group::SubGroup;
use crate::tile::{Fragment, Layout};

/// Trait for cooperative tile multiply-accumulate engines (CPU emulation,
/// matrix hardware, etc.).
///
/// `E` is the operand element type of the A and B fragments; accumulators
/// are always `f32`. Every operation is issued by a whole [`SubGroup`] at
/// once. Buffers are passed as the full backing slice plus the element offset
/// of the tile's first element; rows are `stride` elements apart.
///
/// Callers must only rely on [`Layout::RowMajor`]. Any error is fatal for the
/// multiply in progress.
pub trait TileMacEngine<E: Element>: Send + Sync + Debug {
    /// Returns the name of this engine (e.g., "cpu").
    fn name(&self) -> &str;

    /// Set every element of the accumulator to `value`.
    fn fill(&self, group: &SubGroup, acc: &mut Fragment<f32>, value: f32) -> Result<()>;

    /// Load an A or B fragment from `src[offset..]`.
    ///
    /// - `stride`: distance in elements between consecutive tile rows
    /// - `layout`: layout of the tile inside `src`
    fn load(
        &self,
        group: &SubGroup,
        tile: &mut Fragment<E>,
        src: &[E],
        offset: usize,
        stride: usize,
        layout: Layout,
    ) -> Result<()>;

    /// `acc += a * b`, with `a` of role A and `b` of role B.
    fn multiply_accumulate(
        &self,
        group: &SubGroup,
        acc: &mut Fragment<f32>,
        a: &Fragment<E>,
        b: &Fragment<E>,
    ) -> Result<()>;

    /// Write the accumulator to `dst[offset..]` with the given row stride.
    fn store(
        &self,
        group: &SubGroup,
        dst: &mut [f32],
        offset: usize,
        acc: &Fragment<f32>,
        stride: usize,
        layout: Layout,
    ) -> Result<()>;
}
