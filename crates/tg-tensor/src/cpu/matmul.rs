// Per-lane tile kernels used by CpuTileEngine.
//
// Lane `l` of a group owns fragment columns `l, l + width, l + 2 * width, ...`.
// Every lane runs the same kernel with the same arguments, so a loop over
// lanes is a faithful sequential rendition of lockstep execution.

use crate::dtype::Element;
use crate::tile::Fragment;

/// Columns of a `cols`-wide fragment owned by `lane`.
pub(crate) fn lane_columns(lane: usize, width: usize, cols: usize) -> impl Iterator<Item = usize> {
    (lane..cols).step_by(width.max(1))
}

/// Copy the lane's columns of a row-major tile starting at `src[offset]`.
pub(crate) fn load_lane<E: Element>(
    lane: usize,
    width: usize,
    tile: &mut Fragment<E>,
    src: &[E],
    offset: usize,
    stride: usize,
) {
    for col in lane_columns(lane, width, tile.cols()) {
        for row in 0..tile.rows() {
            tile.set(row, col, src[offset + row * stride + col]);
        }
    }
}

/// `acc[.., col] += a * b[.., col]` for the lane's columns.
///
/// The sum runs in ascending `k`, adding one product at a time in `f32`.
pub(crate) fn mac_lane<E: Element>(
    lane: usize,
    width: usize,
    acc: &mut Fragment<f32>,
    a: &Fragment<E>,
    b: &Fragment<E>,
) {
    let inner = a.cols();
    for col in lane_columns(lane, width, acc.cols()) {
        for row in 0..acc.rows() {
            let mut sum = acc.get(row, col);
            for k in 0..inner {
                sum += a.get(row, k).to_f32() * b.get(k, col).to_f32();
            }
            acc.set(row, col, sum);
        }
    }
}

/// Write the lane's columns of the accumulator to `dst[offset..]`.
pub(crate) fn store_lane(
    lane: usize,
    width: usize,
    dst: &mut [f32],
    offset: usize,
    acc: &Fragment<f32>,
    stride: usize,
) {
    for col in lane_columns(lane, width, acc.cols()) {
        for row in 0..acc.rows() {
            dst[offset + row * stride + col] = acc.get(row, col);
        }
    }
}
