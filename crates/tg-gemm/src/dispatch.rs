//! Dispatch of the tiled multiply onto execution groups.
//!
//! # Strategy
//!
//! Computes `C = seed + A x B` where A is `[M, K]`, B is `[K, N]` and C is
//! `[M, N]`, all row-major:
//!
//! 1. The [`Grid`] splits C into `TM x TN` tiles; one execution group owns
//!    each tile.
//! 2. A group fills its accumulator with the seed, then walks K in `TK`-sized
//!    steps, loading one A tile (stride K) and one B tile (stride N) per step
//!    and multiply-accumulating them.
//! 3. The accumulator is stored to C at the group's own base, stride N.
//!
//! C is carved into disjoint bands of `TM` rows, one per grid row. With the
//! `parallel` feature the bands run on the rayon pool; groups within a band
//! run in order. No group ever sees another group's output, so no locking is
//! needed. The call returns once every group has finished or the first error
//! has been observed.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tg_tensor::{Element, Fragment, Layout, Matrix, MatrixRole, SubGroup, TileMacEngine};

use crate::config::GemmConfig;
use crate::error::{GemmError, Result};
use crate::grid::{Grid, TileCoord};

/// Summary of one multiply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GemmStats {
    /// Execution groups launched, one per output tile.
    pub groups: usize,
    /// Multiply-accumulate steps per group.
    pub k_steps: usize,
    /// Name of the engine that ran the tiles.
    pub engine: String,
}

/// `C = seed + A x B` on `engine`.
///
/// # Errors
/// Configuration errors (shape or divisibility) are returned before any group
/// runs. Engine failures abort the multiply and are returned as
/// [`GemmError::Backend`]; the content of `c` is then unspecified.
pub fn multiply<E: Element>(
    engine: &dyn TileMacEngine<E>,
    a: &Matrix<E>,
    b: &Matrix<E>,
    c: &mut Matrix<f32>,
    config: &GemmConfig,
) -> Result<()> {
    multiply_with_stats(engine, a, b, c, config).map(|_| ())
}

/// Same as [`multiply`], also reporting how the work was split.
pub fn multiply_with_stats<E: Element>(
    engine: &dyn TileMacEngine<E>,
    a: &Matrix<E>,
    b: &Matrix<E>,
    c: &mut Matrix<f32>,
    config: &GemmConfig,
) -> Result<GemmStats> {
    let grid = validate(a, b, c, config)?;
    let seed = config.accumulator_seed;

    log::debug!(
        "dispatch on {}: {} groups of {} lanes, launch range {:?}",
        engine.name(),
        grid.num_groups(),
        grid.geometry().group_width,
        grid.launch_size(),
    );

    let band_len = grid.band_len();

    #[cfg(feature = "parallel")]
    c.data_mut()
        .par_chunks_mut(band_len)
        .enumerate()
        .try_for_each(|(tile_row, band)| run_band(engine, &grid, a, b, tile_row, band, seed))?;

    #[cfg(not(feature = "parallel"))]
    for (tile_row, band) in c.data_mut().chunks_mut(band_len).enumerate() {
        run_band(engine, &grid, a, b, tile_row, band, seed)?;
    }

    Ok(GemmStats {
        groups: grid.num_groups(),
        k_steps: grid.k_tiles(),
        engine: engine.name().to_string(),
    })
}

/// Check that the three matrices agree and partition the problem.
fn validate<E: Element>(
    a: &Matrix<E>,
    b: &Matrix<E>,
    c: &Matrix<f32>,
    config: &GemmConfig,
) -> Result<Grid> {
    let (m, k) = a.shape().dims();
    let n = b.cols();
    if b.rows() != k {
        return Err(GemmError::ShapeMismatch {
            name: "B",
            expected: (k, n),
            got: b.shape().dims(),
        });
    }
    if c.shape().dims() != (m, n) {
        return Err(GemmError::ShapeMismatch {
            name: "C",
            expected: (m, n),
            got: c.shape().dims(),
        });
    }
    Grid::partition(m, n, k, &config.geometry)
}

/// Run every group of grid row `tile_row`. `band` holds rows
/// `row_base..row_base + TM` of C.
fn run_band<E: Element>(
    engine: &dyn TileMacEngine<E>,
    grid: &Grid,
    a: &Matrix<E>,
    b: &Matrix<E>,
    tile_row: usize,
    band: &mut [f32],
    seed: f32,
) -> Result<()> {
    let band_start = grid.c_offset(&grid.coord(tile_row, 0));
    let width = grid.geometry().group_width;
    for coord in grid.row_coords(tile_row) {
        SubGroup::scope((coord.tile_row, coord.tile_col), width, |group| {
            run_group(engine, group, grid, &coord, a, b, band, band_start, seed)
        })?;
    }
    Ok(())
}

/// The per-group protocol: fill, `K / TK` load-load-mac steps, store.
#[allow(clippy::too_many_arguments)]
fn run_group<E: Element>(
    engine: &dyn TileMacEngine<E>,
    group: &SubGroup,
    grid: &Grid,
    coord: &TileCoord,
    a: &Matrix<E>,
    b: &Matrix<E>,
    band: &mut [f32],
    band_start: usize,
    seed: f32,
) -> Result<()> {
    let geom = grid.geometry();
    let mut sub_a = Fragment::<E>::new(MatrixRole::A, geom.tm, geom.tk);
    let mut sub_b = Fragment::<E>::new(MatrixRole::B, geom.tk, geom.tn);
    let mut sub_c = Fragment::<f32>::new(MatrixRole::Accumulator, geom.tm, geom.tn);

    engine.fill(group, &mut sub_c, seed)?;
    for k_tile in 0..grid.k_tiles() {
        engine.load(
            group,
            &mut sub_a,
            a.data(),
            grid.a_offset(coord, k_tile),
            grid.k(),
            Layout::RowMajor,
        )?;
        engine.load(
            group,
            &mut sub_b,
            b.data(),
            grid.b_offset(coord, k_tile),
            grid.n(),
            Layout::RowMajor,
        )?;
        engine.multiply_accumulate(group, &mut sub_c, &sub_a, &sub_b)?;
    }
    engine.store(
        group,
        band,
        grid.c_offset(coord) - band_start,
        &sub_c,
        grid.n(),
        Layout::RowMajor,
    )?;

    log::trace!(
        "group ({}, {}) stored {}x{} at C[{}, {}]",
        coord.tile_row,
        coord.tile_col,
        geom.tm,
        geom.tn,
        coord.row_base,
        coord.col_base,
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TileGeometry;
    use tg_tensor::{bf16, CpuTileEngine, Shape};

    fn bf_matrix(rows: usize, cols: usize, f: impl Fn(usize, usize) -> f32) -> Matrix<bf16> {
        Matrix::from_fn(Shape::new(rows, cols), |r, c| bf16::from_f32(f(r, c)))
    }

    #[test]
    fn test_identity_times_b() {
        let engine = CpuTileEngine::new();
        let config = GemmConfig::new(TileGeometry::new(2, 2, 2)).with_accumulator_seed(0.0);
        let a = bf_matrix(4, 4, |r, c| if r == c { 1.0 } else { 0.0 });
        let b = bf_matrix(4, 4, |r, c| (r * 4 + c) as f32);
        let mut c = Matrix::zeros(Shape::new(4, 4));

        multiply(&engine, &a, &b, &mut c, &config).unwrap();
        let expected: Vec<f32> = (0..16).map(|v| v as f32).collect();
        assert_eq!(c.data(), expected.as_slice());
    }

    #[test]
    fn test_seed_is_added() {
        let engine = CpuTileEngine::new();
        let config = GemmConfig::new(TileGeometry::new(2, 2, 2));
        let a = bf_matrix(2, 2, |_, _| 0.0);
        let b = bf_matrix(2, 2, |_, _| 0.0);
        let mut c = Matrix::zeros(Shape::new(2, 2));

        multiply(&engine, &a, &b, &mut c, &config).unwrap();
        assert_eq!(c.data(), &[1.0; 4]);
    }

    #[test]
    fn test_stats() {
        let engine = CpuTileEngine::new();
        let config = GemmConfig::default();
        let a = bf_matrix(16, 32, |_, _| 0.5);
        let b = bf_matrix(32, 16, |_, _| 0.5);
        let mut c = Matrix::zeros(Shape::new(16, 16));

        let stats = multiply_with_stats(&engine, &a, &b, &mut c, &config).unwrap();
        assert_eq!(
            stats,
            GemmStats {
                groups: 4,
                k_steps: 2,
                engine: "cpu".to_string()
            }
        );
        // 1 + 32 * 0.25
        assert!(c.data().iter().all(|&v| v == 9.0));
    }

    #[test]
    fn test_inner_dimension_mismatch() {
        let engine = CpuTileEngine::new();
        let a = bf_matrix(16, 32, |_, _| 0.0);
        let b = bf_matrix(16, 16, |_, _| 0.0);
        let mut c = Matrix::zeros(Shape::new(16, 16));

        let err = multiply(&engine, &a, &b, &mut c, &GemmConfig::default()).unwrap_err();
        assert_eq!(
            err,
            GemmError::ShapeMismatch {
                name: "B",
                expected: (32, 16),
                got: (16, 16)
            }
        );
    }

    #[test]
    fn test_output_shape_mismatch() {
        let engine = CpuTileEngine::new();
        let a = bf_matrix(16, 32, |_, _| 0.0);
        let b = bf_matrix(32, 16, |_, _| 0.0);
        let mut c = Matrix::zeros(Shape::new(16, 8));

        let err = multiply(&engine, &a, &b, &mut c, &GemmConfig::default()).unwrap_err();
        assert!(matches!(err, GemmError::ShapeMismatch { name: "C", .. }));
    }
}
