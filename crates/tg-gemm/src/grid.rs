use std::ops::Range;

use crate::config::TileGeometry;
use crate::error::{GemmError, Result};

/// Position of one output tile in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoord {
    pub tile_row: usize,
    pub tile_col: usize,
    /// First row of the tile in A and C.
    pub row_base: usize,
    /// First column of the tile in B and C.
    pub col_base: usize,
}

/// Decomposition of an `M x K x N` multiply into `TM x TN` output tiles,
/// each reduced over `K / TK` inner steps.
///
/// A `Grid` only exists for problems whose dimensions are exact multiples of
/// the tile extents, so every tile is full and no two tiles overlap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    n: usize,
    k: usize,
    geometry: TileGeometry,
    grid_rows: usize,
    grid_cols: usize,
    k_tiles: usize,
}

fn exact_tiles(dim: &'static str, size: usize, tile: usize) -> Result<usize> {
    if size == 0 {
        return Err(GemmError::Configuration {
            reason: format!("{dim} must be non-zero"),
        });
    }
    if size % tile != 0 {
        return Err(GemmError::NotDivisible { dim, size, tile });
    }
    Ok(size / tile)
}

impl Grid {
    /// Partition an `M x N` output with inner dimension `K`.
    ///
    /// # Errors
    /// Returns a configuration error when the geometry is invalid, any
    /// dimension is zero, or `M % TM`, `N % TN` or `K % TK` is non-zero.
    pub fn partition(m: usize, n: usize, k: usize, geometry: &TileGeometry) -> Result<Grid> {
        geometry.validate()?;
        let grid_rows = exact_tiles("M", m, geometry.tm)?;
        let grid_cols = exact_tiles("N", n, geometry.tn)?;
        let k_tiles = exact_tiles("K", k, geometry.tk)?;

        log::debug!(
            "grid: M={m} N={n} K={k} tile={}x{}x{} -> {grid_rows}x{grid_cols} groups, {k_tiles} k-steps",
            geometry.tm,
            geometry.tn,
            geometry.tk,
        );

        Ok(Grid {
            n,
            k,
            geometry: *geometry,
            grid_rows,
            grid_cols,
            k_tiles,
        })
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn geometry(&self) -> &TileGeometry {
        &self.geometry
    }

    /// Tiles along M.
    pub fn grid_rows(&self) -> usize {
        self.grid_rows
    }

    /// Tiles along N.
    pub fn grid_cols(&self) -> usize {
        self.grid_cols
    }

    /// Inner steps each group runs.
    pub fn k_tiles(&self) -> usize {
        self.k_tiles
    }

    pub fn num_groups(&self) -> usize {
        self.grid_rows * self.grid_cols
    }

    /// Lane-level launch range `(rows, lanes)`: one row per tile row and
    /// `group_width` lanes per tile column.
    pub fn launch_size(&self) -> (usize, usize) {
        (self.grid_rows, self.grid_cols * self.geometry.group_width)
    }

    /// Shape of one execution group in the launch range.
    pub fn group_size(&self) -> (usize, usize) {
        (1, self.geometry.group_width)
    }

    pub fn coord(&self, tile_row: usize, tile_col: usize) -> TileCoord {
        TileCoord {
            tile_row,
            tile_col,
            row_base: tile_row * self.geometry.tm,
            col_base: tile_col * self.geometry.tn,
        }
    }

    /// Every tile, row by row.
    pub fn coords(&self) -> impl Iterator<Item = TileCoord> + '_ {
        (0..self.grid_rows)
            .flat_map(move |r| (0..self.grid_cols).map(move |c| self.coord(r, c)))
    }

    /// Tiles of one grid row, i.e. the groups writing one band of C.
    pub fn row_coords(&self, tile_row: usize) -> impl Iterator<Item = TileCoord> + '_ {
        (0..self.grid_cols).map(move |c| self.coord(tile_row, c))
    }

    /// Rows and columns of C written by the tile.
    pub fn footprint(&self, coord: &TileCoord) -> (Range<usize>, Range<usize>) {
        (
            coord.row_base..coord.row_base + self.geometry.tm,
            coord.col_base..coord.col_base + self.geometry.tn,
        )
    }

    /// Offset of the A tile for step `k_tile`: `row_base * K + k_tile * TK`.
    pub fn a_offset(&self, coord: &TileCoord, k_tile: usize) -> usize {
        coord.row_base * self.k + k_tile * self.geometry.tk
    }

    /// Offset of the B tile for step `k_tile`: `k_tile * TK * N + col_base`.
    pub fn b_offset(&self, coord: &TileCoord, k_tile: usize) -> usize {
        k_tile * self.geometry.tk * self.n + coord.col_base
    }

    /// Offset the accumulator is stored to: `row_base * N + col_base`.
    ///
    /// The tile's own row base is used, so the stored block is exactly
    /// [`Grid::footprint`].
    pub fn c_offset(&self, coord: &TileCoord) -> usize {
        coord.row_base * self.n + coord.col_base
    }

    /// Number of elements of one band of C (the `TM` rows of a grid row).
    pub fn band_len(&self) -> usize {
        self.geometry.tm * self.n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_grid() -> Grid {
        Grid::partition(16, 16, 32, &TileGeometry::default()).unwrap()
    }

    #[test]
    fn test_partition_dims() {
        let g = default_grid();
        assert_eq!(g.grid_rows(), 2);
        assert_eq!(g.grid_cols(), 2);
        assert_eq!(g.k_tiles(), 2);
        assert_eq!(g.num_groups(), 4);
        assert_eq!(g.launch_size(), (2, 16));
        assert_eq!(g.group_size(), (1, 8));
    }

    #[test]
    fn test_coords_row_major() {
        let g = default_grid();
        let coords: Vec<(usize, usize)> = g.coords().map(|c| (c.row_base, c.col_base)).collect();
        assert_eq!(coords, vec![(0, 0), (0, 8), (8, 0), (8, 8)]);
    }

    #[test]
    fn test_offsets() {
        let g = default_grid();
        let c = g.coord(1, 1);
        assert_eq!(g.a_offset(&c, 0), 8 * 32);
        assert_eq!(g.a_offset(&c, 1), 8 * 32 + 16);
        assert_eq!(g.b_offset(&c, 0), 8);
        assert_eq!(g.b_offset(&c, 1), 16 * 16 + 8);
        assert_eq!(g.c_offset(&c), 8 * 16 + 8);
    }

    #[test]
    fn test_store_offset_uses_own_row_base() {
        let g = default_grid();
        for c in g.coords() {
            let (rows, cols) = g.footprint(&c);
            assert_eq!(g.c_offset(&c), rows.start * g.n() + cols.start);
            // Last element written stays inside C.
            let last = g.c_offset(&c) + (g.geometry().tm - 1) * g.n() + g.geometry().tn - 1;
            assert!(last < g.grid_rows() * g.geometry().tm * g.n());
        }
    }

    #[test]
    fn test_band_len() {
        assert_eq!(default_grid().band_len(), 128);
    }

    #[test]
    fn test_not_divisible() {
        let geom = TileGeometry::default();
        assert_eq!(
            Grid::partition(12, 16, 32, &geom),
            Err(GemmError::NotDivisible {
                dim: "M",
                size: 12,
                tile: 8
            })
        );
        assert!(matches!(
            Grid::partition(16, 20, 32, &geom),
            Err(GemmError::NotDivisible { dim: "N", .. })
        ));
        assert!(matches!(
            Grid::partition(16, 16, 24, &geom),
            Err(GemmError::NotDivisible { dim: "K", .. })
        ));
    }

    #[test]
    fn test_zero_dimension() {
        let err = Grid::partition(0, 16, 32, &TileGeometry::default()).unwrap_err();
        assert!(err.is_configuration());
        assert_eq!(
            err,
            GemmError::Configuration {
                reason: "M must be non-zero".to_string()
            }
        );
    }
}
