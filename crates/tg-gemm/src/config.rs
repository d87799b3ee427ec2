use crate::error::{GemmError, Result};

/// Shape of the tiles handed to the tile-MAC engine and the width of the
/// execution groups that drive it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileGeometry {
    /// Rows of the A and accumulator tiles.
    pub tm: usize,
    /// Columns of the B and accumulator tiles.
    pub tn: usize,
    /// Inner dimension: columns of A tiles, rows of B tiles.
    pub tk: usize,
    /// Lanes per execution group. Must equal `tn`.
    pub group_width: usize,
}

impl TileGeometry {
    /// Create a geometry with `group_width = tn`.
    pub fn new(tm: usize, tn: usize, tk: usize) -> Self {
        TileGeometry {
            tm,
            tn,
            tk,
            group_width: tn,
        }
    }

    /// Set the group width.
    #[must_use]
    pub fn with_group_width(mut self, group_width: usize) -> Self {
        self.group_width = group_width;
        self
    }

    /// Check the geometry on its own, without any problem size.
    pub fn validate(&self) -> Result<()> {
        if self.tm == 0 || self.tn == 0 || self.tk == 0 {
            return Err(GemmError::Configuration {
                reason: format!(
                    "tile extents must be non-zero: TM={}, TN={}, TK={}",
                    self.tm, self.tn, self.tk
                ),
            });
        }
        if self.group_width != self.tn {
            return Err(GemmError::GroupWidthMismatch {
                width: self.group_width,
                tn: self.tn,
            });
        }
        Ok(())
    }
}

impl Default for TileGeometry {
    /// 8x16 A tiles, 16x8 B tiles, 8-lane groups.
    fn default() -> Self {
        TileGeometry::new(8, 8, 16)
    }
}

/// Configuration for one multiply call.
#[derive(Debug, Clone, PartialEq)]
pub struct GemmConfig {
    /// Tile shape and group width.
    pub geometry: TileGeometry,
    /// Value every accumulator (and the reference) starts from. The product
    /// computed is `seed + A * B`.
    pub accumulator_seed: f32,
    /// Absolute per-element tolerance used by verification.
    pub tolerance: f32,
}

impl GemmConfig {
    pub fn new(geometry: TileGeometry) -> Self {
        GemmConfig {
            geometry,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_geometry(mut self, geometry: TileGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    #[must_use]
    pub fn with_accumulator_seed(mut self, seed: f32) -> Self {
        self.accumulator_seed = seed;
        self
    }

    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance;
        self
    }
}

impl Default for GemmConfig {
    fn default() -> Self {
        GemmConfig {
            geometry: TileGeometry::default(),
            accumulator_seed: 1.0,
            tolerance: 1e-5,
        }
    }
}
