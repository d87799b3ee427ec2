//! `tg-gemm` - Tiled matrix multiply on a cooperative tile-MAC engine.
//!
//! - [`Grid`] partitions an `M x K x N` problem into output tiles
//! - [`multiply`] dispatches one execution group per tile
//! - [`reference_matmul`] and [`verify`] check the result against a scalar loop

pub mod config;
pub mod dispatch;
pub mod error;
pub mod grid;
pub mod init;
pub mod reference;
pub mod verify;

pub use config::{GemmConfig, TileGeometry};
pub use dispatch::{multiply, multiply_with_stats, GemmStats};
pub use error::{GemmError, Result};
pub use grid::{Grid, TileCoord};
pub use init::random_matrix;
pub use reference::reference_matmul;
pub use verify::{verify, Verification};
