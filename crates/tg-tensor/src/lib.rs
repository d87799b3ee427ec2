//! `tg-tensor` - Dense matrices and the cooperative tile-MAC engine for tile-gemm.
//!
//! This crate provides:
//! - A row-major `Matrix<T>` over `f32` and `bf16` elements
//! - Tile `Fragment`s tagged with their `MatrixRole`
//! - The `SubGroup` scope that lockstep tile operations are issued from
//! - A `TileMacEngine` trait for pluggable multiply-accumulate engines
//! - A reference `CpuTileEngine` implementation

pub mod backend;
pub mod cpu;
pub mod dtype;
pub mod error;
pub mod group;
pub mod matrix;
pub mod shape;
pub mod tile;

// Re-export primary types at the crate root for convenience.
pub use backend::TileMacEngine;
pub use cpu::CpuTileEngine;
pub use dtype::{DType, Element};
pub use error::{Result, TensorError};
pub use group::SubGroup;
pub use half::bf16;
pub use matrix::Matrix;
pub use shape::Shape;
pub use tile::{Fragment, Layout, MatrixRole};
