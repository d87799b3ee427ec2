//! `tg-check` - End-to-end check of the tiled multiply.
//!
//! Fills A and B from a seeded RNG, multiplies them on a tile-MAC engine,
//! recomputes the product with the scalar reference and compares the two.

mod context;
mod types;

pub use context::CheckConfig;
pub use types::CheckStatus;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tg_gemm::{
    multiply_with_stats, random_matrix, reference_matmul, verify, GemmStats, Result, Verification,
};
use tg_tensor::{bf16, CpuTileEngine, Matrix, Shape, TileMacEngine};

/// Everything produced by one check.
#[derive(Debug, Clone)]
pub struct CheckReport {
    pub status: CheckStatus,
    pub verification: Verification,
    pub stats: GemmStats,
}

/// Run the check on the CPU engine.
pub fn run(config: &CheckConfig) -> Result<CheckReport> {
    run_on(&CpuTileEngine::new(), config, |_| {})
}

/// Run the check on `engine`. `inspect` sees the computed C before it is
/// compared against the reference.
pub fn run_on(
    engine: &dyn TileMacEngine<bf16>,
    config: &CheckConfig,
    inspect: impl FnOnce(&mut Matrix<f32>),
) -> Result<CheckReport> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let a: Matrix<bf16> = random_matrix(config.m, config.k, &mut rng);
    let b: Matrix<bf16> = random_matrix(config.k, config.n, &mut rng);
    let seed = config.gemm.accumulator_seed;
    let mut c = Matrix::filled(Shape::new(config.m, config.n), seed);

    let expected = reference_matmul(&a, &b, seed)?;
    let stats = multiply_with_stats(engine, &a, &b, &mut c, &config.gemm)?;
    log::info!(
        "multiplied {}x{}x{} on {} in {} groups",
        config.m,
        config.k,
        config.n,
        stats.engine,
        stats.groups
    );

    inspect(&mut c);

    let verification = verify(&c, &expected, config.gemm.tolerance)?;
    Ok(CheckReport {
        status: CheckStatus::from(&verification),
        verification,
        stats,
    })
}
