use tg_gemm::{GemmConfig, TileGeometry};

/// Problem run by the checker.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckConfig {
    pub m: usize,
    pub n: usize,
    pub k: usize,
    /// Seed of the `StdRng` that fills A and B.
    pub seed: u64,
    pub gemm: GemmConfig,
}

impl CheckConfig {
    /// A problem two tiles wide along every axis of `geometry`.
    pub fn for_geometry(geometry: TileGeometry) -> Self {
        CheckConfig {
            m: geometry.tm * 2,
            n: geometry.tn * 2,
            k: geometry.tk * 2,
            seed: 0,
            gemm: GemmConfig::new(geometry),
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_dims(mut self, m: usize, n: usize, k: usize) -> Self {
        self.m = m;
        self.n = n;
        self.k = k;
        self
    }
}

impl Default for CheckConfig {
    /// M=16, N=16, K=32 on 8x8x16 tiles.
    fn default() -> Self {
        Self::for_geometry(TileGeometry::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_problem() {
        let c = CheckConfig::default();
        assert_eq!((c.m, c.n, c.k), (16, 16, 32));
        assert_eq!(c.gemm.accumulator_seed, 1.0);
        assert_eq!(c.gemm.tolerance, 1e-5);
    }
}
