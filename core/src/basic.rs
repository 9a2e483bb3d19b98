use crate::rand::{FastRand, hash2, hash3};
use crate::{Grid2, Grid3, NoiseError, NoiseGenerator};

// Constant-value "noise"; useful as a baseline layer in an octave stack
pub struct FlatNoise {
    value: f32,
}

impl FlatNoise {
    pub fn new(value: f32) -> Self {
        Self { value }
    }
}

impl NoiseGenerator for FlatNoise {
    fn generate2(&self, grid: &mut Grid2<f32>) -> Result<(), NoiseError> {
        grid.fill(self.value);
        Ok(())
    }

    fn generate3(&self, grid: &mut Grid3<f32>) -> Result<(), NoiseError> {
        grid.fill(self.value);
        Ok(())
    }
}

// Uncorrelated per-cell noise: every cell draws its own hash-seeded unit
// value, neighbors share nothing
pub struct WhiteNoise {
    seed: i32,
}

impl WhiteNoise {
    pub fn new(seed: i32) -> Self {
        Self { seed }
    }
}

impl NoiseGenerator for WhiteNoise {
    fn generate2(&self, grid: &mut Grid2<f32>) -> Result<(), NoiseError> {
        let seed = self.seed;
        grid.fill_with(|x, y| FastRand::new(hash2(x, y, seed)).next_unit());
        Ok(())
    }

    fn generate3(&self, grid: &mut Grid3<f32>) -> Result<(), NoiseError> {
        let seed = self.seed;
        grid.fill_with(|x, y, z| FastRand::new(hash3(x, y, z, seed)).next_unit());
        Ok(())
    }
}

// Same per-cell hash-seeded values as WhiteNoise. Kept as its own type:
// call sites that mean "random base values for later smoothing" read better
// with ValueNoise than with WhiteNoise
pub struct ValueNoise {
    seed: i32,
}

impl ValueNoise {
    pub fn new(seed: i32) -> Self {
        Self { seed }
    }
}

impl NoiseGenerator for ValueNoise {
    fn generate2(&self, grid: &mut Grid2<f32>) -> Result<(), NoiseError> {
        let seed = self.seed;
        grid.fill_with(|x, y| FastRand::new(hash2(x, y, seed)).next_unit());
        Ok(())
    }

    fn generate3(&self, grid: &mut Grid3<f32>) -> Result<(), NoiseError> {
        let seed = self.seed;
        grid.fill_with(|x, y, z| FastRand::new(hash3(x, y, z, seed)).next_unit());
        Ok(())
    }
}
