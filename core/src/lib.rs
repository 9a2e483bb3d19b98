// noisegen holds the procedural noise generators, the region-scoped
// filtering engine, and the color-gradient consumer of their output
pub mod basic;
pub mod combine;
pub mod diamond_square;
pub mod error;
pub mod filterer;
pub mod gradient;
pub mod grid;
pub mod interpolate;
pub mod interval;
pub mod layered;
pub mod perlin;
pub mod rand;
pub mod region;
pub mod volume;
pub mod worley;

pub use basic::{FlatNoise, ValueNoise, WhiteNoise};
pub use combine::{Combine2, Combine2Op, Combine2Volume, Combine3, Combine3Op, Combine3Volume};
pub use diamond_square::DiamondSquare;
pub use error::{GradientError, NoiseError};
pub use filterer::{FilterOp2, FilterOp3, NoiseFilterer2, NoiseFilterer3};
pub use gradient::{ColorGradient, GradientNode, to_rgba_bytes};
pub use grid::{Grid2, Grid3};
pub use interpolate::Interpolator;
pub use interval::Interval;
pub use layered::LayeredOctave;
pub use perlin::{Perlin2D, Perlin3D};
pub use rand::{FastRand, hash2, hash3};
pub use region::{CircleRegion2, FilterRegion2, MaxRegion2, RectRegion2};
pub use volume::{CubeRegion3, FilterRegion3, MaxRegion3, SphereRegion3};
pub use worley::{DistanceMetric, Worley2D, Worley3D, WorleyValue};

use serde::{Deserialize, Serialize};

// Noise generator that fills a 2D or 3D grid in place.
// 2D-only implementations override `generate2`,
// 3D-only implementations override `generate3`;
// asking for the other dimensionality is a typed error.
pub trait NoiseGenerator {
    // Fill a 2D grid with noise values
    fn generate2(&self, _grid: &mut Grid2<f32>) -> Result<(), NoiseError> {
        Err(NoiseError::UnsupportedDimensions(2))
    }

    // Fill a 3D grid with noise values
    fn generate3(&self, _grid: &mut Grid3<f32>) -> Result<(), NoiseError> {
        Err(NoiseError::UnsupportedDimensions(3))
    }
}

// Interpolation curve applied per axis when blending lattice corners,
// and by the up-contrast filter
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Smoothness {
    Linear,
    Cubic,
    Quintic,
}

impl Smoothness {
    // Shape t in [0,1]; Linear is the identity
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Smoothness::Linear => t,
            // 3t^2 - 2t^3
            Smoothness::Cubic => t * t * (3.0 - 2.0 * t),
            // 6t^5 - 15t^4 + 10t^3, flat first and second derivative at the ends
            Smoothness::Quintic => t * t * t * (t * (t * 6.0 - 15.0) + 10.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Smoothness;

    #[test]
    fn smoothness_fixed_points() {
        for s in [Smoothness::Linear, Smoothness::Cubic, Smoothness::Quintic] {
            assert_eq!(s.apply(0.0), 0.0);
            assert_eq!(s.apply(1.0), 1.0);
            assert!((s.apply(0.5) - 0.5).abs() < 1e-6);
        }
    }

    #[test]
    fn smoothness_monotonic() {
        for s in [Smoothness::Cubic, Smoothness::Quintic] {
            let mut prev = 0.0;
            for i in 1..=100 {
                let v = s.apply(i as f32 / 100.0);
                assert!(v >= prev, "{:?} not monotonic at step {}", s, i);
                prev = v;
            }
        }
    }
}
