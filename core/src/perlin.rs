use tracing::{debug, warn};

use crate::filterer::{FilterOp2, FilterOp3, NoiseFilterer2, NoiseFilterer3};
use crate::rand::{FastRand, hash2, hash3};
use crate::region::MaxRegion2;
use crate::volume::MaxRegion3;
use crate::{Grid2, Grid3, Interval, NoiseError, NoiseGenerator, Smoothness};

// Relaxed gradient table: 8 directions including a duplicate and a non-unit
// entry. Not the canonical Perlin set; the remap pass absorbs the skew
const GRADS_2D: [(f32, f32); 8] = [
    (1.0, 1.0),
    (-1.0, 1.0),
    (1.0, -1.0),
    (-1.0, -1.0),
    (1.0, 0.0),
    (0.0, 1.0),
    (1.0, 1.0),
    (0.5, 0.5),
];

// Same relaxed character in 3D: 12 cube-edge directions plus duplicates and
// a non-unit entry, 16 total
const GRADS_3D: [(f32, f32, f32); 16] = [
    (1.0, 1.0, 0.0),
    (-1.0, 1.0, 0.0),
    (1.0, -1.0, 0.0),
    (-1.0, -1.0, 0.0),
    (1.0, 0.0, 1.0),
    (-1.0, 0.0, 1.0),
    (1.0, 0.0, -1.0),
    (-1.0, 0.0, -1.0),
    (0.0, 1.0, 1.0),
    (0.0, -1.0, 1.0),
    (0.0, 1.0, -1.0),
    (0.0, -1.0, -1.0),
    (1.0, 1.0, 0.0),
    (0.0, -1.0, 1.0),
    (0.5, 0.5, 0.5),
    (-1.0, 1.0, 1.0),
];

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}

// Classic gradient noise over a coarse lattice
pub struct Perlin2D {
    seed: i32,
    scale: f32,   // grid cells per lattice cell; the "zoom level"
    smoothness: Smoothness,
    remap: bool,  // rescale raw dot products into [0,1] afterwards
}

impl Perlin2D {
    pub fn new(seed: i32, scale: f32, smoothness: Smoothness, remap: bool) -> Self {
        assert!(scale > 0.0, "perlin scale must be positive");
        Self {
            seed,
            scale,
            smoothness,
            remap,
        }
    }
}

impl NoiseGenerator for Perlin2D {
    fn generate2(&self, grid: &mut Grid2<f32>) -> Result<(), NoiseError> {
        let w = grid.width();
        let h = grid.height();

        // Lattice covering the grid, padded by one full cell on each side
        let lat_w = (w as f32 / self.scale).round() as i64;
        let lat_h = (h as f32 / self.scale).round() as i64;
        if lat_w == 0 || lat_h == 0 {
            // Scale larger than the grid: no lattice cell fits, output is flat
            warn!(scale = self.scale, width = w, height = h, "perlin scale exceeds grid, filling zeros");
            grid.fill(0.0);
            return Ok(());
        }

        let seed = self.seed;
        let mut lattice = Grid2::new(lat_w as usize + 2, lat_h as usize + 2, (0.0f32, 0.0f32));
        lattice.fill_with(|gx, gy| {
            let pick = FastRand::new(hash2(gx, gy, seed)).next_int().unsigned_abs() as usize;
            GRADS_2D[pick % GRADS_2D.len()]
        });

        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;

        for y in 0..h as i32 {
            for x in 0..w as i32 {
                // Sample position in lattice space
                let fx = x as f32 / self.scale;
                let fy = y as f32 / self.scale;
                let x0 = fx.floor() as i32;
                let y0 = fy.floor() as i32;
                let u = self.smoothness.apply(fx - x0 as f32);
                let v = self.smoothness.apply(fy - y0 as f32);

                // Dot product of each corner's gradient with the offset from
                // that corner to the sample point
                let dot = |cx: i32, cy: i32| -> f32 {
                    let g = lattice.get(cx, cy);
                    g.0 * (fx - cx as f32) + g.1 * (fy - cy as f32)
                };
                let d00 = dot(x0, y0);
                let d10 = dot(x0 + 1, y0);
                let d01 = dot(x0, y0 + 1);
                let d11 = dot(x0 + 1, y0 + 1);

                let value = lerp(lerp(d00, d10, u), lerp(d01, d11, u), v);
                min = min.min(value);
                max = max.max(value);
                grid.set(x, y, value);
            }
        }

        if self.remap {
            debug!(min, max, "remapping raw perlin output to [0,1]");
            NoiseFilterer2::new(
                Box::new(MaxRegion2::default()),
                FilterOp2::Remap {
                    from: Interval::from_bounds(min, max),
                    to: Interval::ZERO_ONE,
                },
            )
            .apply(grid);
        }
        Ok(())
    }
}

// 3D gradient noise; same lattice construction with a trilinear blend
pub struct Perlin3D {
    seed: i32,
    scale: f32,
    smoothness: Smoothness,
    remap: bool,
}

impl Perlin3D {
    pub fn new(seed: i32, scale: f32, smoothness: Smoothness, remap: bool) -> Self {
        assert!(scale > 0.0, "perlin scale must be positive");
        Self {
            seed,
            scale,
            smoothness,
            remap,
        }
    }
}

impl NoiseGenerator for Perlin3D {
    fn generate3(&self, grid: &mut Grid3<f32>) -> Result<(), NoiseError> {
        let w = grid.width();
        let h = grid.height();
        let d = grid.depth();

        let lat_w = (w as f32 / self.scale).round() as i64;
        let lat_h = (h as f32 / self.scale).round() as i64;
        let lat_d = (d as f32 / self.scale).round() as i64;
        if lat_w == 0 || lat_h == 0 || lat_d == 0 {
            warn!(scale = self.scale, "perlin scale exceeds grid, filling zeros");
            grid.fill(0.0);
            return Ok(());
        }

        let seed = self.seed;
        let mut lattice = Grid3::new(
            lat_w as usize + 2,
            lat_h as usize + 2,
            lat_d as usize + 2,
            (0.0f32, 0.0f32, 0.0f32),
        );
        lattice.fill_with(|gx, gy, gz| {
            let pick = FastRand::new(hash3(gx, gy, gz, seed)).next_int().unsigned_abs() as usize;
            GRADS_3D[pick % GRADS_3D.len()]
        });

        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;

        for z in 0..d as i32 {
            for y in 0..h as i32 {
                for x in 0..w as i32 {
                    let fx = x as f32 / self.scale;
                    let fy = y as f32 / self.scale;
                    let fz = z as f32 / self.scale;
                    let x0 = fx.floor() as i32;
                    let y0 = fy.floor() as i32;
                    let z0 = fz.floor() as i32;
                    let u = self.smoothness.apply(fx - x0 as f32);
                    let v = self.smoothness.apply(fy - y0 as f32);
                    let t = self.smoothness.apply(fz - z0 as f32);

                    let dot = |cx: i32, cy: i32, cz: i32| -> f32 {
                        let g = lattice.get(cx, cy, cz);
                        g.0 * (fx - cx as f32) + g.1 * (fy - cy as f32) + g.2 * (fz - cz as f32)
                    };
                    let d000 = dot(x0, y0, z0);
                    let d100 = dot(x0 + 1, y0, z0);
                    let d010 = dot(x0, y0 + 1, z0);
                    let d110 = dot(x0 + 1, y0 + 1, z0);
                    let d001 = dot(x0, y0, z0 + 1);
                    let d101 = dot(x0 + 1, y0, z0 + 1);
                    let d011 = dot(x0, y0 + 1, z0 + 1);
                    let d111 = dot(x0 + 1, y0 + 1, z0 + 1);

                    let front = lerp(lerp(d000, d100, u), lerp(d010, d110, u), v);
                    let back = lerp(lerp(d001, d101, u), lerp(d011, d111, u), v);
                    let value = lerp(front, back, t);
                    min = min.min(value);
                    max = max.max(value);
                    grid.set(x, y, z, value);
                }
            }
        }

        if self.remap {
            debug!(min, max, "remapping raw perlin output to [0,1]");
            NoiseFilterer3::new(
                Box::new(MaxRegion3::default()),
                FilterOp3::Remap {
                    from: Interval::from_bounds(min, max),
                    to: Interval::ZERO_ONE,
                },
            )
            .apply(grid);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Perlin2D, Perlin3D};
    use crate::{Grid2, Grid3, NoiseError, NoiseGenerator, Smoothness};

    #[test]
    fn perlin2_determinism() {
        let mut a = Grid2::new(48, 48, 0.0);
        let mut b = Grid2::new(48, 48, 0.0);
        let p = Perlin2D::new(1234, 8.0, Smoothness::Quintic, true);
        p.generate2(&mut a).unwrap();
        p.generate2(&mut b).unwrap();
        assert_eq!(a.as_slice(), b.as_slice());
    }

    #[test]
    fn perlin2_remapped_range() {
        let mut g = Grid2::new(64, 64, 0.0);
        Perlin2D::new(7, 6.0, Smoothness::Cubic, true)
            .generate2(&mut g)
            .unwrap();
        for &v in g.as_slice() {
            assert!((0.0..=1.0).contains(&v), "value {} outside [0,1]", v);
        }
    }

    #[test]
    fn perlin2_scale_exceeding_grid_fills_zero() {
        let mut g = Grid2::new(8, 8, 0.5);
        Perlin2D::new(0, 100.0, Smoothness::Linear, false)
            .generate2(&mut g)
            .unwrap();
        assert!(g.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn perlin2_smoothness_changes_interior() {
        let mut a = Grid2::new(32, 32, 0.0);
        let mut b = Grid2::new(32, 32, 0.0);
        Perlin2D::new(5, 7.3, Smoothness::Linear, false)
            .generate2(&mut a)
            .unwrap();
        Perlin2D::new(5, 7.3, Smoothness::Quintic, false)
            .generate2(&mut b)
            .unwrap();
        assert_ne!(a.as_slice(), b.as_slice());
    }

    #[test]
    fn perlin2_rejects_3d() {
        let mut g = Grid3::new(4, 4, 4, 0.0);
        let err = Perlin2D::new(0, 2.0, Smoothness::Cubic, false)
            .generate3(&mut g)
            .unwrap_err();
        assert_eq!(err, NoiseError::UnsupportedDimensions(3));
    }

    #[test]
    fn perlin3_determinism_and_range() {
        let mut a = Grid3::new(16, 16, 16, 0.0);
        let mut b = Grid3::new(16, 16, 16, 0.0);
        let p = Perlin3D::new(2025, 4.0, Smoothness::Quintic, true);
        p.generate3(&mut a).unwrap();
        p.generate3(&mut b).unwrap();
        assert_eq!(a.as_slice(), b.as_slice());
        for &v in a.as_slice() {
            assert!((0.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn perlin3_rejects_2d() {
        let mut g = Grid2::new(4, 4, 0.0);
        let err = Perlin3D::new(0, 2.0, Smoothness::Cubic, false)
            .generate2(&mut g)
            .unwrap_err();
        assert_eq!(err, NoiseError::UnsupportedDimensions(2));
    }
}
