use crate::{Grid2, NoiseError, NoiseGenerator};

// 3x3 smoothing kernel weights: corners 1/16, edges 1/8, center 1/4
const CORNER: f32 = 1.0 / 16.0;
const EDGE: f32 = 1.0 / 8.0;
const CENTER: f32 = 1.0 / 4.0;

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}

// Upsamples a coarse source generator: generate at 1/scale resolution,
// blur with the fixed 3x3 kernel (toroidally wrapped), then bilinearly
// interpolate the blurred grid at every output cell
pub struct Interpolator {
    source: Box<dyn NoiseGenerator>,
    scale: usize,
}

impl Interpolator {
    pub fn new(source: Box<dyn NoiseGenerator>, scale: usize) -> Self {
        assert!(scale >= 1, "interpolate scale must be at least 1");
        Self { source, scale }
    }
}

impl NoiseGenerator for Interpolator {
    fn generate2(&self, grid: &mut Grid2<f32>) -> Result<(), NoiseError> {
        let cw = (grid.width() / self.scale).max(1);
        let ch = (grid.height() / self.scale).max(1);
        let mut coarse = Grid2::new(cw, ch, 0.0);
        self.source.generate2(&mut coarse)?;

        // Smoothing pass over the coarse grid
        let mut smoothed = Grid2::new(cw, ch, 0.0);
        for y in 0..ch as i32 {
            for x in 0..cw as i32 {
                let mut acc = 0.0;
                for dy in -1..=1 {
                    for dx in -1..=1 {
                        let weight = match (dx, dy) {
                            (0, 0) => CENTER,
                            (0, _) | (_, 0) => EDGE,
                            _ => CORNER,
                        };
                        let (wx, wy) = coarse.wrap(x + dx, y + dy);
                        acc += weight * coarse.get(wx, wy);
                    }
                }
                smoothed.set(x, y, acc);
            }
        }

        // Bilinear upsample, base indices wrapped back onto the coarse grid
        for y in 0..grid.height() as i32 {
            for x in 0..grid.width() as i32 {
                let fx = x as f32 / self.scale as f32;
                let fy = y as f32 / self.scale as f32;
                let x0 = fx.floor() as i32;
                let y0 = fy.floor() as i32;
                let tx = fx - x0 as f32;
                let ty = fy - y0 as f32;

                let sample = |sx: i32, sy: i32| -> f32 {
                    let (wx, wy) = smoothed.wrap(sx, sy);
                    smoothed.get(wx, wy)
                };
                let top = lerp(sample(x0, y0), sample(x0 + 1, y0), tx);
                let bottom = lerp(sample(x0, y0 + 1), sample(x0 + 1, y0 + 1), tx);
                grid.set(x, y, lerp(top, bottom, ty));
            }
        }
        Ok(())
    }
}
