use crate::{Grid2, Grid3, NoiseError, NoiseGenerator};

// Weighted sum of sub-generators: the standard fractal/multi-octave stack.
// Each layer generates into a scratch grid of the same dimensions and is
// accumulated into the output as weight * value
pub struct LayeredOctave {
    layers: Vec<(Box<dyn NoiseGenerator>, f32)>,
}

impl LayeredOctave {
    pub fn new(layers: Vec<(Box<dyn NoiseGenerator>, f32)>) -> Self {
        Self { layers }
    }
}

impl NoiseGenerator for LayeredOctave {
    fn generate2(&self, grid: &mut Grid2<f32>) -> Result<(), NoiseError> {
        grid.fill(0.0);
        let mut scratch = Grid2::new(grid.width(), grid.height(), 0.0);
        for (generator, weight) in &self.layers {
            generator.generate2(&mut scratch)?;
            for y in 0..grid.height() as i32 {
                for x in 0..grid.width() as i32 {
                    grid.set(x, y, grid.get(x, y) + weight * scratch.get(x, y));
                }
            }
        }
        Ok(())
    }

    fn generate3(&self, grid: &mut Grid3<f32>) -> Result<(), NoiseError> {
        grid.fill(0.0);
        let mut scratch = Grid3::new(grid.width(), grid.height(), grid.depth(), 0.0);
        for (generator, weight) in &self.layers {
            generator.generate3(&mut scratch)?;
            for z in 0..grid.depth() as i32 {
                for y in 0..grid.height() as i32 {
                    for x in 0..grid.width() as i32 {
                        grid.set(x, y, z, grid.get(x, y, z) + weight * scratch.get(x, y, z));
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::LayeredOctave;
    use crate::{FlatNoise, Grid2, NoiseError, NoiseGenerator, Perlin2D, Smoothness, WhiteNoise};

    #[test]
    fn layered_linearity() {
        // Two layers must sum to w1 * gen1 + w2 * gen2 at every cell
        let (w1, w2) = (0.75, 0.25);
        let mut a = Grid2::new(24, 24, 0.0);
        let mut b = Grid2::new(24, 24, 0.0);
        WhiteNoise::new(1).generate2(&mut a).unwrap();
        WhiteNoise::new(2).generate2(&mut b).unwrap();

        let layered = LayeredOctave::new(vec![
            (Box::new(WhiteNoise::new(1)), w1),
            (Box::new(WhiteNoise::new(2)), w2),
        ]);
        let mut out = Grid2::new(24, 24, 0.0);
        layered.generate2(&mut out).unwrap();

        for y in 0..24 {
            for x in 0..24 {
                let expected = w1 * a.get(x, y) + w2 * b.get(x, y);
                let got = out.get(x, y);
                assert!(
                    (got - expected).abs() < 1e-5,
                    "cell ({}, {}): {} vs {}",
                    x,
                    y,
                    got,
                    expected
                );
            }
        }
    }

    #[test]
    fn layered_flat_baseline() {
        let layered = LayeredOctave::new(vec![
            (Box::new(FlatNoise::new(0.5)), 1.0),
            (Box::new(FlatNoise::new(1.0)), 0.2),
        ]);
        let mut out = Grid2::new(8, 8, 9.0);
        layered.generate2(&mut out).unwrap();
        assert!(out.as_slice().iter().all(|&v| (v - 0.7).abs() < 1e-6));
    }

    #[test]
    fn layered_propagates_dimension_errors() {
        // A 2D-only layer inside a 3D request surfaces the typed error
        let layered = LayeredOctave::new(vec![(
            Box::new(Perlin2D::new(0, 4.0, Smoothness::Cubic, false)) as Box<dyn NoiseGenerator>,
            1.0,
        )]);
        let mut out = crate::Grid3::new(4, 4, 4, 0.0);
        assert_eq!(
            layered.generate3(&mut out).unwrap_err(),
            NoiseError::UnsupportedDimensions(3)
        );
    }
}
