use serde::{Deserialize, Serialize};

use crate::{Grid2, Grid3, NoiseError, NoiseGenerator};

// Pointwise combination of existing grids. No randomness: the inputs were
// generated beforehand, the combinator only merges them cell by cell.
// Like DomainWarp in spirit, the combinators borrow their collaborators
// for the duration of the pass rather than owning them.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Combine2Op {
    Add,
    Subtract,
    Multiply,
    // b == 0 falls back to 0.0 instead of dividing by zero
    Divide,
    Min,
    Max,
    Power,
    // b-th root of a; b == 0 falls back to 0.0
    Root,
}

impl Combine2Op {
    #[inline]
    pub fn apply(self, a: f32, b: f32) -> f32 {
        match self {
            Combine2Op::Add => a + b,
            Combine2Op::Subtract => a - b,
            Combine2Op::Multiply => a * b,
            Combine2Op::Divide => {
                if b == 0.0 {
                    0.0
                } else {
                    a / b
                }
            }
            Combine2Op::Min => a.min(b),
            Combine2Op::Max => a.max(b),
            Combine2Op::Power => a.powf(b),
            Combine2Op::Root => {
                if b == 0.0 {
                    0.0
                } else {
                    a.powf(1.0 / b)
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Combine3Op {
    Min,
    Max,
}

impl Combine3Op {
    #[inline]
    pub fn apply(self, a: f32, b: f32, c: f32) -> f32 {
        match self {
            Combine3Op::Min => a.min(b).min(c),
            Combine3Op::Max => a.max(b).max(c),
        }
    }
}

pub struct Combine2<'a> {
    pub a: &'a Grid2<f32>,
    pub b: &'a Grid2<f32>,
    pub op: Combine2Op,
}

impl NoiseGenerator for Combine2<'_> {
    fn generate2(&self, grid: &mut Grid2<f32>) -> Result<(), NoiseError> {
        if self.a.width() != grid.width()
            || self.a.height() != grid.height()
            || self.b.width() != grid.width()
            || self.b.height() != grid.height()
        {
            return Err(NoiseError::DimensionMismatch);
        }
        let (a, b, op) = (self.a, self.b, self.op);
        grid.fill_with(|x, y| op.apply(a.get(x, y), b.get(x, y)));
        Ok(())
    }
}

pub struct Combine3<'a> {
    pub a: &'a Grid2<f32>,
    pub b: &'a Grid2<f32>,
    pub c: &'a Grid2<f32>,
    pub op: Combine3Op,
}

impl NoiseGenerator for Combine3<'_> {
    fn generate2(&self, grid: &mut Grid2<f32>) -> Result<(), NoiseError> {
        for input in [self.a, self.b, self.c] {
            if input.width() != grid.width() || input.height() != grid.height() {
                return Err(NoiseError::DimensionMismatch);
            }
        }
        let (a, b, c, op) = (self.a, self.b, self.c, self.op);
        grid.fill_with(|x, y| op.apply(a.get(x, y), b.get(x, y), c.get(x, y)));
        Ok(())
    }
}

// 3D counterparts over volume grids
pub struct Combine2Volume<'a> {
    pub a: &'a Grid3<f32>,
    pub b: &'a Grid3<f32>,
    pub op: Combine2Op,
}

impl NoiseGenerator for Combine2Volume<'_> {
    fn generate3(&self, grid: &mut Grid3<f32>) -> Result<(), NoiseError> {
        for input in [self.a, self.b] {
            if input.width() != grid.width()
                || input.height() != grid.height()
                || input.depth() != grid.depth()
            {
                return Err(NoiseError::DimensionMismatch);
            }
        }
        let (a, b, op) = (self.a, self.b, self.op);
        grid.fill_with(|x, y, z| op.apply(a.get(x, y, z), b.get(x, y, z)));
        Ok(())
    }
}

pub struct Combine3Volume<'a> {
    pub a: &'a Grid3<f32>,
    pub b: &'a Grid3<f32>,
    pub c: &'a Grid3<f32>,
    pub op: Combine3Op,
}

impl NoiseGenerator for Combine3Volume<'_> {
    fn generate3(&self, grid: &mut Grid3<f32>) -> Result<(), NoiseError> {
        for input in [self.a, self.b, self.c] {
            if input.width() != grid.width()
                || input.height() != grid.height()
                || input.depth() != grid.depth()
            {
                return Err(NoiseError::DimensionMismatch);
            }
        }
        let (a, b, c, op) = (self.a, self.b, self.c, self.op);
        grid.fill_with(|x, y, z| op.apply(a.get(x, y, z), b.get(x, y, z), c.get(x, y, z)));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Combine2, Combine2Op, Combine2Volume, Combine3, Combine3Op, Combine3Volume};
    use crate::{Grid2, Grid3, NoiseError, NoiseGenerator};

    fn ramp(seed: f32) -> Grid2<f32> {
        let mut g = Grid2::new(4, 4, 0.0);
        g.fill_with(|x, y| seed + (y * 4 + x) as f32 * 0.01);
        g
    }

    #[test]
    fn combine2_add_pointwise() {
        let a = ramp(0.1);
        let b = ramp(0.5);
        let mut out = Grid2::new(4, 4, 0.0);
        Combine2 {
            a: &a,
            b: &b,
            op: Combine2Op::Add,
        }
        .generate2(&mut out)
        .unwrap();
        for y in 0..4 {
            for x in 0..4 {
                assert!((out.get(x, y) - (a.get(x, y) + b.get(x, y))).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn combine2_divide_by_zero_fallback() {
        let a = ramp(1.0);
        let b = Grid2::new(4, 4, 0.0);
        let mut out = Grid2::new(4, 4, 9.0);
        Combine2 {
            a: &a,
            b: &b,
            op: Combine2Op::Divide,
        }
        .generate2(&mut out)
        .unwrap();
        assert!(out.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn combine2_dimension_mismatch() {
        let a = ramp(0.0);
        let b = Grid2::new(5, 4, 0.0);
        let mut out = Grid2::new(4, 4, 0.0);
        let err = Combine2 {
            a: &a,
            b: &b,
            op: Combine2Op::Min,
        }
        .generate2(&mut out)
        .unwrap_err();
        assert_eq!(err, NoiseError::DimensionMismatch);
    }

    #[test]
    fn combine3_min_max() {
        let a = Grid2::new(4, 4, 0.3);
        let b = Grid2::new(4, 4, 0.7);
        let c = Grid2::new(4, 4, 0.5);
        let mut out = Grid2::new(4, 4, 0.0);
        Combine3 {
            a: &a,
            b: &b,
            c: &c,
            op: Combine3Op::Min,
        }
        .generate2(&mut out)
        .unwrap();
        assert!(out.as_slice().iter().all(|&v| v == 0.3));
        Combine3 {
            a: &a,
            b: &b,
            c: &c,
            op: Combine3Op::Max,
        }
        .generate2(&mut out)
        .unwrap();
        assert!(out.as_slice().iter().all(|&v| v == 0.7));
    }

    #[test]
    fn combine2_volume_pointwise() {
        let mut a = Grid3::new(3, 3, 3, 0.0);
        a.fill_with(|x, y, z| ((z * 9 + y * 3 + x) as f32) * 0.01);
        let b = Grid3::new(3, 3, 3, 0.5);
        let mut out = Grid3::new(3, 3, 3, 0.0);
        Combine2Volume {
            a: &a,
            b: &b,
            op: Combine2Op::Add,
        }
        .generate3(&mut out)
        .unwrap();
        for z in 0..3 {
            for y in 0..3 {
                for x in 0..3 {
                    assert!((out.get(x, y, z) - (a.get(x, y, z) + 0.5)).abs() < 1e-6);
                }
            }
        }
    }

    #[test]
    fn combine2_volume_dimension_mismatch() {
        let a = Grid3::new(3, 3, 3, 0.0);
        let b = Grid3::new(3, 3, 2, 0.0);
        let mut out = Grid3::new(3, 3, 3, 0.0);
        let err = Combine2Volume {
            a: &a,
            b: &b,
            op: Combine2Op::Max,
        }
        .generate3(&mut out)
        .unwrap_err();
        assert_eq!(err, NoiseError::DimensionMismatch);
    }

    #[test]
    fn combine3_volume_min_max() {
        let a = Grid3::new(2, 2, 2, 0.3);
        let b = Grid3::new(2, 2, 2, 0.7);
        let c = Grid3::new(2, 2, 2, 0.5);
        let mut out = Grid3::new(2, 2, 2, 0.0);
        Combine3Volume {
            a: &a,
            b: &b,
            c: &c,
            op: Combine3Op::Min,
        }
        .generate3(&mut out)
        .unwrap();
        assert!(out.as_slice().iter().all(|&v| v == 0.3));
        Combine3Volume {
            a: &a,
            b: &b,
            c: &c,
            op: Combine3Op::Max,
        }
        .generate3(&mut out)
        .unwrap();
        assert!(out.as_slice().iter().all(|&v| v == 0.7));
    }
}
