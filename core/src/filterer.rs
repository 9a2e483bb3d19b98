use crate::rand::{FastRand, hash2, hash3};
use crate::region::FilterRegion2;
use crate::volume::FilterRegion3;
use crate::{Grid2, Grid3, Interval, NoiseError, NoiseGenerator, Smoothness};

// Region-scoped post-processing. One filterer holds one region and one
// operation; the operation only supplies a candidate value per cell, the
// shared driver owns the blending contract:
//
//   new = clamp01(lerp(original, candidate, strength))
//
// so every operation's effect is proportional to the region's per-cell
// strength, never an unconditional overwrite. `invert` reflects the delta
// (candidate := original - (candidate - original)) before blending.

pub enum FilterOp2 {
    // to.clamp(from.map_value(to, original))
    Remap { from: Interval, to: Interval },
    // Mirror around the middle of [0,1]
    Reflect,
    // Push values toward 0/1 with a smoothstep curve, `passes` times
    UpContrast { smoothness: Smoothness, passes: u32 },
    // Mean of the region's cells, broadcast to every cell
    Average,
    Flatten { value: f32 },
    Min { value: f32 },
    Max { value: f32 },
    Clamp { range: Interval },
    // Mean of the in-bounds orthogonal + diagonal neighbors
    Smooth,
    // original + amount * unit noise, seeded per cell
    Noise { amount: f32, seed: i32 },
    Increase { amount: f32 },
    // Boxed so callers can capture their own state in the closure
    Custom(Box<dyn Fn(i32, i32, f32) -> f32>),
}

pub struct NoiseFilterer2 {
    pub region: Box<dyn FilterRegion2>,
    pub source: Option<Box<dyn NoiseGenerator>>,
    pub invert: bool,
    pub op: FilterOp2,
}

impl NoiseFilterer2 {
    pub fn new(region: Box<dyn FilterRegion2>, op: FilterOp2) -> Self {
        Self {
            region,
            source: None,
            invert: false,
            op,
        }
    }

    pub fn apply(&self, grid: &mut Grid2<f32>) {
        // Gather the region's cells up front so candidate computation reads
        // an untouched grid even for neighborhood ops
        let mut cells: Vec<(i32, i32, f32)> = Vec::new();
        self.region
            .for_each_cell(grid, &mut |x, y, s| cells.push((x, y, s)));

        let average = match self.op {
            FilterOp2::Average if !cells.is_empty() => {
                cells.iter().map(|&(x, y, _)| grid.get(x, y)).sum::<f32>() / cells.len() as f32
            }
            _ => 0.0,
        };

        let candidates: Vec<f32> = cells
            .iter()
            .map(|&(x, y, _)| {
                let original = grid.get(x, y);
                match &self.op {
                    FilterOp2::Remap { from, to } => to.clamp(from.map_value(*to, original)),
                    FilterOp2::Reflect => Interval::ZERO_ONE.reflect(original),
                    FilterOp2::UpContrast { smoothness, passes } => {
                        let mut v = original;
                        for _ in 0..*passes {
                            v = smoothness.apply(v.clamp(0.0, 1.0));
                        }
                        v
                    }
                    FilterOp2::Average => average,
                    FilterOp2::Flatten { value } => *value,
                    FilterOp2::Min { value } => original.min(*value),
                    FilterOp2::Max { value } => original.max(*value),
                    FilterOp2::Clamp { range } => range.clamp(original),
                    FilterOp2::Smooth => neighbor_mean2(grid, x, y),
                    FilterOp2::Noise { amount, seed } => {
                        original + amount * FastRand::new(hash2(x, y, *seed)).next_unit()
                    }
                    FilterOp2::Increase { amount } => original + amount,
                    FilterOp2::Custom(f) => f(x, y, original),
                }
            })
            .collect();

        for (&(x, y, strength), &candidate) in cells.iter().zip(&candidates) {
            let original = grid.get(x, y);
            let candidate = if self.invert {
                original - (candidate - original)
            } else {
                candidate
            };
            let blended = original + (candidate - original) * strength;
            grid.set(x, y, blended.clamp(0.0, 1.0));
        }
    }
}

impl NoiseGenerator for NoiseFilterer2 {
    fn generate2(&self, grid: &mut Grid2<f32>) -> Result<(), NoiseError> {
        if let Some(source) = &self.source {
            source.generate2(grid)?;
        }
        self.apply(grid);
        Ok(())
    }
}

fn neighbor_mean2(grid: &Grid2<f32>, x: i32, y: i32) -> f32 {
    let mut sum = 0.0;
    let mut count = 0;
    for dy in -1..=1 {
        for dx in -1..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }
            if grid.contains(x + dx, y + dy) {
                sum += grid.get(x + dx, y + dy);
                count += 1;
            }
        }
    }
    if count == 0 {
        grid.get(x, y)
    } else {
        sum / count as f32
    }
}

pub enum FilterOp3 {
    Remap { from: Interval, to: Interval },
    Reflect,
    UpContrast { smoothness: Smoothness, passes: u32 },
    Average,
    Flatten { value: f32 },
    Min { value: f32 },
    Max { value: f32 },
    Clamp { range: Interval },
    Smooth,
    Noise { amount: f32, seed: i32 },
    Increase { amount: f32 },
    Custom(Box<dyn Fn(i32, i32, i32, f32) -> f32>),
}

pub struct NoiseFilterer3 {
    pub region: Box<dyn FilterRegion3>,
    pub source: Option<Box<dyn NoiseGenerator>>,
    pub invert: bool,
    pub op: FilterOp3,
}

impl NoiseFilterer3 {
    pub fn new(region: Box<dyn FilterRegion3>, op: FilterOp3) -> Self {
        Self {
            region,
            source: None,
            invert: false,
            op,
        }
    }

    pub fn apply(&self, grid: &mut Grid3<f32>) {
        let mut cells: Vec<(i32, i32, i32, f32)> = Vec::new();
        self.region
            .for_each_cell(grid, &mut |x, y, z, s| cells.push((x, y, z, s)));

        let average = match self.op {
            FilterOp3::Average if !cells.is_empty() => {
                cells
                    .iter()
                    .map(|&(x, y, z, _)| grid.get(x, y, z))
                    .sum::<f32>()
                    / cells.len() as f32
            }
            _ => 0.0,
        };

        let candidates: Vec<f32> = cells
            .iter()
            .map(|&(x, y, z, _)| {
                let original = grid.get(x, y, z);
                match &self.op {
                    FilterOp3::Remap { from, to } => to.clamp(from.map_value(*to, original)),
                    FilterOp3::Reflect => Interval::ZERO_ONE.reflect(original),
                    FilterOp3::UpContrast { smoothness, passes } => {
                        let mut v = original;
                        for _ in 0..*passes {
                            v = smoothness.apply(v.clamp(0.0, 1.0));
                        }
                        v
                    }
                    FilterOp3::Average => average,
                    FilterOp3::Flatten { value } => *value,
                    FilterOp3::Min { value } => original.min(*value),
                    FilterOp3::Max { value } => original.max(*value),
                    FilterOp3::Clamp { range } => range.clamp(original),
                    FilterOp3::Smooth => neighbor_mean3(grid, x, y, z),
                    FilterOp3::Noise { amount, seed } => {
                        original + amount * FastRand::new(hash3(x, y, z, *seed)).next_unit()
                    }
                    FilterOp3::Increase { amount } => original + amount,
                    FilterOp3::Custom(f) => f(x, y, z, original),
                }
            })
            .collect();

        for (&(x, y, z, strength), &candidate) in cells.iter().zip(&candidates) {
            let original = grid.get(x, y, z);
            let candidate = if self.invert {
                original - (candidate - original)
            } else {
                candidate
            };
            let blended = original + (candidate - original) * strength;
            grid.set(x, y, z, blended.clamp(0.0, 1.0));
        }
    }
}

impl NoiseGenerator for NoiseFilterer3 {
    fn generate3(&self, grid: &mut Grid3<f32>) -> Result<(), NoiseError> {
        if let Some(source) = &self.source {
            source.generate3(grid)?;
        }
        self.apply(grid);
        Ok(())
    }
}

fn neighbor_mean3(grid: &Grid3<f32>, x: i32, y: i32, z: i32) -> f32 {
    let mut sum = 0.0;
    let mut count = 0;
    for dz in -1..=1 {
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 && dz == 0 {
                    continue;
                }
                if grid.contains(x + dx, y + dy, z + dz) {
                    sum += grid.get(x + dx, y + dy, z + dz);
                    count += 1;
                }
            }
        }
    }
    if count == 0 {
        grid.get(x, y, z)
    } else {
        sum / count as f32
    }
}
