use tracing::debug;

use crate::rand::{FastRand, hash2};
use crate::{Grid2, Interval, NoiseError, NoiseGenerator};

// Midpoint-displacement fractal over a square 2^n+1 grid.
//
// Unset cells carry the NaN sentinel (Grid2::unset); any cell the caller
// pre-seeds with a real value is never overwritten, which is how boundary
// and control heights get pinned before generation.
pub struct DiamondSquare {
    seed: i32,
    // Per-recursion-level displacement ranges: (interval, repeat count),
    // consumed in order from the coarsest level down
    variance: Vec<(Interval, u32)>,
    // Fills the schedule when the grid needs more levels than listed
    default_variance: Interval,
}

impl DiamondSquare {
    pub fn new(seed: i32, variance: Vec<(Interval, u32)>, default_variance: Interval) -> Self {
        Self {
            seed,
            variance,
            default_variance,
        }
    }

    // A common setup: displacement halving from `initial` each level
    pub fn halving(seed: i32, initial: f32, levels: u32) -> Self {
        let mut variance = Vec::with_capacity(levels as usize);
        let mut range = initial;
        for _ in 0..levels {
            variance.push((Interval::new(0.0, range), 1));
            range *= 0.5;
        }
        let default_variance = Interval::new(0.0, range);
        Self::new(seed, variance, default_variance)
    }

    // Random displacement for the cell, drawn from the level's interval and
    // seeded by the cell position so regeneration is reproducible
    fn offset(&self, x: i32, y: i32, variance: Interval) -> f32 {
        variance.lerp(FastRand::new(hash2(x, y, self.seed)).next_unit())
    }

    fn iterate(&self, grid: &mut Grid2<f32>, size: usize, top_left: (i32, i32), schedule: &[Interval], level: usize) {
        let step = (size - 1) as i32;
        let half = step / 2;
        let (x0, y0) = top_left;
        let x1 = x0 + step;
        let y1 = y0 + step;
        let cx = x0 + half;
        let cy = y0 + half;
        let variance = schedule[level.min(schedule.len() - 1)];

        // Diamond step: center of the square from its four corners
        if grid.get(cx, cy).is_nan() {
            let avg = (grid.get(x0, y0) + grid.get(x1, y0) + grid.get(x0, y1) + grid.get(x1, y1))
                * 0.25;
            grid.set(cx, cy, avg + self.offset(cx, cy, variance));
        }

        // Square step: each edge midpoint from its two adjacent corners
        let edges = [
            ((cx, y0), (x0, y0), (x1, y0)), // top
            ((cx, y1), (x0, y1), (x1, y1)), // bottom
            ((x0, cy), (x0, y0), (x0, y1)), // left
            ((x1, cy), (x1, y0), (x1, y1)), // right
        ];
        for ((mx, my), (ax, ay), (bx, by)) in edges {
            if grid.get(mx, my).is_nan() {
                let avg = (grid.get(ax, ay) + grid.get(bx, by)) * 0.5;
                grid.set(mx, my, avg + self.offset(mx, my, variance));
            }
        }

        // Recurse into the four quadrants with the next (smaller) variance
        if size > 3 {
            let sub = half as usize + 1;
            self.iterate(grid, sub, (x0, y0), schedule, level + 1);
            self.iterate(grid, sub, (cx, y0), schedule, level + 1);
            self.iterate(grid, sub, (x0, cy), schedule, level + 1);
            self.iterate(grid, sub, (cx, cy), schedule, level + 1);
        }
    }
}

impl NoiseGenerator for DiamondSquare {
    fn generate2(&self, grid: &mut Grid2<f32>) -> Result<(), NoiseError> {
        let w = grid.width();
        let h = grid.height();
        if w != h {
            return Err(NoiseError::NotSquare {
                width: w,
                height: h,
            });
        }
        if w < 3 || !(w - 1).is_power_of_two() {
            return Err(NoiseError::BadSideLength { side: w });
        }

        // One variance level per halving until the squares reach size 3
        let levels = (w - 1).trailing_zeros() as usize;
        let mut schedule: Vec<Interval> = Vec::with_capacity(levels);
        for (interval, repeat) in &self.variance {
            for _ in 0..*repeat {
                schedule.push(*interval);
            }
        }
        while schedule.len() < levels {
            schedule.push(self.default_variance);
        }
        debug!(levels, listed = self.variance.len(), "diamond-square variance schedule");

        // Seed any corner the caller left unset
        let side = (w - 1) as i32;
        for (cx, cy) in [(0, 0), (side, 0), (0, side), (side, side)] {
            if grid.get(cx, cy).is_nan() {
                grid.set(cx, cy, self.offset(cx, cy, schedule[0]));
            }
        }

        self.iterate(grid, w, (0, 0), &schedule, 0);
        Ok(())
    }
}
