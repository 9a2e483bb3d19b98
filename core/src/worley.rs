use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::filterer::{FilterOp2, FilterOp3, NoiseFilterer2, NoiseFilterer3};
use crate::rand::{FastRand, hash2, hash3};
use crate::region::MaxRegion2;
use crate::volume::MaxRegion3;
use crate::{Grid2, Grid3, Interval, NoiseError, NoiseGenerator};

// How many nearest feature points each sample keeps, sorted ascending
pub const NUMB_DISTANCE_VALUES: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistanceMetric {
    Euclidean,
    EuclideanSq,
    Manhattan,
    Chebyshev,
}

impl DistanceMetric {
    #[inline]
    pub fn eval2(self, dx: f32, dy: f32) -> f32 {
        match self {
            DistanceMetric::Euclidean => (dx * dx + dy * dy).sqrt(),
            DistanceMetric::EuclideanSq => dx * dx + dy * dy,
            DistanceMetric::Manhattan => dx.abs() + dy.abs(),
            DistanceMetric::Chebyshev => dx.abs().max(dy.abs()),
        }
    }

    #[inline]
    pub fn eval3(self, dx: f32, dy: f32, dz: f32) -> f32 {
        match self {
            DistanceMetric::Euclidean => (dx * dx + dy * dy + dz * dz).sqrt(),
            DistanceMetric::EuclideanSq => dx * dx + dy * dy + dz * dz,
            DistanceMetric::Manhattan => dx.abs() + dy.abs() + dz.abs(),
            DistanceMetric::Chebyshev => dx.abs().max(dy.abs()).max(dz.abs()),
        }
    }
}

// Maps the sorted nearest-distance tuple to the sample's noise value
#[derive(Clone, Copy, Debug)]
pub enum WorleyValue {
    Nearest,
    SecondNearest,
    ThirdNearest,
    // d2 - d1, the classic cell-border highlighter
    Difference21,
    Custom(fn(&[f32; NUMB_DISTANCE_VALUES]) -> f32),
}

impl WorleyValue {
    #[inline]
    pub fn apply(self, distances: &[f32; NUMB_DISTANCE_VALUES]) -> f32 {
        match self {
            WorleyValue::Nearest => distances[0],
            WorleyValue::SecondNearest => distances[1],
            WorleyValue::ThirdNearest => distances[2],
            WorleyValue::Difference21 => distances[1] - distances[0],
            WorleyValue::Custom(f) => f(distances),
        }
    }
}

// Insert d into the small sorted array, pushing larger entries out the back
#[inline]
fn insert_distance(distances: &mut [f32; NUMB_DISTANCE_VALUES], d: f32) {
    for i in 0..NUMB_DISTANCE_VALUES {
        if d < distances[i] {
            distances[i..].rotate_right(1);
            distances[i] = d;
            return;
        }
    }
}

// Cellular noise: space is cut into cells of `cell_size`, each cell scatters
// a hash-seeded number of feature points, samples measure distances to the
// points of the surrounding 3x3 (3x3x3) cell block
pub struct Worley2D {
    pub seed: i32,
    pub cell_size: f32,
    // Point count per cell is drawn uniformly from [min_points, max_points)
    pub min_points: u32,
    pub max_points: u32,
    // Toroidal wrap: neighbor cells past the grid edge contribute their
    // points translated by the grid dimension
    pub wrap: bool,
    pub distance: DistanceMetric,
    pub value: WorleyValue,
    pub remap: bool,
}

impl Worley2D {
    pub fn new(seed: i32, cell_size: f32, min_points: u32, max_points: u32) -> Self {
        assert!(cell_size > 0.0, "worley cell size must be positive");
        assert!(max_points > min_points, "point count range must be non-empty");
        Self {
            seed,
            cell_size,
            min_points,
            max_points,
            wrap: true,
            distance: DistanceMetric::Euclidean,
            value: WorleyValue::Nearest,
            remap: true,
        }
    }

    // Point count for a cell, drawn from [min_points, max_points)
    fn point_count(&self, rng: &mut FastRand) -> u32 {
        self.min_points + rng.next_int().unsigned_abs() % (self.max_points - self.min_points)
    }

    fn closest_distances(
        &self,
        px: f32,
        py: f32,
        cells_x: i32,
        cells_y: i32,
        grid_w: f32,
        grid_h: f32,
    ) -> [f32; NUMB_DISTANCE_VALUES] {
        let scx = (px / self.cell_size).floor() as i32;
        let scy = (py / self.cell_size).floor() as i32;
        let mut distances = [f32::INFINITY; NUMB_DISTANCE_VALUES];

        for ncy in (scy - 1)..=(scy + 1) {
            for ncx in (scx - 1)..=(scx + 1) {
                // Wrapped neighbors re-use the points of the cell on the far
                // side, shifted by the grid dimension so distances stay
                // geometrically correct
                let (cx, cy, shift_x, shift_y) = if self.wrap {
                    let wx = ncx.rem_euclid(cells_x);
                    let wy = ncy.rem_euclid(cells_y);
                    let sx = if ncx < 0 {
                        -grid_w
                    } else if ncx >= cells_x {
                        grid_w
                    } else {
                        0.0
                    };
                    let sy = if ncy < 0 {
                        -grid_h
                    } else if ncy >= cells_y {
                        grid_h
                    } else {
                        0.0
                    };
                    (wx, wy, sx, sy)
                } else {
                    (ncx, ncy, 0.0, 0.0)
                };

                let mut rng = FastRand::new(hash2(cx, cy, self.seed));
                let count = self.point_count(&mut rng);
                for _ in 0..count {
                    let fx = (cx as f32 + rng.next_unit()) * self.cell_size + shift_x;
                    let fy = (cy as f32 + rng.next_unit()) * self.cell_size + shift_y;
                    insert_distance(&mut distances, self.distance.eval2(px - fx, py - fy));
                }
            }
        }
        distances
    }
}

impl NoiseGenerator for Worley2D {
    fn generate2(&self, grid: &mut Grid2<f32>) -> Result<(), NoiseError> {
        let w = grid.width();
        let h = grid.height();
        let cells_x = (w as f32 / self.cell_size).ceil() as i32;
        let cells_y = (h as f32 / self.cell_size).ceil() as i32;

        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        for y in 0..h as i32 {
            for x in 0..w as i32 {
                let distances = self.closest_distances(
                    x as f32,
                    y as f32,
                    cells_x,
                    cells_y,
                    w as f32,
                    h as f32,
                );
                let value = self.value.apply(&distances);
                min = min.min(value);
                max = max.max(value);
                grid.set(x, y, value);
            }
        }

        if self.remap {
            debug!(min, max, "remapping worley output to [0,1]");
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

// 3D cellular noise; identical scheme over a 3x3x3 neighborhood
pub struct Worley3D {
    pub seed: i32,
    pub cell_size: f32,
    pub min_points: u32,
    pub max_points: u32,
    pub wrap: bool,
    pub distance: DistanceMetric,
    pub value: WorleyValue,
    pub remap: bool,
}

impl Worley3D {
    pub fn new(seed: i32, cell_size: f32, min_points: u32, max_points: u32) -> Self {
        assert!(cell_size > 0.0, "worley cell size must be positive");
        assert!(max_points > min_points, "point count range must be non-empty");
        Self {
            seed,
            cell_size,
            min_points,
            max_points,
            wrap: true,
            distance: DistanceMetric::Euclidean,
            value: WorleyValue::Nearest,
            remap: true,
        }
    }

    fn point_count(&self, rng: &mut FastRand) -> u32 {
        self.min_points + rng.next_int().unsigned_abs() % (self.max_points - self.min_points)
    }

    fn closest_distances(
        &self,
        px: f32,
        py: f32,
        pz: f32,
        cells: (i32, i32, i32),
        dims: (f32, f32, f32),
    ) -> [f32; NUMB_DISTANCE_VALUES] {
        let scx = (px / self.cell_size).floor() as i32;
        let scy = (py / self.cell_size).floor() as i32;
        let scz = (pz / self.cell_size).floor() as i32;
        let mut distances = [f32::INFINITY; NUMB_DISTANCE_VALUES];

        for ncz in (scz - 1)..=(scz + 1) {
            for ncy in (scy - 1)..=(scy + 1) {
                for ncx in (scx - 1)..=(scx + 1) {
                    let wrap_axis = |n: i32, count: i32, dim: f32| -> (i32, f32) {
                        if !self.wrap {
                            return (n, 0.0);
                        }
                        let wrapped = n.rem_euclid(count);
                        let shift = if n < 0 {
                            -dim
                        } else if n >= count {
                            dim
                        } else {
                            0.0
                        };
                        (wrapped, shift)
                    };
                    let (cx, sx) = wrap_axis(ncx, cells.0, dims.0);
                    let (cy, sy) = wrap_axis(ncy, cells.1, dims.1);
                    let (cz, sz) = wrap_axis(ncz, cells.2, dims.2);

                    let mut rng = FastRand::new(hash3(cx, cy, cz, self.seed));
                    let count = self.point_count(&mut rng);
                    for _ in 0..count {
                        let fx = (cx as f32 + rng.next_unit()) * self.cell_size + sx;
                        let fy = (cy as f32 + rng.next_unit()) * self.cell_size + sy;
                        let fz = (cz as f32 + rng.next_unit()) * self.cell_size + sz;
                        insert_distance(
                            &mut distances,
                            self.distance.eval3(px - fx, py - fy, pz - fz),
                        );
                    }
                }
            }
        }
        distances
    }
}

impl NoiseGenerator for Worley3D {
    fn generate3(&self, grid: &mut Grid3<f32>) -> Result<(), NoiseError> {
        let w = grid.width();
        let h = grid.height();
        let d = grid.depth();
        let cells = (
            (w as f32 / self.cell_size).ceil() as i32,
            (h as f32 / self.cell_size).ceil() as i32,
            (d as f32 / self.cell_size).ceil() as i32,
        );
        let dims = (w as f32, h as f32, d as f32);

        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        for z in 0..d as i32 {
            for y in 0..h as i32 {
                for x in 0..w as i32 {
                    let distances =
                        self.closest_distances(x as f32, y as f32, z as f32, cells, dims);
                    let value = self.value.apply(&distances);
                    min = min.min(value);
                    max = max.max(value);
                    grid.set(x, y, z, value);
                }
            }
        }

        if self.remap {
            debug!(min, max, "remapping worley output to [0,1]");
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
    use super::{DistanceMetric, NUMB_DISTANCE_VALUES, Worley2D, Worley3D, WorleyValue, insert_distance};
    use crate::{Grid2, Grid3, NoiseGenerator};

    #[test]
    fn insert_distance_keeps_sorted() {
        let mut d = [f32::INFINITY; NUMB_DISTANCE_VALUES];
        for v in [5.0, 1.0, 3.0, 0.5, 4.0] {
            insert_distance(&mut d, v);
        }
        assert_eq!(d, [0.5, 1.0, 3.0]);
        assert!(d[0] <= d[1] && d[1] <= d[2]);
    }

    #[test]
    fn worley2_distances_sorted_ascending() {
        let noise = Worley2D::new(2025, 8.0, 1, 4);
        let distances = noise.closest_distances(10.0, 12.0, 8, 8, 64.0, 64.0);
        assert!(distances[0] <= distances[1]);
        assert!(distances[1] <= distances[2]);
        assert!(distances[0].is_finite());
    }

    #[test]
    fn worley2_determinism() {
        let mut a = Grid2::new(32, 32, 0.0);
        let mut b = Grid2::new(32, 32, 0.0);
        Worley2D::new(9, 8.0, 1, 3).generate2(&mut a).unwrap();
        Worley2D::new(9, 8.0, 1, 3).generate2(&mut b).unwrap();
        assert_eq!(a.as_slice(), b.as_slice());
    }

    #[test]
    fn worley2_remapped_range() {
        let mut g = Grid2::new(48, 48, 0.0);
        Worley2D::new(4, 12.0, 1, 4).generate2(&mut g).unwrap();
        for &v in g.as_slice() {
            assert!((0.0..=1.0).contains(&v), "value {} outside [0,1]", v);
        }
    }

    #[test]
    fn worley2_metric_changes_output() {
        let mut a = Grid2::new(24, 24, 0.0);
        let mut b = Grid2::new(24, 24, 0.0);
        let mut w = Worley2D::new(11, 6.0, 1, 3);
        w.generate2(&mut a).unwrap();
        w.distance = DistanceMetric::Manhattan;
        w.generate2(&mut b).unwrap();
        assert_ne!(a.as_slice(), b.as_slice());
    }

    #[test]
    fn worley2_difference_value_non_negative_raw() {
        let mut w = Worley2D::new(3, 8.0, 2, 5);
        w.value = WorleyValue::Difference21;
        w.remap = false;
        let mut g = Grid2::new(32, 32, 0.0);
        w.generate2(&mut g).unwrap();
        // d2 >= d1 always, so the raw difference never goes negative
        assert!(g.as_slice().iter().all(|&v| v >= 0.0));
    }

    #[test]
    fn worley3_determinism_and_range() {
        let mut a = Grid3::new(12, 12, 12, 0.0);
        let mut b = Grid3::new(12, 12, 12, 0.0);
        Worley3D::new(77, 6.0, 1, 3).generate3(&mut a).unwrap();
        Worley3D::new(77, 6.0, 1, 3).generate3(&mut b).unwrap();
        assert_eq!(a.as_slice(), b.as_slice());
        for &v in a.as_slice() {
            assert!((0.0..=1.0).contains(&v));
        }
    }
}
