use crate::{Grid2, Interval};

// A filter region selects grid cells and assigns each a strength in [0,1].
// Cells are reported through the callback in a stable row-major order; a
// cell is only eligible while its *current* value lies inside `active_in`.
pub trait FilterRegion2 {
    fn for_each_cell(&self, grid: &Grid2<f32>, callback: &mut dyn FnMut(i32, i32, f32));
}

// Every cell of the grid, uniform strength
pub struct MaxRegion2 {
    pub strength: f32,
    pub active_in: Interval,
}

impl Default for MaxRegion2 {
    fn default() -> Self {
        Self {
            strength: 1.0,
            active_in: Interval::EVERYTHING,
        }
    }
}

impl FilterRegion2 for MaxRegion2 {
    fn for_each_cell(&self, grid: &Grid2<f32>, callback: &mut dyn FnMut(i32, i32, f32)) {
        for y in 0..grid.height() as i32 {
            for x in 0..grid.width() as i32 {
                if self.active_in.is_inside(grid.get(x, y)) {
                    callback(x, y, self.strength);
                }
            }
        }
    }
}

// Disc around `center`, optional radial strength dropoff.
// dropoff > 0: strength fades linearly from 1 at the center down to 0 at
// dropoff * radius, staying 0 beyond. dropoff < 0 inverts the fade
// direction (0 at the center, 1 at |dropoff| * radius). 0 means uniform.
pub struct CircleRegion2 {
    pub center: (f32, f32),
    pub radius: f32,
    pub dropoff: f32,
    pub strength: f32,
    pub active_in: Interval,
    // Toroidal addressing for discs straddling a grid edge; cells outside
    // the grid are skipped when false
    pub wrap: bool,
}

impl CircleRegion2 {
    pub fn new(center: (f32, f32), radius: f32) -> Self {
        Self {
            center,
            radius,
            dropoff: 0.0,
            strength: 1.0,
            active_in: Interval::EVERYTHING,
            wrap: false,
        }
    }

    fn dropoff_factor(&self, dist: f32) -> f32 {
        if self.dropoff == 0.0 {
            1.0
        } else if self.dropoff > 0.0 {
            let fade = self.dropoff * self.radius;
            (1.0 - dist / fade).clamp(0.0, 1.0)
        } else {
            let fade = -self.dropoff * self.radius;
            (dist / fade).clamp(0.0, 1.0)
        }
    }
}

impl FilterRegion2 for CircleRegion2 {
    fn for_each_cell(&self, grid: &Grid2<f32>, callback: &mut dyn FnMut(i32, i32, f32)) {
        // Bounding box of the disc
        let x_min = (self.center.0 - self.radius).floor() as i32;
        let x_max = (self.center.0 + self.radius).ceil() as i32;
        let y_min = (self.center.1 - self.radius).floor() as i32;
        let y_max = (self.center.1 + self.radius).ceil() as i32;

        for y in y_min..=y_max {
            for x in x_min..=x_max {
                let dx = x as f32 - self.center.0;
                let dy = y as f32 - self.center.1;
                let dist = (dx * dx + dy * dy).sqrt();
                if dist > self.radius {
                    continue;
                }
                let (gx, gy) = if self.wrap {
                    grid.wrap(x, y)
                } else if grid.contains(x, y) {
                    (x, y)
                } else {
                    continue;
                };
                if !self.active_in.is_inside(grid.get(gx, gy)) {
                    continue;
                }
                callback(gx, gy, self.strength * self.dropoff_factor(dist));
            }
        }
    }
}

// Axis-aligned rectangle, corners inclusive
pub struct RectRegion2 {
    pub min: (i32, i32),
    pub max: (i32, i32),
    pub strength: f32,
    pub active_in: Interval,
    pub wrap: bool,
}

impl RectRegion2 {
    pub fn new(min: (i32, i32), max: (i32, i32)) -> Self {
        Self {
            min,
            max,
            strength: 1.0,
            active_in: Interval::EVERYTHING,
            wrap: false,
        }
    }
}

impl FilterRegion2 for RectRegion2 {
    fn for_each_cell(&self, grid: &Grid2<f32>, callback: &mut dyn FnMut(i32, i32, f32)) {
        for y in self.min.1..=self.max.1 {
            for x in self.min.0..=self.max.0 {
                let (gx, gy) = if self.wrap {
                    grid.wrap(x, y)
                } else if grid.contains(x, y) {
                    (x, y)
                } else {
                    continue;
                };
                if !self.active_in.is_inside(grid.get(gx, gy)) {
                    continue;
                }
                callback(gx, gy, self.strength);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CircleRegion2, FilterRegion2, MaxRegion2, RectRegion2};
    use crate::{Grid2, Interval};

    fn collect(region: &dyn FilterRegion2, grid: &Grid2<f32>) -> Vec<(i32, i32, f32)> {
        let mut cells = Vec::new();
        region.for_each_cell(grid, &mut |x, y, s| cells.push((x, y, s)));
        cells
    }

    #[test]
    fn max_region_covers_grid() {
        let g = Grid2::new(4, 3, 0.5);
        let cells = collect(&MaxRegion2::default(), &g);
        assert_eq!(cells.len(), 12);
        assert!(cells.iter().all(|&(_, _, s)| s == 1.0));
    }

    #[test]
    fn max_region_active_in_gates_cells() {
        let mut g = Grid2::new(4, 1, 0.2);
        g.set(2, 0, 0.9);
        let region = MaxRegion2 {
            strength: 1.0,
            active_in: Interval::from_bounds(0.5, 1.0),
        };
        let cells = collect(&region, &g);
        assert_eq!(cells, vec![(2, 0, 1.0)]);
    }

    #[test]
    fn circle_region_stays_in_radius() {
        let g = Grid2::new(16, 16, 0.0);
        let region = CircleRegion2::new((8.0, 8.0), 3.0);
        let cells = collect(&region, &g);
        assert!(!cells.is_empty());
        for (x, y, s) in cells {
            let d = ((x as f32 - 8.0).powi(2) + (y as f32 - 8.0).powi(2)).sqrt();
            assert!(d <= 3.0);
            assert_eq!(s, 1.0);
        }
    }

    #[test]
    fn circle_region_dropoff_fades_out() {
        let g = Grid2::new(32, 32, 0.0);
        let mut region = CircleRegion2::new((16.0, 16.0), 8.0);
        region.dropoff = 0.5; // strength hits zero at half the radius
        let cells = collect(&region, &g);
        for (x, y, s) in cells {
            let d = ((x as f32 - 16.0).powi(2) + (y as f32 - 16.0).powi(2)).sqrt();
            if d >= 4.0 {
                assert_eq!(s, 0.0, "cell at distance {} should be faded out", d);
            } else {
                assert!(s > 0.0);
            }
        }
        // Center cell keeps full strength
        let center = collect(&region, &g)
            .into_iter()
            .find(|&(x, y, _)| x == 16 && y == 16)
            .unwrap();
        assert_eq!(center.2, 1.0);
    }

    #[test]
    fn circle_region_inverted_dropoff() {
        let g = Grid2::new(32, 32, 0.0);
        let mut region = CircleRegion2::new((16.0, 16.0), 8.0);
        region.dropoff = -1.0; // fades inward: edge strong, center weak
        let cells = collect(&region, &g);
        let center = cells.iter().find(|&&(x, y, _)| x == 16 && y == 16).unwrap();
        assert_eq!(center.2, 0.0);
        let edge = cells.iter().find(|&&(x, y, _)| x == 24 && y == 16).unwrap();
        assert!((edge.2 - 1.0).abs() < 1e-6);
    }

    #[test]
    fn circle_region_wrap_straddles_edge() {
        let g = Grid2::new(10, 10, 0.0);
        let mut region = CircleRegion2::new((0.0, 5.0), 2.0);
        region.wrap = true;
        let cells = collect(&region, &g);
        // Cells at x = -1, -2 wrap around to x = 9, 8
        assert!(cells.iter().any(|&(x, _, _)| x == 9));
        assert!(cells.iter().any(|&(x, _, _)| x == 8));
    }

    #[test]
    fn circle_region_no_wrap_skips_outside() {
        let g = Grid2::new(10, 10, 0.0);
        let region = CircleRegion2::new((0.0, 5.0), 2.0);
        let cells = collect(&region, &g);
        assert!(cells.iter().all(|&(x, _, _)| x >= 0 && x <= 2));
    }

    #[test]
    fn rect_region_inclusive_corners() {
        let g = Grid2::new(8, 8, 0.0);
        let region = RectRegion2::new((2, 3), (4, 5));
        let cells = collect(&region, &g);
        assert_eq!(cells.len(), 9);
        assert!(cells.contains(&(2, 3, 1.0)));
        assert!(cells.contains(&(4, 5, 1.0)));
    }

    #[test]
    fn rect_region_wrap() {
        let g = Grid2::new(8, 8, 0.0);
        let mut region = RectRegion2::new((6, 0), (9, 0));
        region.wrap = true;
        let cells = collect(&region, &g);
        let xs: Vec<i32> = cells.iter().map(|&(x, _, _)| x).collect();
        assert_eq!(xs, vec![6, 7, 0, 1]);
    }
}
