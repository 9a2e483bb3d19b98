use crate::{Grid3, Interval};

// 3D counterpart of FilterRegion2: selects volume cells with a strength
// in [0,1], gated by the cell's current value against `active_in`
pub trait FilterRegion3 {
    fn for_each_cell(&self, grid: &Grid3<f32>, callback: &mut dyn FnMut(i32, i32, i32, f32));
}

// Every cell of the volume, uniform strength
pub struct MaxRegion3 {
    pub strength: f32,
    pub active_in: Interval,
}

impl Default for MaxRegion3 {
    fn default() -> Self {
        Self {
            strength: 1.0,
            active_in: Interval::EVERYTHING,
        }
    }
}

impl FilterRegion3 for MaxRegion3 {
    fn for_each_cell(&self, grid: &Grid3<f32>, callback: &mut dyn FnMut(i32, i32, i32, f32)) {
        for z in 0..grid.depth() as i32 {
            for y in 0..grid.height() as i32 {
                for x in 0..grid.width() as i32 {
                    if self.active_in.is_inside(grid.get(x, y, z)) {
                        callback(x, y, z, self.strength);
                    }
                }
            }
        }
    }
}

// Ball around `center`; dropoff semantics match CircleRegion2
pub struct SphereRegion3 {
    pub center: (f32, f32, f32),
    pub radius: f32,
    pub dropoff: f32,
    pub strength: f32,
    pub active_in: Interval,
    pub wrap: bool,
}

impl SphereRegion3 {
    pub fn new(center: (f32, f32, f32), radius: f32) -> Self {
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

impl FilterRegion3 for SphereRegion3 {
    fn for_each_cell(&self, grid: &Grid3<f32>, callback: &mut dyn FnMut(i32, i32, i32, f32)) {
        let x_min = (self.center.0 - self.radius).floor() as i32;
        let x_max = (self.center.0 + self.radius).ceil() as i32;
        let y_min = (self.center.1 - self.radius).floor() as i32;
        let y_max = (self.center.1 + self.radius).ceil() as i32;
        let z_min = (self.center.2 - self.radius).floor() as i32;
        let z_max = (self.center.2 + self.radius).ceil() as i32;

        for z in z_min..=z_max {
            for y in y_min..=y_max {
                for x in x_min..=x_max {
                    let dx = x as f32 - self.center.0;
                    let dy = y as f32 - self.center.1;
                    let dz = z as f32 - self.center.2;
                    let dist = (dx * dx + dy * dy + dz * dz).sqrt();
                    if dist > self.radius {
                        continue;
                    }
                    let (gx, gy, gz) = if self.wrap {
                        grid.wrap(x, y, z)
                    } else if grid.contains(x, y, z) {
                        (x, y, z)
                    } else {
                        continue;
                    };
                    if !self.active_in.is_inside(grid.get(gx, gy, gz)) {
                        continue;
                    }
                    callback(gx, gy, gz, self.strength * self.dropoff_factor(dist));
                }
            }
        }
    }
}

// Axis-aligned box, corners inclusive
pub struct CubeRegion3 {
    pub min: (i32, i32, i32),
    pub max: (i32, i32, i32),
    pub strength: f32,
    pub active_in: Interval,
    pub wrap: bool,
}

impl CubeRegion3 {
    pub fn new(min: (i32, i32, i32), max: (i32, i32, i32)) -> Self {
        Self {
            min,
            max,
            strength: 1.0,
            active_in: Interval::EVERYTHING,
            wrap: false,
        }
    }
}

impl FilterRegion3 for CubeRegion3 {
    fn for_each_cell(&self, grid: &Grid3<f32>, callback: &mut dyn FnMut(i32, i32, i32, f32)) {
        for z in self.min.2..=self.max.2 {
            for y in self.min.1..=self.max.1 {
                for x in self.min.0..=self.max.0 {
                    let (gx, gy, gz) = if self.wrap {
                        grid.wrap(x, y, z)
                    } else if grid.contains(x, y, z) {
                        (x, y, z)
                    } else {
                        continue;
                    };
                    if !self.active_in.is_inside(grid.get(gx, gy, gz)) {
                        continue;
                    }
                    callback(gx, gy, gz, self.strength);
                }
            }
        }
    }
}
