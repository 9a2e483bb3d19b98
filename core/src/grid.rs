// Dense row-major grids, the universal noise output containers.
// Generators never own the grid they write into; the caller does.

// 2D grid of copyable elements (f32 for noise, but gradients and masks
// reuse the same container with other element types)
#[derive(Clone, Debug, PartialEq)]
pub struct Grid2<T = f32> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

impl<T: Copy> Grid2<T> {
    pub fn new(width: usize, height: usize, value: T) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be non-zero");
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    // Bounds-checked flat index. Out-of-range access is a programmer error;
    // callers that may hold wild coordinates go through wrap() or clamp()
    #[inline]
    fn index(&self, x: i32, y: i32) -> usize {
        assert!(
            x >= 0 && (x as usize) < self.width && y >= 0 && (y as usize) < self.height,
            "grid access out of range: ({}, {}) on a {}x{} grid",
            x,
            y,
            self.width,
            self.height
        );
        y as usize * self.width + x as usize
    }

    #[inline]
    pub fn get(&self, x: i32, y: i32) -> T {
        self.data[self.index(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: i32, y: i32, value: T) {
        let i = self.index(x, y);
        self.data[i] = value;
    }

    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    // Functional fill: value = f(x, y) for every cell, row by row
    pub fn fill_with(&mut self, mut f: impl FnMut(i32, i32) -> T) {
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let i = y as usize * self.width + x as usize;
                self.data[i] = f(x, y);
            }
        }
    }

    // Copy another grid in at `offset`; cells that fall outside the source
    // get `default`
    pub fn fill_from(&mut self, other: &Grid2<T>, default: T, offset: (i32, i32)) {
        let (ox, oy) = offset;
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let sx = x - ox;
                let sy = y - oy;
                let v = if sx >= 0
                    && (sx as usize) < other.width
                    && sy >= 0
                    && (sy as usize) < other.height
                {
                    other.get(sx, sy)
                } else {
                    default
                };
                self.set(x, y, v);
            }
        }
    }

    // Reallocates; any previous contents are discarded
    pub fn reset(&mut self, width: usize, height: usize, value: T) {
        assert!(width > 0 && height > 0, "grid dimensions must be non-zero");
        self.width = width;
        self.height = height;
        self.data = vec![value; width * height];
    }

    // Toroidal addressing: normalize each axis into range, whatever the
    // magnitude of the input
    #[inline]
    pub fn wrap(&self, x: i32, y: i32) -> (i32, i32) {
        (
            x.rem_euclid(self.width as i32),
            y.rem_euclid(self.height as i32),
        )
    }

    // Saturate each axis independently to [0, dimension-1]
    #[inline]
    pub fn clamp(&self, x: i32, y: i32) -> (i32, i32) {
        (
            x.clamp(0, self.width as i32 - 1),
            y.clamp(0, self.height as i32 - 1),
        )
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && (x as usize) < self.width && y >= 0 && (y as usize) < self.height
    }

    // Row-major view of the raw cells
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl Grid2<f32> {
    // All cells start "unset" (NaN sentinel); diamond-square only writes
    // cells that are still unset, so callers can pin values beforehand
    pub fn unset(width: usize, height: usize) -> Self {
        Self::new(width, height, f32::NAN)
    }

    // Observed value range, ignoring unset cells
    pub fn min_max(&self) -> (f32, f32) {
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        for &v in &self.data {
            if v.is_nan() {
                continue;
            }
            min = min.min(v);
            max = max.max(v);
        }
        (min, max)
    }
}

// 3D grid, laid out as depth slabs of row-major planes
#[derive(Clone, Debug, PartialEq)]
pub struct Grid3<T = f32> {
    width: usize,
    height: usize,
    depth: usize,
    data: Vec<T>,
}

impl<T: Copy> Grid3<T> {
    pub fn new(width: usize, height: usize, depth: usize, value: T) -> Self {
        assert!(
            width > 0 && height > 0 && depth > 0,
            "grid dimensions must be non-zero"
        );
        Self {
            width,
            height,
            depth,
            data: vec![value; width * height * depth],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[inline]
    fn index(&self, x: i32, y: i32, z: i32) -> usize {
        assert!(
            x >= 0
                && (x as usize) < self.width
                && y >= 0
                && (y as usize) < self.height
                && z >= 0
                && (z as usize) < self.depth,
            "grid access out of range: ({}, {}, {}) on a {}x{}x{} grid",
            x,
            y,
            z,
            self.width,
            self.height,
            self.depth
        );
        (z as usize * self.height + y as usize) * self.width + x as usize
    }

    #[inline]
    pub fn get(&self, x: i32, y: i32, z: i32) -> T {
        self.data[self.index(x, y, z)]
    }

    #[inline]
    pub fn set(&mut self, x: i32, y: i32, z: i32, value: T) {
        let i = self.index(x, y, z);
        self.data[i] = value;
    }

    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    pub fn fill_with(&mut self, mut f: impl FnMut(i32, i32, i32) -> T) {
        for z in 0..self.depth as i32 {
            for y in 0..self.height as i32 {
                for x in 0..self.width as i32 {
                    let i = (z as usize * self.height + y as usize) * self.width + x as usize;
                    self.data[i] = f(x, y, z);
                }
            }
        }
    }

    // Copy another volume in at `offset`; cells that fall outside the source
    // get `default`
    pub fn fill_from(&mut self, other: &Grid3<T>, default: T, offset: (i32, i32, i32)) {
        let (ox, oy, oz) = offset;
        for z in 0..self.depth as i32 {
            for y in 0..self.height as i32 {
                for x in 0..self.width as i32 {
                    let sx = x - ox;
                    let sy = y - oy;
                    let sz = z - oz;
                    let v = if other.contains(sx, sy, sz) {
                        other.get(sx, sy, sz)
                    } else {
                        default
                    };
                    self.set(x, y, z, v);
                }
            }
        }
    }

    pub fn reset(&mut self, width: usize, height: usize, depth: usize, value: T) {
        assert!(
            width > 0 && height > 0 && depth > 0,
            "grid dimensions must be non-zero"
        );
        self.width = width;
        self.height = height;
        self.depth = depth;
        self.data = vec![value; width * height * depth];
    }

    #[inline]
    pub fn wrap(&self, x: i32, y: i32, z: i32) -> (i32, i32, i32) {
        (
            x.rem_euclid(self.width as i32),
            y.rem_euclid(self.height as i32),
            z.rem_euclid(self.depth as i32),
        )
    }

    #[inline]
    pub fn clamp(&self, x: i32, y: i32, z: i32) -> (i32, i32, i32) {
        (
            x.clamp(0, self.width as i32 - 1),
            y.clamp(0, self.height as i32 - 1),
            z.clamp(0, self.depth as i32 - 1),
        )
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32, z: i32) -> bool {
        x >= 0
            && (x as usize) < self.width
            && y >= 0
            && (y as usize) < self.height
            && z >= 0
            && (z as usize) < self.depth
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl Grid3<f32> {
    pub fn min_max(&self) -> (f32, f32) {
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        for &v in &self.data {
            if v.is_nan() {
                continue;
            }
            min = min.min(v);
            max = max.max(v);
        }
        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::{Grid2, Grid3};

    #[test]
    fn grid2_wrap_equivalence() {
        let g = Grid2::new(8, 5, 0.0f32);
        // W + 3 wraps back onto 3 itself
        assert_eq!(g.wrap(8 + 3, 0), (3, 0));
        assert_eq!(g.wrap(3, 0), (3, 0));
        // Arbitrarily far out, both directions
        assert_eq!(g.wrap(-1, -1), (7, 4));
        assert_eq!(g.wrap(8 * 10 + 2, 5 * 7 + 1), (2, 1));
    }

    #[test]
    fn grid2_clamp_saturates() {
        let g = Grid2::new(4, 4, 0.0f32);
        assert_eq!(g.clamp(-3, 2), (0, 2));
        assert_eq!(g.clamp(9, -1), (3, 0));
    }

    #[test]
    fn grid2_fill_with_row_major() {
        let mut g = Grid2::new(3, 2, 0.0f32);
        g.fill_with(|x, y| (y * 3 + x) as f32);
        assert_eq!(g.as_slice(), &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(g.get(2, 1), 5.0);
    }

    #[test]
    fn grid2_fill_from_with_offset() {
        let mut src = Grid2::new(2, 2, 0.0f32);
        src.fill_with(|x, y| (y * 2 + x) as f32 + 1.0);
        let mut dst = Grid2::new(4, 4, 0.0f32);
        dst.fill_from(&src, -1.0, (1, 1));
        assert_eq!(dst.get(1, 1), 1.0);
        assert_eq!(dst.get(2, 2), 4.0);
        // Outside the source footprint falls back to the default
        assert_eq!(dst.get(0, 0), -1.0);
        assert_eq!(dst.get(3, 3), -1.0);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn grid2_out_of_range_panics() {
        let g = Grid2::new(4, 4, 0.0f32);
        let _ = g.get(4, 0);
    }

    #[test]
    fn grid2_reset_reallocates() {
        let mut g = Grid2::new(2, 2, 1.0f32);
        g.reset(3, 5, 0.5);
        assert_eq!(g.width(), 3);
        assert_eq!(g.height(), 5);
        assert!(g.as_slice().iter().all(|&v| v == 0.5));
    }

    #[test]
    fn grid2_unset_is_nan() {
        let g = Grid2::unset(3, 3);
        assert!(g.get(1, 1).is_nan());
    }

    #[test]
    fn grid3_wrap_and_index() {
        let mut g = Grid3::new(4, 3, 2, 0.0f32);
        assert_eq!(g.wrap(4 + 1, -1, 2), (1, 2, 0));
        g.set(3, 2, 1, 9.0);
        assert_eq!(g.get(3, 2, 1), 9.0);
        assert_eq!(g.as_slice()[(1 * 3 + 2) * 4 + 3], 9.0);
    }

    #[test]
    fn grid3_fill_from_with_offset() {
        let mut src = Grid3::new(2, 2, 2, 0.0f32);
        src.fill_with(|x, y, z| ((z * 2 + y) * 2 + x) as f32 + 1.0);
        let mut dst = Grid3::new(4, 4, 4, 0.0f32);
        dst.fill_from(&src, -1.0, (1, 1, 1));
        assert_eq!(dst.get(1, 1, 1), 1.0);
        assert_eq!(dst.get(2, 2, 2), 8.0);
        // Outside the source footprint falls back to the default
        assert_eq!(dst.get(0, 0, 0), -1.0);
        assert_eq!(dst.get(3, 3, 3), -1.0);
    }

    #[test]
    fn grid3_min_max_skips_nan() {
        let mut g = Grid3::new(2, 2, 2, 0.25f32);
        g.set(0, 0, 0, f32::NAN);
        g.set(1, 1, 1, 0.75);
        assert_eq!(g.min_max(), (0.25, 0.75));
    }
}
