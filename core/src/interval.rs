use serde::{Deserialize, Serialize};

// Closed numeric range stored as center + range
// Immutable value type; every operation returns a fresh value
// range is never negative (absolute value taken on construction)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    center: f32,
    range: f32,
}

impl Interval {
    // The [0, 1] interval most noise values live in
    pub const ZERO_ONE: Interval = Interval {
        center: 0.5,
        range: 1.0,
    };

    // Accepts every finite value; the default active-range of filter regions
    pub const EVERYTHING: Interval = Interval {
        center: 0.0,
        range: f32::INFINITY,
    };

    // Sentinel returned when an intersection is empty
    pub const INVALID: Interval = Interval {
        center: 0.0,
        range: 0.0,
    };

    pub fn new(center: f32, range: f32) -> Self {
        Self {
            center,
            range: range.abs(),
        }
    }

    pub fn from_bounds(start: f32, end: f32) -> Self {
        Self {
            center: (start + end) * 0.5,
            range: (end - start).abs(),
        }
    }

    // Exclusive ends shrink the effective bound by `epsilon` before the
    // center/range are computed
    pub fn from_open_bounds(
        start: f32,
        end: f32,
        epsilon: f32,
        start_inclusive: bool,
        end_inclusive: bool,
    ) -> Self {
        let s = if start_inclusive { start } else { start + epsilon };
        let e = if end_inclusive { end } else { end - epsilon };
        Self::from_bounds(s, e)
    }

    #[inline]
    pub fn center(&self) -> f32 {
        self.center
    }

    #[inline]
    pub fn range(&self) -> f32 {
        self.range
    }

    #[inline]
    pub fn half_range(&self) -> f32 {
        self.range * 0.5
    }

    #[inline]
    pub fn start(&self) -> f32 {
        self.center - self.half_range()
    }

    #[inline]
    pub fn end(&self) -> f32 {
        self.center + self.half_range()
    }

    pub fn clamp(&self, v: f32) -> f32 {
        v.clamp(self.start(), self.end())
    }

    // Fold v into the interval. Closed-form: a loop of repeated adds would
    // stall once |v| is so large that v ± range rounds back to v
    pub fn wrap(&self, v: f32) -> f32 {
        if self.range <= 0.0 || !self.range.is_finite() {
            return self.clamp(v);
        }
        self.start() + (v - self.start()).rem_euclid(self.range)
    }

    // Map t in [0,1] onto [start, end]
    #[inline]
    pub fn lerp(&self, t: f32) -> f32 {
        self.start() + t * self.range
    }

    // Inverse of lerp: where does v sit inside the interval, as [0,1]?
    // A zero-range interval has no interior, so fall back to the middle
    #[inline]
    pub fn lerp_component(&self, v: f32) -> f32 {
        if self.range == 0.0 {
            return 0.5;
        }
        (v - self.start()) / self.range
    }

    // Remap v from this interval into dest. Degenerate intervals (zero range
    // on either side) fall back to dest's center instead of dividing by zero
    pub fn map_value(&self, dest: Interval, v: f32) -> f32 {
        if self.range == 0.0 || dest.range == 0.0 {
            return dest.center;
        }
        dest.lerp(self.lerp_component(v))
    }

    // Mirror v around the interval's center, within the interval's span
    pub fn reflect(&self, v: f32) -> f32 {
        self.lerp(1.0 - self.lerp_component(v))
    }

    #[inline]
    pub fn is_inside(&self, v: f32) -> bool {
        v >= self.start() && v <= self.end()
    }

    // Do the two intervals overlap (shared point counts)?
    pub fn touches(&self, other: &Interval) -> bool {
        self.start() <= other.end() && other.start() <= self.end()
    }

    // Smallest interval covering both
    pub fn union(&self, other: &Interval) -> Interval {
        Interval::from_bounds(
            self.start().min(other.start()),
            self.end().max(other.end()),
        )
    }

    // Overlapping sub-interval, or the invalid sentinel when disjoint
    pub fn intersection(&self, other: &Interval) -> Interval {
        let s = self.start().max(other.start());
        let e = self.end().min(other.end());
        if s > e {
            return Interval::INVALID;
        }
        Interval::from_bounds(s, e)
    }
}

#[cfg(test)]
mod tests {
    use super::Interval;

    #[test]
    fn interval_negative_range_normalized() {
        let i = Interval::new(2.0, -4.0);
        assert_eq!(i.range(), 4.0);
        assert_eq!(i.start(), 0.0);
        assert_eq!(i.end(), 4.0);
    }

    #[test]
    fn interval_lerp_round_trip() {
        let i = Interval::from_bounds(-3.0, 5.0);
        for &v in &[-3.0, -1.5, 0.0, 2.25, 5.0] {
            let back = i.lerp(i.lerp_component(v));
            assert!((back - v).abs() < 1e-5, "round trip {} -> {}", v, back);
        }
    }

    #[test]
    fn interval_map_value_degenerate() {
        let zero = Interval::new(1.0, 0.0);
        let dest = Interval::from_bounds(0.0, 10.0);
        // Zero-range source falls back to dest center
        assert_eq!(zero.map_value(dest, 1.0), 5.0);
        // Zero-range dest falls back to its own center
        assert_eq!(dest.map_value(zero, 3.0), 1.0);
    }

    #[test]
    fn interval_map_value_linear() {
        let from = Interval::from_bounds(0.0, 2.0);
        let to = Interval::from_bounds(10.0, 20.0);
        assert!((from.map_value(to, 0.5) - 12.5).abs() < 1e-6);
    }

    #[test]
    fn interval_reflect_mirrors_around_center() {
        let i = Interval::from_bounds(0.0, 1.0);
        assert!((i.reflect(0.25) - 0.75).abs() < 1e-6);
        assert!((i.reflect(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn interval_wrap_far_out_of_range() {
        let i = Interval::from_bounds(0.0, 1.0);
        let w = i.wrap(5.25);
        assert!((w - 0.25).abs() < 1e-4, "wrapped to {}", w);
        let w = i.wrap(-2.75);
        assert!((w - 0.25).abs() < 1e-4, "wrapped to {}", w);
    }

    #[test]
    fn interval_wrap_beyond_float_step() {
        // At this magnitude v - 1.0 == v in f32; wrap must still return
        // (quickly) with an in-range value
        let i = Interval::from_bounds(0.0, 1.0);
        assert!((0.0..=1.0).contains(&i.wrap(1.0e20)));
        assert!((0.0..=1.0).contains(&i.wrap(-1.0e20)));
        assert!((0.0..=1.0).contains(&i.wrap(f32::MAX)));
    }

    #[test]
    fn interval_union_intersection() {
        let a = Interval::from_bounds(0.0, 2.0);
        let b = Interval::from_bounds(1.0, 4.0);
        assert_eq!(a.union(&b), Interval::from_bounds(0.0, 4.0));
        assert_eq!(a.intersection(&b), Interval::from_bounds(1.0, 2.0));

        let c = Interval::from_bounds(10.0, 11.0);
        assert!(!a.touches(&c));
        assert_eq!(a.intersection(&c), Interval::INVALID);
    }

    #[test]
    fn interval_open_bounds_shrink() {
        let closed = Interval::from_open_bounds(0.0, 1.0, 0.01, true, true);
        let open = Interval::from_open_bounds(0.0, 1.0, 0.01, false, false);
        assert_eq!(closed, Interval::from_bounds(0.0, 1.0));
        assert_eq!(open, Interval::from_bounds(0.01, 0.99));
    }

    #[test]
    fn interval_everything_accepts_all() {
        assert!(Interval::EVERYTHING.is_inside(0.0));
        assert!(Interval::EVERYTHING.is_inside(-1.0e30));
        assert!(Interval::EVERYTHING.is_inside(1.0e30));
    }

    #[test]
    fn interval_equality_exact() {
        assert_eq!(Interval::new(1.0, 2.0), Interval::from_bounds(0.0, 2.0));
        assert_ne!(Interval::new(1.0, 2.0), Interval::new(1.0, 2.5));
    }
}
