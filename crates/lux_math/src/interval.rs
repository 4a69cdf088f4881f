/// A closed range of ray parameters `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// An empty interval (min > max, contains nothing).
    pub const EMPTY: Interval = Interval {
        min: f32::INFINITY,
        max: f32::NEG_INFINITY,
    };

    /// Create a new interval given min and max values.
    #[inline]
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// The parameter range of a ray leaving a surface: `[epsilon, +inf]`.
    ///
    /// The epsilon keeps the ray from re-hitting the surface it starts on.
    #[inline]
    pub fn from_epsilon(epsilon: f32) -> Self {
        Self::new(epsilon, f32::INFINITY)
    }

    /// Returns true if x is within `[min, max]`.
    #[inline]
    pub fn contains(&self, x: f32) -> bool {
        self.min <= x && x <= self.max
    }

    /// Returns a copy with `max` pulled in to `t`, used to shrink the search
    /// range after a closer hit.
    #[inline]
    pub fn clip_max(&self, t: f32) -> Interval {
        Interval::new(self.min, self.max.min(t))
    }
}
