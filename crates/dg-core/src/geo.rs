//! Planar coordinates inside the square simulation environment.
//!
//! The environment is `[0, env_size] × [0, env_size]`; positions are `f64`
//! because the movement step accumulates many small increments and the
//! arrival snap compares against a fixed threshold.

/// A position (or destination) in the environment square.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance.
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Squared Euclidean distance.
    #[inline]
    pub fn distance_squared(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// `true` if the point lies exactly on one of the four corners of the
    /// environment square.
    pub fn is_corner(self, env_size: f64) -> bool {
        let on_edge = |c: f64| c == 0.0 || c == env_size;
        on_edge(self.x) && on_edge(self.y)
    }

    /// `[x, y]` array form, as used by the R-tree index.
    #[inline]
    pub fn to_array(self) -> [f64; 2] {
        [self.x, self.y]
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}
