//! Manhattan mobility: stations travel along an axis-aligned street grid,
//! one axis at a time.
//!
//! Street lines sit at `k · spacing` for `k ∈ [1, streets − 1]` on both
//! axes, so no line ever lies on the border of the square.

use dg_core::{Point, SimConfig, SimRng};

use crate::MobilityModel;

#[derive(Debug, Clone, Copy)]
pub struct Manhattan {
    /// Distance between neighbouring lines.
    pub spacing: f64,
    /// Parallel lines per axis (at least 2).
    pub streets: u32,
}

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
}

impl Manhattan {
    pub fn new(spacing: f64, streets: u32) -> Self {
        Self { spacing, streets }
    }

    pub fn from_config(config: &SimConfig) -> Self {
        Self::new(config.street_spacing(), config.nb_parallel_streets)
    }

    /// A uniformly random interior line.
    fn random_line(&self, rng: &mut SimRng) -> f64 {
        let k = 1 + rng.gen_range(0..self.streets.saturating_sub(1).max(1));
        k as f64 * self.spacing
    }

    /// The interior line closest to `coord`.
    pub fn nearest_line(&self, coord: f64) -> f64 {
        let max_k = self.streets.saturating_sub(1).max(1) as f64;
        (coord / self.spacing).round().clamp(1.0, max_k) * self.spacing
    }

    fn random_axis(rng: &mut SimRng) -> Axis {
        if rng.gen_bool(0.5) { Axis::X } else { Axis::Y }
    }
}

impl MobilityModel for Manhattan {
    fn name(&self) -> &'static str {
        "manhattan"
    }

    /// Replace one coordinate, on a random axis, with a random line.
    fn choose_destination(&self, position: Point, rng: &mut SimRng) -> Option<Point> {
        let line = self.random_line(rng);
        Some(match Self::random_axis(rng) {
            Axis::X => Point::new(line, position.y),
            Axis::Y => Point::new(position.x, line),
        })
    }

    /// Snap one coordinate onto its nearest line, then head along that line
    /// to a random perpendicular line.
    fn first_destination(&self, position: &mut Point, rng: &mut SimRng) -> Option<Point> {
        let line = self.random_line(rng);
        Some(match Self::random_axis(rng) {
            Axis::X => {
                position.x = self.nearest_line(position.x);
                Point::new(position.x, line)
            }
            Axis::Y => {
                position.y = self.nearest_line(position.y);
                Point::new(line, position.y)
            }
        })
    }
}
