//! Random waypoint: destinations uniform over the whole square.

use dg_core::{Point, SimRng};

use crate::MobilityModel;

#[derive(Debug, Clone, Copy)]
pub struct RandomWaypoint {
    pub env_size: f64,
}

impl RandomWaypoint {
    pub fn new(env_size: f64) -> Self {
        Self { env_size }
    }
}

impl MobilityModel for RandomWaypoint {
    fn name(&self) -> &'static str {
        "random-waypoint"
    }

    fn choose_destination(&self, _position: Point, rng: &mut SimRng) -> Option<Point> {
        Some(Point::new(rng.unit() * self.env_size, rng.unit() * self.env_size))
    }
}
