//! Brownian mobility: independent bounded jitter on each axis every round.

use dg_core::{Point, SimRng};

use crate::{MobilityModel, MoveContext, MovementState, StepOutcome};

#[derive(Debug, Clone, Copy)]
pub struct Brownian {
    /// Per-axis offsets are uniform in `[-step, step]`.
    pub step:     f64,
    pub env_size: f64,
}

impl Brownian {
    pub fn new(step: f64, env_size: f64) -> Self {
        Self { step, env_size }
    }

    /// `coord + offset` if it stays inside the square, else `coord`.
    fn jitter(&self, coord: f64, rng: &mut SimRng) -> f64 {
        let moved = coord + rng.gen_range(-self.step..=self.step);
        if (0.0..=self.env_size).contains(&moved) { moved } else { coord }
    }
}

impl MobilityModel for Brownian {
    fn name(&self) -> &'static str {
        "brownian"
    }

    fn choose_destination(&self, _position: Point, _rng: &mut SimRng) -> Option<Point> {
        None
    }

    fn step(
        &self,
        position: &mut Point,
        _state:   &mut MovementState,
        _ctx:     &MoveContext,
        rng:      &mut SimRng,
    ) -> StepOutcome {
        let before = *position;
        position.x = self.jitter(position.x, rng);
        position.y = self.jitter(position.y, rng);
        if *position == before { StepOutcome::Idle } else { StepOutcome::Moved }
    }
}
