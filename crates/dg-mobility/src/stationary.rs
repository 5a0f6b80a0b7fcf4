//! A model under which stations never move.

use dg_core::{Point, SimRng};

use crate::{MobilityModel, MoveContext, MovementState, StepOutcome};

/// Positions are fixed for the whole run.
///
/// Useful for protocol experiments where only the flood should evolve.
pub struct Stationary;

impl MobilityModel for Stationary {
    fn name(&self) -> &'static str {
        "stationary"
    }

    fn choose_destination(&self, _position: Point, _rng: &mut SimRng) -> Option<Point> {
        None
    }

    fn step(
        &self,
        _position: &mut Point,
        _state:    &mut MovementState,
        _ctx:      &MoveContext,
        _rng:      &mut SimRng,
    ) -> StepOutcome {
        StepOutcome::Idle
    }
}
