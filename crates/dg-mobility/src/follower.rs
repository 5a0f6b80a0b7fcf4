//! Follower mobility: every station chases another station.

use dg_core::{Point, SimRng, StationId};

use crate::{MobilityModel, MoveContext, MovementState, StepOutcome, step_toward};

/// Each station picks one other station and moves toward its current
/// position at its drawn speed.  Once within the arrival threshold it stops
/// tracking and stays put until it is reseeded.
///
/// Unlike the waypoint models the follower does not snap onto the target;
/// it halts wherever it was when it came close enough.
#[derive(Debug, Clone, Copy, Default)]
pub struct Follower;

impl MobilityModel for Follower {
    fn name(&self) -> &'static str {
        "follower"
    }

    fn choose_destination(&self, _position: Point, _rng: &mut SimRng) -> Option<Point> {
        None
    }

    fn follows_targets(&self) -> bool {
        true
    }

    /// Uniform over `candidates` minus `id`.  `None` for a lone station.
    fn choose_target(
        &self,
        id:         StationId,
        candidates: &[StationId],
        rng:        &mut SimRng,
    ) -> Option<StationId> {
        let others: Vec<StationId> = candidates.iter().copied().filter(|&c| c != id).collect();
        rng.choose(&others).copied()
    }

    fn step(
        &self,
        position: &mut Point,
        state:    &mut MovementState,
        ctx:      &MoveContext,
        _rng:     &mut SimRng,
    ) -> StepOutcome {
        if state.arrived {
            return StepOutcome::Idle;
        }
        let Some(target) = state.destination else {
            return StepOutcome::Idle;
        };
        if position.distance(target) <= ctx.arrival_threshold {
            state.arrived = true;
            return StepOutcome::Arrived;
        }
        step_toward(position, target, state.speed);
        StepOutcome::Moved
    }
}
