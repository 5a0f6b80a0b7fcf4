//! Per-station movement state.

use dg_core::{Point, StationId};

/// Where a station is heading and how fast.
///
/// A station is **travelling** while it has a destination and has not yet
/// arrived.  An arrived station keeps its old destination until the next
/// movement phase replaces it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementState {
    /// Current target, or `None` before the first choice and for models
    /// that do not use destinations.
    pub destination: Option<Point>,

    /// Distance covered per round, drawn at each destination choice.
    pub speed: f64,

    /// `true` once the station snapped onto `destination`.
    pub arrived: bool,

    /// Station being chased, for target-following models.  `destination`
    /// then mirrors the target's position as of the current round.
    pub target: Option<StationId>,
}

impl MovementState {
    /// No destination, not moving.
    #[inline]
    pub fn unassigned() -> Self {
        Self {
            destination: None,
            speed:       0.0,
            arrived:     false,
            target:      None,
        }
    }

    /// `true` if the next movement phase must choose a new destination.
    #[inline]
    pub fn needs_destination(&self) -> bool {
        self.arrived || self.destination.is_none()
    }

    /// Head for `destination` at `speed`, clearing the arrival flag and any
    /// followed station.
    #[inline]
    pub fn retarget(&mut self, destination: Option<Point>, speed: f64) {
        self.destination = destination;
        self.speed       = speed;
        self.arrived     = false;
        self.target      = None;
    }
}

impl Default for MovementState {
    fn default() -> Self {
        Self::unassigned()
    }
}
