//! The `MobilityStore` — movement state keyed by station.

use rustc_hash::FxHashMap;

use dg_core::StationId;

use crate::MovementState;

/// Movement state for every mobile station.
///
/// Keyed by id rather than indexed: churn removes stations from the middle
/// of the population and ids are never reused.  Iteration order is driven
/// by the station store, never by this map.
#[derive(Debug, Default)]
pub struct MobilityStore {
    states: FxHashMap<StationId, MovementState>,
}

impl MobilityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// State of `id`, created unassigned on first access.
    pub fn entry(&mut self, id: StationId) -> &mut MovementState {
        self.states.entry(id).or_default()
    }

    pub fn get(&self, id: StationId) -> Option<&MovementState> {
        self.states.get(&id)
    }

    pub fn insert(&mut self, id: StationId, state: MovementState) {
        self.states.insert(id, state);
    }

    pub fn remove(&mut self, id: StationId) -> Option<MovementState> {
        self.states.remove(&id)
    }

    /// `true` if `id` is travelling (has a destination, not yet arrived).
    #[inline]
    pub fn in_transit(&self, id: StationId) -> bool {
        self.states
            .get(&id)
            .is_some_and(|s| s.destination.is_some() && !s.arrived)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
