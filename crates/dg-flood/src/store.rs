//! The `MessageStore` — message state of every mobile station.

use std::collections::BTreeMap;

use dg_core::StationId;

use crate::{BroadcastPhase, MessageState};

/// Message state keyed by station, iterated in id order.
///
/// Only stations that take part in the broadcast are tracked; anchors are
/// never inserted, so copies sent toward an untracked id are dropped.
#[derive(Debug, Clone, Default)]
pub struct MessageStore {
    states: BTreeMap<StationId, MessageState>,
    source: Option<StationId>,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store tracking `ids`, none holding the message.
    pub fn with_stations(ids: impl IntoIterator<Item = StationId>) -> Self {
        Self {
            states: ids.into_iter().map(|id| (id, MessageState::default())).collect(),
            source: None,
        }
    }

    /// Start tracking `id` with no message.  No-op if already tracked.
    pub fn insert_station(&mut self, id: StationId) {
        self.states.entry(id).or_default();
    }

    /// Stop tracking `id`.  The recorded source id is kept even if the
    /// source itself is removed.
    pub fn remove_station(&mut self, id: StationId) -> Option<MessageState> {
        self.states.remove(&id)
    }

    /// Give the message to `id` as the source: pending, zero receptions.
    ///
    /// Returns `false` if `id` is not tracked.
    pub fn seed_source(&mut self, id: StationId, lifetime: Option<u32>) -> bool {
        let Some(state) = self.states.get_mut(&id) else {
            return false;
        };
        *state = MessageState {
            phase:           BroadcastPhase::Pending,
            reception_count: 0,
            lifetime,
            is_source:       true,
            expired:         false,
        };
        self.source = Some(id);
        true
    }

    pub fn source(&self) -> Option<StationId> {
        self.source
    }

    pub fn get(&self, id: StationId) -> Option<&MessageState> {
        self.states.get(&id)
    }

    pub fn get_mut(&mut self, id: StationId) -> Option<&mut MessageState> {
        self.states.get_mut(&id)
    }

    /// `(id, state)` in id order.
    pub fn iter(&self) -> impl Iterator<Item = (StationId, &MessageState)> + '_ {
        self.states.iter().map(|(&id, s)| (id, s))
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (StationId, &mut MessageState)> + '_ {
        self.states.iter_mut().map(|(&id, s)| (id, s))
    }

    /// Ids of the pending stations, in id order.
    pub fn pending(&self) -> Vec<StationId> {
        self.iter().filter(|(_, s)| s.is_pending()).map(|(id, _)| id).collect()
    }

    pub fn has_pending(&self) -> bool {
        self.states.values().any(MessageState::is_pending)
    }

    /// Stations currently holding the message (the reachability metric).
    pub fn reached_count(&self) -> usize {
        self.states.values().filter(|s| s.has_message()).count()
    }

    /// Ids of the stations currently holding the message.
    pub fn holders(&self) -> Vec<StationId> {
        self.iter().filter(|(_, s)| s.has_message()).map(|(id, _)| id).collect()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
