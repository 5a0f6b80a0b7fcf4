//! `StationStore` — the ordered station population.
//!
//! Stations are kept sorted by ascending `StationId`.  New stations always
//! receive an id larger than every id ever issued, so appending preserves the
//! order and lookups are a binary search.  Iterating in this order is what
//! makes RNG consumption (and therefore whole runs) reproducible.

use dg_core::{Point, StationId};

use crate::{Corner, Station};

/// The full population: mobile stations and the four corner anchors.
pub struct StationStore {
    /// All stations, sorted by id.
    stations: Vec<Station>,

    /// Next id to hand out.  Never decreases.
    next_id: StationId,

    /// Side length of the environment square.
    pub env_size: f64,
}

impl StationStore {
    /// An empty store for a square of side `env_size`.
    pub fn new(env_size: f64) -> Self {
        Self {
            stations: Vec::new(),
            next_id:  StationId(0),
            env_size,
        }
    }

    // ── Population changes ────────────────────────────────────────────────

    /// Add a mobile station at `position` and return its fresh id.
    pub fn spawn_mobile(&mut self, position: Point) -> StationId {
        let id = self.allocate_id();
        self.stations.push(Station::mobile(id, position));
        id
    }

    /// Add the anchor for `corner` and return its id.
    pub fn spawn_anchor(&mut self, corner: Corner) -> StationId {
        let id = self.allocate_id();
        self.stations.push(Station::anchor(id, corner, self.env_size));
        id
    }

    /// Remove a mobile station.  Returns `None` if `id` is unknown.
    ///
    /// # Panics
    /// Panics if `id` is an anchor.  Anchors are never removed.
    pub fn remove(&mut self, id: StationId) -> Option<Station> {
        let idx = self.index_of(id)?;
        assert!(!self.stations[idx].is_anchor(), "anchor {id} cannot be removed");
        Some(self.stations.remove(idx))
    }

    fn allocate_id(&mut self) -> StationId {
        let id = self.next_id;
        self.next_id = id.next();
        id
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    #[inline]
    fn index_of(&self, id: StationId) -> Option<usize> {
        self.stations.binary_search_by_key(&id, |s| s.id).ok()
    }

    pub fn get(&self, id: StationId) -> Option<&Station> {
        self.index_of(id).map(|i| &self.stations[i])
    }

    pub fn get_mut(&mut self, id: StationId) -> Option<&mut Station> {
        self.index_of(id).map(move |i| &mut self.stations[i])
    }

    pub fn contains(&self, id: StationId) -> bool {
        self.index_of(id).is_some()
    }

    // ── Iteration ─────────────────────────────────────────────────────────

    /// Every station, anchors included, in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Station> + '_ {
        self.stations.iter()
    }

    /// Mobile stations in id order.
    pub fn mobile(&self) -> impl Iterator<Item = &Station> + '_ {
        self.stations.iter().filter(|s| !s.is_anchor())
    }

    /// Mobile stations, mutably, in id order.
    pub fn mobile_mut(&mut self) -> impl Iterator<Item = &mut Station> + '_ {
        self.stations.iter_mut().filter(|s| !s.is_anchor())
    }

    /// Ids of the mobile stations in id order.
    pub fn mobile_ids(&self) -> Vec<StationId> {
        self.mobile().map(|s| s.id).collect()
    }

    /// `(id, position)` snapshot of the mobile stations.
    pub fn mobile_positions(&self) -> Vec<(StationId, Point)> {
        self.mobile().map(|s| (s.id, s.position)).collect()
    }

    // ── Counts ────────────────────────────────────────────────────────────

    /// Number of stations, anchors included.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Number of mobile stations (the population `n` of every metric).
    pub fn mobile_count(&self) -> usize {
        self.mobile().count()
    }
}
