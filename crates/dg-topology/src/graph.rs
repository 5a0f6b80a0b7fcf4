//! Undirected station graph with per-edge link state.
//!
//! # Data layout
//!
//! Edges live in a `BTreeMap<EdgeKey, LinkState>` so that iteration order is
//! a pure function of the edge set.  The edge-state process draws one random
//! number per edge in this order.  A parallel
//! `FxHashMap<StationId, BTreeSet<StationId>>` adjacency index answers
//! neighbour queries for the flooding protocol without scanning all edges.
//!
//! Both structures are updated together by `add_edge` / `remove_edge`; they
//! are never allowed to disagree.

use std::collections::{BTreeMap, BTreeSet};

use rustc_hash::FxHashMap;

use dg_core::StationId;

// ── EdgeKey ───────────────────────────────────────────────────────────────────

/// Unordered station pair, stored with the smaller id first.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeKey {
    lo: StationId,
    hi: StationId,
}

impl EdgeKey {
    /// Normalise `(u, v)` into a key.
    ///
    /// # Panics
    /// Panics if `u == v`: self-loops are a programming error.
    #[inline]
    pub fn new(u: StationId, v: StationId) -> Self {
        assert_ne!(u, v, "self-loop on {u}");
        if u < v { Self { lo: u, hi: v } } else { Self { lo: v, hi: u } }
    }

    /// `(smaller id, larger id)`.
    #[inline]
    pub fn endpoints(self) -> (StationId, StationId) {
        (self.lo, self.hi)
    }

    /// The endpoint that is not `id`, or `None` if `id` is not an endpoint.
    #[inline]
    pub fn other(self, id: StationId) -> Option<StationId> {
        if self.lo == id {
            Some(self.hi)
        } else if self.hi == id {
            Some(self.lo)
        } else {
            None
        }
    }
}

impl std::fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}--{}", self.lo.0, self.hi.0)
    }
}

// ── LinkState ─────────────────────────────────────────────────────────────────

/// Usability of an edge.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LinkState {
    /// Proximity-only graphs: every edge is usable.
    Always,
    /// Edge-Markovian: available this round.
    On,
    /// Edge-Markovian: unavailable this round.
    Off,
    /// Edge-Markovian: created since the last edge-state phase, not yet
    /// assigned a random state.  Not usable.
    Fresh,
}

impl LinkState {
    #[inline]
    pub fn is_usable(self) -> bool {
        matches!(self, LinkState::Always | LinkState::On)
    }
}

/// Whether edges carry a stochastic state.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LinkMode {
    #[default]
    Proximity,
    Markovian,
}

impl LinkMode {
    /// State given to an edge at creation.
    #[inline]
    pub fn initial_state(self) -> LinkState {
        match self {
            LinkMode::Proximity => LinkState::Always,
            LinkMode::Markovian => LinkState::Fresh,
        }
    }
}

// ── ProximityGraph ────────────────────────────────────────────────────────────

/// Undirected simple graph over station ids.
///
/// Invariants: no self-loops (enforced by [`EdgeKey::new`]), at most one edge
/// per unordered pair (enforced by the map), adjacency mirrors the edge map.
#[derive(Clone, Debug, Default)]
pub struct ProximityGraph {
    mode:      LinkMode,
    edges:     BTreeMap<EdgeKey, LinkState>,
    adjacency: FxHashMap<StationId, BTreeSet<StationId>>,
}

impl ProximityGraph {
    pub fn new(mode: LinkMode) -> Self {
        Self {
            mode,
            edges:     BTreeMap::new(),
            adjacency: FxHashMap::default(),
        }
    }

    #[inline]
    pub fn mode(&self) -> LinkMode {
        self.mode
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Insert `key` with the mode's initial state.  Returns `false` (and
    /// changes nothing) if the edge already exists.
    pub fn add_edge(&mut self, key: EdgeKey) -> bool {
        if self.edges.contains_key(&key) {
            return false;
        }
        self.edges.insert(key, self.mode.initial_state());
        let (u, v) = key.endpoints();
        let fresh_u = self.adjacency.entry(u).or_default().insert(v);
        let fresh_v = self.adjacency.entry(v).or_default().insert(u);
        assert!(fresh_u && fresh_v, "adjacency out of sync for {key}");
        true
    }

    /// Remove `key`.  Returns `false` if it did not exist.
    pub fn remove_edge(&mut self, key: EdgeKey) -> bool {
        if self.edges.remove(&key).is_none() {
            return false;
        }
        let (u, v) = key.endpoints();
        self.unlink(u, v);
        self.unlink(v, u);
        true
    }

    fn unlink(&mut self, from: StationId, to: StationId) {
        if let Some(set) = self.adjacency.get_mut(&from) {
            set.remove(&to);
            if set.is_empty() {
                self.adjacency.remove(&from);
            }
        }
    }

    /// Drop every edge incident to `id`.  Returns how many were removed.
    pub fn remove_station(&mut self, id: StationId) -> usize {
        let Some(neighbors) = self.adjacency.get(&id) else {
            return 0;
        };
        let keys: Vec<EdgeKey> = neighbors.iter().map(|&v| EdgeKey::new(id, v)).collect();
        for &key in &keys {
            self.remove_edge(key);
        }
        keys.len()
    }

    /// Overwrite the state of an existing edge.  Returns `false` if absent.
    pub fn set_state(&mut self, key: EdgeKey, state: LinkState) -> bool {
        match self.edges.get_mut(&key) {
            Some(s) => {
                *s = state;
                true
            }
            None => false,
        }
    }

    /// Mutable access to every edge state, in key order.
    pub fn states_mut(&mut self) -> impl Iterator<Item = (&EdgeKey, &mut LinkState)> + '_ {
        self.edges.iter_mut()
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn contains(&self, u: StationId, v: StationId) -> bool {
        u != v && self.edges.contains_key(&EdgeKey::new(u, v))
    }

    pub fn state(&self, key: EdgeKey) -> Option<LinkState> {
        self.edges.get(&key).copied()
    }

    /// All edges with their state, in key order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeKey, LinkState)> + '_ {
        self.edges.iter().map(|(&k, &s)| (k, s))
    }

    /// Keys of the usable edges, in key order.
    pub fn usable_edges(&self) -> impl Iterator<Item = EdgeKey> + '_ {
        self.edges
            .iter()
            .filter(|(_, s)| s.is_usable())
            .map(|(&k, _)| k)
    }

    /// Every neighbour of `id`, regardless of link state, in id order.
    pub fn neighbors(&self, id: StationId) -> impl Iterator<Item = StationId> + '_ {
        self.adjacency.get(&id).into_iter().flatten().copied()
    }

    /// Neighbours reachable over a usable edge, in id order.
    pub fn usable_neighbors(&self, id: StationId) -> impl Iterator<Item = StationId> + '_ {
        self.neighbors(id).filter(move |&v| {
            self.edges
                .get(&EdgeKey::new(id, v))
                .is_some_and(|s| s.is_usable())
        })
    }

    pub fn degree(&self, id: StationId) -> usize {
        self.adjacency.get(&id).map_or(0, BTreeSet::len)
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn usable_edge_count(&self) -> usize {
        self.edges.values().filter(|s| s.is_usable()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}
