//! Distance-gated edge maintenance.
//!
//! # Rebuild algorithm
//!
//! 1. Bulk-load an R-tree (`rstar`) over the mobile positions of this round.
//! 2. For each station, query the tree for candidates within the connection
//!    range and keep the pairs with `distance < range` and `u < v`.
//! 3. Diff the resulting set against the current edges and apply additions
//!    and removals.
//!
//! Steps 1–2 read only the fixed position snapshot, so the whole rebuild is
//! a pure function of positions: calling it twice without movement changes
//! nothing.  With the `parallel` feature step 2 runs on Rayon; step 3 stays
//! single-threaded.

use std::collections::BTreeSet;

use log::trace;
use rstar::{PointDistance, RTree, RTreeObject, AABB};

use dg_core::{Point, StationId};

use crate::{EdgeKey, ProximityGraph};

/// Broad-phase radius inflation so float rounding in the squared comparison
/// can never drop a pair the exact predicate would keep.
const BROAD_PHASE_SLACK: f64 = 1.0 + 1e-9;

// ── R-tree entry ──────────────────────────────────────────────────────────────

#[derive(Clone)]
struct Site {
    point: [f64; 2],
    id:    StationId,
    pos:   Point,
}

impl RTreeObject for Site {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for Site {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

fn build_index(positions: &[(StationId, Point)]) -> RTree<Site> {
    let sites = positions
        .iter()
        .map(|&(id, pos)| Site { point: pos.to_array(), id, pos })
        .collect();
    RTree::bulk_load(sites)
}

/// Pairs `(u, v)` with `u < v` and `distance(u, v) < range`, for one station.
fn pairs_for(tree: &RTree<Site>, id: StationId, pos: Point, range: f64) -> Vec<EdgeKey> {
    let radius_2 = (range * BROAD_PHASE_SLACK).powi(2);
    tree.locate_within_distance(pos.to_array(), radius_2)
        .filter(|other| other.id > id && pos.distance(other.pos) < range)
        .map(|other| EdgeKey::new(id, other.id))
        .collect()
}

/// Every unordered pair of `positions` closer than `range`.
pub fn eligible_pairs(positions: &[(StationId, Point)], range: f64) -> BTreeSet<EdgeKey> {
    let tree = build_index(positions);

    #[cfg(not(feature = "parallel"))]
    {
        positions
            .iter()
            .flat_map(|&(id, pos)| pairs_for(&tree, id, pos, range))
            .collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        let chunks: Vec<Vec<EdgeKey>> = positions
            .par_iter()
            .map(|&(id, pos)| pairs_for(&tree, id, pos, range))
            .collect();
        chunks.into_iter().flatten().collect()
    }
}

// ── Graph operations ──────────────────────────────────────────────────────────

/// Edges added and removed by one rebuild.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EdgeDiff {
    pub added:   Vec<EdgeKey>,
    pub removed: Vec<EdgeKey>,
}

impl EdgeDiff {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

impl ProximityGraph {
    /// Bring the edge set in line with `positions`: an edge exists between
    /// two listed stations iff they are closer than `range`.
    ///
    /// Edges touching a station absent from `positions` are removed too.
    /// Kept edges keep their link state; new edges get the mode's initial
    /// state.
    pub fn recompute_edges(&mut self, positions: &[(StationId, Point)], range: f64) -> EdgeDiff {
        let desired = eligible_pairs(positions, range);

        let removed: Vec<EdgeKey> = self
            .edges()
            .map(|(k, _)| k)
            .filter(|k| !desired.contains(k))
            .collect();
        let added: Vec<EdgeKey> = desired
            .into_iter()
            .filter(|&k| self.state(k).is_none())
            .collect();

        for &key in &removed {
            self.remove_edge(key);
        }
        for &key in &added {
            self.add_edge(key);
        }

        trace!("proximity rebuild: +{} -{} edges", added.len(), removed.len());
        EdgeDiff { added, removed }
    }

    /// Wire a newly added station to every station of `others` closer than
    /// `range`.  Returns the edges created.
    pub fn connect_station(
        &mut self,
        id:     StationId,
        pos:    Point,
        others: &[(StationId, Point)],
        range:  f64,
    ) -> Vec<EdgeKey> {
        others
            .iter()
            .filter(|&&(other, other_pos)| other != id && pos.distance(other_pos) < range)
            .map(|&(other, _)| EdgeKey::new(id, other))
            .filter(|&key| self.add_edge(key))
            .collect()
    }
}
