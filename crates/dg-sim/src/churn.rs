//! Population replacement.
//!
//! Each round `k = floor(ratio · n)` mobile stations leave and `k` new ones
//! join at uniformly random positions, so the mobile population never
//! changes size.  Leaving stations are drawn without replacement from the
//! eligible set (mobile, not sitting exactly on a corner); if fewer than
//! `k` are eligible, `k` is capped and the report says so.

use log::{debug, warn};

use dg_core::{SimRng, StationId};
use dg_flood::MessageStore;
use dg_mobility::{MobilityEngine, MobilityModel};
use dg_station::{StationStore, random_position};
use dg_topology::ProximityGraph;

/// Outcome of one replacement step.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChurnReport {
    /// `floor(ratio · n)` before capping.
    pub requested: usize,
    pub removed:   Vec<StationId>,
    pub added:     Vec<StationId>,
    /// `true` if fewer stations than requested were eligible.
    pub capped:    bool,
}

/// The replacement rule.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ChurnModel {
    /// Fraction of the population replaced each round, in `[0, 1]`.
    pub ratio: f64,
}

impl ChurnModel {
    pub fn new(ratio: f64) -> Self {
        Self { ratio }
    }

    /// `floor(ratio · population)`.
    #[inline]
    pub fn replacement_count(&self, population: usize) -> usize {
        (self.ratio * population as f64).floor() as usize
    }

    /// Replace part of the population and keep every per-station structure
    /// in step: graph, movement state, message state.
    ///
    /// Newcomers get a first destination and are wired to every station
    /// closer than `range`; survivors all get a fresh destination.
    pub fn apply<M: MobilityModel>(
        &self,
        stations: &mut StationStore,
        graph:    &mut ProximityGraph,
        mobility: &mut MobilityEngine<M>,
        messages: &mut MessageStore,
        range:    f64,
        rng:      &mut SimRng,
    ) -> ChurnReport {
        let env_size = stations.env_size;
        let requested = self.replacement_count(stations.mobile_count());

        let eligible: Vec<StationId> = stations
            .mobile()
            .filter(|s| !s.position.is_corner(env_size))
            .map(|s| s.id)
            .collect();
        let capped = requested > eligible.len();
        let k = requested.min(eligible.len());
        if capped {
            warn!(
                "churn wants {requested} stations but only {} are eligible; replacing {k}",
                eligible.len()
            );
        }

        let mut removed: Vec<StationId> = rng
            .sample_indices(eligible.len(), k)
            .into_iter()
            .map(|i| eligible[i])
            .collect();
        removed.sort_unstable();

        for &id in &removed {
            stations.remove(id);
            graph.remove_station(id);
            mobility.forget(id);
            messages.remove_station(id);
        }

        let mut added = Vec::with_capacity(k);
        for _ in 0..k {
            let id = stations.spawn_mobile(random_position(rng, env_size));
            if let Some(station) = stations.get_mut(id) {
                mobility.place(station, rng);
            }
            added.push(id);
        }
        let positions = stations.mobile_positions();
        for &id in &added {
            let Some(&(_, pos)) = positions.iter().find(|(other, _)| *other == id) else {
                continue;
            };
            graph.connect_station(id, pos, &positions, range);
            messages.insert_station(id);
        }

        // Ids only grow, so `added` is sorted.
        let survivors: Vec<StationId> = stations
            .mobile_ids()
            .into_iter()
            .filter(|id| added.binary_search(id).is_err())
            .collect();
        mobility.reseed(stations, &survivors, rng);

        debug!("churn: requested {requested}, replaced {k}");
        ChurnReport { requested, removed, added, capped }
    }
}
