//! One flooding round and the TTL countdown.

use log::trace;

use dg_core::StationId;
use dg_topology::ProximityGraph;

use crate::{BroadcastPhase, MessageStore, ReceptionRule};

/// What one flooding round did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FloodReport {
    /// Stations that transmitted this round.
    pub transmitters: usize,
    /// Stations that acquired the message this round, in acquisition order.
    pub acquired:     Vec<StationId>,
    /// Copies received by stations that could not acquire them.
    pub duplicates:   usize,
}

impl FloodReport {
    /// `true` if nobody transmitted.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.transmitters == 0
    }
}

/// Run one synchronous flooding round over the usable edges of `graph`.
///
/// The set of transmitters is fixed before any delivery, so a station that
/// acquires the message this round transmits no earlier than the next one.
pub fn flood_round<R: ReceptionRule>(
    messages: &mut MessageStore,
    graph:    &ProximityGraph,
    rule:     &R,
) -> FloodReport {
    let transmitters = messages.pending();
    let mut report = FloodReport {
        transmitters: transmitters.len(),
        ..FloodReport::default()
    };

    for &u in &transmitters {
        if let Some(state) = messages.get_mut(u) {
            state.phase = BroadcastPhase::Transmitted;
        }
        for v in graph.usable_neighbors(u) {
            let Some(state) = messages.get_mut(v) else {
                continue;
            };
            if rule.can_receive(state) {
                state.acquire(rule.acquired_lifetime());
                report.acquired.push(v);
            } else {
                state.reception_count += 1;
                report.duplicates += 1;
            }
        }
    }

    trace!(
        "flood: {} transmitted, {} acquired, {} duplicates",
        report.transmitters,
        report.acquired.len(),
        report.duplicates
    );
    report
}

/// Count down every running lifetime by one, except for the stations in
/// `skip` (those that acquired this round).  A station whose lifetime hits
/// zero drops the message, including a pending transmission.
///
/// Returns the stations whose message expired, in id order.
pub fn expire_lifetimes(messages: &mut MessageStore, skip: &[StationId]) -> Vec<StationId> {
    let mut expired = Vec::new();
    for (id, state) in messages.iter_mut() {
        let Some(left) = state.lifetime.filter(|&l| l > 0) else {
            continue;
        };
        if skip.contains(&id) {
            continue;
        }
        if left == 1 {
            state.expire();
            expired.push(id);
        } else {
            state.lifetime = Some(left - 1);
        }
    }
    expired
}
