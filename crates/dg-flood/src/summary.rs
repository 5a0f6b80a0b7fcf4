//! End-of-run broadcast figures.

use dg_core::{Round, StationId};

use crate::MessageStore;

/// Performance and efficiency of a finished broadcast.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BroadcastSummary {
    pub source:        Option<StationId>,
    /// Rounds executed.
    pub rounds:        u64,
    /// Mobile stations at the end of the run.
    pub station_count: usize,
    /// Stations holding the message at the end of the run.
    pub reached:       usize,
    /// `reached / station_count`.
    pub performance:   f64,
    /// Mean reception count over the reached stations.  `NaN` when nothing
    /// was reached.
    pub efficiency:    f64,
}

impl BroadcastSummary {
    pub fn from_store(messages: &MessageStore, station_count: usize, rounds: Round) -> Self {
        let (reached, receptions) = messages
            .iter()
            .filter(|(_, s)| s.has_message())
            .fold((0usize, 0u64), |(n, sum), (_, s)| (n + 1, sum + s.reception_count as u64));

        let performance = if station_count == 0 {
            0.0
        } else {
            reached as f64 / station_count as f64
        };
        let efficiency = if reached == 0 {
            f64::NAN
        } else {
            receptions as f64 / reached as f64
        };

        Self {
            source: messages.source(),
            rounds: rounds.0,
            station_count,
            reached,
            performance,
            efficiency,
        }
    }

    /// `true` when `efficiency` is the no-reach sentinel.
    #[inline]
    pub fn efficiency_undefined(&self) -> bool {
        self.efficiency.is_nan()
    }
}

impl std::fmt::Display for BroadcastSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "reached {}/{} in {} rounds: performance {:.3}, efficiency {:.3}",
            self.reached, self.station_count, self.rounds, self.performance, self.efficiency
        )
    }
}
