//! Simulation observer trait for progress reporting and data collection.

use dg_core::Round;
use dg_flood::{BroadcastSummary, MessageStore};
use dg_station::StationStore;

use crate::RoundMetrics;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// round loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: reachability printer
///
/// ```rust,ignore
/// struct Reach;
///
/// impl SimObserver for Reach {
///     fn on_round_end(&mut self, round: Round, metrics: &RoundMetrics) {
///         println!("{round}: {} stations hold the message", metrics.reachability);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called before any phase of `round` runs.
    fn on_round_start(&mut self, _round: Round) {}

    /// Called once all phases of `round` completed.
    fn on_round_end(&mut self, _round: Round, _metrics: &RoundMetrics) {}

    /// Called every `config.output_interval_rounds` rounds, after
    /// `on_round_end`, with read-only access to the population and the
    /// message state.
    fn on_snapshot(
        &mut self,
        _round:    Round,
        _stations: &StationStore,
        _messages: &MessageStore,
    ) {}

    /// Called once after the final round.
    fn on_sim_end(&mut self, _final_round: Round, _summary: &BroadcastSummary) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
