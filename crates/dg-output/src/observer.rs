//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use dg_core::Round;
use dg_flood::{BroadcastSummary, MessageStore};
use dg_sim::{RoundMetrics, SimObserver, visual_tag};
use dg_station::StationStore;

use crate::row::{RoundMetricsRow, StationSnapshotRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes round metrics and station snapshots to any
/// [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error, `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_round_end(&mut self, _round: Round, metrics: &RoundMetrics) {
        let result = self.writer.write_round_metrics(&RoundMetricsRow::from(metrics));
        self.store_err(result);
    }

    fn on_snapshot(&mut self, round: Round, stations: &StationStore, messages: &MessageStore) {
        let rows: Vec<StationSnapshotRow> = stations
            .iter()
            .map(|station| {
                let message = messages.get(station.id);
                StationSnapshotRow {
                    station_id:      station.id.0,
                    round:           round.0,
                    x:               station.position.x,
                    y:               station.position.y,
                    tag:             visual_tag(station, message).as_str(),
                    has_message:     message.is_some_and(|m| m.has_message()),
                    reception_count: message.map_or(0, |m| m.reception_count),
                }
            })
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_round: Round, _summary: &BroadcastSummary) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
