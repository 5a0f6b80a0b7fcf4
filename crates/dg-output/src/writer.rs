//! The `OutputWriter` trait implemented by backend writers.

use crate::{OutputResult, RoundMetricsRow, StationSnapshotRow};

/// Sink for simulation output.
///
/// Errors surface through [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error]
/// since observer hooks cannot return them.
pub trait OutputWriter {
    /// Write one per-round metrics row.
    fn write_round_metrics(&mut self, row: &RoundMetricsRow) -> OutputResult<()>;

    /// Write a batch of station snapshots.
    fn write_snapshots(&mut self, rows: &[StationSnapshotRow]) -> OutputResult<()>;

    /// Flush all underlying file handles.  Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
