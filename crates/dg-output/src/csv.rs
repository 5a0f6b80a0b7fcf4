//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `round_metrics.csv`
//! - `station_snapshots.csv`

use std::fs::{self, File};
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OutputResult, RoundMetricsRow, StationSnapshotRow};

pub const ROUND_METRICS_FILE: &str = "round_metrics.csv";
pub const SNAPSHOTS_FILE: &str = "station_snapshots.csv";

const ROUND_METRICS_HEADER: [&str; 14] = [
    "round",
    "station_count",
    "usable_edges",
    "density",
    "reachability",
    "vertex_nervousness",
    "edge_nervousness",
    "components",
    "transmitters",
    "acquisitions",
    "duplicates",
    "expired",
    "churned",
    "degenerate",
];

const SNAPSHOTS_HEADER: [&str; 7] =
    ["station_id", "round", "x", "y", "tag", "has_message", "reception_count"];

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    metrics:   Writer<File>,
    snapshots: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open the two CSV files and write the header
    /// rows.  Existing files are truncated.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        fs::create_dir_all(dir)?;

        let mut metrics = Writer::from_path(dir.join(ROUND_METRICS_FILE))?;
        metrics.write_record(ROUND_METRICS_HEADER)?;

        let mut snapshots = Writer::from_path(dir.join(SNAPSHOTS_FILE))?;
        snapshots.write_record(SNAPSHOTS_HEADER)?;

        Ok(Self {
            metrics,
            snapshots,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_round_metrics(&mut self, row: &RoundMetricsRow) -> OutputResult<()> {
        self.metrics.write_record(&[
            row.round.to_string(),
            row.station_count.to_string(),
            row.usable_edges.to_string(),
            row.density.to_string(),
            row.reachability.to_string(),
            row.vertex_nervousness.to_string(),
            row.edge_nervousness.to_string(),
            row.components.to_string(),
            row.transmitters.to_string(),
            row.acquisitions.to_string(),
            row.duplicates.to_string(),
            row.expired.to_string(),
            row.churned.to_string(),
            (row.degenerate as u8).to_string(),
        ])?;
        Ok(())
    }

    fn write_snapshots(&mut self, rows: &[StationSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.station_id.to_string(),
                row.round.to_string(),
                row.x.to_string(),
                row.y.to_string(),
                row.tag.to_owned(),
                (row.has_message as u8).to_string(),
                row.reception_count.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.metrics.flush()?;
        self.snapshots.flush()?;
        Ok(())
    }
}
