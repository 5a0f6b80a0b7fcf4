//! Plain data row types written by output backends.

use dg_sim::RoundMetrics;

/// One line of `round_metrics.csv`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundMetricsRow {
    pub round:              u64,
    pub station_count:      usize,
    pub usable_edges:       usize,
    pub density:            f64,
    pub reachability:       usize,
    pub vertex_nervousness: f64,
    pub edge_nervousness:   f64,
    pub components:         usize,
    pub transmitters:       usize,
    pub acquisitions:       usize,
    pub duplicates:         usize,
    pub expired:            usize,
    pub churned:            usize,
    /// At least one value above is a sentinel, see `DegenerateFlags`.
    pub degenerate:         bool,
}

impl From<&RoundMetrics> for RoundMetricsRow {
    fn from(m: &RoundMetrics) -> Self {
        Self {
            round:              m.round.0,
            station_count:      m.station_count,
            usable_edges:       m.usable_edges,
            density:            m.density,
            reachability:       m.reachability,
            vertex_nervousness: m.vertex_nervousness,
            edge_nervousness:   m.edge_nervousness,
            components:         m.components,
            transmitters:       m.transmitters,
            acquisitions:       m.acquisitions,
            duplicates:         m.duplicates,
            expired:            m.expired,
            churned:            m.churned,
            degenerate:         m.flags.any(),
        }
    }
}

/// Position and message state of one station at a given round.
#[derive(Debug, Clone, PartialEq)]
pub struct StationSnapshotRow {
    pub station_id:      u32,
    pub round:           u64,
    pub x:               f64,
    pub y:               f64,
    /// `VisualTag::as_str` of the station.
    pub tag:             &'static str,
    pub has_message:     bool,
    /// Copies received, duplicates included.  `0` for anchors.
    pub reception_count: u32,
}
