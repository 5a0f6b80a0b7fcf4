//! Read-only projections for renderers.

use dg_core::{Point, StationId};
use dg_flood::{BroadcastPhase, MessageState};
use dg_station::Station;
use dg_topology::EdgeKey;

/// Coarse per-station state for colouring.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum VisualTag {
    Anchor,
    Source,
    /// Holds the message and will send it next round.
    Carrying,
    /// Holds the message and already sent it.
    Done,
    /// The held message expired.
    TtlExpired,
    Plain,
}

impl VisualTag {
    pub fn as_str(self) -> &'static str {
        match self {
            VisualTag::Anchor     => "anchor",
            VisualTag::Source     => "source",
            VisualTag::Carrying   => "carrying",
            VisualTag::Done       => "done",
            VisualTag::TtlExpired => "ttl_expired",
            VisualTag::Plain      => "plain",
        }
    }
}

impl std::fmt::Display for VisualTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tag of `station` given its message state (`None` if untracked).
pub fn visual_tag(station: &Station, message: Option<&MessageState>) -> VisualTag {
    if station.is_anchor() {
        return VisualTag::Anchor;
    }
    let Some(m) = message else {
        return VisualTag::Plain;
    };
    if m.expired && !m.has_message() {
        return VisualTag::TtlExpired;
    }
    if m.is_source {
        return VisualTag::Source;
    }
    match m.phase {
        BroadcastPhase::Pending     => VisualTag::Carrying,
        BroadcastPhase::Transmitted => VisualTag::Done,
        BroadcastPhase::NoMessage   => VisualTag::Plain,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StationView {
    pub id:       StationId,
    pub position: Point,
    pub tag:      VisualTag,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EdgeView {
    pub key:    EdgeKey,
    pub from:   Point,
    pub to:     Point,
    /// `false` for edges currently off (or not yet assigned a state).
    pub usable: bool,
}
