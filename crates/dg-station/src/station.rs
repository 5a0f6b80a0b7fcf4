//! The per-station record.

use dg_core::{Point, StationId};

/// One of the four corners of the environment square.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Corner {
    NorthEast,
    NorthWest,
    SouthWest,
    SouthEast,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::NorthEast,
        Corner::NorthWest,
        Corner::SouthWest,
        Corner::SouthEast,
    ];

    /// Position of this corner in a square of side `env_size`.
    pub fn position(self, env_size: f64) -> Point {
        match self {
            Corner::NorthEast => Point::new(env_size, env_size),
            Corner::NorthWest => Point::new(0.0, env_size),
            Corner::SouthWest => Point::new(0.0, 0.0),
            Corner::SouthEast => Point::new(env_size, 0.0),
        }
    }
}

/// What a station is for.
///
/// Anchors pin the corners of the environment for renderers.  They never
/// move, never churn, never join the broadcast, and never get edges.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StationRole {
    Mobile,
    Anchor(Corner),
}

/// Identity, role, and current position of a station.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Station {
    pub id:       StationId,
    pub role:     StationRole,
    pub position: Point,
}

impl Station {
    #[inline]
    pub fn mobile(id: StationId, position: Point) -> Self {
        Self { id, role: StationRole::Mobile, position }
    }

    #[inline]
    pub fn anchor(id: StationId, corner: Corner, env_size: f64) -> Self {
        Self {
            id,
            role: StationRole::Anchor(corner),
            position: corner.position(env_size),
        }
    }

    #[inline]
    pub fn is_anchor(&self) -> bool {
        matches!(self.role, StationRole::Anchor(_))
    }
}
