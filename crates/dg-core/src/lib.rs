//! `dg-core` — foundational types for the `dyngraph` simulator.
//!
//! This crate is a dependency of every other `dg-*` crate.  It intentionally
//! has no `dg-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`ids`]      | `StationId`                                                |
//! | [`geo`]      | `Point`, Euclidean distance                                |
//! | [`round`]    | `Round` counter                                            |
//! | [`rng`]      | `SimRng` (the single, seeded run RNG)                      |
//! | [`config`]   | `SimConfig`, selector enums, validation                    |
//! | [`error`]    | `ConfigError`                                              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod round;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{
    BroadcastStrategy, MarkovParams, MobilityKind, ScenarioKind, SimConfig,
};
pub use error::ConfigError;
pub use geo::Point;
pub use ids::StationId;
pub use rng::SimRng;
pub use round::Round;
