//! `dg-mobility` — station movement state, mobility models, and the
//! movement engine.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                      |
//! |----------------|---------------------------------------------------------------|
//! | [`state`]      | `MovementState` — destination, speed, arrival flag            |
//! | [`store`]      | `MobilityStore` — per-station movement state                  |
//! | [`model`]      | `MobilityModel` trait, `MoveContext`, the shared move step    |
//! | [`waypoint`]   | `RandomWaypoint`                                              |
//! | [`manhattan`]  | `Manhattan` street-grid model                                 |
//! | [`brownian`]   | `Brownian` bounded jitter                                     |
//! | [`stationary`] | `Stationary` — stations never move                            |
//! | [`follower`]   | `Follower` — each station chases another station              |
//! | [`engine`]     | `MobilityEngine<M>` — applies a model to the whole population |
//!
//! # Movement model
//!
//! Waypoint-style models keep a destination per station:
//!
//! 1. A station without a destination (or one that arrived last round)
//!    draws a new destination and a new speed in `[1, 1 + max_speed)`.
//! 2. Otherwise it moves `min(speed, distance)` straight toward the
//!    destination.
//! 3. Once within `arrival_threshold` of the destination it snaps exactly
//!    onto it and is marked arrived.  Arrival never depends on float
//!    equality of accumulated positions.
//!
//! Brownian and stationary models override the step entirely.  The follower
//! model replaces the fixed destination with another station's position,
//! refreshed by the engine at the start of every movement phase, and stops
//! for good once it is within `arrival_threshold`.

pub mod brownian;
pub mod engine;
pub mod follower;
pub mod manhattan;
pub mod model;
pub mod state;
pub mod stationary;
pub mod store;
pub mod waypoint;


pub use brownian::Brownian;
pub use engine::{MobilityEngine, MobilityReport};
pub use follower::Follower;
pub use manhattan::Manhattan;
pub use model::{DynMobility, MobilityModel, MoveContext, StepOutcome, model_for, move_toward, step_toward};
pub use state::MovementState;
pub use stationary::Stationary;
pub use store::MobilityStore;
pub use waypoint::RandomWaypoint;
