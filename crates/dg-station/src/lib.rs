//! `dg-station` — the station population of a `dyngraph` run.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                    |
//! |---------------|-------------------------------------------------------------|
//! | [`station`]   | `Station`, `StationRole`, `Corner`                          |
//! | [`store`]     | `StationStore` — ordered population, id allocation          |
//! | [`builder`]   | `StationStoreBuilder` — random placement + corner anchors   |
//!
//! Per-station movement and message state live in the `dg-mobility` and
//! `dg-flood` stores, keyed by [`StationId`][dg_core::StationId].  This crate
//! only owns identity, role, and position.

pub mod builder;
pub mod station;
pub mod store;


pub use builder::{StationStoreBuilder, random_position};
pub use station::{Corner, Station, StationRole};
pub use store::StationStore;
