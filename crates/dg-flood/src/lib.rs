//! `dg-flood` — synchronous flooding of a single message over the current
//! station graph.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                        |
//! |-------------|-----------------------------------------------------------------|
//! | [`state`]   | `BroadcastPhase`, `MessageState` — per-station message record   |
//! | [`store`]   | `MessageStore` — message state of every mobile station          |
//! | [`rule`]    | `ReceptionRule` trait, `FirstCopy`, `TimeToLive`                |
//! | [`flood`]   | `flood_round`, `expire_lifetimes`, `FloodReport`                |
//! | [`summary`] | `BroadcastSummary` — performance and efficiency                 |
//!
//! # Protocol
//!
//! Per station: `NoMessage → Pending → Transmitted`.  Each round every
//! station that was `Pending` at the start of the round sends once to every
//! usable neighbour and becomes `Transmitted`.  A neighbour accepted by the
//! [`ReceptionRule`] acquires the message and becomes `Pending` for the
//! *next* round; any other neighbour just counts a duplicate reception.
//! The flood is over when no station is pending.

pub mod flood;
pub mod rule;
pub mod state;
pub mod store;
pub mod summary;


pub use flood::{FloodReport, expire_lifetimes, flood_round};
pub use rule::{FirstCopy, ReceptionRule, TimeToLive};
pub use state::{BroadcastPhase, MessageState};
pub use store::MessageStore;
pub use summary::BroadcastSummary;
