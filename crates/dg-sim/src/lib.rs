//! `dg-sim` — round loop orchestrator for the dyngraph simulator.
//!
//! # Round loop
//!
//! ```text
//! for round in 1..:
//!   ① Flood      — pending stations send once over usable edges; new
//!                  holders become pending for the next round.
//!   ② Move       — one step of the mobility model per mobile station.
//!   ③ Topology   — proximity rebuild from the new positions.
//!   ④ Perturb    — TTL countdown (skipping this round's new holders) or
//!                  churn (replace floor(r·n) stations).
//!   ⑤ Links      — edge-Markovian step (Markovian model only).
//!   ⑥ Metrics    — density, reachability, nervousness, components.
//!   ⑦ Terminate  — no station pending, or the round cap.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Proximity rebuild queries run on Rayon.                |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use dg_core::SimConfig;
//! use dg_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(SimConfig::default()).build()?;
//! let summary = sim.run(&mut NoopObserver);
//! println!("{summary}");
//! ```

pub mod builder;
pub mod churn;
pub mod error;
pub mod metrics;
pub mod observer;
pub mod scenario;
pub mod sim;
pub mod view;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use churn::{ChurnModel, ChurnReport};
pub use error::{SimError, SimResult};
pub use metrics::{DegenerateFlags, MetricsCollector, RoundMetrics, nervousness};
pub use observer::{NoopObserver, SimObserver};
pub use scenario::{Perturbation, Scenario};
pub use sim::{Sim, Termination};
pub use view::{EdgeView, StationView, VisualTag, visual_tag};
