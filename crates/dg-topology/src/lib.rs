//! `dg-topology` — the time-varying proximity graph.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                    |
//! |---------------|-------------------------------------------------------------|
//! | [`graph`]     | `ProximityGraph`, `EdgeKey`, `LinkState`, `LinkMode`        |
//! | [`proximity`] | R-tree broad phase, `recompute_edges`, `connect_station`    |
//! | [`markov`]    | `EdgeMarkov` — per-edge on/off two-state process            |
//! | [`analysis`]  | density and connected-component count                       |
//!
//! # Edge model
//!
//! An undirected edge exists between two mobile stations iff their Euclidean
//! distance is strictly below the connection range.  The proximity rebuild
//! runs every round for every mobility model.  Under the edge-Markovian model
//! each proximity-eligible edge additionally carries an on/off state; only
//! `on` edges are *usable* (carry messages, count toward density and
//! components).
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                   |
//! |------------|----------------------------------------------------------|
//! | `parallel` | Per-station range queries of the rebuild run on Rayon.   |
//! | `serde`    | Derives `Serialize`/`Deserialize` on public types.       |

pub mod analysis;
pub mod graph;
pub mod markov;
pub mod proximity;

#[cfg(test)]
mod tests;

pub use analysis::{connected_components, density};
pub use graph::{EdgeKey, LinkMode, LinkState, ProximityGraph};
pub use markov::{EdgeMarkov, MarkovReport};
pub use proximity::{EdgeDiff, eligible_pairs};
