//! Fluent builder for the initial population.
//!
//! # Usage
//!
//! ```rust
//! use dg_core::SimRng;
//! use dg_station::StationStoreBuilder;
//!
//! let mut rng = SimRng::new(42);
//! let store = StationStoreBuilder::new(300, 1000.0).build(&mut rng);
//!
//! assert_eq!(store.mobile_count(), 300);
//! assert_eq!(store.len(), 304); // + 4 corner anchors
//! ```

use dg_core::{Point, SimRng};

use crate::{Corner, StationStore};

/// Builds a [`StationStore`]: mobile stations first (ids `0..n`), then the
/// four corner anchors.
pub struct StationStoreBuilder {
    count:     usize,
    env_size:  f64,
    positions: Option<Vec<Point>>,
}

impl StationStoreBuilder {
    /// `count` mobile stations placed uniformly at random in a square of side
    /// `env_size`.
    pub fn new(count: usize, env_size: f64) -> Self {
        Self { count, env_size, positions: None }
    }

    /// Place the mobile stations at fixed positions instead.  The station
    /// count becomes `positions.len()`.
    pub fn positions(mut self, positions: Vec<Point>) -> Self {
        self.count = positions.len();
        self.positions = Some(positions);
        self
    }

    /// Construct the store.  `rng` is only drawn from for random placement.
    pub fn build(self, rng: &mut SimRng) -> StationStore {
        let mut store = StationStore::new(self.env_size);
        match self.positions {
            Some(fixed) => {
                for p in fixed {
                    store.spawn_mobile(p);
                }
            }
            None => {
                for _ in 0..self.count {
                    let p = random_position(rng, self.env_size);
                    store.spawn_mobile(p);
                }
            }
        }
        for corner in Corner::ALL {
            store.spawn_anchor(corner);
        }
        store
    }
}

/// A uniformly random point in `[0, env_size)²`.
pub fn random_position(rng: &mut SimRng, env_size: f64) -> Point {
    Point::new(rng.unit() * env_size, rng.unit() * env_size)
}
