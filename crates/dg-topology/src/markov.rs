//! Edge-Markovian link process.
//!
//! Each proximity-eligible edge carries an independent two-state chain:
//!
//! ```text
//!          p                      q
//!        ┌───┐                  ┌───┐
//!        ▼   │      1 - p       ▼   │
//!        ON ─┴───────────────▶ OFF ─┘
//!         ▲                     │
//!         └─────── 1 - q ───────┘
//! ```
//!
//! The chain steps once per round.  Edges created since the previous step
//! (`LinkState::Fresh`) are not stepped; they draw a uniformly random initial
//! state instead.

use log::trace;

use dg_core::{MarkovParams, SimRng};

use crate::{LinkState, ProximityGraph};

/// Counts produced by one step of the process.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MarkovReport {
    pub on:          usize,
    pub off:         usize,
    /// Edges that changed state this step.
    pub flipped:     usize,
    /// Fresh edges that received their first state.
    pub initialized: usize,
}

/// The on/off process with stay-probabilities `p` (on→on) and `q` (off→off).
#[derive(Clone, Copy, Debug)]
pub struct EdgeMarkov {
    pub params: MarkovParams,
}

impl EdgeMarkov {
    pub fn new(params: MarkovParams) -> Self {
        Self { params }
    }

    /// Assign a uniformly random state to every fresh edge without stepping
    /// the others.  Used once on the initial graph.
    pub fn initialize(&self, graph: &mut ProximityGraph, rng: &mut SimRng) -> usize {
        let mut initialized = 0;
        for (_, state) in graph.states_mut() {
            if *state == LinkState::Fresh {
                *state = random_state(rng);
                initialized += 1;
            }
        }
        initialized
    }

    /// One step of the chain over every edge, in key order.
    pub fn evolve(&self, graph: &mut ProximityGraph, rng: &mut SimRng) -> MarkovReport {
        let leave_on = 1.0 - self.params.p;
        let leave_off = 1.0 - self.params.q;
        let mut report = MarkovReport::default();

        for (_, state) in graph.states_mut() {
            let next = match *state {
                LinkState::Fresh => {
                    report.initialized += 1;
                    random_state(rng)
                }
                LinkState::On if rng.gen_bool(leave_on) => {
                    report.flipped += 1;
                    LinkState::Off
                }
                LinkState::Off if rng.gen_bool(leave_off) => {
                    report.flipped += 1;
                    LinkState::On
                }
                unchanged => unchanged,
            };
            match next {
                LinkState::On | LinkState::Always => report.on += 1,
                LinkState::Off | LinkState::Fresh => report.off += 1,
            }
            *state = next;
        }

        trace!(
            "edge-markov step: {} on, {} off, {} flipped, {} initialized",
            report.on, report.off, report.flipped, report.initialized
        );
        report
    }
}

#[inline]
fn random_state(rng: &mut SimRng) -> LinkState {
    if rng.gen_bool(0.5) { LinkState::On } else { LinkState::Off }
}
