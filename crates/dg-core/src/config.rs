//! Run configuration and the selectors that pick mobility model, broadcast
//! strategy, and perturbation scenario.
//!
//! A [`SimConfig`] is typically built from [`SimConfig::default`] (which
//! reproduces the reference experiment) with a few fields overridden, or
//! loaded from a TOML/JSON file by the application crate when the `serde`
//! feature is on.  [`SimConfig::validate`] is called by the simulation
//! builder before round 0.

use crate::ConfigError;

// ── Selectors ─────────────────────────────────────────────────────────────────

/// How mobile stations move (and, for `EdgeMarkovian`, whether edges carry a
/// stochastic on/off state).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MobilityKind {
    /// Uniform destinations over the whole square.
    #[default]
    RandomWaypoint,
    /// Destinations on an axis-aligned street grid, one axis at a time.
    Manhattan,
    /// Random-waypoint movement plus the edge-Markovian on/off process.
    EdgeMarkovian,
    /// Independent bounded jitter on each axis every round.
    Brownian,
    /// Stations never move.
    Stationary,
    /// Each station chases another station's current position until it is
    /// within the arrival threshold, then stops for good.
    Follower,
}

impl MobilityKind {
    /// `true` if edges carry a stochastic on/off state.
    #[inline]
    pub fn is_markovian(self) -> bool {
        matches!(self, MobilityKind::EdgeMarkovian)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MobilityKind::RandomWaypoint => "rwp",
            MobilityKind::Manhattan      => "manhattan",
            MobilityKind::EdgeMarkovian  => "edge_markovian",
            MobilityKind::Brownian       => "brownian",
            MobilityKind::Stationary     => "stationary",
            MobilityKind::Follower       => "follower",
        }
    }
}

impl std::fmt::Display for MobilityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a message is broadcast at all.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BroadcastStrategy {
    /// Mobility only; the run lasts exactly `max_rounds` rounds.
    NoBroadcasting,
    /// Synchronous flooding from one source.
    #[default]
    SimpleFlooding,
}

impl BroadcastStrategy {
    #[inline]
    pub fn is_enabled(self) -> bool {
        !matches!(self, BroadcastStrategy::NoBroadcasting)
    }
}

/// The perturbation applied after topology rebuild each round.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ScenarioKind {
    /// No perturbation.
    #[default]
    Plain,
    /// Messages expire `ttl` rounds after acquisition; the station may then
    /// receive the message again.
    TimeToLive { ttl: u32 },
    /// `floor(ratio · n)` mobile stations are replaced every round.
    Churn { ratio: f64 },
}

impl ScenarioKind {
    /// The TTL if this is the TTL scenario.
    #[inline]
    pub fn ttl(self) -> Option<u32> {
        match self {
            ScenarioKind::TimeToLive { ttl } => Some(ttl),
            _ => None,
        }
    }
}

/// Stay-probabilities of the edge-Markovian process.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarkovParams {
    /// Probability an `on` edge stays `on`.
    pub p: f64,
    /// Probability an `off` edge stays `off`.
    pub q: f64,
}

impl Default for MarkovParams {
    fn default() -> Self {
        Self { p: 0.9, q: 0.9 }
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Mobile stations (corner anchors are added on top).
    pub station_count: usize,

    /// Side length of the square environment.
    pub env_size: f64,

    /// Two stations are linked iff their distance is strictly below this.
    pub connection_range: f64,

    /// A moving station closer than this to its destination snaps onto it.
    pub arrival_threshold: f64,

    /// Speeds are drawn uniformly from `[1, 1 + max_speed)`.
    pub max_speed: f64,

    pub mobility: MobilityKind,

    /// Street lines per axis for Manhattan mobility.
    pub nb_parallel_streets: u32,

    /// Max per-axis jitter for Brownian mobility.
    pub brownian_step: f64,

    /// Only read when `mobility` is `EdgeMarkovian`.
    pub markov: MarkovParams,

    pub broadcast: BroadcastStrategy,

    pub scenario: ScenarioKind,

    /// Hard cap on rounds.  With broadcasting disabled the run lasts exactly
    /// this many rounds; with broadcasting on, 0 means no cap.
    pub max_rounds: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Observers get a station snapshot every N rounds.  0 disables snapshots.
    pub output_interval_rounds: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            station_count:          300,
            env_size:               1000.0,
            connection_range:       70.0,
            arrival_threshold:      4.0,
            max_speed:              5.0,
            mobility:               MobilityKind::RandomWaypoint,
            nb_parallel_streets:    10,
            brownian_step:          5.0,
            markov:                 MarkovParams::default(),
            broadcast:              BroadcastStrategy::SimpleFlooding,
            scenario:               ScenarioKind::Plain,
            max_rounds:             10_000,
            seed:                   42,
            output_interval_rounds: 1,
        }
    }
}

impl SimConfig {
    /// Check every field that could make the run meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.station_count == 0 {
            return Err(ConfigError::NoStations);
        }
        if !(self.connection_range > 0.0) {
            return Err(ConfigError::NonPositiveRange(self.connection_range));
        }
        if !(self.env_size > 0.0) {
            return Err(ConfigError::NonPositiveEnvSize(self.env_size));
        }
        if !(self.arrival_threshold > 0.0) {
            return Err(ConfigError::NonPositiveArrivalThreshold(self.arrival_threshold));
        }
        if !(self.max_speed >= 0.0) {
            return Err(ConfigError::NegativeSpeed(self.max_speed));
        }
        match self.scenario {
            ScenarioKind::Plain => {}
            ScenarioKind::TimeToLive { ttl } => {
                if ttl == 0 {
                    return Err(ConfigError::NonPositiveTtl);
                }
            }
            ScenarioKind::Churn { ratio } => {
                if !(0.0..=1.0).contains(&ratio) {
                    return Err(ConfigError::ChurnRatioOutOfRange(ratio));
                }
            }
        }
        match self.mobility {
            MobilityKind::Manhattan if self.nb_parallel_streets < 2 => {
                return Err(ConfigError::TooFewStreets(self.nb_parallel_streets));
            }
            MobilityKind::Manhattan if !(self.street_spacing() > 0.0) => {
                return Err(ConfigError::NonPositiveStreetSpacing(self.street_spacing()));
            }
            MobilityKind::Brownian if !(self.brownian_step > 0.0) => {
                return Err(ConfigError::NonPositiveBrownianStep(self.brownian_step));
            }
            MobilityKind::EdgeMarkovian => {
                check_probability("p", self.markov.p)?;
                check_probability("q", self.markov.q)?;
            }
            _ => {}
        }
        if !self.broadcast.is_enabled() && self.max_rounds == 0 {
            return Err(ConfigError::ZeroRoundCap);
        }
        Ok(())
    }

    /// Spacing between Manhattan street lines.
    ///
    /// Shrunk by 2 when it divides the environment evenly so that the last
    /// line never coincides with the border.
    pub fn street_spacing(&self) -> f64 {
        let streets = self.nb_parallel_streets.max(1) as f64;
        let spacing = (self.env_size / streets).floor();
        if self.env_size % streets == 0.0 {
            spacing - 2.0
        } else {
            spacing
        }
    }
}

fn check_probability(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::ProbabilityOutOfRange { name, value })
    }
}
