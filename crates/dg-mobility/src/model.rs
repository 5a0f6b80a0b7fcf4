//! The `MobilityModel` trait — how a station picks where to go and how it
//! gets there.

use dg_core::{MobilityKind, Point, SimConfig, SimRng, StationId};

use crate::{Brownian, Follower, Manhattan, MovementState, RandomWaypoint, Stationary};

/// Run-wide movement parameters shared by every model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveContext {
    pub env_size:          f64,
    pub max_speed:         f64,
    pub arrival_threshold: f64,
}

impl MoveContext {
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            env_size:          config.env_size,
            max_speed:         config.max_speed,
            arrival_threshold: config.arrival_threshold,
        }
    }

    /// Uniform speed in `[1, 1 + max_speed)`.
    #[inline]
    pub fn draw_speed(&self, rng: &mut SimRng) -> f64 {
        1.0 + rng.unit() * self.max_speed
    }
}

/// What one movement phase did to one station.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Moved toward its destination without reaching it.
    Moved,
    /// Snapped onto its destination.
    Arrived,
    /// Chose a new destination and speed instead of moving.
    Rerouted,
    /// Position unchanged.
    Idle,
}

/// Pluggable movement rule.
///
/// Only [`choose_destination`][Self::choose_destination] is required.  The
/// default [`step`][Self::step] implements the waypoint cycle (reroute when
/// arrived, otherwise move straight and snap within the arrival threshold);
/// models without destinations override it.
///
/// Models hold only run-wide parameters; per-station state lives in the
/// [`MobilityStore`][crate::MobilityStore].
///
/// Target-following models return `true` from
/// [`follows_targets`][Self::follows_targets].  The engine then picks a
/// target through [`choose_target`][Self::choose_target] and writes the
/// target's start-of-phase position into `state.destination` before each
/// [`step`][Self::step].
pub trait MobilityModel: Send + Sync + 'static {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// A new destination for a station at `position`, or `None` if the
    /// model does not use destinations.
    fn choose_destination(&self, position: Point, rng: &mut SimRng) -> Option<Point>;

    /// The destination chosen when a station first enters the simulation.
    /// May adjust `position` (Manhattan snaps onto the street grid).
    ///
    /// Default: same as [`choose_destination`][Self::choose_destination].
    fn first_destination(&self, position: &mut Point, rng: &mut SimRng) -> Option<Point> {
        self.choose_destination(*position, rng)
    }

    /// `true` if stations chase other stations instead of fixed points.
    fn follows_targets(&self) -> bool {
        false
    }

    /// A station for `id` to follow, drawn from `candidates` (mobile ids in
    /// id order, `id` included).
    fn choose_target(
        &self,
        _id:         StationId,
        _candidates: &[StationId],
        _rng:        &mut SimRng,
    ) -> Option<StationId> {
        None
    }

    /// Advance one station by one round.
    fn step(
        &self,
        position: &mut Point,
        state:    &mut MovementState,
        ctx:      &MoveContext,
        rng:      &mut SimRng,
    ) -> StepOutcome {
        match state.destination {
            Some(destination) if !state.arrived => {
                if move_toward(position, destination, state.speed, ctx.arrival_threshold) {
                    state.arrived = true;
                    StepOutcome::Arrived
                } else {
                    StepOutcome::Moved
                }
            }
            _ => {
                let destination = self.choose_destination(*position, rng);
                state.retarget(destination, ctx.draw_speed(rng));
                StepOutcome::Rerouted
            }
        }
    }
}

impl<M: MobilityModel + ?Sized> MobilityModel for Box<M> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn choose_destination(&self, position: Point, rng: &mut SimRng) -> Option<Point> {
        (**self).choose_destination(position, rng)
    }

    fn first_destination(&self, position: &mut Point, rng: &mut SimRng) -> Option<Point> {
        (**self).first_destination(position, rng)
    }

    fn follows_targets(&self) -> bool {
        (**self).follows_targets()
    }

    fn choose_target(
        &self,
        id:         StationId,
        candidates: &[StationId],
        rng:        &mut SimRng,
    ) -> Option<StationId> {
        (**self).choose_target(id, candidates, rng)
    }

    fn step(
        &self,
        position: &mut Point,
        state:    &mut MovementState,
        ctx:      &MoveContext,
        rng:      &mut SimRng,
    ) -> StepOutcome {
        (**self).step(position, state, ctx, rng)
    }
}

/// A model chosen at run time from the configuration.
pub type DynMobility = Box<dyn MobilityModel>;

/// The model selected by `config.mobility`.
///
/// The edge-Markovian variant moves exactly like random waypoint; its
/// difference lives entirely in the link process.
pub fn model_for(config: &SimConfig) -> DynMobility {
    match config.mobility {
        MobilityKind::RandomWaypoint | MobilityKind::EdgeMarkovian => {
            Box::new(RandomWaypoint::new(config.env_size))
        }
        MobilityKind::Manhattan => Box::new(Manhattan::from_config(config)),
        MobilityKind::Brownian => Box::new(Brownian::new(config.brownian_step, config.env_size)),
        MobilityKind::Stationary => Box::new(Stationary),
        MobilityKind::Follower => Box::new(Follower),
    }
}

/// Move `position` straight toward `destination` by `min(speed, distance)`.
///
/// If `position` is already within `threshold` of `destination` it snaps
/// exactly onto it instead and `true` is returned.
///
/// The step is capped at the remaining distance rather than always covering
/// `speed`, so a station never overshoots.  A station that lands exactly on
/// `destination` this way returns `false`; it is only reported as arrived by
/// the following call.
pub fn move_toward(position: &mut Point, destination: Point, speed: f64, threshold: f64) -> bool {
    if position.distance(destination) <= threshold {
        *position = destination;
        return true;
    }
    step_toward(position, destination, speed);
    false
}

/// Move `position` by `min(speed, distance)` along the straight line to
/// `destination`.  No-op when the two coincide.
pub fn step_toward(position: &mut Point, destination: Point, speed: f64) {
    let distance = position.distance(destination);
    if distance == 0.0 {
        return;
    }
    let step = speed.min(distance);
    position.x += (destination.x - position.x) / distance * step;
    position.y += (destination.y - position.y) / distance * step;
}
