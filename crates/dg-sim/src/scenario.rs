//! Perturbation scenarios: reception eligibility plus the post-rebuild
//! hook.

use dg_core::{ScenarioKind, StationId};
use dg_flood::{FirstCopy, MessageState, ReceptionRule, TimeToLive};

use crate::{ChurnModel, ChurnReport};

/// The scenario selected for a run.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Scenario {
    Plain,
    TimeToLive(TimeToLive),
    Churn(ChurnModel),
}

impl Scenario {
    pub fn from_kind(kind: ScenarioKind) -> Self {
        match kind {
            ScenarioKind::Plain              => Scenario::Plain,
            ScenarioKind::TimeToLive { ttl } => Scenario::TimeToLive(TimeToLive { ttl }),
            ScenarioKind::Churn { ratio }    => Scenario::Churn(ChurnModel::new(ratio)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Scenario::Plain         => "plain",
            Scenario::TimeToLive(_) => "ttl",
            Scenario::Churn(_)      => "churn",
        }
    }
}

impl ReceptionRule for Scenario {
    fn can_receive(&self, state: &MessageState) -> bool {
        match self {
            Scenario::TimeToLive(rule) => rule.can_receive(state),
            _ => FirstCopy.can_receive(state),
        }
    }

    fn acquired_lifetime(&self) -> Option<u32> {
        match self {
            Scenario::TimeToLive(rule) => rule.acquired_lifetime(),
            _ => None,
        }
    }
}

/// What the scenario hook did in one round.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Perturbation {
    #[default]
    None,
    /// Stations whose message expired.
    Expired(Vec<StationId>),
    Churn(ChurnReport),
}

impl Perturbation {
    pub fn expired_count(&self) -> usize {
        match self {
            Perturbation::Expired(ids) => ids.len(),
            _ => 0,
        }
    }

    /// Stations replaced this round.
    pub fn churned_count(&self) -> usize {
        match self {
            Perturbation::Churn(report) => report.removed.len(),
            _ => 0,
        }
    }
}
