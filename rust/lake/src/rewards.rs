use crate::data::{Cell, StateSetName};
use crate::error::LakeError;
use crate::index::StateIndex;
use crate::{Continous, Discrete};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const GOAL_REWARD: Continous = 1.;
pub const HOLE_PENALTY: Continous = -0.1;

/// Reward for moving from `current` to `next`.
pub trait RewardRule {
    fn reward(&self, index: &StateIndex, current: Discrete, next: Discrete) -> Continous;
}

impl<F> RewardRule for F
where
    F: Fn(&StateIndex, Discrete, Discrete) -> Continous,
{
    fn reward(&self, index: &StateIndex, current: Discrete, next: Discrete) -> Continous {
        self(index, current, next)
    }
}

/// Built-in environment flavours. Each one fixes a state set and a reward rule.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Holes end the episode, only the goal pays.
    #[default]
    Default,
    /// Holes are walkable but entering one costs `HOLE_PENALTY`.
    Fall,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::Default, Variant::Fall];

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Default => "default",
            Variant::Fall => "fall",
        }
    }

    pub fn state_set_name(&self) -> StateSetName {
        match self {
            Variant::Default => StateSetName::Default,
            Variant::Fall => StateSetName::Fall,
        }
    }
}

impl FromStr for Variant {
    type Err = LakeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Variant::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| LakeError::unknown_name("environment variant", s))
    }
}

impl RewardRule for Variant {
    fn reward(&self, index: &StateIndex, current: Discrete, next: Discrete) -> Continous {
        match (self, index.cell(next)) {
            // Only the first entry into the goal pays out.
            (_, Some(Cell::Goal)) if current != next => GOAL_REWARD,
            (Variant::Fall, Some(Cell::Hole)) => HOLE_PENALTY,
            _ => 0.,
        }
    }
}
