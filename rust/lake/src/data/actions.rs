use crate::error::LakeError;
use crate::{Continous, Discrete};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const LEFT: Discrete = 0;
pub const DOWN: Discrete = 1;
pub const RIGHT: Discrete = 2;
pub const UP: Discrete = 3;

/// Unit displacement `(Δrow, Δcol)`.
pub type Direction = (isize, isize);

/// One action; each of its directions is taken with equal probability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub index: Discrete,
    pub name: &'static str,
    pub directions: Vec<Direction>,
}

impl Action {
    fn new(index: Discrete, name: &'static str, directions: &[Direction]) -> Self {
        Self {
            index,
            name,
            directions: directions.to_vec(),
        }
    }

    pub fn branch_probability(&self) -> Continous {
        1. / self.directions.len() as Continous
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.index, self.name)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionSetName {
    #[default]
    Default,
    Slippery,
}

impl ActionSetName {
    pub const ALL: [ActionSetName; 2] = [ActionSetName::Default, ActionSetName::Slippery];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionSetName::Default => "default",
            ActionSetName::Slippery => "slippery",
        }
    }
}

impl FromStr for ActionSetName {
    type Err = LakeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionSetName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| LakeError::unknown_name("actions set", s))
    }
}

/// Immutable action catalog, indexed by action id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionSet {
    name: ActionSetName,
    actions: Vec<Action>,
}

impl ActionSet {
    pub fn get(name: ActionSetName) -> Self {
        let actions = match name {
            ActionSetName::Default => vec![
                Action::new(LEFT, "left", &[(0, -1)]),
                Action::new(DOWN, "down", &[(1, 0)]),
                Action::new(RIGHT, "right", &[(0, 1)]),
                Action::new(UP, "up", &[(-1, 0)]),
            ],
            // Intended direction first, then the two perpendicular slips.
            ActionSetName::Slippery => vec![
                Action::new(LEFT, "left", &[(0, -1), (1, 0), (-1, 0)]),
                Action::new(DOWN, "down", &[(1, 0), (0, -1), (0, 1)]),
                Action::new(RIGHT, "right", &[(0, 1), (1, 0), (-1, 0)]),
                Action::new(UP, "up", &[(-1, 0), (0, -1), (0, 1)]),
            ],
        };

        Self { name, actions }
    }

    pub fn name(&self) -> ActionSetName {
        self.name
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn action(&self, index: Discrete) -> Option<&Action> {
        self.actions.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter()
    }
}

impl fmt::Display for ActionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Actions: {}", self.actions.iter().join(", "))
    }
}
