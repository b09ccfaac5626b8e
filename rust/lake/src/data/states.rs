use super::maps::Cell;
use crate::error::LakeError;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateSetName {
    /// Holes end the episode.
    #[default]
    Default,
    /// Holes can be walked through.
    Fall,
}

impl StateSetName {
    pub const ALL: [StateSetName; 2] = [StateSetName::Default, StateSetName::Fall];

    pub fn as_str(&self) -> &'static str {
        match self {
            StateSetName::Default => "default",
            StateSetName::Fall => "fall",
        }
    }
}

impl FromStr for StateSetName {
    type Err = LakeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StateSetName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| LakeError::unknown_name("states set", s))
    }
}

/// Splits cell kinds into transit cells and terminal cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSet {
    name: StateSetName,
    transit_states: Vec<Cell>,
    end_states: Vec<Cell>,
}

impl StateSet {
    pub fn get(name: StateSetName) -> Self {
        let (transit_states, end_states) = match name {
            StateSetName::Default => (vec![Cell::Frozen], vec![Cell::Hole, Cell::Goal]),
            StateSetName::Fall => (vec![Cell::Frozen, Cell::Hole], vec![Cell::Goal]),
        };

        Self {
            name,
            transit_states,
            end_states,
        }
    }

    pub fn name(&self) -> StateSetName {
        self.name
    }

    pub fn is_transit(&self, cell: Cell) -> bool {
        self.transit_states.contains(&cell)
    }

    pub fn is_end(&self, cell: Cell) -> bool {
        self.end_states.contains(&cell)
    }
}

impl fmt::Display for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "States: transit_states=[{}], end_states=[{}]",
            self.transit_states.iter().join(", "),
            self.end_states.iter().join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(StateSetName::Default, Cell::Frozen, false)]
    #[case(StateSetName::Default, Cell::Hole, true)]
    #[case(StateSetName::Default, Cell::Goal, true)]
    #[case(StateSetName::Fall, Cell::Frozen, false)]
    #[case(StateSetName::Fall, Cell::Hole, false)]
    #[case(StateSetName::Fall, Cell::Goal, true)]
    fn classifies_cells(#[case] name: StateSetName, #[case] cell: Cell, #[case] end: bool) {
        let set = StateSet::get(name);

        assert_eq!(set.is_end(cell), end);
        assert_eq!(set.is_transit(cell), !end);
    }

    #[test]
    fn display_lists_both_classes() {
        assert_eq!(
            StateSet::get(StateSetName::Default).to_string(),
            "States: transit_states=[F], end_states=[H, G]"
        );
        assert_eq!(
            StateSet::get(StateSetName::Fall).to_string(),
            "States: transit_states=[F, H], end_states=[G]"
        );
    }

    #[test]
    fn unknown_state_set_name_fails() {
        assert!("melting".parse::<StateSetName>().is_err());
        assert_eq!("fall".parse::<StateSetName>().unwrap(), StateSetName::Fall);
    }
}
