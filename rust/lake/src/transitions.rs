use crate::common::utils::Weighted;
use crate::data::{ActionSet, StateSet};
use crate::index::StateIndex;
use crate::rewards::RewardRule;
use crate::{Continous, Discrete};
use serde::Serialize;
use std::ops::Index;
use tracing::debug;

/// One branch of a `(state, action)` transition distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Transition {
    pub probability: Continous,
    pub next_state: Discrete,
    pub reward: Continous,
    pub done: bool,
}

impl Weighted for Transition {
    fn p(&self) -> Continous {
        self.probability
    }
}

/// Transition distributions for every `(state, action)` pair.
///
/// Entries live in one flat arena. Pair `(s, a)` owns the slice
/// `entries[offsets[s * n_a + a]..offsets[s * n_a + a + 1]]`, one entry per
/// displacement branch of `a`. Branches that land on the same next state are
/// kept as separate entries.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionModel {
    n_s: usize,
    n_a: usize,
    offsets: Vec<usize>,
    entries: Vec<Transition>,
}

impl TransitionModel {
    pub fn build<R>(
        index: &StateIndex,
        action_set: &ActionSet,
        state_set: &StateSet,
        reward_rule: &R,
    ) -> Self
    where
        R: RewardRule + ?Sized,
    {
        let n_s = index.len();
        let n_a = action_set.len();
        let mut offsets = Vec::with_capacity(n_s * n_a + 1);
        let mut entries = Vec::new();
        offsets.push(0);

        for s in 0..n_s {
            let terminal = index.cell(s).is_some_and(|cell| state_set.is_end(cell));
            for action in action_set.iter() {
                let probability = action.branch_probability();
                for &direction in &action.directions {
                    let next_state = if terminal {
                        s
                    } else {
                        index.moved(s, direction).unwrap_or(s)
                    };
                    let done = index
                        .cell(next_state)
                        .is_some_and(|cell| state_set.is_end(cell));

                    entries.push(Transition {
                        probability,
                        next_state,
                        reward: reward_rule.reward(index, s, next_state),
                        done,
                    });
                }
                offsets.push(entries.len());
            }
        }

        debug!(n_s, n_a, n_entries = entries.len(), "built transition model");

        Self {
            n_s,
            n_a,
            offsets,
            entries,
        }
    }

    pub fn n_s(&self) -> usize {
        self.n_s
    }

    pub fn n_a(&self) -> usize {
        self.n_a
    }

    /// Total number of branch entries across all pairs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, s: Discrete, a: Discrete) -> Option<&[Transition]> {
        if s >= self.n_s || a >= self.n_a {
            return None;
        }

        let pair = s * self.n_a + a;
        Some(&self.entries[self.offsets[pair]..self.offsets[pair + 1]])
    }

    /// Iterates `(state, action, distribution)` in state-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Discrete, Discrete, &[Transition])> + '_ {
        self.offsets.windows(2).enumerate().map(move |(pair, w)| {
            (pair / self.n_a, pair % self.n_a, &self.entries[w[0]..w[1]])
        })
    }

    pub fn probability_mass(&self, s: Discrete, a: Discrete) -> Continous {
        self.get(s, a)
            .map(|ts| ts.iter().map(|t| t.probability).sum())
            .unwrap_or(0.)
    }
}

impl Index<(Discrete, Discrete)> for TransitionModel {
    type Output = [Transition];

    fn index(&self, (s, a): (Discrete, Discrete)) -> &Self::Output {
        self.get(s, a)
            .unwrap_or_else(|| panic!("no transitions for state {s} and action {a}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::*;
    use crate::rewards::Variant;
    use float_eq::*;
    use itertools::iproduct;

    fn model(rows: &[&str], actions: ActionSetName, variant: Variant) -> TransitionModel {
        let index = StateIndex::new(&Grid::parse(rows).unwrap());
        TransitionModel::build(
            &index,
            &ActionSet::get(actions),
            &StateSet::get(variant.state_set_name()),
            &variant,
        )
    }

    #[test]
    fn every_distribution_sums_to_one() {
        for (map, actions, variant) in
            iproduct!(MapName::ALL, ActionSetName::ALL, Variant::ALL)
        {
            let grid = Grid::preset(map).unwrap();
            let index = StateIndex::new(&grid);
            let tm = TransitionModel::build(
                &index,
                &ActionSet::get(actions),
                &StateSet::get(variant.state_set_name()),
                &variant,
            );

            assert_eq!(tm.iter().count(), index.len() * 4);
            for (s, a, _) in tm.iter() {
                assert_float_eq!(tm.probability_mass(s, a), 1., abs <= 1e-9);
            }
        }
    }

    #[test]
    fn terminal_cells_absorb() {
        let tm = model(&["FH", "FG"], ActionSetName::Slippery, Variant::Default);

        for s in [1, 3] {
            for a in 0..4 {
                let ts = &tm[(s, a)];
                assert_eq!(ts.len(), 3);
                for t in ts {
                    assert_eq!(t.next_state, s);
                    assert_eq!(t.reward, 0.);
                    assert!(t.done);
                }
            }
        }
    }

    #[test]
    fn holes_are_transit_when_falling() {
        let tm = model(&["FH", "FG"], ActionSetName::Default, Variant::Fall);

        assert_eq!(
            tm[(0, RIGHT)],
            [Transition {
                probability: 1.,
                next_state: 1,
                reward: -0.1,
                done: false,
            }]
        );
        assert_eq!(tm[(1, DOWN)][0].next_state, 3);
        assert_eq!(tm[(1, DOWN)][0].reward, 1.);
        assert!(tm[(1, DOWN)][0].done);
        assert_eq!(tm[(1, UP)][0].reward, -0.1);
    }

    #[test]
    fn colliding_branches_are_not_merged() {
        // From the top-left corner, "left" slips up and left into the wall.
        let tm = model(&["FF", "FG"], ActionSetName::Slippery, Variant::Default);
        let next: Vec<_> = tm[(0, LEFT)].iter().map(|t| t.next_state).collect();

        assert_eq!(next, vec![0, 2, 0]);
        assert_float_eq!(tm.probability_mass(0, LEFT), 1., abs <= 1e-9);
    }

    #[test]
    fn lookups_outside_the_model_are_none() {
        let tm = model(&["FG"], ActionSetName::Default, Variant::Default);

        assert_eq!(tm.n_s(), 2);
        assert_eq!(tm.n_a(), 4);
        assert_eq!(tm.len(), 8);
        assert!(tm.get(2, 0).is_none());
        assert!(tm.get(0, 4).is_none());
        assert_eq!(tm.probability_mass(2, 0), 0.);
    }
}
