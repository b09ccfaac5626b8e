use crate::common::defs::StepInfo;
use crate::common::utils::pick_next;
use crate::config::EnvConfig;
use crate::data::{ActionSet, Grid, StateSet};
use crate::error::LakeError;
use crate::index::StateIndex;
use crate::render::{self, RenderObject};
use crate::rewards::RewardRule;
use crate::transitions::TransitionModel;
use crate::{Discrete, DEFAULT_START_STATE};
use rand::prelude::*;
use std::rc::Rc;
use tracing::trace;

/// Per-episode bookkeeping, replaced on every reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpisodeState {
    pub current_state: Discrete,
    pub steps_taken: usize,
    pub finished: bool,
}

impl EpisodeState {
    fn start(state: Discrete) -> Self {
        Self {
            current_state: state,
            steps_taken: 0,
            finished: false,
        }
    }
}

/// Frozen lake environment: a grid world whose dynamics are fixed at construction.
///
/// The transition model is built once and shared read-only; the environment
/// itself only owns the current episode and its random number generator.
#[derive(Debug, Clone)]
pub struct Environment {
    grid: Grid,
    index: StateIndex,
    action_set: ActionSet,
    state_set: StateSet,
    transitions: Rc<TransitionModel>,
    max_episode_size: usize,
    episode: EpisodeState,
    rng: StdRng,
}

impl Environment {
    pub fn build<R>(
        grid: Grid,
        action_set: ActionSet,
        state_set: StateSet,
        reward_rule: &R,
        max_episode_size: usize,
    ) -> Result<Self, LakeError>
    where
        R: RewardRule + ?Sized,
    {
        if max_episode_size == 0 {
            return Err(LakeError::configuration(
                "max episode size must be at least one step",
            ));
        }
        if action_set.is_empty() {
            return Err(LakeError::configuration("action set is empty"));
        }

        let index = StateIndex::new(&grid);
        let transitions = TransitionModel::build(&index, &action_set, &state_set, reward_rule);

        Ok(Self {
            grid,
            index,
            action_set,
            state_set,
            transitions: Rc::new(transitions),
            max_episode_size,
            episode: EpisodeState::start(DEFAULT_START_STATE),
            rng: StdRng::from_entropy(),
        })
    }

    /// Builds one of the named presets.
    pub fn make(config: &EnvConfig) -> Result<Self, LakeError> {
        let env = Self::build(
            Grid::preset(config.map)?,
            ActionSet::get(config.action_set),
            StateSet::get(config.variant.state_set_name()),
            &config.variant,
            config.max_episode_size,
        )?;

        Ok(match config.seed {
            Some(seed) => env.with_seed(seed),
            None => env,
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed(seed);
        self
    }

    pub fn seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    pub fn n_s(&self) -> usize {
        self.index.len()
    }

    pub fn n_a(&self) -> usize {
        self.action_set.len()
    }

    pub fn shape(&self) -> (usize, usize) {
        self.grid.shape()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn state_index(&self) -> &StateIndex {
        &self.index
    }

    pub fn action_set(&self) -> &ActionSet {
        &self.action_set
    }

    pub fn state_set(&self) -> &StateSet {
        &self.state_set
    }

    pub fn transitions(&self) -> Rc<TransitionModel> {
        Rc::clone(&self.transitions)
    }

    pub fn max_episode_size(&self) -> usize {
        self.max_episode_size
    }

    pub fn episode(&self) -> EpisodeState {
        self.episode
    }

    pub fn steps_taken(&self) -> usize {
        self.episode.steps_taken
    }

    pub fn current_state(&self) -> Discrete {
        self.episode.current_state
    }

    pub fn is_terminal_state(&self, s: Discrete) -> bool {
        self.index
            .cell(s)
            .is_some_and(|cell| self.state_set.is_end(cell))
    }

    /// Starts a new episode from `start_state` (terminal cells included).
    pub fn reset(&mut self, start_state: Discrete) -> Result<Discrete, LakeError> {
        if start_state >= self.n_s() {
            return Err(LakeError::InvalidState {
                state: start_state,
                n_s: self.n_s(),
            });
        }

        self.episode = EpisodeState::start(start_state);
        Ok(start_state)
    }

    /// Samples one transition for `action` from the current state.
    ///
    /// Reaching the episode cap on a non-terminal step reports `truncated`.
    /// Stepping again after either outcome fails until the next reset.
    pub fn step(&mut self, action: Discrete) -> Result<StepInfo, LakeError> {
        if self.episode.finished {
            return Err(LakeError::EpisodeFinished);
        }

        let s = self.episode.current_state;
        let ts = self
            .transitions
            .get(s, action)
            .ok_or(LakeError::InvalidAction {
                action,
                n_a: self.action_set.len(),
            })?;
        let t = *pick_next(&mut self.rng, ts)?;

        self.episode.steps_taken += 1;
        let truncated = !t.done && self.episode.steps_taken == self.max_episode_size;
        self.episode.current_state = t.next_state;
        self.episode.finished = t.done || truncated;

        trace!(
            s,
            action,
            next_state = t.next_state,
            reward = t.reward,
            done = t.done,
            truncated,
            "step"
        );

        Ok(StepInfo {
            observation: t.next_state,
            reward: t.reward,
            terminated: t.done,
            truncated,
        })
    }

    pub fn render(&self, object: RenderObject) -> String {
        match object {
            RenderObject::Environment => render::board(
                &self.grid,
                self.index.position(self.episode.current_state),
            ),
            RenderObject::Actions => self.action_set.to_string(),
            RenderObject::States => self.state_set.to_string(),
        }
    }
}
