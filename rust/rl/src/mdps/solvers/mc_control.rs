use crate::config::{check_discount, EvalConfig};
use crate::error::RlError;
use crate::mdps::mdp_simulator::{run_episode, EpisodeEvent, EpisodeStart};
use crate::mdps::policy::{create_policy, StochasticPolicy};
use frozen_lake::{Continous, Environment};
use ndarray::Array2;
use rand::prelude::*;
use tracing::{debug, info};

/// Result of a control run.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlOutcome {
    pub policy: StochasticPolicy,
    pub q: Array2<Continous>,
    pub episodes: usize,
}

/// First-visit sample means of the returns of every (s, a) pair.
#[derive(Debug, Clone)]
struct ActionValues {
    sums: Array2<Continous>,
    visits: Array2<usize>,
    q: Array2<Continous>,
}

impl ActionValues {
    fn new(n_s: usize, n_a: usize) -> Self {
        Self {
            sums: Array2::zeros((n_s, n_a)),
            visits: Array2::zeros((n_s, n_a)),
            q: Array2::zeros((n_s, n_a)),
        }
    }

    fn update(&mut self, ep: &[EpisodeEvent], gamma: Continous) {
        let mut g = 0.;
        for t in (0..ep.len()).rev() {
            let EpisodeEvent { s, a, r } = ep[t];
            g = gamma * g + r;
            if !ep.iter().take(t).any(|x| x.s == s && x.a == a) {
                self.sums[[s, a]] += g;
                self.visits[[s, a]] += 1;
                self.q[[s, a]] = self.sums[[s, a]] / self.visits[[s, a]] as Continous;
            }
        }
    }
}

/// On-policy Monte Carlo control.
pub struct MonteCarloControl {
    env: Environment,
    gamma: Continous,
    rng: StdRng,
}

impl MonteCarloControl {
    pub fn new(mut env: Environment, config: &EvalConfig) -> Result<Self, RlError> {
        check_discount(config.gamma)?;
        if let Some(seed) = config.env_seed() {
            env.seed(seed);
        }

        Ok(Self {
            env,
            gamma: config.gamma,
            rng: config.rng(2),
        })
    }

    /// Every episode starts from a uniformly drawn (state, action) pair and
    /// then follows the greedy policy of the current estimates.
    pub fn exploring_starts(&mut self, n_episodes: usize) -> Result<ControlOutcome, RlError> {
        let (n_s, n_a) = (self.env.n_s(), self.env.n_a());
        let mut values = ActionValues::new(n_s, n_a);
        let mut policy = StochasticPolicy::uniform(n_s, n_a);

        for i in 0..n_episodes {
            let start = EpisodeStart::Exploring {
                state: self.rng.gen_range(0..n_s),
                action: self.rng.gen_range(0..n_a),
            };
            let ep = run_episode(&mut self.env, &policy, &mut self.rng, start)?;
            values.update(&ep, self.gamma);
            policy = create_policy(&values.q, 0.)?;

            if (i + 1) % 1000 == 0 {
                debug!(episodes = i + 1, "exploring starts");
            }
        }
        info!(n_episodes, "exploring starts done");

        Ok(ControlOutcome {
            policy,
            q: values.q,
            episodes: n_episodes,
        })
    }

    /// ε-soft on-policy control from the default start state.
    pub fn policy_control(
        &mut self,
        n_episodes: usize,
        eps: Continous,
    ) -> Result<ControlOutcome, RlError> {
        let (n_s, n_a) = (self.env.n_s(), self.env.n_a());
        let mut values = ActionValues::new(n_s, n_a);
        let mut policy = create_policy(&values.q, eps)?;

        for i in 0..n_episodes {
            let ep = run_episode(&mut self.env, &policy, &mut self.rng, EpisodeStart::Reset)?;
            values.update(&ep, self.gamma);
            policy = create_policy(&values.q, eps)?;

            if (i + 1) % 1000 == 0 {
                debug!(episodes = i + 1, eps, "policy control");
            }
        }
        info!(n_episodes, eps, "policy control done");

        Ok(ControlOutcome {
            policy,
            q: values.q,
            episodes: n_episodes,
        })
    }
}
