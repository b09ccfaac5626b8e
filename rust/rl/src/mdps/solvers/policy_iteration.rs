use super::{check_theta, sweep_to_fixed_point, MdpSolver, DEFAULT_MAX_ITERATIONS};
use crate::config::{check_discount, EvalConfig};
use crate::error::RlError;
use crate::mdps::{
    mdp::Mdp,
    policy::{argmax, StochasticPolicy},
    tensors::MdpTensors,
};
use frozen_lake::{Continous, Discrete};
use ndarray::{Array1, Array2};
use tracing::debug;

/// Q gaps under this count as ties and keep the current action.
const MIN_IMPROVEMENT: Continous = 1e-8;

/// Loosest tolerance a policy is evaluated to before it is improved.
const EVALUATION_THETA: Continous = 1e-12;

/// Alternates iterative policy evaluation with greedy improvement.
#[derive(Debug, Clone)]
pub struct PolicyIteration {
    tensors: MdpTensors,
    gamma: Continous,
    max_sweeps: usize,
    actions: Vec<Discrete>,
    v: Array1<Continous>,
    q: Array2<Continous>,
}

impl PolicyIteration {
    pub fn new<M: Mdp + ?Sized>(mdp: &M, config: &EvalConfig) -> Result<Self, RlError> {
        check_discount(config.gamma)?;
        let tensors = MdpTensors::from_mdp(mdp);
        let (n_s, n_a) = (tensors.n_s(), tensors.n_a());

        Ok(Self {
            tensors,
            gamma: config.gamma,
            max_sweeps: config.max_sweeps,
            actions: vec![0; n_s],
            v: Array1::zeros(n_s),
            q: Array2::zeros((n_s, n_a)),
        })
    }

    pub fn actions(&self) -> &[Discrete] {
        &self.actions
    }

    fn improve(&mut self) -> bool {
        let mut stable = true;
        for (s, row) in self.q.outer_iter().enumerate() {
            let best = argmax(row);
            if row[best] > row[self.actions[s]] + MIN_IMPROVEMENT {
                self.actions[s] = best;
                stable = false;
            }
        }

        stable
    }
}

impl MdpSolver<bool> for PolicyIteration {
    fn v_star(&self, s: Discrete) -> Option<Continous> {
        self.v.get(s).copied()
    }

    fn q_star(&self, s: Discrete, a: Discrete) -> Option<Continous> {
        self.q.get([s, a]).copied()
    }

    fn pi_star(&self, s: Discrete) -> Option<Discrete> {
        self.actions.get(s).copied()
    }

    /// Each policy is evaluated to `theta` or 1e-12, whichever is tighter.
    /// Returns whether the policy became stable and the improvement rounds used.
    fn exec(
        &mut self,
        theta: Continous,
        num_iterations: Option<usize>,
    ) -> Result<(bool, usize), RlError> {
        check_theta(theta)?;
        let limit = num_iterations.unwrap_or(DEFAULT_MAX_ITERATIONS);

        for i in 1..=limit {
            let policy = self.policy();
            let (v, sweeps) = sweep_to_fixed_point(
                &self.tensors.policy_transitions(&policy),
                &self.tensors.policy_rewards(&policy),
                self.gamma,
                theta.min(EVALUATION_THETA),
                self.max_sweeps,
                self.v.clone(),
            )?;
            self.q = self.tensors.q_values(&v, self.gamma);
            self.v = v;
            debug!(round = i, sweeps, "policy evaluated");

            if self.improve() {
                return Ok((true, i));
            }
        }

        Ok((false, limit))
    }

    fn policy(&self) -> StochasticPolicy {
        StochasticPolicy::one_hot(self.actions.iter().copied(), self.tensors.n_a())
    }
}
