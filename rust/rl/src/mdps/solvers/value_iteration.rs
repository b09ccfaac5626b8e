use super::{check_theta, max_abs_diff, MdpSolver, DEFAULT_MAX_ITERATIONS};
use crate::config::check_discount;
use crate::error::RlError;
use crate::mdps::{
    mdp::Mdp,
    policy::{argmax, StochasticPolicy},
    tensors::MdpTensors,
};
use frozen_lake::{Continous, Discrete};
use ndarray::{Array1, Array2, Axis};
use tracing::debug;

/// Bellman optimality sweeps `v(s) ← max_a Q(s, a)`.
#[derive(Debug, Clone)]
pub struct ValueIteration {
    tensors: MdpTensors,
    gamma: Continous,
    v: Array1<Continous>,
    q: Array2<Continous>,
}

impl ValueIteration {
    pub fn new<M: Mdp + ?Sized>(mdp: &M, gamma: Continous) -> Result<Self, RlError> {
        check_discount(gamma)?;
        let tensors = MdpTensors::from_mdp(mdp);
        let (n_s, n_a) = (tensors.n_s(), tensors.n_a());

        Ok(Self {
            tensors,
            gamma,
            v: Array1::zeros(n_s),
            q: Array2::zeros((n_s, n_a)),
        })
    }

    pub fn values(&self) -> &Array1<Continous> {
        &self.v
    }
}

impl MdpSolver<bool> for ValueIteration {
    fn v_star(&self, s: Discrete) -> Option<Continous> {
        self.v.get(s).copied()
    }

    fn q_star(&self, s: Discrete, a: Discrete) -> Option<Continous> {
        self.q.get([s, a]).copied()
    }

    fn pi_star(&self, s: Discrete) -> Option<Discrete> {
        (s < self.q.nrows()).then(|| argmax(self.q.row(s)))
    }

    /// Returns whether the values converged and the sweeps used.
    fn exec(
        &mut self,
        theta: Continous,
        num_iterations: Option<usize>,
    ) -> Result<(bool, usize), RlError> {
        check_theta(theta)?;
        let limit = num_iterations.unwrap_or(DEFAULT_MAX_ITERATIONS);

        let mut converged = (false, limit);
        for i in 1..=limit {
            let q = self.tensors.q_values(&self.v, self.gamma);
            let v = q.map_axis(Axis(1), |row| {
                row.fold(Continous::NEG_INFINITY, |m, &x| m.max(x))
            });
            let delta = max_abs_diff(&v, &self.v);
            self.v = v;
            if delta < theta {
                debug!(iterations = i, delta, "value iteration converged");
                converged = (true, i);
                break;
            }
        }
        self.q = self.tensors.q_values(&self.v, self.gamma);

        Ok(converged)
    }

    fn policy(&self) -> StochasticPolicy {
        StochasticPolicy::one_hot(self.q.outer_iter().map(argmax), self.tensors.n_a())
    }
}
