pub mod bias_variance;
pub mod direct;
pub mod iterative;
pub mod mc_control;
pub mod mc_methods;
pub mod policy_iteration;
pub mod value_iteration;

use super::policy::StochasticPolicy;
use crate::error::RlError;
use frozen_lake::{Continous, Discrete};
use ndarray::{Array1, Array2};
use tracing::debug;

/// Iteration cap for planners when the caller gives none.
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;

/// Solver of the Bellman optimality equations.
pub trait MdpSolver<T> {
    fn v_star(&self, s: Discrete) -> Option<Continous>;

    fn q_star(&self, s: Discrete, a: Discrete) -> Option<Continous>;

    fn pi_star(&self, s: Discrete) -> Option<Discrete>;

    /// Runs until the change drops under `theta` or `num_iterations` is hit.
    fn exec(
        &mut self,
        theta: Continous,
        num_iterations: Option<usize>,
    ) -> Result<(T, usize), RlError>;

    /// Deterministic policy following `pi_star`.
    fn policy(&self) -> StochasticPolicy;
}

pub(crate) fn max_abs_diff(a: &Array1<Continous>, b: &Array1<Continous>) -> Continous {
    a.iter()
        .zip(b.iter())
        .fold(0., |m, (x, y)| Continous::max(m, (x - y).abs()))
}

/// Jacobi sweeps `v ← r_π + γ P_π v` from `v` until the largest change is under `theta`.
pub(crate) fn sweep_to_fixed_point(
    p_pi: &Array2<Continous>,
    r_pi: &Array1<Continous>,
    gamma: Continous,
    theta: Continous,
    max_sweeps: usize,
    mut v: Array1<Continous>,
) -> Result<(Array1<Continous>, usize), RlError> {
    let mut delta = Continous::INFINITY;
    for sweep in 1..=max_sweeps {
        let next = r_pi + &(p_pi.dot(&v) * gamma);
        delta = max_abs_diff(&next, &v);
        v = next;
        if delta < theta {
            debug!(sweep, delta, "sweeps converged");
            return Ok((v, sweep));
        }
    }

    Err(RlError::NonConvergence {
        sweeps: max_sweeps,
        delta,
    })
}

pub(crate) fn check_theta(theta: Continous) -> Result<(), RlError> {
    if theta > 0. {
        Ok(())
    } else {
        Err(RlError::invalid_parameter(format!(
            "theta must be positive, got {theta}"
        )))
    }
}
