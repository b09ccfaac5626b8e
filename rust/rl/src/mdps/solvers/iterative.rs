use super::{check_theta, sweep_to_fixed_point};
use crate::config::{check_discount, EvalConfig};
use crate::error::RlError;
use crate::mdps::{mdp::Mdp, policy::StochasticPolicy, tensors::MdpTensors};
use frozen_lake::Continous;
use ndarray::Array1;

/// Policy evaluation by repeated Bellman expectation sweeps.
#[derive(Debug, Clone)]
pub struct IterativeEvaluator {
    tensors: MdpTensors,
    gamma: Continous,
    theta: Continous,
    max_sweeps: usize,
}

impl IterativeEvaluator {
    pub fn new<M: Mdp + ?Sized>(mdp: &M, config: &EvalConfig) -> Result<Self, RlError> {
        Self::from_tensors(MdpTensors::from_mdp(mdp), config)
    }

    pub fn from_tensors(tensors: MdpTensors, config: &EvalConfig) -> Result<Self, RlError> {
        check_discount(config.gamma)?;
        check_theta(config.theta)?;

        Ok(Self {
            tensors,
            gamma: config.gamma,
            theta: config.theta,
            max_sweeps: config.max_sweeps,
        })
    }

    pub fn evaluate(&self, policy: &StochasticPolicy) -> Result<Array1<Continous>, RlError> {
        let v0 = Array1::zeros(self.tensors.n_s());
        self.evaluate_from(policy, v0).map(|(v, _)| v)
    }

    /// Warm-started evaluation; also returns the number of sweeps used.
    pub fn evaluate_from(
        &self,
        policy: &StochasticPolicy,
        v0: Array1<Continous>,
    ) -> Result<(Array1<Continous>, usize), RlError> {
        policy.check_shape(self.tensors.n_s(), self.tensors.n_a())?;
        if v0.len() != self.tensors.n_s() {
            return Err(RlError::invalid_parameter(format!(
                "initial values have {} entries for {} states",
                v0.len(),
                self.tensors.n_s()
            )));
        }

        sweep_to_fixed_point(
            &self.tensors.policy_transitions(policy),
            &self.tensors.policy_rewards(policy),
            self.gamma,
            self.theta,
            self.max_sweeps,
            v0,
        )
    }
}
