use crate::config::check_discount;
use crate::error::RlError;
use crate::mdps::{mdp::Mdp, policy::StochasticPolicy, tensors::MdpTensors};
use frozen_lake::Continous;
use nalgebra::{DMatrix, DVector};
use ndarray::Array1;
use tracing::debug;

/// Exact policy evaluation: solves (I - γ P_π) v = r_π.
#[derive(Debug, Clone)]
pub struct DirectEvaluator {
    tensors: MdpTensors,
    gamma: Continous,
}

impl DirectEvaluator {
    pub fn new<M: Mdp + ?Sized>(mdp: &M, gamma: Continous) -> Result<Self, RlError> {
        Self::from_tensors(MdpTensors::from_mdp(mdp), gamma)
    }

    pub fn from_tensors(tensors: MdpTensors, gamma: Continous) -> Result<Self, RlError> {
        check_discount(gamma)?;
        Ok(Self { tensors, gamma })
    }

    pub fn tensors(&self) -> &MdpTensors {
        &self.tensors
    }

    pub fn gamma(&self) -> Continous {
        self.gamma
    }

    pub fn evaluate(&self, policy: &StochasticPolicy) -> Result<Array1<Continous>, RlError> {
        let n_s = self.tensors.n_s();
        policy.check_shape(n_s, self.tensors.n_a())?;

        let p_pi = self.tensors.policy_transitions(policy);
        let r_pi = self.tensors.policy_rewards(policy);
        let a = DMatrix::from_fn(n_s, n_s, |i, j| {
            let identity = if i == j { 1. } else { 0. };
            identity - self.gamma * p_pi[[i, j]]
        });
        let b = DVector::from_iterator(n_s, r_pi.iter().copied());

        let v = a.lu().solve(&b).ok_or_else(|| RlError::Numerical {
            message: format!("I - {}·P_π is singular", self.gamma),
        })?;
        if v.iter().any(|x| !x.is_finite()) {
            return Err(RlError::Numerical {
                message: "solution is not finite".to_string(),
            });
        }
        debug!(n_s, gamma = self.gamma, "solved policy values");

        Ok(v.iter().copied().collect())
    }
}
