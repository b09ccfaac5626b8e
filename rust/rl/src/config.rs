use crate::error::RlError;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

/// Numerical settings shared by the evaluators and control algorithms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EvalConfig {
    /// Discount factor γ.
    pub gamma: f64,
    /// Convergence tolerance θ for iterative sweeps.
    pub theta: f64,
    pub max_sweeps: usize,
    /// Episodes sampled per Monte Carlo evaluation.
    pub n_episodes: usize,
    pub seed: Option<u64>,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            gamma: 0.1,
            theta: 1e-3,
            max_sweeps: 100_000,
            n_episodes: 1500,
            seed: None,
        }
    }
}

impl EvalConfig {
    pub fn from_json(json: &str) -> Result<Self, RlError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| RlError::invalid_parameter(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), RlError> {
        check_discount(self.gamma)?;
        if !(self.theta > 0.) {
            return Err(RlError::invalid_parameter(format!(
                "theta must be positive, got {}",
                self.theta
            )));
        }
        if self.max_sweeps == 0 || self.n_episodes == 0 {
            return Err(RlError::invalid_parameter(
                "max_sweeps and n_episodes must be positive",
            ));
        }

        Ok(())
    }

    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    pub fn with_theta(mut self, theta: f64) -> Self {
        self.theta = theta;
        self
    }

    pub fn with_max_sweeps(mut self, max_sweeps: usize) -> Self {
        self.max_sweeps = max_sweeps;
        self
    }

    pub fn with_n_episodes(mut self, n_episodes: usize) -> Self {
        self.n_episodes = n_episodes;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Independent generator for `stream`; seeded runs are reproducible.
    pub fn rng(&self, stream: u64) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_mul(0x9E37_79B9).wrapping_add(stream)),
            None => StdRng::from_entropy(),
        }
    }

    /// Environment seed drawn from stream 0, so it never replays a policy stream.
    pub fn env_seed(&self) -> Option<u64> {
        self.seed.map(|_| self.rng(0).gen())
    }
}

pub(crate) fn check_discount(gamma: f64) -> Result<(), RlError> {
    if (0. ..=1.).contains(&gamma) {
        Ok(())
    } else {
        Err(RlError::invalid_parameter(format!(
            "gamma must lie in [0, 1], got {gamma}"
        )))
    }
}
