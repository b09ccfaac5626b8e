use super::direct::DirectEvaluator;
use super::mc_methods::{MonteCarloEvaluator, VisitRule};
use crate::config::EvalConfig;
use crate::error::RlError;
use crate::mdps::policy::StochasticPolicy;
use frozen_lake::{Continous, Environment, LakeError};
use ndarray::{Array1, Array2, Axis};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BiasVariance {
    /// Mean over runs of ‖V* − V_run‖₂.
    pub bias: Continous,
    /// ‖E[V_run²] − E[V_run]²‖₂.
    pub variance: Continous,
    pub runs: usize,
}

/// Compares repeated Monte Carlo estimates with the exact values.
#[derive(Debug, Clone)]
pub struct BiasVarianceAnalyzer {
    config: EvalConfig,
    rule: VisitRule,
}

impl BiasVarianceAnalyzer {
    pub fn new(config: EvalConfig, rule: VisitRule) -> Result<Self, RlError> {
        config.validate()?;
        Ok(Self { config, rule })
    }

    /// `make_env` supplies a fresh environment for the exact solve and for every run.
    pub fn analyze<F>(
        &self,
        mut make_env: F,
        policy: &StochasticPolicy,
        runs: usize,
    ) -> Result<BiasVariance, RlError>
    where
        F: FnMut() -> Result<Environment, LakeError>,
    {
        if runs == 0 {
            return Err(RlError::invalid_parameter("runs must be positive"));
        }

        let v_star = DirectEvaluator::new(&make_env()?, self.config.gamma)?.evaluate(policy)?;
        let mut estimates = Array2::<Continous>::zeros((runs, v_star.len()));
        for (run, mut row) in estimates.outer_iter_mut().enumerate() {
            let config = match self.config.seed {
                Some(seed) => self.config.clone().with_seed(seed.wrapping_add(run as u64)),
                None => self.config.clone(),
            };
            let v = MonteCarloEvaluator::new(make_env()?, &config)?
                .with_rule(self.rule)
                .evaluate(policy)?;
            row.assign(&v);
        }

        let bias = estimates
            .outer_iter()
            .map(|v| l2(&(&v_star - &v)))
            .sum::<Continous>()
            / runs as Continous;
        let mean = estimates
            .mean_axis(Axis(0))
            .ok_or_else(|| RlError::invalid_parameter("no estimates"))?;
        let second = estimates
            .mapv(|x| x * x)
            .mean_axis(Axis(0))
            .ok_or_else(|| RlError::invalid_parameter("no estimates"))?;
        let variance = l2(&(second - mean.mapv(|m| m * m)));

        info!(runs, rule = ?self.rule, bias, variance, "bias and variance");
        Ok(BiasVariance {
            bias,
            variance,
            runs,
        })
    }
}

fn l2(v: &Array1<Continous>) -> Continous {
    v.dot(v).sqrt()
}
