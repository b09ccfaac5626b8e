extern crate frozen_lake;
extern crate rand;
extern crate serde;

pub mod config;
pub mod error;
pub mod mdps;

pub use config::EvalConfig;
pub use error::RlError;
pub use mdps::mdp::Mdp;
pub use mdps::mdp_simulator::{run_episode, Episode, EpisodeEvent, EpisodeGenerator, EpisodeStart};
pub use mdps::policy::{argmax, create_policy, StochasticPolicy};
pub use mdps::solvers::{
    bias_variance::{BiasVariance, BiasVarianceAnalyzer},
    direct::DirectEvaluator,
    iterative::IterativeEvaluator,
    mc_control::{ControlOutcome, MonteCarloControl},
    mc_methods::{MonteCarloEvaluator, VisitRule},
    policy_iteration::PolicyIteration,
    value_iteration::ValueIteration,
    MdpSolver,
};
pub use mdps::tensors::MdpTensors;
