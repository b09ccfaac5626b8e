//! Error types for evaluation and control.

use frozen_lake::LakeError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RlError {
    #[error(transparent)]
    Lake(#[from] LakeError),

    /// The linear system of the direct evaluator has no unique solution.
    #[error("numerical error: {message}")]
    Numerical { message: String },

    #[error("no convergence after {sweeps} sweeps, last delta {delta}")]
    NonConvergence { sweeps: usize, delta: f64 },

    #[error("invalid policy: {message}")]
    InvalidPolicy { message: String },

    #[error("invalid parameter: {message}")]
    InvalidParameter { message: String },
}

impl RlError {
    pub(crate) fn invalid_policy(message: impl Into<String>) -> Self {
        Self::InvalidPolicy {
            message: message.into(),
        }
    }

    pub(crate) fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }
}
