//! Error types for the frozen lake environment.

use crate::Discrete;
use thiserror::Error;

/// Errors raised while building or stepping an environment.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LakeError {
    /// Unknown catalog name, malformed grid or invalid environment parameter.
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// Action id outside `[0, n_a)`.
    #[error("invalid action {action}: expected an action in 0..{n_a}")]
    InvalidAction { action: Discrete, n_a: usize },

    /// State id outside `[0, n_s)`.
    #[error("invalid state {state}: expected a state in 0..{n_s}")]
    InvalidState { state: Discrete, n_s: usize },

    /// The current episode already terminated or was truncated.
    #[error("episode already finished, call reset before stepping again")]
    EpisodeFinished,

    /// Sampling weights that do not describe a distribution.
    #[error("cannot sample: {message}")]
    Sampling { message: String },
}

impl LakeError {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub(crate) fn unknown_name(kind: &str, name: &str) -> Self {
        Self::configuration(format!("unknown {kind} name \"{name}\""))
    }
}
