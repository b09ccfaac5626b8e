use crate::{Continous, Discrete};
use serde::Serialize;

/// Outcome of a single environment step.
///
/// `terminated` means a terminal cell was reached. `truncated` means the
/// episode cap was hit before that happened.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StepInfo {
    pub observation: Discrete,
    pub reward: Continous,
    pub terminated: bool,
    pub truncated: bool,
}

impl StepInfo {
    /// Either way the episode is over.
    pub fn done(&self) -> bool {
        self.terminated || self.truncated
    }
}
