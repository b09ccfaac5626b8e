extern crate rand;
extern crate serde;
extern crate serde_json;

pub mod common;
pub mod config;
pub mod data;
pub mod env;
pub mod error;
pub mod index;
pub mod render;
pub mod rewards;
pub mod transitions;

pub use common::defs::*;
pub use common::utils::{pick_next, sample_index, Weighted};
pub use config::EnvConfig;
pub use data::*;
pub use env::{EpisodeState, Environment};
pub use error::LakeError;
pub use index::StateIndex;
pub use render::RenderObject;
pub use rewards::{RewardRule, Variant};
pub use transitions::{Transition, TransitionModel};

pub type Discrete = usize;
pub type Continous = f64;

/// State every episode starts from unless a caller asks otherwise.
pub const DEFAULT_START_STATE: Discrete = 0;
