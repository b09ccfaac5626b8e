use super::policy::StochasticPolicy;
use crate::error::RlError;
use frozen_lake::{Continous, Discrete, Environment};
use rand::prelude::*;
use tracing::trace;

/// One step of an episode: the state left, the action taken and the reward received.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpisodeEvent {
    pub s: Discrete,
    pub a: Discrete,
    pub r: Continous,
}

pub type Episode = Vec<EpisodeEvent>;

pub trait EpisodeGenerator {
    fn generate(&mut self, n: usize) -> Result<Vec<Episode>, RlError>;
}

/// How an episode begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EpisodeStart {
    /// Default start state, first action drawn from the policy.
    #[default]
    Reset,
    /// Forced start state and first action.
    Exploring { state: Discrete, action: Discrete },
}

/// Rolls out one episode of `policy` until it terminates or is truncated.
pub fn run_episode<R>(
    env: &mut Environment,
    policy: &StochasticPolicy,
    rng: &mut R,
    start: EpisodeStart,
) -> Result<Episode, RlError>
where
    R: Rng + ?Sized,
{
    policy.check_shape(env.n_s(), env.n_a())?;

    let (mut s, mut a) = match start {
        EpisodeStart::Reset => {
            let s = env.reset(frozen_lake::DEFAULT_START_STATE)?;
            (s, policy.sample(rng, s)?)
        }
        EpisodeStart::Exploring { state, action } => (env.reset(state)?, action),
    };

    let mut ep = Episode::with_capacity(env.max_episode_size());
    loop {
        let si = env.step(a)?;
        ep.push(EpisodeEvent { s, a, r: si.reward });
        if si.done() {
            break;
        }

        s = si.observation;
        a = policy.sample(rng, s)?;
    }

    trace!(len = ep.len(), "episode");
    Ok(ep)
}

/// Episodes of a fixed policy on an environment.
pub struct PolicyRollout<'a, R: Rng> {
    pub env: &'a mut Environment,
    pub policy: &'a StochasticPolicy,
    pub rng: &'a mut R,
}

impl<'a, R: Rng> EpisodeGenerator for PolicyRollout<'a, R> {
    fn generate(&mut self, n: usize) -> Result<Vec<Episode>, RlError> {
        let mut eps = Vec::with_capacity(n);
        for _ in 0..n {
            eps.push(run_episode(
                &mut *self.env,
                self.policy,
                &mut *self.rng,
                EpisodeStart::Reset,
            )?);
        }

        Ok(eps)
    }
}
