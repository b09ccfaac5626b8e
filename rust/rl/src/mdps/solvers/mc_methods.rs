use crate::config::{check_discount, EvalConfig};
use crate::error::RlError;
use crate::mdps::mdp_simulator::{EpisodeEvent, EpisodeGenerator, PolicyRollout};
use crate::mdps::policy::StochasticPolicy;
use frozen_lake::{Continous, Discrete, Environment, LakeError};
use ndarray::Array1;
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which visits of a state contribute a return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitRule {
    #[default]
    FirstVisit,
    EveryVisit,
}

impl VisitRule {
    fn counts(self) -> fn(&[EpisodeEvent], usize, Discrete) -> bool {
        match self {
            VisitRule::FirstVisit => is_first_visit,
            VisitRule::EveryVisit => is_any_visit,
        }
    }
}

/// Ref: https://youtu.be/P0ZvxeQqv0A?si=RLKdOUTNEfKXE63C
pub fn mc_first_visit(
    ep_gen: &mut dyn EpisodeGenerator,
    gamma: Continous,
    n_s: usize,
    n_ep: usize,
) -> Result<Array1<Continous>, RlError> {
    mc_core(ep_gen, gamma, n_s, n_ep, is_first_visit)
}

/// Ref: https://youtu.be/P0ZvxeQqv0A?si=RLKdOUTNEfKXE63C
pub fn mc_every_visit(
    ep_gen: &mut dyn EpisodeGenerator,
    gamma: Continous,
    n_s: usize,
    n_ep: usize,
) -> Result<Array1<Continous>, RlError> {
    mc_core(ep_gen, gamma, n_s, n_ep, is_any_visit)
}

/// Sample mean of the discounted returns following the counted visits.
/// States never visited keep 0.
pub fn mc_core(
    ep_gen: &mut dyn EpisodeGenerator,
    gamma: Continous,
    n_s: usize,
    n_ep: usize,
    counts: fn(&[EpisodeEvent], usize, Discrete) -> bool,
) -> Result<Array1<Continous>, RlError> {
    let mut returns = Array1::<Continous>::zeros(n_s);
    let mut visits = vec![0 as Discrete; n_s];

    let eps = ep_gen.generate(n_ep)?;
    for ep in eps.iter() {
        let mut g = 0.;
        for t in (0..ep.len()).rev() {
            let s = ep[t].s;
            if s >= n_s {
                return Err(LakeError::InvalidState { state: s, n_s }.into());
            }

            g = gamma * g + ep[t].r;
            if counts(ep, t, s) {
                returns[s] += g;
                visits[s] += 1;
            }
        }
    }

    for (r, &n) in returns.iter_mut().zip(visits.iter()) {
        if n > 0 {
            *r /= n as Continous;
        }
    }

    Ok(returns)
}

fn is_first_visit(ep: &[EpisodeEvent], t: usize, s: Discrete) -> bool {
    !ep.iter().take(t).any(|x| x.s == s)
}

fn is_any_visit(_: &[EpisodeEvent], _: usize, _: Discrete) -> bool {
    true
}

/// Monte Carlo policy evaluation on a live environment.
pub struct MonteCarloEvaluator {
    env: Environment,
    gamma: Continous,
    n_episodes: usize,
    rule: VisitRule,
    rng: StdRng,
}

impl MonteCarloEvaluator {
    pub fn new(mut env: Environment, config: &EvalConfig) -> Result<Self, RlError> {
        check_discount(config.gamma)?;
        if config.n_episodes == 0 {
            return Err(RlError::invalid_parameter("n_episodes must be positive"));
        }
        if let Some(seed) = config.env_seed() {
            env.seed(seed);
        }

        Ok(Self {
            env,
            gamma: config.gamma,
            n_episodes: config.n_episodes,
            rule: VisitRule::default(),
            rng: config.rng(1),
        })
    }

    pub fn with_rule(mut self, rule: VisitRule) -> Self {
        self.rule = rule;
        self
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn evaluate(&mut self, policy: &StochasticPolicy) -> Result<Array1<Continous>, RlError> {
        policy.check_shape(self.env.n_s(), self.env.n_a())?;

        let n_s = self.env.n_s();
        let mut rollout = PolicyRollout {
            env: &mut self.env,
            policy,
            rng: &mut self.rng,
        };
        let v = mc_core(
            &mut rollout,
            self.gamma,
            n_s,
            self.n_episodes,
            self.rule.counts(),
        )?;
        debug!(n_episodes = self.n_episodes, rule = ?self.rule, "monte carlo evaluation");

        Ok(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mdps::solvers::direct::DirectEvaluator;
    use crate::mdps::mdp_simulator::Episode;
    use float_eq::*;
    use frozen_lake::*;

    struct SimpleEnv {
        pub episodes: Vec<Episode>,
    }

    impl EpisodeGenerator for SimpleEnv {
        fn generate(&mut self, _n: usize) -> Result<Vec<Episode>, RlError> {
            Ok(self.episodes.clone())
        }
    }

    fn ev(s: Discrete, r: Continous) -> EpisodeEvent {
        EpisodeEvent { s, a: 0, r }
    }

    fn toy_episodes() -> SimpleEnv {
        SimpleEnv {
            episodes: vec![
                vec![ev(1, -2.), ev(4, -1.), ev(1, -3.), ev(2, -1.)],
                vec![ev(1, 0.)],
                vec![ev(2, 0.)],
            ],
        }
    }

    #[test]
    fn toy_example_with_first_vist() {
        let v = mc_first_visit(&mut toy_episodes(), 0.9, 6, 3).unwrap();

        assert_float_eq!(
            v.to_vec(),
            vec![0., (-6.059 / 2.0), (-1. / 2.0), 0., -4.51, 0.],
            abs_all <= 1e-5
        );
    }

    #[test]
    fn toy_example_with_every_vist() {
        let v = mc_every_visit(&mut toy_episodes(), 0.9, 6, 3).unwrap();

        assert_float_eq!(
            v.to_vec(),
            vec![
                0.,
                ((-6.059 + -3.0 + -0.9) / 3.0),
                (-1. / 2.0),
                0.,
                -4.51,
                0.
            ],
            abs_all <= 1e-5
        );
    }

    #[test]
    fn states_outside_the_model_are_rejected() {
        let mut ep_gen = SimpleEnv {
            episodes: vec![vec![ev(7, 1.)]],
        };

        assert!(matches!(
            mc_first_visit(&mut ep_gen, 0.9, 6, 1),
            Err(RlError::Lake(LakeError::InvalidState { state: 7, n_s: 6 }))
        ));
    }

    #[test]
    fn estimates_approach_the_exact_values() {
        let env = Environment::build(
            Grid::parse(&["FF", "FG"]).unwrap(),
            ActionSet::get(ActionSetName::Default),
            StateSet::get(StateSetName::Default),
            &Variant::Default,
            100,
        )
        .unwrap();
        let policy = StochasticPolicy::uniform(4, 4);
        let exact = DirectEvaluator::new(&env, 0.9)
            .unwrap()
            .evaluate(&policy)
            .unwrap();
        let config = EvalConfig::default()
            .with_gamma(0.9)
            .with_n_episodes(5000)
            .with_seed(17);

        let v = MonteCarloEvaluator::new(env, &config)
            .unwrap()
            .evaluate(&policy)
            .unwrap();

        assert_float_eq!(v[0], exact[0], abs <= 0.05);
        assert_float_eq!(v[3], 0., abs <= 1e-12);
    }
}
