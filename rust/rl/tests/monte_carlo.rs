extern crate float_eq;
extern crate frozen_lake;
extern crate lake_rl;
mod common;

use common::*;
use float_eq::*;
use frozen_lake::*;
use lake_rl::*;
use rstest::rstest;

#[rstest]
#[case(1)]
#[case(2)]
#[case(3)]
fn first_visit_converges_to_the_exact_values(#[case] seed: u64) {
    let policy = StochasticPolicy::uniform(4, 4);
    let exact = DirectEvaluator::new(&square(), 0.9)
        .unwrap()
        .evaluate(&policy)
        .unwrap();
    let config = EvalConfig::default()
        .with_gamma(0.9)
        .with_n_episodes(5000)
        .with_seed(seed);

    let v = MonteCarloEvaluator::new(square(), &config)
        .unwrap()
        .evaluate(&policy)
        .unwrap();

    // Only the goal is never left, so every other state is visited.
    assert_float_eq!(v[0], exact[0], abs <= 0.05);
    assert_float_eq!(v[1], exact[1], abs <= 0.05);
    assert_float_eq!(v[2], exact[2], abs <= 0.05);
}

#[rstest]
#[case(VisitRule::FirstVisit)]
#[case(VisitRule::EveryVisit)]
fn bias_is_bounded(#[case] rule: VisitRule) {
    let config = EvalConfig::default()
        .with_gamma(0.9)
        .with_n_episodes(3000)
        .with_seed(11);
    let analyzer = BiasVarianceAnalyzer::new(config, rule).unwrap();

    let bv = analyzer
        .analyze(|| Ok(square()), &StochasticPolicy::uniform(4, 4), 5)
        .unwrap();

    assert!(bv.bias < 0.1, "{bv:?}");
    assert!(bv.variance >= 0. && bv.variance < 0.01, "{bv:?}");
}

#[test]
fn seeded_estimates_are_reproducible() {
    let policy = StochasticPolicy::uniform(16, 4);
    let config = EvalConfig::default().with_n_episodes(200).with_seed(5);
    let run = || {
        MonteCarloEvaluator::new(
            preset(MapName::Small, ActionSetName::Slippery, Variant::Fall),
            &config,
        )
        .unwrap()
        .with_rule(VisitRule::EveryVisit)
        .evaluate(&policy)
        .unwrap()
    };

    assert_eq!(run(), run());
}

#[test]
fn control_on_the_small_lake_steps_into_the_goal() {
    let env = preset(MapName::Small, ActionSetName::Default, Variant::Default);
    let config = EvalConfig::default().with_gamma(0.9).with_seed(8);
    let mut control = MonteCarloControl::new(env, &config).unwrap();

    let outcome = control.exploring_starts(5000).unwrap();
    let greedy = outcome.policy.greedy_actions();

    assert_eq!(greedy[14], RIGHT);
    assert_float_eq!(outcome.q[[14, RIGHT]], 1., abs <= 1e-12);
    // Stepping right from state 4 lands in the hole at 5.
    assert_ne!(greedy[4], RIGHT);
    assert_eq!(outcome.policy.argmax_grid((4, 4)).unwrap().dim(), (4, 4));
}
