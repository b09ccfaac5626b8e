extern crate float_eq;
extern crate frozen_lake;
extern crate lake_rl;
mod common;

use common::*;
use float_eq::*;
use frozen_lake::*;
use lake_rl::*;
use rand::prelude::*;
use rstest::rstest;

#[rstest]
#[case(MapName::Small, ActionSetName::Default)]
#[case(MapName::Small, ActionSetName::Slippery)]
#[case(MapName::Medium, ActionSetName::Slippery)]
fn planners_agree_and_their_policies_are_optimal(
    #[case] map: MapName,
    #[case] actions: ActionSetName,
) {
    let env = preset(map, actions, Variant::Default);
    let config = EvalConfig::default().with_gamma(0.9);
    let mut vi = ValueIteration::new(&env, config.gamma).unwrap();
    let mut pi = PolicyIteration::new(&env, &config).unwrap();

    assert!(vi.exec(1e-10, None).unwrap().0);
    assert!(pi.exec(1e-10, None).unwrap().0);

    let exact = DirectEvaluator::new(&env, config.gamma)
        .unwrap()
        .evaluate(&pi.policy())
        .unwrap();
    for s in 0..env.n_s() {
        assert_float_eq!(vi.v_star(s).unwrap(), pi.v_star(s).unwrap(), abs <= 1e-6);
        assert_float_eq!(exact[s], pi.v_star(s).unwrap(), abs <= 1e-6);
    }
    assert!(vi.v_star(0).unwrap() > 0.);
}

#[rstest]
#[case(MapName::Medium, 0.95)]
#[case(MapName::Large, 0.99)]
fn default_tolerance_still_reaches_the_optimum(#[case] map: MapName, #[case] gamma: f64) {
    let env = preset(map, ActionSetName::Slippery, Variant::Fall);
    let config = EvalConfig::default().with_gamma(gamma);
    let mut vi = ValueIteration::new(&env, gamma).unwrap();
    let mut pi = PolicyIteration::new(&env, &config).unwrap();

    assert!(vi.exec(1e-12, None).unwrap().0);
    assert!(pi.exec(config.theta, None).unwrap().0);

    let achieved = DirectEvaluator::new(&env, gamma)
        .unwrap()
        .evaluate(&pi.policy())
        .unwrap();
    for s in 0..env.n_s() {
        assert_float_eq!(achieved[s], vi.v_star(s).unwrap(), abs <= 1e-6);
        assert_float_eq!(pi.v_star(s).unwrap(), vi.v_star(s).unwrap(), abs <= 1e-6);
    }
}

#[test]
fn solver_policies_drive_the_environment_to_the_goal() {
    let mut env = preset(MapName::Small, ActionSetName::Default, Variant::Default);
    let mut vi = ValueIteration::new(&env, 0.9).unwrap();
    vi.exec(1e-10, None).unwrap();
    let policy = vi.policy();
    let rng = &mut StdRng::seed_from_u64(0);

    let ep = run_episode(&mut env, &policy, rng, EpisodeStart::Reset).unwrap();

    assert_eq!(ep.len(), 6);
    assert_eq!(ep.last().map(|e| e.r), Some(1.));
    insta::assert_snapshot!(policy.argmax_grid(env.shape()).unwrap(), @r###"
    [[1, 2, 1, 0],
     [1, 0, 1, 0],
     [2, 1, 1, 0],
     [0, 2, 2, 0]]
    "###);
}
