extern crate frozen_lake;
extern crate lake_rl;

use frozen_lake::*;
use lake_rl::*;

fn main() -> Result<(), RlError> {
    tracing_subscriber::fmt::init();

    let env_config = EnvConfig::default()
        .with_variant(Variant::Fall)
        .with_seed(2718);
    let eval_config = EvalConfig::default().with_seed(2718);
    let mut env = Environment::make(&env_config)?;
    env.reset(DEFAULT_START_STATE)?;
    println!("{}", env.render(RenderObject::Environment));
    println!("{}", env.render(RenderObject::Actions));
    println!("{}\n", env.render(RenderObject::States));

    let policy = StochasticPolicy::uniform(env.n_s(), env.n_a());
    let direct = DirectEvaluator::new(&env, eval_config.gamma)?.evaluate(&policy)?;
    let iterative = IterativeEvaluator::new(&env, &eval_config)?.evaluate(&policy)?;
    let first_visit =
        MonteCarloEvaluator::new(Environment::make(&env_config)?, &eval_config)?.evaluate(&policy)?;
    println!("Direct:      {:.4}", direct);
    println!("Iterative:   {:.4}", iterative);
    println!("First visit: {:.4}", first_visit);

    for rule in [VisitRule::FirstVisit, VisitRule::EveryVisit] {
        let bv = BiasVarianceAnalyzer::new(eval_config.clone(), rule)?.analyze(
            || Environment::make(&env_config),
            &policy,
            10,
        )?;
        println!("{rule:?}: bias {:.5}, variance {:.5}", bv.bias, bv.variance);
    }

    let mut control = MonteCarloControl::new(
        Environment::make(&env_config)?,
        &eval_config.clone().with_gamma(0.9),
    )?;
    let es = control.exploring_starts(5000)?;
    let soft = control.policy_control(5000, 0.1)?;
    println!(
        "\nExploring starts:\n{}",
        es.policy.argmax_grid(env.shape())?
    );
    println!("ε-soft:\n{}", soft.policy.argmax_grid(env.shape())?);

    let mut vi = ValueIteration::new(&env, 0.9)?;
    let (converged, iterations) = vi.exec(1e-8, None)?;
    println!(
        "\nValue iteration converged: {}, iterations: {}\n{}",
        converged,
        iterations,
        vi.policy().argmax_grid(env.shape())?
    );

    Ok(())
}
