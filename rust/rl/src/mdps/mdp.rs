use frozen_lake::{Environment, TransitionModel};
use std::rc::Rc;

/// Markov Decision Process - Sutton & Barto 2018.
///
/// The discount factor belongs to the evaluator, not to the process.
pub trait Mdp {
    fn n_s(&self) -> usize;

    fn n_a(&self) -> usize;

    fn transitions(&self) -> Rc<TransitionModel>;
}

impl Mdp for Environment {
    fn n_s(&self) -> usize {
        Environment::n_s(self)
    }

    fn n_a(&self) -> usize {
        Environment::n_a(self)
    }

    fn transitions(&self) -> Rc<TransitionModel> {
        Environment::transitions(self)
    }
}

impl Mdp for Rc<TransitionModel> {
    fn n_s(&self) -> usize {
        TransitionModel::n_s(self)
    }

    fn n_a(&self) -> usize {
        TransitionModel::n_a(self)
    }

    fn transitions(&self) -> Rc<TransitionModel> {
        Rc::clone(self)
    }
}
