use super::mdp::Mdp;
use super::policy::StochasticPolicy;
use frozen_lake::{Continous, TransitionModel};
use ndarray::{Array1, Array2, Array3, Axis, Zip};
use tracing::debug;

/// Dense model P[s, a, s'] and R[s, a, s'].
///
/// Branches of one action that land on the same cell accumulate their
/// probability; R keeps the probability-weighted mean of their rewards.
#[derive(Debug, Clone, PartialEq)]
pub struct MdpTensors {
    p: Array3<Continous>,
    r: Array3<Continous>,
}

impl MdpTensors {
    pub fn from_transitions(tm: &TransitionModel) -> Self {
        let (n_s, n_a) = (tm.n_s(), tm.n_a());
        let mut p = Array3::<Continous>::zeros((n_s, n_a, n_s));
        let mut pr = Array3::<Continous>::zeros((n_s, n_a, n_s));

        for (s, a, ts) in tm.iter() {
            for t in ts {
                p[[s, a, t.next_state]] += t.probability;
                pr[[s, a, t.next_state]] += t.probability * t.reward;
            }
        }

        let r = Zip::from(&pr)
            .and(&p)
            .map_collect(|&pr, &p| if p > 0. { pr / p } else { 0. });
        debug!(n_s, n_a, "built mdp tensors");

        Self { p, r }
    }

    pub fn from_mdp<M: Mdp + ?Sized>(mdp: &M) -> Self {
        Self::from_transitions(&mdp.transitions())
    }

    pub fn n_s(&self) -> usize {
        self.p.dim().0
    }

    pub fn n_a(&self) -> usize {
        self.p.dim().1
    }

    pub fn p(&self) -> &Array3<Continous> {
        &self.p
    }

    pub fn r(&self) -> &Array3<Continous> {
        &self.r
    }

    /// E[r | s, a].
    pub fn expected_rewards(&self) -> Array2<Continous> {
        (&self.p * &self.r).sum_axis(Axis(2))
    }

    /// P_π[s, s'] = Σ_a π(a|s) P[s, a, s'].
    pub fn policy_transitions(&self, policy: &StochasticPolicy) -> Array2<Continous> {
        let mut p_pi = Array2::zeros((self.n_s(), self.n_s()));
        for (s, mut row) in p_pi.outer_iter_mut().enumerate() {
            row.assign(&policy.row(s).dot(&self.p.index_axis(Axis(0), s)));
        }

        p_pi
    }

    /// r_π[s] = Σ_a π(a|s) E[r | s, a].
    pub fn policy_rewards(&self, policy: &StochasticPolicy) -> Array1<Continous> {
        (policy.probabilities() * &self.expected_rewards()).sum_axis(Axis(1))
    }

    /// Q[s, a] = E[r | s, a] + γ Σ_s' P[s, a, s'] v[s'].
    pub fn q_values(&self, v: &Array1<Continous>, gamma: Continous) -> Array2<Continous> {
        let mut q = self.expected_rewards();
        for (s, mut row) in q.outer_iter_mut().enumerate() {
            row.scaled_add(gamma, &self.p.index_axis(Axis(0), s).dot(v));
        }

        q
    }
}
