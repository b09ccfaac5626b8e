use crate::error::RlError;
use frozen_lake::{sample_index, Continous, Discrete};
use ndarray::{Array2, ArrayView1, Axis};
use rand::Rng;

/// π(a|s) as an `n_s × n_a` row-stochastic matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct StochasticPolicy {
    probs: Array2<Continous>,
}

impl StochasticPolicy {
    pub fn uniform(n_s: usize, n_a: usize) -> Self {
        Self {
            probs: Array2::from_elem((n_s, n_a), 1. / n_a as Continous),
        }
    }

    /// Renormalises every row of non-negative `weights` to sum to one.
    pub fn from_weights(mut weights: Array2<Continous>) -> Result<Self, RlError> {
        for (s, mut row) in weights.axis_iter_mut(Axis(0)).enumerate() {
            if row.iter().any(|w| !w.is_finite() || *w < 0.) {
                return Err(RlError::invalid_policy(format!(
                    "state {s} has a negative or non-finite weight"
                )));
            }
            let total = row.sum();
            if total <= 0. {
                return Err(RlError::invalid_policy(format!(
                    "state {s} has no positive weight"
                )));
            }
            row.mapv_inplace(|w| w / total);
        }

        Ok(Self { probs: weights })
    }

    /// Point mass on `actions[s]` for every state.
    pub fn deterministic(actions: &[Discrete], n_a: usize) -> Result<Self, RlError> {
        if let Some((s, a)) = actions.iter().enumerate().find(|(_, &a)| a >= n_a) {
            return Err(RlError::invalid_policy(format!(
                "action {a} of state {s} is out of range for {n_a} actions"
            )));
        }

        Ok(Self::one_hot(actions.iter().copied(), n_a))
    }

    /// Point mass per state; every action must be below `n_a`.
    pub(crate) fn one_hot<I>(actions: I, n_a: usize) -> Self
    where
        I: ExactSizeIterator<Item = Discrete>,
    {
        let mut probs = Array2::zeros((actions.len(), n_a));
        for (s, a) in actions.enumerate() {
            probs[[s, a]] = 1.;
        }

        Self { probs }
    }

    /// ε-soft greedy policy over `q`, see [`create_policy`].
    pub fn greedy(q: &Array2<Continous>, eps: Continous) -> Result<Self, RlError> {
        create_policy(q, eps)
    }

    pub fn n_s(&self) -> usize {
        self.probs.nrows()
    }

    pub fn n_a(&self) -> usize {
        self.probs.ncols()
    }

    pub fn probabilities(&self) -> &Array2<Continous> {
        &self.probs
    }

    pub fn row(&self, s: Discrete) -> ArrayView1<'_, Continous> {
        self.probs.row(s)
    }

    pub fn check_shape(&self, n_s: usize, n_a: usize) -> Result<(), RlError> {
        if self.probs.dim() == (n_s, n_a) {
            Ok(())
        } else {
            Err(RlError::invalid_policy(format!(
                "policy is {:?}, environment has {n_s} states and {n_a} actions",
                self.probs.dim()
            )))
        }
    }

    pub fn sample<R>(&self, rng: &mut R, s: Discrete) -> Result<Discrete, RlError>
    where
        R: Rng + ?Sized,
    {
        if s >= self.n_s() {
            return Err(RlError::invalid_policy(format!(
                "state {s} is out of range for {} states",
                self.n_s()
            )));
        }

        Ok(sample_index(rng, self.probs.row(s).iter().copied())?)
    }

    /// Most probable action of every state, lowest index on ties.
    pub fn greedy_actions(&self) -> Vec<Discrete> {
        self.probs.outer_iter().map(argmax).collect()
    }

    /// Greedy actions laid out on the board.
    pub fn argmax_grid(&self, shape: (usize, usize)) -> Result<Array2<Discrete>, RlError> {
        Array2::from_shape_vec(shape, self.greedy_actions())
            .map_err(|e| RlError::invalid_parameter(e.to_string()))
    }
}

/// Index of the largest entry; the first one wins ties.
pub fn argmax(row: ArrayView1<'_, Continous>) -> Discrete {
    row.iter()
        .enumerate()
        .fold((0, Continous::NEG_INFINITY), |(best, best_v), (a, &v)| {
            if v > best_v {
                (a, v)
            } else {
                (best, best_v)
            }
        })
        .0
}

/// ε-soft greedy policy: ε/n_a everywhere plus 1-ε on argmax Q(s,·).
pub fn create_policy(q: &Array2<Continous>, eps: Continous) -> Result<StochasticPolicy, RlError> {
    if !(0. ..=1.).contains(&eps) {
        return Err(RlError::invalid_parameter(format!(
            "eps must lie in [0, 1], got {eps}"
        )));
    }
    if q.ncols() == 0 {
        return Err(RlError::invalid_parameter("q has no actions"));
    }

    let n_a = q.ncols();
    let mut probs = Array2::from_elem(q.dim(), eps / n_a as Continous);
    for (s, row) in q.outer_iter().enumerate() {
        probs[[s, argmax(row)]] += 1. - eps;
    }

    Ok(StochasticPolicy { probs })
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::*;
    use ndarray::array;
    use rand::prelude::*;

    #[test]
    fn ties_break_towards_the_lowest_action() {
        let q = array![[0.5, 0.5, 0.1, 0.1], [0., 0., 0., 0.], [0.1, 0.2, 0.3, 0.3]];
        let policy = create_policy(&q, 0.).unwrap();

        assert_eq!(policy.greedy_actions(), vec![0, 0, 2]);
        assert_eq!(policy.row(0).to_vec(), vec![1., 0., 0., 0.]);
    }

    #[test]
    fn eps_soft_mass() {
        let q = array![[0., 2., 1., 0.]];
        let policy = create_policy(&q, 0.2).unwrap();

        assert_float_eq!(
            policy.row(0).to_vec(),
            vec![0.05, 0.85, 0.05, 0.05],
            abs_all <= 1e-12
        );
        assert!(create_policy(&q, 1.5).is_err());
    }

    #[test]
    fn weights_are_renormalised() {
        let policy = StochasticPolicy::from_weights(array![[1., 3., 0., 0.], [2., 2., 2., 2.]]).unwrap();

        assert_float_eq!(policy.row(0).to_vec(), vec![0.25, 0.75, 0., 0.], abs_all <= 1e-12);
        assert_float_eq!(policy.row(1).sum(), 1., abs <= 1e-12);
    }

    #[test]
    fn bad_weights_are_rejected() {
        for weights in [
            array![[0., 0.]],
            array![[-1., 2.]],
            array![[Continous::NAN, 1.]],
        ] {
            assert!(matches!(
                StochasticPolicy::from_weights(weights),
                Err(RlError::InvalidPolicy { .. })
            ));
        }
        assert!(StochasticPolicy::deterministic(&[0, 4], 4).is_err());
    }

    #[test]
    fn samples_follow_the_row() {
        let policy = StochasticPolicy::from_weights(array![[0., 1., 0., 3.]]).unwrap();
        let rng = &mut StdRng::seed_from_u64(42);

        let mut counts = [0usize; 4];
        for _ in 0..4000 {
            counts[policy.sample(rng, 0).unwrap()] += 1;
        }

        assert_eq!(counts[0] + counts[2], 0);
        assert_float_eq!(counts[3] as f64 / 4000., 0.75, abs <= 0.03);
        assert!(policy.sample(rng, 1).is_err());
    }

    #[test]
    fn greedy_actions_on_the_board() {
        let policy = StochasticPolicy::deterministic(&[2, 1, 0, 3], 4).unwrap();

        assert_eq!(
            policy.argmax_grid((2, 2)).unwrap(),
            array![[2, 1], [0, 3]]
        );
        assert!(policy.argmax_grid((3, 3)).is_err());
    }

    #[test]
    fn one_hot_rows() {
        let policy = StochasticPolicy::one_hot([3, 0, 1].into_iter(), 4);

        assert_eq!(policy.probabilities().dim(), (3, 4));
        assert_eq!(policy.row(0).to_vec(), vec![0., 0., 0., 1.]);
        assert_eq!(policy.greedy_actions(), vec![3, 0, 1]);
        assert_eq!(
            StochasticPolicy::deterministic(&[3, 0, 1], 4).unwrap(),
            policy
        );
    }
}
