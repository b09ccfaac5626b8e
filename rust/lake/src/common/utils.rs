use crate::error::LakeError;
use crate::Continous;
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

/// Anything carrying a sampling weight.
pub trait Weighted {
    fn p(&self) -> Continous;
}

/// Draws one item using the items' weights (categorical sampling).
pub fn pick_next<'a, T, R>(rng: &mut R, ts: &'a [T]) -> Result<&'a T, LakeError>
where
    T: Weighted,
    R: Rng + ?Sized,
{
    let i = sample_index(rng, ts.iter().map(|item| item.p()))?;
    Ok(&ts[i])
}

/// Draws an index in proportion to `weights`.
pub fn sample_index<R, I>(rng: &mut R, weights: I) -> Result<usize, LakeError>
where
    R: Rng + ?Sized,
    I: IntoIterator<Item = Continous>,
{
    let dist = WeightedIndex::<Continous>::new(weights).map_err(|e| LakeError::Sampling {
        message: e.to_string(),
    })?;

    Ok(dist.sample(rng))
}
