use crate::core::error::{ActiveLearningError, Result};
use rand::Rng;

/// `n` distinct indices drawn uniformly from `0..pool_size`.
pub fn random_sampling<R: Rng + ?Sized>(
    pool_size: usize,
    n: usize,
    rng: &mut R,
) -> Result<Vec<usize>> {
    if n > pool_size {
        return Err(ActiveLearningError::configuration(format!(
            "batch of {n} requested from {pool_size} unlabelled rows"
        )));
    }
    Ok(rand::seq::index::sample(rng, pool_size, n).into_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn indices_are_unique_and_in_range() {
        let mut rng = StdRng::seed_from_u64(3);
        let got = random_sampling(40, 15, &mut rng).unwrap();
        assert_eq!(got.len(), 15);
        let mut sorted = got.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 15);
        assert!(got.iter().all(|&i| i < 40));
    }

    #[test]
    fn different_seeds_give_different_batches() {
        let a = random_sampling(1000, 10, &mut StdRng::seed_from_u64(1)).unwrap();
        let b = random_sampling(1000, 10, &mut StdRng::seed_from_u64(2)).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn whole_pool_can_be_drawn() {
        let mut got = random_sampling(5, 5, &mut StdRng::seed_from_u64(9)).unwrap();
        got.sort_unstable();
        assert_eq!(got, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn oversized_batch_is_configuration_error() {
        let err = random_sampling(3, 4, &mut StdRng::seed_from_u64(0)).unwrap_err();
        assert!(matches!(err, ActiveLearningError::Configuration(_)));
    }
}
