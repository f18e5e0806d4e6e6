// src/utils/sampling.rs

use rand::{Rng, SeedableRng, rngs::StdRng, seq::index};

/// Draws `amount` distinct items from `pool` (or the whole pool if it is smaller),
/// in random order.
pub fn sample_without_replacement<T: Clone, R: Rng + ?Sized>(
    pool: &[T],
    amount: usize,
    rng: &mut R,
) -> Vec<T> {
    let amount = amount.min(pool.len());
    index::sample(rng, pool.len(), amount)
        .into_iter()
        .map(|i| pool[i].clone())
        .collect()
}

/// RNG for content selection: fixed when a seed is configured, OS-seeded otherwise.
pub fn content_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn picks_distinct_items() {
        let pool: Vec<u32> = (0..20).collect();
        let mut rng = StdRng::seed_from_u64(7);
        let picked = sample_without_replacement(&pool, 5, &mut rng);

        assert_eq!(picked.len(), 5);
        let unique: HashSet<_> = picked.iter().collect();
        assert_eq!(unique.len(), 5);
        assert!(picked.iter().all(|p| pool.contains(p)));
    }

    #[test]
    fn same_seed_same_sample() {
        let pool: Vec<u32> = (0..20).collect();
        let a = sample_without_replacement(&pool, 5, &mut StdRng::seed_from_u64(42));
        let b = sample_without_replacement(&pool, 5, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn small_pool_is_returned_whole() {
        let pool = vec!["a", "b"];
        let mut picked = sample_without_replacement(&pool, 5, &mut content_rng(Some(1)));
        picked.sort();
        assert_eq!(picked, vec!["a", "b"]);
    }
}
