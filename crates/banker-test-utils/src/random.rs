//! Seeded random system generation.
//!
//! Respects the determinism contract: uses a seeded ChaCha8 RNG so the
//! same seed always yields the same system, across runs and platforms.

use banker_core::{Matrix, SystemState};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Generate a valid random system state.
///
/// Draws each process's maximum demand first, then an allocation bounded
/// cell-wise by it, so construction never fails. Available is drawn
/// independently in `0..=max_units`. Deterministic per seed.
///
/// # Panics
///
/// Panics if `processes` or `resources` is zero.
pub fn random_system(
    seed: u64,
    processes: usize,
    resources: usize,
    max_units: u32,
) -> SystemState {
    assert!(
        processes > 0 && resources > 0,
        "system shape must be at least 1x1, got {processes}x{resources}"
    );
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let maximum: Vec<Vec<u32>> = (0..processes)
        .map(|_| {
            (0..resources)
                .map(|_| rng.random_range(0..=max_units))
                .collect()
        })
        .collect();
    let allocation: Vec<Vec<u32>> = maximum
        .iter()
        .map(|row| row.iter().map(|&m| rng.random_range(0..=m)).collect())
        .collect();
    let available: Vec<u32> = (0..resources)
        .map(|_| rng.random_range(0..=max_units))
        .collect();

    let allocation = Matrix::from_rows(&allocation).expect("generated allocation");
    let maximum = Matrix::from_rows(&maximum).expect("generated maximum");
    SystemState::new(allocation, maximum, &available).expect("generated state")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_system() {
        let a = random_system(7, 10, 4, 20);
        let b = random_system(7, 10, 4, 20);
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_differ() {
        let a = random_system(1, 10, 4, 20);
        let b = random_system(2, 10, 4, 20);
        assert_ne!(a, b);
    }

    #[test]
    fn generated_shape_matches_request() {
        let state = random_system(0, 3, 7, 5);
        assert_eq!(state.process_count(), 3);
        assert_eq!(state.resource_count(), 7);
    }
}
