//! Variant selection.
//!
//! [`VariantStore`] holds each part's current variant. [`VariantResolver`]
//! computes the next variant for a request, loads its asset, and only then
//! commits the change.

mod resolver;
mod store;

pub use resolver::{Resolved, VariantResolver};
pub use store::VariantStore;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// How the next variant is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VariantMode {
    Increment,
    Decrement,
    Random,
}

/// Computes the variant that follows `current` under `mode`.
///
/// Increment and decrement wrap around within `[1, max]`. Random picks
/// uniformly from `[1, max]` and may return `current`.
pub fn next_index<R: Rng + ?Sized>(current: u32, max: u32, mode: VariantMode, rng: &mut R) -> u32 {
    let max = max.max(1);
    match mode {
        VariantMode::Increment => {
            if current >= max {
                1
            } else {
                current + 1
            }
        }
        VariantMode::Decrement => {
            if current <= 1 || current > max {
                max
            } else {
                current - 1
            }
        }
        VariantMode::Random => rng.gen_range(1..=max),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn increment_wraps_to_first() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(next_index(3, 15, VariantMode::Increment, &mut rng), 4);
        assert_eq!(next_index(15, 15, VariantMode::Increment, &mut rng), 1);
    }

    #[test]
    fn decrement_wraps_to_last() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(next_index(5, 8, VariantMode::Decrement, &mut rng), 4);
        assert_eq!(next_index(1, 8, VariantMode::Decrement, &mut rng), 8);
    }

    #[test]
    fn full_cycle_returns_to_start() {
        let mut rng = StdRng::seed_from_u64(0);
        for max in 1..=20 {
            for start in 1..=max {
                let mut index = start;
                for _ in 0..max {
                    index = next_index(index, max, VariantMode::Increment, &mut rng);
                }
                assert_eq!(index, start, "increment cycle, max {max}");

                for _ in 0..max {
                    index = next_index(index, max, VariantMode::Decrement, &mut rng);
                }
                assert_eq!(index, start, "decrement cycle, max {max}");
            }
        }
    }

    #[test]
    fn single_variant_stays_put() {
        let mut rng = StdRng::seed_from_u64(0);
        for mode in [VariantMode::Increment, VariantMode::Decrement, VariantMode::Random] {
            assert_eq!(next_index(1, 1, mode, &mut rng), 1);
        }
    }

    #[test]
    fn random_stays_in_range_and_covers_it() {
        let mut rng = StdRng::seed_from_u64(42);
        for max in [1, 5, 8, 15] {
            let mut seen = vec![false; max as usize + 1];
            for _ in 0..2_000 {
                let index = next_index(1, max, VariantMode::Random, &mut rng);
                assert!((1..=max).contains(&index));
                seen[index as usize] = true;
            }
            assert!(seen[1..].iter().all(|hit| *hit), "max {max} not covered");
        }
    }
}
