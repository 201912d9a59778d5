//! Randomized pairwise-swap refinement.
//!
//! # Algorithm
//!
//! For a fixed number of iterations:
//! 1. Draw two positions uniformly at random.
//! 2. Skip if either holds a critical order (critical orders never move here).
//! 3. Swap them if that strictly lowers total changeover; otherwise keep
//!    the current sequence.
//!
//! This is hill-climbing with random proposals: there is no temperature
//! and cost-increasing swaps are never accepted, so total changeover is
//! non-increasing. The generator is passed in by the caller, which makes
//! runs reproducible under a fixed seed.

use rand::Rng;
use tracing::debug;

use super::sequence_changeover;
use crate::analysis::AnalyzedOrder;
use crate::models::ChangeoverMatrix;

/// Outcome of a refinement run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefineStats {
    /// Iterations executed.
    pub iterations: usize,
    /// Swaps kept.
    pub accepted: usize,
    /// Total changeover before refinement (minutes).
    pub cost_before: u32,
    /// Total changeover after refinement (minutes).
    pub cost_after: u32,
}

/// Bounded random-swap hill climber.
#[derive(Debug, Clone)]
pub struct LocalSearchRefiner<'m> {
    matrix: &'m ChangeoverMatrix,
    iterations: usize,
}

impl<'m> LocalSearchRefiner<'m> {
    /// Creates a refiner running `iterations` proposals.
    pub fn new(matrix: &'m ChangeoverMatrix, iterations: usize) -> Self {
        Self { matrix, iterations }
    }

    /// Refines `sequence` in place.
    pub fn refine<R: Rng>(
        &self,
        sequence: &mut [AnalyzedOrder<'_>],
        rng: &mut R,
    ) -> RefineStats {
        let cost_before = sequence_changeover(self.matrix, sequence);
        let mut stats = RefineStats {
            iterations: 0,
            accepted: 0,
            cost_before,
            cost_after: cost_before,
        };

        let len = sequence.len();
        if len < 2 {
            return stats;
        }

        let mut current = cost_before;
        for _ in 0..self.iterations {
            stats.iterations += 1;
            let i = rng.random_range(0..len);
            let j = rng.random_range(0..len);
            if i == j || sequence[i].is_critical || sequence[j].is_critical {
                continue;
            }

            sequence.swap(i, j);
            let candidate = sequence_changeover(self.matrix, sequence);
            if candidate < current {
                current = candidate;
                stats.accepted += 1;
            } else {
                sequence.swap(i, j);
            }
        }

        stats.cost_after = current;
        debug!(
            iterations = stats.iterations,
            accepted = stats.accepted,
            before = stats.cost_before,
            after = stats.cost_after,
            "local search finished"
        );
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ColorFamily::{self, *};
    use crate::sequencing::test_support::{analyze, ids, order, rush};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    const FAMILIES: [ColorFamily; 5] = ColorFamily::ALL;

    #[test]
    fn test_never_increases_cost() {
        let m = ChangeoverMatrix::industrial();
        for seed in 0..20u64 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let orders: Vec<_> = (0..30)
                .map(|i| {
                    let f = FAMILIES[rng.random_range(0..FAMILIES.len())];
                    if rng.random_bool(0.2) {
                        rush(&format!("o{i}"), f, 8)
                    } else {
                        order(&format!("o{i}"), f)
                    }
                })
                .collect();
            let mut seq = analyze(&orders);
            let before = sequence_changeover(&m, &seq);

            let stats = LocalSearchRefiner::new(&m, 200).refine(&mut seq, &mut rng);

            let after = sequence_changeover(&m, &seq);
            assert!(after <= before, "seed {seed}: {after} > {before}");
            assert_eq!(stats.cost_before, before);
            assert_eq!(stats.cost_after, after);
            assert_eq!(stats.iterations, 200);
        }
    }

    #[test]
    fn test_critical_orders_stay_put() {
        let m = ChangeoverMatrix::industrial();
        let orders = vec![
            order("a", BlacksDeepDarks),
            rush("c1", WhitesPastels, 3),
            order("b", WhitesPastels),
            order("d", BlacksDeepDarks),
            rush("c2", Medium, 5),
            order("e", WhitesPastels),
        ];
        let mut seq = analyze(&orders);
        let mut rng = SmallRng::seed_from_u64(7);
        LocalSearchRefiner::new(&m, 500).refine(&mut seq, &mut rng);

        assert_eq!(seq[1].id(), "c1");
        assert_eq!(seq[4].id(), "c2");
    }

    #[test]
    fn test_improves_bad_sequence() {
        let m = ChangeoverMatrix::industrial();
        let orders = vec![
            order("b1", BlacksDeepDarks),
            order("w1", WhitesPastels),
            order("b2", BlacksDeepDarks),
            order("w2", WhitesPastels),
        ];
        let mut seq = analyze(&orders);
        let mut rng = SmallRng::seed_from_u64(1);
        let stats = LocalSearchRefiner::new(&m, 500).refine(&mut seq, &mut rng);
        assert!(stats.accepted > 0);
        assert!(stats.cost_after < stats.cost_before);
    }

    #[test]
    fn test_reproducible_with_seed() {
        let m = ChangeoverMatrix::industrial();
        let orders: Vec<_> = (0..12)
            .map(|i| order(&format!("o{i}"), FAMILIES[(i * 2 + 1) % 5]))
            .collect();

        let run = |seed| {
            let mut seq = analyze(&orders);
            let mut rng = SmallRng::seed_from_u64(seed);
            LocalSearchRefiner::new(&m, 100).refine(&mut seq, &mut rng);
            ids(&seq)
        };
        assert_eq!(run(99), run(99));
    }

    #[test]
    fn test_short_sequences_untouched() {
        let m = ChangeoverMatrix::industrial();
        let mut rng = SmallRng::seed_from_u64(0);
        let refiner = LocalSearchRefiner::new(&m, 100);

        let stats = refiner.refine(&mut [], &mut rng);
        assert_eq!(stats.iterations, 0);

        let orders = vec![order("a", Dark)];
        let mut seq = analyze(&orders);
        let stats = refiner.refine(&mut seq, &mut rng);
        assert_eq!(stats.cost_before, stats.cost_after);
        assert_eq!(ids(&seq), vec!["a"]);
    }
}
