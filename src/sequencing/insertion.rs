//! Greedy cheapest-insertion pass.
//!
//! # Algorithm
//!
//! Orders are taken one by one from the base sequence and inserted into
//! a growing result at the position that adds the least changeover:
//!
//! ```text
//! added(i) = cost(prev, x) + cost(x, next) - cost(prev, next)
//! ```
//!
//! where `prev` is the line-start family for `i = 0`. Appending costs
//! `cost(last, x)` and is the incumbent; an interior position replaces it
//! only when strictly cheaper, and among interior positions the lowest
//! index wins. Critical orders may only move back `lookback` positions
//! from the tail.
//!
//! # Complexity
//! O(n²) in batch size. Adequate for batches up to about a thousand
//! orders; larger batches would want per-family buckets instead of a
//! flat vector.

use tracing::trace;

use crate::analysis::AnalyzedOrder;
use crate::models::{ChangeoverMatrix, ColorFamily};

/// Re-inserts orders at their cheapest position.
#[derive(Debug, Clone)]
pub struct InsertionOptimizer<'m> {
    matrix: &'m ChangeoverMatrix,
    lookback: usize,
}

impl<'m> InsertionOptimizer<'m> {
    /// Creates an optimizer bounded by `lookback` for critical orders.
    pub fn new(matrix: &'m ChangeoverMatrix, lookback: usize) -> Self {
        Self { matrix, lookback }
    }

    /// Runs the insertion pass over `base`.
    pub fn optimize<'a>(&self, base: &[AnalyzedOrder<'a>]) -> Vec<AnalyzedOrder<'a>> {
        let mut optimized: Vec<AnalyzedOrder<'a>> = Vec::with_capacity(base.len());
        for order in base {
            let position = self.best_position(&optimized, order);
            trace!(order = order.id(), position, len = optimized.len(), "insert");
            optimized.insert(position, *order);
        }
        optimized
    }

    /// Cheapest insertion index for `order` in `sequence`.
    pub fn best_position(&self, sequence: &[AnalyzedOrder<'_>], order: &AnalyzedOrder<'_>) -> usize {
        let Some(last) = sequence.last() else {
            return 0;
        };
        let family = order.family();

        let mut best_pos = sequence.len();
        let mut best_added = i64::from(self.matrix.cost(last.family(), family));

        let earliest = if order.is_critical {
            sequence.len().saturating_sub(self.lookback)
        } else {
            0
        };

        for i in earliest..sequence.len() {
            let prev = if i == 0 {
                ColorFamily::LINE_START
            } else {
                sequence[i - 1].family()
            };
            let added = self.added_cost(prev, family, sequence[i].family());
            if added < best_added {
                best_added = added;
                best_pos = i;
            }
        }
        best_pos
    }

    /// Changeover added by placing `x` between `prev` and `next`.
    ///
    /// May be negative when the direct edge is dearer than the detour.
    fn added_cost(&self, prev: ColorFamily, x: ColorFamily, next: ColorFamily) -> i64 {
        let m = self.matrix;
        i64::from(m.cost(prev, x)) + i64::from(m.cost(x, next)) - i64::from(m.cost(prev, next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ColorFamily::*;
    use crate::sequencing::sequence_changeover;
    use crate::sequencing::test_support::{analyze, ids, order, rush};

    #[test]
    fn test_clusters_alternating_families() {
        let m = ChangeoverMatrix::industrial();
        let orders = vec![
            order("w1", WhitesPastels),
            order("b1", BlacksDeepDarks),
            order("w2", WhitesPastels),
            order("b2", BlacksDeepDarks),
        ];
        let base = analyze(&orders);
        let optimized = InsertionOptimizer::new(&m, 5).optimize(&base);

        assert_eq!(ids(&optimized), vec!["w2", "w1", "b1", "b2"]);
        assert!(sequence_changeover(&m, &optimized) < sequence_changeover(&m, &base));
    }

    #[test]
    fn test_homogeneous_keeps_arrival_order() {
        let m = ChangeoverMatrix::industrial();
        let orders = vec![order("a", Medium), order("b", Medium), order("c", Medium)];
        let base = analyze(&orders);
        let optimized = InsertionOptimizer::new(&m, 5).optimize(&base);
        assert_eq!(ids(&optimized), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_negative_added_cost_inserts_between() {
        // W→M 15 + M→B 15 - W→B 60 = -30
        let m = ChangeoverMatrix::industrial();
        let orders = vec![order("b", BlacksDeepDarks), order("m", Medium)];
        let base = analyze(&orders);
        let optimized = InsertionOptimizer::new(&m, 5).optimize(&base);
        assert_eq!(ids(&optimized), vec!["m", "b"]);
    }

    #[test]
    fn test_critical_respects_lookback() {
        let m = ChangeoverMatrix::industrial();
        let mut orders: Vec<_> = (0..8)
            .map(|i| order(&format!("d{i}"), BlacksDeepDarks))
            .collect();
        orders.insert(0, order("w0", WhitesPastels));
        orders.push(rush("c", WhitesPastels, 4));
        let base = analyze(&orders);

        let lookback = 3;
        let opt = InsertionOptimizer::new(&m, lookback);
        let prefix = &base[..base.len() - 1];
        let working = opt.optimize(prefix);
        let pos = opt.best_position(&working, &base[base.len() - 1]);

        // Unbounded, "c" would move to the front next to "w0".
        assert!(working.len() - pos <= lookback);
    }

    #[test]
    fn test_critical_never_moves_beyond_lookback() {
        let m = ChangeoverMatrix::industrial();
        let families = [BlacksDeepDarks, WhitesPastels, Dark, Light, Medium];
        let orders: Vec<_> = (0..25)
            .map(|i| {
                let f = families[(i * 3) % families.len()];
                if i % 4 == 0 {
                    rush(&format!("o{i}"), f, 2 + i as i64)
                } else {
                    order(&format!("o{i}"), f)
                }
            })
            .collect();
        let base = analyze(&orders);
        let lookback = 5;
        let opt = InsertionOptimizer::new(&m, lookback);

        let mut working: Vec<AnalyzedOrder<'_>> = Vec::new();
        for o in &base {
            let pos = opt.best_position(&working, o);
            if o.is_critical {
                assert!(working.len() - pos <= lookback, "{} at {pos}", o.id());
            }
            working.insert(pos, *o);
        }
        assert_eq!(ids(&working), ids(&opt.optimize(&base)));
    }

    #[test]
    fn test_non_critical_may_move_to_front() {
        let m = ChangeoverMatrix::industrial();
        let mut orders: Vec<_> = (0..8)
            .map(|i| order(&format!("d{i}"), BlacksDeepDarks))
            .collect();
        orders.insert(0, order("w0", WhitesPastels));
        orders.push(order("w1", WhitesPastels));
        let base = analyze(&orders);
        let optimized = InsertionOptimizer::new(&m, 3).optimize(&base);
        assert_eq!(optimized[0].id(), "w1");
    }

    #[test]
    fn test_empty_and_single() {
        let m = ChangeoverMatrix::industrial();
        let opt = InsertionOptimizer::new(&m, 5);
        assert!(opt.optimize(&[]).is_empty());
        let orders = vec![order("a", Dark)];
        let base = analyze(&orders);
        assert_eq!(ids(&opt.optimize(&base)), vec!["a"]);
    }
}
