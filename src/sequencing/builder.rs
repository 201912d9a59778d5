//! Initial sequence construction.
//!
//! # Algorithm
//!
//! 1. Split orders into critical and non-critical.
//! 2. Critical: earliest deadline first (EDD).
//! 3. Non-critical: color family (lightest first), then order kind
//!    (`Rush < Standard < Bulk`).
//! 4. Concatenate critical + non-critical.
//!
//! Both sorts are stable, so ties keep arrival order and the result is
//! deterministic.

use crate::analysis::AnalyzedOrder;

/// Builds the base sequence fed to the insertion optimizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequenceBuilder;

impl SequenceBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Produces the base sequence from analyzed orders in arrival order.
    pub fn build<'a>(&self, analyzed: &[AnalyzedOrder<'a>]) -> Vec<AnalyzedOrder<'a>> {
        let (mut critical, mut others): (Vec<_>, Vec<_>) =
            analyzed.iter().copied().partition(|o| o.is_critical);

        critical.sort_by_key(|o| o.order.deadline_hours);
        others.sort_by_key(|o| (o.family(), o.order.kind));

        critical.extend(others);
        critical
    }
}
