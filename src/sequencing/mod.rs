//! Order sequencing for the dyeing line.
//!
//! Three stages turn analyzed orders into a production order:
//!
//! 1. [`SequenceBuilder`]: critical orders first (earliest deadline),
//!    then the rest clustered by color family.
//! 2. [`InsertionOptimizer`]: greedy cheapest-insertion pass over the
//!    base sequence.
//! 3. [`LocalSearchRefiner`]: random pairwise swaps, kept only when they
//!    strictly reduce total changeover.
//!
//! # References
//!
//! - Rosenkrantz et al. (1977), "An analysis of several heuristics for the
//!   traveling salesman problem" (cheapest insertion)
//! - Allahverdi et al. (2008), "A survey of scheduling problems with
//!   setup times or costs"

mod builder;
mod insertion;
mod refine;

pub use builder::SequenceBuilder;
pub use insertion::InsertionOptimizer;
pub use refine::{LocalSearchRefiner, RefineStats};

use crate::analysis::AnalyzedOrder;
use crate::models::ChangeoverMatrix;

/// Total changeover of a sequence, starting from the line-start family.
pub fn sequence_changeover(matrix: &ChangeoverMatrix, sequence: &[AnalyzedOrder<'_>]) -> u32 {
    matrix.sequence_cost(sequence.iter().map(|o| o.family()))
}
