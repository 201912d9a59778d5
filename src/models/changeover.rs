//! Sequence-dependent changeover (cleaning) times.
//!
//! Switching the line from one color family to another requires a
//! cleaning cycle whose length depends on the direction of the move:
//! going darker is cheap, going lighter needs a deep purge.
//!
//! # Lookup
//! 1. Same family → `same_family_minutes`.
//! 2. Explicit entry for `(from, to)` → that value.
//! 3. Otherwise the distance heuristic: `distance × 12` when moving darker,
//!    `distance × 20` when moving lighter.
//!
//! # Reference
//! Allahverdi et al. (2008), "A survey of scheduling problems with
//! setup times or costs"

use serde::{Deserialize, Serialize};

use super::ColorFamily;

const FAMILIES: usize = ColorFamily::ALL.len();

/// Minutes per family step when moving toward darker shades.
pub const DARKER_STEP_MINUTES: u32 = 12;
/// Minutes per family step when moving toward lighter shades.
pub const LIGHTER_STEP_MINUTES: u32 = 20;
/// Same-family reset time of the industrial matrix.
pub const SAME_FAMILY_MINUTES: u32 = 2;

/// Changeover time table between color families.
///
/// Total over all 25 ordered pairs: missing entries resolve through the
/// distance heuristic, so [`cost`](Self::cost) never fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeoverMatrix {
    /// Reset time when the family does not change (minutes).
    pub same_family_minutes: u32,
    /// Explicit cross-family times, indexed `[from][to]` (minutes).
    transitions: [[Option<u32>; FAMILIES]; FAMILIES],
}

impl Default for ChangeoverMatrix {
    fn default() -> Self {
        Self::industrial()
    }
}

impl ChangeoverMatrix {
    /// A matrix with no explicit entries: every cross-family move uses the
    /// distance heuristic.
    pub fn empty(same_family_minutes: u32) -> Self {
        Self {
            same_family_minutes,
            transitions: [[None; FAMILIES]; FAMILIES],
        }
    }

    /// The industrial cleaning matrix used on the dyeing line.
    ///
    /// White ↔ black is the most expensive move in either direction.
    pub fn industrial() -> Self {
        use ColorFamily::*;

        let mut m = Self::empty(SAME_FAMILY_MINUTES);
        let table = [
            (WhitesPastels, Light, 10),
            (WhitesPastels, Medium, 15),
            (WhitesPastels, Dark, 25),
            (WhitesPastels, BlacksDeepDarks, 60),
            (Light, WhitesPastels, 30),
            (Light, Medium, 10),
            (Light, Dark, 15),
            (Light, BlacksDeepDarks, 45),
            (Medium, WhitesPastels, 40),
            (Medium, Light, 20),
            (Medium, Dark, 10),
            (Medium, BlacksDeepDarks, 15),
            (Dark, WhitesPastels, 50),
            (Dark, Light, 35),
            (Dark, Medium, 25),
            (Dark, BlacksDeepDarks, 10),
            (BlacksDeepDarks, WhitesPastels, 60),
            (BlacksDeepDarks, Light, 50),
            (BlacksDeepDarks, Medium, 40),
            (BlacksDeepDarks, Dark, 30),
        ];
        for (from, to, minutes) in table {
            m.set_transition(from, to, minutes);
        }
        m
    }

    /// Builder: sets an explicit transition and returns self.
    pub fn with_transition(mut self, from: ColorFamily, to: ColorFamily, minutes: u32) -> Self {
        self.set_transition(from, to, minutes);
        self
    }

    /// Defines an explicit cross-family transition time.
    ///
    /// Same-family pairs are governed by `same_family_minutes` and are
    /// ignored here.
    pub fn set_transition(&mut self, from: ColorFamily, to: ColorFamily, minutes: u32) {
        if from != to {
            self.transitions[from.index()][to.index()] = Some(minutes);
        }
    }

    /// Removes an explicit transition so the pair falls back to the heuristic.
    pub fn clear_transition(&mut self, from: ColorFamily, to: ColorFamily) {
        self.transitions[from.index()][to.index()] = None;
    }

    /// Changeover minutes from `from` to `to`.
    pub fn cost(&self, from: ColorFamily, to: ColorFamily) -> u32 {
        if from == to {
            return self.same_family_minutes;
        }
        self.transitions[from.index()][to.index()]
            .unwrap_or_else(|| distance_heuristic(from, to))
    }

    /// Number of explicitly defined cross-family transitions.
    pub fn transition_count(&self) -> usize {
        self.transitions
            .iter()
            .flatten()
            .filter(|t| t.is_some())
            .count()
    }

    /// Total changeover along a family sequence, starting from
    /// [`ColorFamily::LINE_START`].
    pub fn sequence_cost<I>(&self, families: I) -> u32
    where
        I: IntoIterator<Item = ColorFamily>,
    {
        let mut last = ColorFamily::LINE_START;
        let mut total = 0;
        for family in families {
            total = self.cost(last, family).saturating_add(total);
            last = family;
        }
        total
    }
}

/// Fallback cost for pairs without an explicit entry.
fn distance_heuristic(from: ColorFamily, to: ColorFamily) -> u32 {
    let (from, to) = (from.index() as u32, to.index() as u32);
    if to > from {
        (to - from) * DARKER_STEP_MINUTES
    } else {
        (from - to) * LIGHTER_STEP_MINUTES
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ColorFamily::*;

    #[test]
    fn test_same_family_constant() {
        let m = ChangeoverMatrix::industrial();
        for f in ColorFamily::ALL {
            assert_eq!(m.cost(f, f), SAME_FAMILY_MINUTES);
        }
    }

    #[test]
    fn test_industrial_table() {
        let m = ChangeoverMatrix::industrial();
        assert_eq!(m.transition_count(), 20);
        assert_eq!(m.cost(WhitesPastels, Light), 10);
        assert_eq!(m.cost(Light, WhitesPastels), 30);
        assert_eq!(m.cost(Medium, BlacksDeepDarks), 15);
        assert_eq!(m.cost(Dark, Medium), 25);
        assert_eq!(m.cost(WhitesPastels, BlacksDeepDarks), 60);
        assert_eq!(m.cost(BlacksDeepDarks, WhitesPastels), 60);
    }

    #[test]
    fn test_darker_is_cheaper_than_lighter() {
        let m = ChangeoverMatrix::industrial();
        for a in ColorFamily::ALL {
            for b in ColorFamily::ALL {
                if a < b {
                    assert!(m.cost(a, b) <= m.cost(b, a), "{a:?} -> {b:?}");
                }
            }
        }
    }

    #[test]
    fn test_all_pairs_defined() {
        for m in [ChangeoverMatrix::industrial(), ChangeoverMatrix::empty(7)] {
            for a in ColorFamily::ALL {
                for b in ColorFamily::ALL {
                    let c = m.cost(a, b);
                    if a != b {
                        assert!(c > 0);
                    }
                }
            }
        }
    }

    #[test]
    fn test_heuristic_fallback() {
        let m = ChangeoverMatrix::empty(2);
        assert_eq!(m.transition_count(), 0);
        assert_eq!(m.cost(WhitesPastels, Medium), 24); // 2 steps darker
        assert_eq!(m.cost(Medium, WhitesPastels), 40); // 2 steps lighter
        assert_eq!(m.cost(Light, BlacksDeepDarks), 36);
        assert_eq!(m.cost(BlacksDeepDarks, WhitesPastels), 80);
    }

    #[test]
    fn test_clear_transition_falls_back() {
        let mut m = ChangeoverMatrix::industrial();
        m.clear_transition(Light, Dark);
        assert_eq!(m.cost(Light, Dark), 24);
        assert_eq!(m.transition_count(), 19);
    }

    #[test]
    fn test_same_family_not_overridable_by_table() {
        let m = ChangeoverMatrix::empty(7).with_transition(Dark, Dark, 99);
        assert_eq!(m.cost(Dark, Dark), 7);
        assert_eq!(m.transition_count(), 0);
    }

    #[test]
    fn test_sequence_cost() {
        let m = ChangeoverMatrix::industrial();
        assert_eq!(m.sequence_cost(std::iter::empty()), 0);
        // W→W 2, W→B 60, B→W 60
        assert_eq!(m.sequence_cost([WhitesPastels, BlacksDeepDarks, WhitesPastels]), 122);
    }
}
