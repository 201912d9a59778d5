//! Schedule (solution) model.
//!
//! A schedule is the ordered list of slots on the single dyeing line plus
//! the changeover totals and eco figures derived from it. It is created
//! once per engine invocation and never modified afterwards.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ColorFamily;

/// One order's place on the line.
///
/// The changeover happens immediately before `start`; the setup time sits
/// between the changeover and `start`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSlot {
    /// Scheduled order ID.
    pub order_id: String,
    /// Production start.
    pub start: NaiveDateTime,
    /// Production end.
    pub end: NaiveDateTime,
    /// Cleaning minutes consumed right before this slot.
    pub changeover_minutes: u32,
    /// Family of the order at scheduling time.
    pub color_family: ColorFamily,
    /// When the order was due (`created_at + deadline_hours`).
    pub due_at: NaiveDateTime,
}

impl ScheduleSlot {
    /// Production duration (end - start).
    #[inline]
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Whether the slot ends strictly before the order's due time.
    #[inline]
    pub fn meets_deadline(&self) -> bool {
        self.end < self.due_at
    }
}

/// Banded environmental grade from the downtime ratio
/// `changeover / production`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EcoGrade {
    A,
    B,
    C,
    D,
    E,
}

impl EcoGrade {
    /// Grades a schedule by its changeover and production minutes.
    ///
    /// | Ratio | Grade |
    /// |-------|-------|
    /// | < 0.10 | A |
    /// | < 0.20 | B |
    /// | < 0.30 | C |
    /// | < 0.45 | D |
    /// | otherwise, or no production | E |
    pub fn from_minutes(changeover_minutes: u32, production_minutes: i64) -> Self {
        if production_minutes <= 0 {
            return Self::E;
        }
        let ratio = f64::from(changeover_minutes) / production_minutes as f64;
        if ratio < 0.10 {
            Self::A
        } else if ratio < 0.20 {
            Self::B
        } else if ratio < 0.30 {
            Self::C
        } else if ratio < 0.45 {
            Self::D
        } else {
            Self::E
        }
    }

    /// Grade letter.
    pub fn letter(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
            Self::E => 'E',
        }
    }
}

impl fmt::Display for EcoGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A complete schedule for one order batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    /// When the schedule was produced.
    pub generated_at: NaiveDateTime,
    /// Sum of changeover minutes over all slots.
    pub total_changeover_minutes: u32,
    /// Changeover minutes of the unoptimized (arrival order) sequence.
    pub fifo_changeover_minutes: u32,
    /// Environmental grade.
    pub eco_grade: EcoGrade,
    /// Water consumed by changeovers (liters).
    pub water_liters: f64,
    /// Chemical waste produced by changeovers (kg).
    pub chemical_waste_kg: f64,
    /// Slots in production order, non-decreasing by start.
    pub slots: Vec<ScheduleSlot>,
}

impl Schedule {
    /// Changeover minutes saved against the FIFO baseline (never negative).
    pub fn time_saved_minutes(&self) -> u32 {
        self.fifo_changeover_minutes
            .saturating_sub(self.total_changeover_minutes)
    }

    /// Finds the slot for a given order.
    pub fn slot_for(&self, order_id: &str) -> Option<&ScheduleSlot> {
        self.slots.iter().find(|s| s.order_id == order_id)
    }

    /// Order IDs in production order.
    pub fn order_ids(&self) -> Vec<&str> {
        self.slots.iter().map(|s| s.order_id.as_str()).collect()
    }

    /// Latest slot end, if any.
    pub fn completion_time(&self) -> Option<NaiveDateTime> {
        self.slots.iter().map(|s| s.end).max()
    }

    /// Number of slots.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 6)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn slot(id: &str, start: NaiveDateTime, end: NaiveDateTime, due: NaiveDateTime) -> ScheduleSlot {
        ScheduleSlot {
            order_id: id.into(),
            start,
            end,
            changeover_minutes: 2,
            color_family: ColorFamily::Light,
            due_at: due,
        }
    }

    #[test]
    fn test_slot_deadline() {
        let s = slot("O1", at(8, 0), at(10, 0), at(10, 0));
        assert_eq!(s.duration(), Duration::hours(2));
        assert!(!s.meets_deadline()); // must end strictly before due
        let s = slot("O1", at(8, 0), at(9, 59), at(10, 0));
        assert!(s.meets_deadline());
    }

    #[test]
    fn test_eco_grade_bands() {
        assert_eq!(EcoGrade::from_minutes(9, 100), EcoGrade::A);
        assert_eq!(EcoGrade::from_minutes(10, 100), EcoGrade::B);
        assert_eq!(EcoGrade::from_minutes(25, 100), EcoGrade::C);
        assert_eq!(EcoGrade::from_minutes(44, 100), EcoGrade::D);
        assert_eq!(EcoGrade::from_minutes(45, 100), EcoGrade::E);
        assert_eq!(EcoGrade::from_minutes(0, 0), EcoGrade::E);
        assert_eq!(EcoGrade::C.to_string(), "C");
    }

    #[test]
    fn test_schedule_queries() {
        let schedule = Schedule {
            generated_at: at(7, 0),
            total_changeover_minutes: 30,
            fifo_changeover_minutes: 20,
            eco_grade: EcoGrade::B,
            water_liters: 450.0,
            chemical_waste_kg: 6.0,
            slots: vec![
                slot("O1", at(8, 0), at(9, 0), at(23, 0)),
                slot("O2", at(9, 20), at(11, 0), at(23, 0)),
            ],
        };
        assert_eq!(schedule.time_saved_minutes(), 0); // clamped
        assert_eq!(schedule.order_ids(), vec!["O1", "O2"]);
        assert_eq!(schedule.slot_for("O2").map(|s| s.start), Some(at(9, 20)));
        assert!(schedule.slot_for("O3").is_none());
        assert_eq!(schedule.completion_time(), Some(at(11, 0)));
        assert_eq!(schedule.slot_count(), 2);
    }
}
