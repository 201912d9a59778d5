//! Sequence → wall-clock slots.
//!
//! # Algorithm
//!
//! A single cursor walks the final sequence, starting at the plan day's
//! window opening with the line holding the line-start family:
//!
//! 1. Advance the cursor by `changeover(last, family) + setup`.
//! 2. Place the run inside the production window: outside the window the
//!    start moves to the next opening; a run that would cross the close is
//!    deferred whole to the next opening (orders are never split).
//! 3. `end = start + production`; the cursor moves to `end`.
//!
//! One line, strictly sequential: slots never overlap and their starts
//! are non-decreasing.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use tracing::trace;

use crate::analysis::AnalyzedOrder;
use crate::error::ScheduleError;
use crate::models::{ChangeoverMatrix, ColorFamily, ProductionWindow, ScheduleSlot};

/// Converts an order sequence into dated slots.
#[derive(Debug, Clone)]
pub struct TimelineMapper<'m> {
    matrix: &'m ChangeoverMatrix,
    window: ProductionWindow,
    setup_minutes: u32,
}

impl<'m> TimelineMapper<'m> {
    pub fn new(matrix: &'m ChangeoverMatrix, window: ProductionWindow, setup_minutes: u32) -> Self {
        Self {
            matrix,
            window,
            setup_minutes,
        }
    }

    /// Maps `sequence` onto the line starting at the window opening of `plan_day`.
    pub fn map(
        &self,
        sequence: &[AnalyzedOrder<'_>],
        plan_day: NaiveDate,
    ) -> Result<Vec<ScheduleSlot>, ScheduleError> {
        let opening = self
            .window
            .shift_on(plan_day)
            .ok_or_else(|| out_of_range(format!("window opening on {plan_day}")))?;
        self.map_from(sequence, opening.opens)
    }

    /// Maps `sequence` onto the line starting no earlier than `start`.
    ///
    /// Fails with [`ScheduleError::DateOutOfRange`] when a slot would end
    /// beyond the representable date range.
    pub fn map_from(
        &self,
        sequence: &[AnalyzedOrder<'_>],
        start: NaiveDateTime,
    ) -> Result<Vec<ScheduleSlot>, ScheduleError> {
        let mut slots = Vec::with_capacity(sequence.len());
        let mut cursor = self
            .window
            .next_open(start)
            .ok_or_else(|| out_of_range(format!("window opening after {start}")))?;
        let mut last = ColorFamily::LINE_START;

        for order in sequence {
            let family = order.family();
            let changeover = self.matrix.cost(last, family);
            let step = TimeDelta::minutes(i64::from(changeover) + i64::from(self.setup_minutes));
            let production = TimeDelta::minutes(order.production_minutes());

            let slot_start = cursor
                .checked_add_signed(step)
                .and_then(|ready| self.window.place(ready, production))
                .ok_or_else(|| out_of_range(format!("slot of order '{}'", order.id())))?;
            // place() guarantees the end is representable
            let slot_end = slot_start + production;
            trace!(order = order.id(), %slot_start, %slot_end, changeover, "slot");

            slots.push(ScheduleSlot {
                order_id: order.order.id.clone(),
                start: slot_start,
                end: slot_end,
                changeover_minutes: changeover,
                color_family: family,
                due_at: order.order.due_at(),
            });

            cursor = slot_end;
            last = family;
        }
        Ok(slots)
    }
}

fn out_of_range(what: String) -> ScheduleError {
    ScheduleError::DateOutOfRange { what }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ColorFamily::*;
    use crate::models::Order;
    use crate::sequencing::test_support::analyze;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 7).unwrap()
    }

    fn at(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 4, d)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn mapper(m: &ChangeoverMatrix, start: u32, hours: u32) -> TimelineMapper<'_> {
        TimelineMapper::new(m, ProductionWindow::new(start, hours).unwrap(), 15)
    }

    #[test]
    fn test_sequential_slots() {
        let m = ChangeoverMatrix::industrial();
        let orders = vec![
            Order::new("a", WhitesPastels, 100, 48), // 2h
            Order::new("b", Light, 50, 48),          // 1h
        ];
        let seq = analyze(&orders);
        let slots = mapper(&m, 8, 16).map(&seq, day()).unwrap();

        // a: 08:00 + 2 (W→W) + 15 setup
        assert_eq!(slots[0].start, at(7, 8, 17));
        assert_eq!(slots[0].end, at(7, 10, 17));
        assert_eq!(slots[0].changeover_minutes, 2);
        // b: 10:17 + 10 (W→L) + 15
        assert_eq!(slots[1].start, at(7, 10, 42));
        assert_eq!(slots[1].end, at(7, 11, 42));
        assert_eq!(slots[1].changeover_minutes, 10);
        assert_eq!(slots[1].color_family, Light);
    }

    #[test]
    fn test_slot_order_matches_sequence() {
        let m = ChangeoverMatrix::industrial();
        let families = [Dark, WhitesPastels, BlacksDeepDarks, Medium, Light];
        let orders: Vec<_> = (0..20)
            .map(|i| Order::new(format!("o{i}"), families[i % 5], 300 + 40 * i as u32, 72))
            .collect();
        let seq = analyze(&orders);
        let slots = mapper(&m, 8, 16).map(&seq, day()).unwrap();

        assert_eq!(slots.len(), seq.len());
        for (slot, order) in slots.iter().zip(&seq) {
            assert_eq!(slot.order_id, order.id());
        }
        for pair in slots.windows(2) {
            assert!(pair[0].start <= pair[1].start);
            assert!(pair[0].end <= pair[1].start);
        }
    }

    #[test]
    fn test_run_deferred_to_next_day() {
        let m = ChangeoverMatrix::industrial();
        let orders = vec![
            Order::new("long", WhitesPastels, 500, 96), // 10h
            Order::new("next", WhitesPastels, 100, 96), // 2h
        ];
        let seq = analyze(&orders);
        // window 08:00-20:00
        let slots = mapper(&m, 8, 12).map(&seq, day()).unwrap();

        assert_eq!(slots[0].start, at(7, 8, 17));
        assert_eq!(slots[0].end, at(7, 18, 17));
        // 18:17 + 17 → 18:34, +2h crosses 20:00 → next opening
        assert_eq!(slots[1].start, at(8, 8, 0));
        assert_eq!(slots[1].end, at(8, 10, 0));
    }

    #[test]
    fn test_full_window_run_and_snap_after_close() {
        let m = ChangeoverMatrix::industrial();
        let orders = vec![
            Order::new("a", WhitesPastels, 700, 96), // 14h
            Order::new("b", WhitesPastels, 50, 96),
        ];
        let seq = analyze(&orders);
        let slots = mapper(&m, 8, 14).map(&seq, day()).unwrap(); // 08:00-22:00

        // 08:17 + 14h crosses 22:00, so the run moves to the next opening
        assert_eq!(slots[0].start, at(8, 8, 0));
        assert_eq!(slots[0].end, at(8, 22, 0));
        // cursor 22:17 is after close
        assert_eq!(slots[1].start, at(9, 8, 0));
    }

    #[test]
    fn test_map_from_snaps_start() {
        let m = ChangeoverMatrix::industrial();
        let orders = vec![Order::new("a", Dark, 50, 24)];
        let seq = analyze(&orders);
        // 03:00 is outside 08:00-24:00
        let slots = mapper(&m, 8, 16).map_from(&seq, at(7, 3, 0)).unwrap();
        // 08:00 + 25 (W→D) + 15
        assert_eq!(slots[0].start, at(7, 8, 40));
        assert_eq!(slots[0].changeover_minutes, 25);
    }

    #[test]
    fn test_empty_sequence() {
        let m = ChangeoverMatrix::industrial();
        assert!(mapper(&m, 8, 16).map(&[], day()).unwrap().is_empty());
    }

    #[test]
    fn test_step_uses_wide_arithmetic() {
        let m = ChangeoverMatrix::empty(u32::MAX);
        let orders = vec![Order::new("a", WhitesPastels, 50, 48)];
        let seq = analyze(&orders);
        let mapper = TimelineMapper::new(&m, ProductionWindow::new(0, 24).unwrap(), u32::MAX);

        let slots = mapper.map(&seq, day()).unwrap();
        let expected = at(7, 0, 0) + TimeDelta::minutes(2 * i64::from(u32::MAX));
        assert_eq!(slots[0].start, expected);
        assert_eq!(slots[0].changeover_minutes, u32::MAX);
    }

    #[test]
    fn test_out_of_range_slot_is_an_error() {
        let m = ChangeoverMatrix::empty(u32::MAX);
        let orders: Vec<_> = (0..40)
            .map(|i| Order::new(format!("o{i}"), WhitesPastels, 50, 48))
            .collect();
        let seq = analyze(&orders);

        let err = mapper(&m, 8, 16).map(&seq, day()).unwrap_err();
        assert!(matches!(err, ScheduleError::DateOutOfRange { .. }));

        let err = mapper(&m, 8, 16).map(&seq[..1], NaiveDate::MAX).unwrap_err();
        assert!(matches!(err, ScheduleError::DateOutOfRange { .. }));
    }
}
