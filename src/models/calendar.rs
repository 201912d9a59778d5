//! Daily production window.
//!
//! The line runs inside one window per calendar day:
//! `[day + start_hour, day + start_hour + window_hours)`. A window may
//! extend past midnight into the following day. Outside the window no
//! production starts and no slot may run across the close.
//!
//! # Time Model
//! Naive wall-clock timestamps in plant-local time. A window length of
//! 24 hours means the line never closes.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

/// One concrete opening of the line: `[opens, closes)`.
///
/// Half-open interval: includes `opens`, excludes `closes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    /// Window start (inclusive).
    pub opens: NaiveDateTime,
    /// Window end (exclusive).
    pub closes: NaiveDateTime,
}

impl Shift {
    /// Length of this shift.
    #[inline]
    pub fn duration(&self) -> TimeDelta {
        self.closes - self.opens
    }

    /// Whether a timestamp falls within this shift.
    #[inline]
    pub fn contains(&self, t: NaiveDateTime) -> bool {
        t >= self.opens && t < self.closes
    }
}

/// Recurring daily production window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionWindow {
    start_hour: u32,
    window_hours: u32,
}

impl ProductionWindow {
    /// Creates a window opening at `start_hour` and lasting `window_hours`.
    ///
    /// `start_hour` must be below 24; `window_hours` must be in `1..=24`.
    pub fn new(start_hour: u32, window_hours: u32) -> Result<Self, ScheduleError> {
        if start_hour >= 24 {
            return Err(ScheduleError::invalid_config(
                "daily_start_hour",
                format!("must be below 24, got {start_hour}"),
            ));
        }
        if window_hours == 0 || window_hours > 24 {
            return Err(ScheduleError::invalid_config(
                "daily_window_hours",
                format!("must be within 1..=24, got {window_hours}"),
            ));
        }
        Ok(Self {
            start_hour,
            window_hours,
        })
    }

    /// Hour of day the line opens.
    pub fn start_hour(&self) -> u32 {
        self.start_hour
    }

    /// Nominal window length in hours.
    pub fn window_hours(&self) -> u32 {
        self.window_hours
    }

    /// Whether the line never closes.
    pub fn is_continuous(&self) -> bool {
        self.window_hours >= 24
    }

    /// The shift that opens on `day`, or `None` if its bounds fall outside
    /// the representable date range.
    pub fn shift_on(&self, day: NaiveDate) -> Option<Shift> {
        let opens = day
            .and_time(NaiveTime::MIN)
            .checked_add_signed(TimeDelta::hours(i64::from(self.start_hour)))?;
        let closes = opens.checked_add_signed(TimeDelta::hours(i64::from(self.window_hours)))?;
        Some(Shift { opens, closes })
    }

    /// The shift containing `t`, if the line is open at `t`.
    ///
    /// Checks the shift opening on `t`'s day and the one opening the day
    /// before, which may spill past midnight.
    pub fn shift_at(&self, t: NaiveDateTime) -> Option<Shift> {
        let day = t.date();
        [day.pred_opt(), Some(day)]
            .into_iter()
            .flatten()
            .filter_map(|d| self.shift_on(d))
            .find(|s| s.contains(t))
    }

    /// Whether production may run at `t`.
    pub fn is_open(&self, t: NaiveDateTime) -> bool {
        self.is_continuous() || self.shift_at(t).is_some()
    }

    /// Earliest time at or after `t` when the line is open.
    ///
    /// `None` when that opening lies beyond the representable range.
    pub fn next_open(&self, t: NaiveDateTime) -> Option<NaiveDateTime> {
        if self.is_open(t) {
            return Some(t);
        }
        let today = self.shift_on(t.date())?;
        if today.opens >= t {
            Some(today.opens)
        } else {
            today.opens.checked_add_signed(TimeDelta::days(1))
        }
    }

    /// Places a run of `length` starting no earlier than `t`.
    ///
    /// Returns the start time. The run starts inside a shift; if it would
    /// cross that shift's close it is deferred to the next opening. A run
    /// longer than a whole shift cannot fit anywhere and starts at a shift
    /// opening, running past the close. `None` when the start or end would
    /// leave the representable range.
    pub fn place(&self, t: NaiveDateTime, length: TimeDelta) -> Option<NaiveDateTime> {
        let start = self.next_open(t)?;
        let end = start.checked_add_signed(length)?;
        if self.is_continuous() {
            return Some(start);
        }
        match self.shift_at(start) {
            Some(shift) if end > shift.closes && start != shift.opens => {
                let deferred = shift.opens.checked_add_signed(TimeDelta::days(1))?;
                deferred.checked_add_signed(length)?;
                Some(deferred)
            }
            _ => Some(start),
        }
    }
}
