//! Production order model.
//!
//! An order is a caller-owned record: the engine reads it but never
//! writes derived values back onto it. Derived values live in
//! [`OrderAnalysis`](crate::analysis::OrderAnalysis) records and in the
//! produced [`Schedule`](super::Schedule).
//!
//! # Time Representation
//! `created_at` is a naive wall-clock timestamp in the plant's local time;
//! the deadline is expressed in hours relative to it.
//!
//! [`Order::new`] stamps `created_at` with the Unix epoch
//! (1970-01-01 00:00). Deadlines are measured from `created_at`, so an
//! order built without [`Order::with_created_at`] is due in 1970 and
//! counts as late on any realistic plan day.

use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

use super::{ColorFamily, OrderKind};

/// Lifecycle state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Waiting to be scheduled.
    #[default]
    Pending,
    /// Assigned to a slot.
    Scheduled,
    /// Currently on the line.
    InProduction,
    /// Finished.
    Completed,
}

/// A dyeing order to be placed on the line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Unique order identifier.
    pub id: String,
    /// Free-text shade label (e.g. "Royal Blue").
    pub color_name: String,
    /// Shade category used for changeover lookups.
    pub color_family: ColorFamily,
    /// Fabric length in meters.
    pub quantity_meters: u32,
    /// Urgency class.
    pub kind: OrderKind,
    /// Hours from `created_at` until the order is due.
    pub deadline_hours: i64,
    /// When the order was placed. Defaults to the Unix epoch.
    pub created_at: NaiveDateTime,
    /// Lifecycle state.
    pub status: OrderStatus,
    /// Simulation run or batch this order belongs to.
    pub batch_id: Option<String>,
}

impl Order {
    /// Creates a standard pending order.
    ///
    /// `created_at` starts at the Unix epoch; set the real placement time
    /// with [`with_created_at`](Self::with_created_at) before scheduling
    /// against a current plan day.
    pub fn new(
        id: impl Into<String>,
        color_family: ColorFamily,
        quantity_meters: u32,
        deadline_hours: i64,
    ) -> Self {
        Self {
            id: id.into(),
            color_name: String::new(),
            color_family,
            quantity_meters,
            kind: OrderKind::Standard,
            deadline_hours,
            created_at: NaiveDateTime::default(),
            status: OrderStatus::Pending,
            batch_id: None,
        }
    }

    /// Sets the order kind.
    pub fn with_kind(mut self, kind: OrderKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the shade label.
    pub fn with_color_name(mut self, name: impl Into<String>) -> Self {
        self.color_name = name.into();
        self
    }

    /// Sets the creation timestamp.
    pub fn with_created_at(mut self, created_at: NaiveDateTime) -> Self {
        self.created_at = created_at;
        self
    }

    /// Sets the lifecycle status.
    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = status;
        self
    }

    /// Assigns the order to a batch.
    pub fn with_batch(mut self, batch_id: impl Into<String>) -> Self {
        self.batch_id = Some(batch_id.into());
        self
    }

    /// Latest moment the order may complete: `created_at + deadline_hours`.
    ///
    /// Saturates at [`NaiveDateTime::MAX`] when the sum is not
    /// representable; validated orders always have an exact due time.
    pub fn due_at(&self) -> NaiveDateTime {
        self.checked_due_at().unwrap_or(NaiveDateTime::MAX)
    }

    /// `created_at + deadline_hours`, or `None` if out of range.
    pub fn checked_due_at(&self) -> Option<NaiveDateTime> {
        TimeDelta::try_hours(self.deadline_hours)
            .and_then(|d| self.created_at.checked_add_signed(d))
    }
}
