//! Error types for the scheduling engine.
//!
//! Every fallible operation in this crate reports a [`ScheduleError`].
//! Malformed input is rejected at the boundary; unmapped changeover
//! pairs and missed deadlines are never errors. Date arithmetic is
//! checked, so extreme inputs surface as `DateOutOfRange` instead of a
//! panic.

use thiserror::Error;

/// Errors raised by the scheduling engine.
#[derive(Error, Debug)]
pub enum ScheduleError {
    /// The order batch contained no orders.
    #[error("order batch is empty")]
    EmptyBatch,

    /// An order violates a record invariant (deadline or quantity).
    #[error("invalid order '{order_id}': {reason}")]
    InvalidOrder { order_id: String, reason: String },

    /// Two orders in one batch share an identifier.
    #[error("duplicate order id '{order_id}'")]
    DuplicateOrderId { order_id: String },

    /// A configuration value is out of range.
    #[error("invalid configuration ({field}): {message}")]
    InvalidConfig { field: String, message: String },

    /// A slot or window boundary falls outside the representable date range.
    #[error("date arithmetic out of range: {what}")]
    DateOutOfRange { what: String },

    /// A configuration document could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

impl ScheduleError {
    pub(crate) fn invalid_order(order_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidOrder {
            order_id: order_id.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            message: message.into(),
        }
    }
}
