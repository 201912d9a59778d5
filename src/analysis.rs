//! Order analysis: production duration, urgency, criticality.
//!
//! The analyzer never touches the caller's orders. It pairs each order
//! with an immutable set of derived values:
//!
//! | Value | Definition |
//! |-------|-----------|
//! | Production hours | `quantity / dyeing_speed` |
//! | Urgency score | `quantity × price_multiplier / deadline_hours` |
//! | Critical | `deadline_hours < critical_deadline_hours` or `kind == Rush` |
//!
//! Orders whose due time is not representable, or whose run would take
//! longer than [`MAX_PRODUCTION_MINUTES`], are rejected.

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::ScheduleError;
use crate::models::{ColorFamily, Order, OrderKind};

/// Longest single run the line accepts (one leap year, in minutes).
pub const MAX_PRODUCTION_MINUTES: i64 = 366 * 24 * 60;

/// Derived values for one order, keyed by order ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderAnalysis {
    /// Analyzed order ID.
    pub order_id: String,
    /// Time on the line (hours).
    pub production_hours: f64,
    /// Priority weight; higher = more pressing.
    pub urgency_score: f64,
    /// Whether the optimizer must keep this order near its position.
    pub is_critical: bool,
}

/// An order paired with its derived values.
///
/// Cheap to copy; the sequencing stages shuffle these instead of orders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyzedOrder<'a> {
    /// The caller's order.
    pub order: &'a Order,
    /// Time on the line (hours).
    pub production_hours: f64,
    /// Priority weight.
    pub urgency_score: f64,
    /// Critical flag.
    pub is_critical: bool,
}

impl<'a> AnalyzedOrder<'a> {
    #[inline]
    pub fn id(&self) -> &'a str {
        &self.order.id
    }

    #[inline]
    pub fn family(&self) -> ColorFamily {
        self.order.color_family
    }

    /// Production time in whole minutes (truncated).
    pub fn production_minutes(&self) -> i64 {
        (self.production_hours * 60.0) as i64
    }

    /// Owned copy of the derived values.
    pub fn to_analysis(&self) -> OrderAnalysis {
        OrderAnalysis {
            order_id: self.order.id.clone(),
            production_hours: self.production_hours,
            urgency_score: self.urgency_score,
            is_critical: self.is_critical,
        }
    }
}

/// Computes derived values for orders.
#[derive(Debug, Clone)]
pub struct OrderAnalyzer {
    dyeing_speed: f64,
    critical_deadline_hours: i64,
}

impl OrderAnalyzer {
    /// Creates an analyzer from engine settings.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            dyeing_speed: config.dyeing_speed_meters_per_hour,
            critical_deadline_hours: config.critical_deadline_hours,
        }
    }

    /// Analyzes a batch, preserving input order.
    ///
    /// Fails on the first order with a non-positive deadline or zero
    /// quantity.
    pub fn analyze<'a>(&self, orders: &'a [Order]) -> Result<Vec<AnalyzedOrder<'a>>, ScheduleError> {
        orders.iter().map(|o| self.analyze_one(o)).collect()
    }

    /// Analyzes a single order.
    pub fn analyze_one<'a>(&self, order: &'a Order) -> Result<AnalyzedOrder<'a>, ScheduleError> {
        check_order(order)?;

        let quantity = f64::from(order.quantity_meters);
        let production_hours = quantity / self.dyeing_speed;
        if production_hours * 60.0 > MAX_PRODUCTION_MINUTES as f64 {
            return Err(ScheduleError::invalid_order(
                &order.id,
                format!(
                    "production of {}m at {}m/h exceeds {MAX_PRODUCTION_MINUTES} minutes",
                    order.quantity_meters, self.dyeing_speed
                ),
            ));
        }
        Ok(AnalyzedOrder {
            order,
            production_hours,
            urgency_score: quantity * order.kind.price_multiplier() / order.deadline_hours as f64,
            is_critical: self.is_critical(order),
        })
    }

    /// Critical orders have a tight deadline or are rush orders.
    pub fn is_critical(&self, order: &Order) -> bool {
        order.deadline_hours < self.critical_deadline_hours || order.kind == OrderKind::Rush
    }
}

/// Record invariants every order must satisfy before scheduling.
pub(crate) fn check_order(order: &Order) -> Result<(), ScheduleError> {
    if order.deadline_hours <= 0 {
        return Err(ScheduleError::invalid_order(
            &order.id,
            format!("deadline must be positive, got {}h", order.deadline_hours),
        ));
    }
    if order.quantity_meters == 0 {
        return Err(ScheduleError::invalid_order(&order.id, "quantity must be positive"));
    }
    if order.checked_due_at().is_none() {
        return Err(ScheduleError::invalid_order(
            &order.id,
            format!(
                "due time {}h after {} is out of range",
                order.deadline_hours, order.created_at
            ),
        ));
    }
    Ok(())
}
