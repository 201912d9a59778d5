//! Input validation for order batches.
//!
//! Checks structural integrity of a batch before scheduling. Detects:
//! - Empty batches
//! - Duplicate order IDs
//! - Non-positive deadlines
//! - Zero quantities
//!
//! Every problem is reported, not only the first one.

use std::collections::HashSet;

use crate::analysis::check_order;
use crate::error::ScheduleError;
use crate::models::Order;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ScheduleError>>;

/// Validates an order batch.
///
/// Checks:
/// 1. The batch is not empty
/// 2. No two orders share an ID
/// 3. Every order has a positive deadline and quantity
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues in
/// arrival order.
pub fn validate_orders(orders: &[Order]) -> ValidationResult {
    if orders.is_empty() {
        return Err(vec![ScheduleError::EmptyBatch]);
    }

    let mut errors = Vec::new();
    let mut seen = HashSet::with_capacity(orders.len());

    for order in orders {
        if !seen.insert(order.id.as_str()) {
            errors.push(ScheduleError::DuplicateOrderId {
                order_id: order.id.clone(),
            });
        }
        if let Err(e) = check_order(order) {
            errors.push(e);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
