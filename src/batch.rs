//! Multi-batch scheduling and run archival.
//!
//! Orders tagged with the same `batch_id` (a simulation run or a plant
//! batch) are scheduled together; each batch gets its own line run and
//! its own FIFO baseline. Orders without a `batch_id` form one more
//! group of their own.
//!
//! Persisting results is the caller's business: [`BatchReport::archive`]
//! hands one [`RunSummary`] per identified batch to any [`RunArchive`].

use std::collections::BTreeMap;
use std::convert::Infallible;

use chrono::{NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ScheduleError;
use crate::models::{EcoGrade, Order};
use crate::scheduler::{ChangeoverScheduler, ScheduleOutcome, ScheduleRequest};

/// Archived metrics of one scheduled batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub batch_id: String,
    pub order_count: usize,
    pub deadline_compliance_pct: f64,
    pub machine_efficiency_pct: f64,
    pub total_changeover_minutes: u32,
    pub time_saved_minutes: u32,
    pub eco_grade: EcoGrade,
    pub recorded_at: NaiveDateTime,
}

impl RunSummary {
    /// Summarizes an outcome under `batch_id`, stamped with the schedule's
    /// generation time.
    pub fn from_outcome(batch_id: impl Into<String>, outcome: &ScheduleOutcome) -> Self {
        let schedule = &outcome.schedule;
        Self {
            batch_id: batch_id.into(),
            order_count: schedule.slot_count(),
            deadline_compliance_pct: outcome.metrics.deadline_compliance_pct,
            machine_efficiency_pct: outcome.metrics.machine_efficiency_pct,
            total_changeover_minutes: schedule.total_changeover_minutes,
            time_saved_minutes: outcome.metrics.time_saved_minutes,
            eco_grade: schedule.eco_grade,
            recorded_at: schedule.generated_at,
        }
    }
}

/// Sink for per-batch run summaries.
pub trait RunArchive {
    /// Storage failure.
    type Error;

    /// Stores one summary.
    fn record(&mut self, summary: RunSummary) -> Result<(), Self::Error>;
}

impl RunArchive for Vec<RunSummary> {
    type Error = Infallible;

    fn record(&mut self, summary: RunSummary) -> Result<(), Self::Error> {
        self.push(summary);
        Ok(())
    }
}

/// Schedule of one batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchOutcome {
    /// `None` for orders that carry no batch identifier.
    pub batch_id: Option<String>,
    pub outcome: ScheduleOutcome,
}

/// Schedules of every batch in an order set, with combined totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    /// One entry per batch; the untagged group first, then by `batch_id`.
    pub batches: Vec<BatchOutcome>,
}

impl BatchReport {
    /// Number of scheduled batches.
    pub fn batch_count(&self) -> usize {
        self.batches.len()
    }

    /// Number of scheduled orders over all batches.
    pub fn order_count(&self) -> usize {
        self.batches
            .iter()
            .map(|b| b.outcome.schedule.slot_count())
            .sum()
    }

    /// Optimized changeover over all batches (minutes).
    pub fn total_changeover_minutes(&self) -> u32 {
        self.batches
            .iter()
            .fold(0u32, |acc, b| acc.saturating_add(b.outcome.schedule.total_changeover_minutes))
    }

    /// FIFO changeover over all batches (minutes).
    pub fn fifo_changeover_minutes(&self) -> u32 {
        self.batches
            .iter()
            .fold(0u32, |acc, b| acc.saturating_add(b.outcome.schedule.fifo_changeover_minutes))
    }

    /// Combined saving against FIFO, clamped at zero.
    pub fn time_saved_minutes(&self) -> u32 {
        self.fifo_changeover_minutes()
            .saturating_sub(self.total_changeover_minutes())
    }

    /// Outcome of the batch tagged `batch_id`.
    pub fn batch(&self, batch_id: &str) -> Option<&ScheduleOutcome> {
        self.batches
            .iter()
            .find(|b| b.batch_id.as_deref() == Some(batch_id))
            .map(|b| &b.outcome)
    }

    /// Records a summary for every batch with an identifier.
    ///
    /// Returns the number of summaries recorded.
    pub fn archive<A: RunArchive>(&self, archive: &mut A) -> Result<usize, A::Error> {
        let mut recorded = 0;
        for batch in &self.batches {
            if let Some(id) = &batch.batch_id {
                archive.record(RunSummary::from_outcome(id.as_str(), &batch.outcome))?;
                recorded += 1;
            }
        }
        debug!(recorded, "runs archived");
        Ok(recorded)
    }
}

/// Groups orders by `batch_id`, keeping arrival order inside each group.
pub fn group_by_batch(orders: &[Order]) -> BTreeMap<Option<String>, Vec<Order>> {
    let mut groups: BTreeMap<Option<String>, Vec<Order>> = BTreeMap::new();
    for order in orders {
        groups
            .entry(order.batch_id.clone())
            .or_default()
            .push(order.clone());
    }
    groups
}

/// Schedules every batch in `orders` independently on `plan_day`.
///
/// All schedules share one generation timestamp. Fails on the first
/// batch that does not validate.
pub fn schedule_batches(
    scheduler: &ChangeoverScheduler,
    orders: &[Order],
    plan_day: NaiveDate,
) -> Result<BatchReport, ScheduleError> {
    schedule_batches_at(scheduler, orders, plan_day, Utc::now().naive_utc())
}

/// [`schedule_batches`] with an explicit generation timestamp.
pub fn schedule_batches_at(
    scheduler: &ChangeoverScheduler,
    orders: &[Order],
    plan_day: NaiveDate,
    generated_at: NaiveDateTime,
) -> Result<BatchReport, ScheduleError> {
    if orders.is_empty() {
        return Err(ScheduleError::EmptyBatch);
    }

    let mut batches = Vec::new();
    for (batch_id, group) in group_by_batch(orders) {
        let request = ScheduleRequest::new(group, plan_day).with_generated_at(generated_at);
        let outcome = scheduler.schedule(&request)?;
        debug!(
            batch = batch_id.as_deref().unwrap_or("-"),
            orders = request.orders.len(),
            changeover = outcome.schedule.total_changeover_minutes,
            "batch scheduled"
        );
        batches.push(BatchOutcome { batch_id, outcome });
    }

    let report = BatchReport { batches };
    info!(
        batches = report.batch_count(),
        changeover = report.total_changeover_minutes(),
        fifo = report.fifo_changeover_minutes(),
        saved = report.time_saved_minutes(),
        "batches scheduled"
    );
    Ok(report)
}
