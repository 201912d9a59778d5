//! Schedule evaluation and metrics.
//!
//! Aggregates a slot list into a [`Schedule`] and computes the metrics a
//! planner compares runs by.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total changeover | Sum of slot changeover minutes |
//! | FIFO changeover | Changeover of the arrival-order sequence |
//! | Time saved | max(0, FIFO - total) |
//! | Deadline compliance | % of slots ending before their due time (100 if none) |
//! | Machine efficiency | production / (production + changeover + n × setup) × 100 |
//! | Eco grade | Banded changeover / production ratio |
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 1.2: Performance Measures

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::analysis::AnalyzedOrder;
use crate::config::EcoConfig;
use crate::models::{ChangeoverMatrix, EcoGrade, Schedule, ScheduleSlot};
use crate::sequencing::sequence_changeover;

/// Schedule performance indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleMetrics {
    /// Share of orders finishing before their due time (0..=100).
    pub deadline_compliance_pct: f64,
    /// Share of line time spent producing (0..=100).
    pub machine_efficiency_pct: f64,
    /// Changeover saved against the FIFO baseline (minutes).
    pub time_saved_minutes: u32,
    /// Sum of slot durations (minutes).
    pub total_production_minutes: i64,
    /// Orders that miss their deadline, in production order.
    pub late_orders: Vec<String>,
}

impl ScheduleMetrics {
    /// Whether every order meets its deadline.
    pub fn all_on_time(&self) -> bool {
        self.late_orders.is_empty()
    }
}

/// Builds schedules and metrics from slots.
#[derive(Debug, Clone)]
pub struct ScheduleEvaluator<'m> {
    matrix: &'m ChangeoverMatrix,
    setup_minutes: u32,
    eco: EcoConfig,
}

impl<'m> ScheduleEvaluator<'m> {
    pub fn new(matrix: &'m ChangeoverMatrix, setup_minutes: u32, eco: EcoConfig) -> Self {
        Self {
            matrix,
            setup_minutes,
            eco,
        }
    }

    /// Changeover of `arrival` processed as-is, without reordering.
    pub fn fifo_changeover(&self, arrival: &[AnalyzedOrder<'_>]) -> u32 {
        sequence_changeover(self.matrix, arrival)
    }

    /// Assembles the schedule snapshot.
    pub fn evaluate(
        &self,
        slots: Vec<ScheduleSlot>,
        fifo_changeover_minutes: u32,
        generated_at: NaiveDateTime,
    ) -> Schedule {
        let total_changeover = total_changeover(&slots);
        let production = total_production_minutes(&slots);

        Schedule {
            generated_at,
            total_changeover_minutes: total_changeover,
            fifo_changeover_minutes,
            eco_grade: EcoGrade::from_minutes(total_changeover, production),
            water_liters: f64::from(total_changeover) * self.eco.water_liters_per_changeover_minute,
            chemical_waste_kg: f64::from(total_changeover)
                * self.eco.chemical_waste_kg_per_changeover_minute,
            slots,
        }
    }

    /// Computes metrics for a finished schedule.
    pub fn metrics(&self, schedule: &Schedule) -> ScheduleMetrics {
        let slots = &schedule.slots;
        let production = total_production_minutes(slots);

        let late_orders: Vec<String> = slots
            .iter()
            .filter(|s| !s.meets_deadline())
            .map(|s| s.order_id.clone())
            .collect();

        let deadline_compliance_pct = if slots.is_empty() {
            100.0
        } else {
            (slots.len() - late_orders.len()) as f64 / slots.len() as f64 * 100.0
        };

        let machine_efficiency_pct = if production > 0 {
            let downtime = i64::from(schedule.total_changeover_minutes)
                + slots.len() as i64 * i64::from(self.setup_minutes);
            production as f64 / (production + downtime) as f64 * 100.0
        } else {
            0.0
        };

        ScheduleMetrics {
            deadline_compliance_pct,
            machine_efficiency_pct,
            time_saved_minutes: schedule.time_saved_minutes(),
            total_production_minutes: production,
            late_orders,
        }
    }
}

fn total_changeover(slots: &[ScheduleSlot]) -> u32 {
    slots
        .iter()
        .fold(0u32, |acc, s| acc.saturating_add(s.changeover_minutes))
}

fn total_production_minutes(slots: &[ScheduleSlot]) -> i64 {
    slots.iter().map(|s| s.duration().num_minutes()).sum()
}
