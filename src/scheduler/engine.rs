//! End-to-end scheduling pipeline.
//!
//! # Algorithm
//!
//! 1. Validate the batch (non-empty, unique IDs, valid records).
//! 2. Analyze orders (production hours, urgency, criticality).
//! 3. Build the base sequence, then run cheapest insertion and local search.
//! 4. Map the sequence onto the production window.
//! 5. Evaluate against the FIFO baseline.
//!
//! # Complexity
//! O(n²) for the insertion pass plus O(k·n) for `k` refinement iterations.
//! Callers should bound batch size (about a thousand orders).

use chrono::{NaiveDate, NaiveDateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use super::{ScheduleEvaluator, ScheduleMetrics, TimelineMapper};
use crate::analysis::{OrderAnalysis, OrderAnalyzer};
use crate::config::EngineConfig;
use crate::error::ScheduleError;
use crate::models::{ChangeoverMatrix, Order, ProductionWindow, Schedule};
use crate::sequencing::{InsertionOptimizer, LocalSearchRefiner, SequenceBuilder};
use crate::validation::validate_orders;

/// Input container for one scheduling run.
#[derive(Debug, Clone)]
pub struct ScheduleRequest {
    /// Orders in arrival order.
    pub orders: Vec<Order>,
    /// Day whose window opening starts the line.
    pub plan_day: NaiveDate,
    /// Timestamp recorded on the schedule.
    pub generated_at: NaiveDateTime,
}

impl ScheduleRequest {
    /// Creates a request stamped with the current UTC time.
    pub fn new(orders: Vec<Order>, plan_day: NaiveDate) -> Self {
        Self {
            orders,
            plan_day,
            generated_at: Utc::now().naive_utc(),
        }
    }

    /// Overrides the generation timestamp.
    pub fn with_generated_at(mut self, generated_at: NaiveDateTime) -> Self {
        self.generated_at = generated_at;
        self
    }
}

/// Result of one scheduling run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleOutcome {
    /// The schedule snapshot.
    pub schedule: Schedule,
    /// Derived metrics.
    pub metrics: ScheduleMetrics,
    /// Per-order derived values, in arrival order.
    pub analyses: Vec<OrderAnalysis>,
}

/// Changeover-minimizing scheduler for a single dyeing line.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use u_dyeline::config::EngineConfig;
/// use u_dyeline::models::{ColorFamily, Order};
/// use u_dyeline::scheduler::{ChangeoverScheduler, ScheduleRequest};
///
/// let day = NaiveDate::from_ymd_opt(2025, 5, 12).unwrap();
/// let placed = day.and_hms_opt(6, 0, 0).unwrap();
/// let orders = vec![
///     Order::new("O1", ColorFamily::BlacksDeepDarks, 200, 48).with_created_at(placed),
///     Order::new("O2", ColorFamily::WhitesPastels, 150, 48).with_created_at(placed),
/// ];
/// let scheduler = ChangeoverScheduler::new(EngineConfig::default().with_seed(1)).unwrap();
/// let outcome = scheduler.schedule(&ScheduleRequest::new(orders, day)).unwrap();
/// assert_eq!(outcome.schedule.slot_count(), 2);
/// assert!(outcome.metrics.all_on_time());
/// ```
#[derive(Debug, Clone)]
pub struct ChangeoverScheduler {
    config: EngineConfig,
    window: ProductionWindow,
    matrix: ChangeoverMatrix,
}

impl ChangeoverScheduler {
    /// Creates a scheduler with the industrial changeover matrix.
    pub fn new(config: EngineConfig) -> Result<Self, ScheduleError> {
        config.validate()?;
        let window = config.production_window()?;
        Ok(Self {
            config,
            window,
            matrix: ChangeoverMatrix::industrial(),
        })
    }

    /// Replaces the changeover matrix.
    pub fn with_matrix(mut self, matrix: ChangeoverMatrix) -> Self {
        self.matrix = matrix;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn matrix(&self) -> &ChangeoverMatrix {
        &self.matrix
    }

    /// Schedules a request.
    ///
    /// Local search uses `refinement_seed` when configured, otherwise a
    /// fresh OS-seeded generator.
    pub fn schedule(&self, request: &ScheduleRequest) -> Result<ScheduleOutcome, ScheduleError> {
        let mut rng = match self.config.refinement_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        self.schedule_with_rng(request, &mut rng)
    }

    /// Schedules a request using the caller's generator for local search.
    #[instrument(skip_all, fields(orders = request.orders.len(), plan_day = %request.plan_day))]
    pub fn schedule_with_rng<R: Rng>(
        &self,
        request: &ScheduleRequest,
        rng: &mut R,
    ) -> Result<ScheduleOutcome, ScheduleError> {
        if let Err(errors) = validate_orders(&request.orders) {
            for e in &errors {
                warn!(error = %e, "rejected order batch");
            }
            // validate_orders never returns an empty error list
            return Err(errors
                .into_iter()
                .next()
                .unwrap_or(ScheduleError::EmptyBatch));
        }

        let analyzed = OrderAnalyzer::new(&self.config).analyze(&request.orders)?;
        let critical = analyzed.iter().filter(|o| o.is_critical).count();
        debug!(critical, "orders analyzed");

        let base = SequenceBuilder::new().build(&analyzed);
        let mut sequence =
            InsertionOptimizer::new(&self.matrix, self.config.critical_insertion_lookback)
                .optimize(&base);
        LocalSearchRefiner::new(&self.matrix, self.config.refinement_iterations)
            .refine(&mut sequence, rng);

        let slots = TimelineMapper::new(&self.matrix, self.window, self.config.setup_time_minutes)
            .map(&sequence, request.plan_day)?;

        let evaluator = ScheduleEvaluator::new(
            &self.matrix,
            self.config.setup_time_minutes,
            self.config.eco.clone(),
        );
        let fifo = evaluator.fifo_changeover(&analyzed);
        let schedule = evaluator.evaluate(slots, fifo, request.generated_at);
        let metrics = evaluator.metrics(&schedule);

        if !metrics.late_orders.is_empty() {
            warn!(late = metrics.late_orders.len(), "orders miss their deadline");
        }
        info!(
            changeover = schedule.total_changeover_minutes,
            fifo = schedule.fifo_changeover_minutes,
            saved = metrics.time_saved_minutes,
            compliance = metrics.deadline_compliance_pct,
            efficiency = metrics.machine_efficiency_pct,
            grade = %schedule.eco_grade,
            "schedule generated"
        );

        Ok(ScheduleOutcome {
            analyses: analyzed.iter().map(|a| a.to_analysis()).collect(),
            schedule,
            metrics,
        })
    }
}
