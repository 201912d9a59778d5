//! Timeline mapping, evaluation, and the end-to-end scheduler.
//!
//! # Pipeline
//!
//! `ChangeoverScheduler` runs validation, analysis, sequencing, timeline
//! mapping, and evaluation in one call. The individual stages are public
//! so callers can run them separately (e.g. to map a hand-edited sequence).
//!
//! # Metrics
//!
//! `ScheduleEvaluator` computes total and FIFO changeover, deadline
//! compliance, machine efficiency, and the eco grade.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4
//! - Allahverdi et al. (2008), "A survey of scheduling problems with
//!   setup times or costs"

mod engine;
mod kpi;
mod timeline;

pub use engine::{ChangeoverScheduler, ScheduleOutcome, ScheduleRequest};
pub use kpi::{ScheduleEvaluator, ScheduleMetrics};
pub use timeline::TimelineMapper;
