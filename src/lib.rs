//! Changeover-aware scheduler for a single dyeing line.
//!
//! Assigns a batch of dyeing orders to time slots on one line, minimizing
//! the sequence-dependent cleaning time between color families while
//! keeping urgent orders near the front. Every schedule is compared
//! against the naive first-in-first-out order.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `ColorFamily`, `Order`, `ChangeoverMatrix`,
//!   `ProductionWindow`, `ScheduleSlot`, `Schedule`, `EcoGrade`
//! - **`analysis`**: Production duration, urgency, and criticality per order
//! - **`sequencing`**: Base sequence, cheapest insertion, local search
//! - **`scheduler`**: Timeline mapping, evaluation, and the end-to-end pipeline
//! - **`batch`**: Per-batch scheduling and run archival
//! - **`validation`**: Input integrity checks (empty batch, duplicate IDs, bad records)
//! - **`config`**: Engine parameters with plant defaults
//! - **`error`**: Crate error type
//! - **`logging`**: `tracing` subscriber setup
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use u_dyeline::config::EngineConfig;
//! use u_dyeline::models::{ColorFamily, Order, OrderKind};
//! use u_dyeline::scheduler::{ChangeoverScheduler, ScheduleRequest};
//!
//! let day = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
//! // deadlines count from the placement time; `Order::new` defaults it to the Unix epoch
//! let placed = day.and_hms_opt(7, 0, 0).unwrap();
//! let orders = vec![
//!     Order::new("O1", ColorFamily::WhitesPastels, 200, 48).with_created_at(placed),
//!     Order::new("O2", ColorFamily::BlacksDeepDarks, 150, 48).with_created_at(placed),
//!     Order::new("O3", ColorFamily::WhitesPastels, 100, 24)
//!         .with_kind(OrderKind::Bulk)
//!         .with_created_at(placed),
//! ];
//!
//! let scheduler = ChangeoverScheduler::new(EngineConfig::default().with_seed(7)).unwrap();
//! let outcome = scheduler.schedule(&ScheduleRequest::new(orders, day)).unwrap();
//!
//! let schedule = &outcome.schedule;
//! assert!(schedule.total_changeover_minutes <= schedule.fifo_changeover_minutes);
//! assert!(outcome.metrics.all_on_time());
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Allahverdi et al. (2008), "A survey of scheduling problems with
//!   setup times or costs"

pub mod analysis;
pub mod batch;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod scheduler;
pub mod sequencing;
pub mod validation;

pub use error::ScheduleError;
