//! Dyeing-line domain models.
//!
//! Provides the data types the engine consumes and produces: orders and
//! their categories, the changeover matrix, the daily production window,
//! and the resulting schedule.
//!
//! # Domain Mappings
//!
//! | u-dyeline | Generic scheduling |
//! |-----------|--------------------|
//! | Order | Job |
//! | ColorFamily | Setup category |
//! | ChangeoverMatrix | Sequence-dependent setup matrix |
//! | ProductionWindow | Resource calendar |
//! | ScheduleSlot | Assignment |

mod calendar;
mod changeover;
mod color;
mod order;
mod schedule;

pub use calendar::{ProductionWindow, Shift};
pub use changeover::{
    ChangeoverMatrix, DARKER_STEP_MINUTES, LIGHTER_STEP_MINUTES, SAME_FAMILY_MINUTES,
};
pub use color::{ColorFamily, OrderKind};
pub use order::{Order, OrderStatus};
pub use schedule::{EcoGrade, Schedule, ScheduleSlot};
