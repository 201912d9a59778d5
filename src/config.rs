//! Engine configuration.
//!
//! All values have plant defaults; a JSON document only needs to name the
//! fields it overrides.
//!
//! ```
//! use u_dyeline::config::EngineConfig;
//!
//! let config = EngineConfig::from_json(r#"{ "setup_time_minutes": 20 }"#).unwrap();
//! assert_eq!(config.setup_time_minutes, 20);
//! assert_eq!(config.daily_start_hour, 8);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;
use crate::models::ProductionWindow;

/// Rates converting changeover minutes into resource figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EcoConfig {
    /// Water used per cleaning minute (liters).
    pub water_liters_per_changeover_minute: f64,
    /// Chemical waste per cleaning minute (kg).
    pub chemical_waste_kg_per_changeover_minute: f64,
}

impl Default for EcoConfig {
    fn default() -> Self {
        Self {
            water_liters_per_changeover_minute: 15.0,
            chemical_waste_kg_per_changeover_minute: 0.2,
        }
    }
}

/// Scheduling engine parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Line speed; production hours = quantity / speed.
    pub dyeing_speed_meters_per_hour: f64,
    /// Fixed per-order setup added after each changeover (minutes, at most
    /// one production window).
    pub setup_time_minutes: u32,
    /// Hour of day the production window opens.
    pub daily_start_hour: u32,
    /// Production window length (hours, 24 = continuous).
    pub daily_window_hours: u32,
    /// Orders due within this many hours are critical.
    pub critical_deadline_hours: i64,
    /// How many positions back from the tail a critical order may be inserted.
    pub critical_insertion_lookback: usize,
    /// Local-search iteration budget.
    pub refinement_iterations: usize,
    /// Fixed seed for local search; `None` seeds from the OS per run.
    pub refinement_seed: Option<u64>,
    /// Resource figure rates.
    pub eco: EcoConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dyeing_speed_meters_per_hour: 50.0,
            setup_time_minutes: 15,
            daily_start_hour: 8,
            daily_window_hours: 16,
            critical_deadline_hours: 12,
            critical_insertion_lookback: 5,
            refinement_iterations: 100,
            refinement_seed: None,
            eco: EcoConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parses a JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ScheduleError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the line speed.
    pub fn with_dyeing_speed(mut self, meters_per_hour: f64) -> Self {
        self.dyeing_speed_meters_per_hour = meters_per_hour;
        self
    }

    /// Sets the per-order setup time.
    pub fn with_setup_time(mut self, minutes: u32) -> Self {
        self.setup_time_minutes = minutes;
        self
    }

    /// Sets the daily production window.
    pub fn with_window(mut self, start_hour: u32, window_hours: u32) -> Self {
        self.daily_start_hour = start_hour;
        self.daily_window_hours = window_hours;
        self
    }

    /// Sets the critical insertion lookback.
    pub fn with_lookback(mut self, lookback: usize) -> Self {
        self.critical_insertion_lookback = lookback;
        self
    }

    /// Sets the local-search iteration budget.
    pub fn with_refinement_iterations(mut self, iterations: usize) -> Self {
        self.refinement_iterations = iterations;
        self
    }

    /// Fixes the local-search seed for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.refinement_seed = Some(seed);
        self
    }

    /// The production window these settings describe.
    pub fn production_window(&self) -> Result<ProductionWindow, ScheduleError> {
        ProductionWindow::new(self.daily_start_hour, self.daily_window_hours)
    }

    /// Checks every value is in range.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        if !(self.dyeing_speed_meters_per_hour.is_finite() && self.dyeing_speed_meters_per_hour > 0.0)
        {
            return Err(ScheduleError::invalid_config(
                "dyeing_speed_meters_per_hour",
                format!("must be positive, got {}", self.dyeing_speed_meters_per_hour),
            ));
        }
        if self.critical_deadline_hours <= 0 {
            return Err(ScheduleError::invalid_config(
                "critical_deadline_hours",
                format!("must be positive, got {}", self.critical_deadline_hours),
            ));
        }
        if self.eco.water_liters_per_changeover_minute < 0.0
            || self.eco.chemical_waste_kg_per_changeover_minute < 0.0
        {
            return Err(ScheduleError::invalid_config(
                "eco",
                "resource rates must not be negative",
            ));
        }
        let window = self.production_window()?;
        let longest_setup = window.window_hours() * 60;
        if self.setup_time_minutes > longest_setup {
            return Err(ScheduleError::invalid_config(
                "setup_time_minutes",
                format!(
                    "must not exceed the {longest_setup}-minute production window, got {}",
                    self.setup_time_minutes
                ),
            ));
        }
        Ok(())
    }
}
