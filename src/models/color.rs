//! Color families and order kinds.
//!
//! Both enumerations carry fixed business constants. `ColorFamily` is
//! ordered lightest → darkest; that ordering decides whether a changeover
//! moves "darker" (cheap) or "lighter" (expensive).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Product category by shade, ordered lightest → darkest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ColorFamily {
    /// Whites and pastels.
    WhitesPastels,
    /// Light colors.
    Light,
    /// Medium colors.
    Medium,
    /// Dark colors.
    Dark,
    /// Blacks and deep darks.
    BlacksDeepDarks,
}

impl ColorFamily {
    /// All families, lightest first.
    pub const ALL: [ColorFamily; 5] = [
        ColorFamily::WhitesPastels,
        ColorFamily::Light,
        ColorFamily::Medium,
        ColorFamily::Dark,
        ColorFamily::BlacksDeepDarks,
    ];

    /// Family the line is assumed to hold before the first order.
    pub const LINE_START: ColorFamily = ColorFamily::WhitesPastels;

    /// Position in the lightest → darkest order (0..5).
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Human-readable name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::WhitesPastels => "Whites & Pastels",
            Self::Light => "Light Colors",
            Self::Medium => "Medium Colors",
            Self::Dark => "Dark Colors",
            Self::BlacksDeepDarks => "Blacks & Deep Darks",
        }
    }
}

impl fmt::Display for ColorFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Urgency class of an order.
///
/// Variant order is the sequencing priority: `Rush < Standard < Bulk`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderKind {
    /// High urgency, tight deadline.
    Rush,
    /// Normal priority.
    Standard,
    /// Flexible, discount pricing.
    Bulk,
}

impl OrderKind {
    /// Price weight used by the urgency score.
    pub fn price_multiplier(self) -> f64 {
        match self {
            Self::Rush => 1.3,
            Self::Standard => 1.0,
            Self::Bulk => 0.95,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Rush => "High urgency, tight deadline",
            Self::Standard => "Normal priority",
            Self::Bulk => "Flexible, discount pricing",
        }
    }
}
