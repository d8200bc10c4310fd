//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 4xxx: Booking / room errors
/// - 5xxx: Billing / payment errors
/// - 6xxx: Food order errors
/// - 7xxx: Extra service errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Booking and room errors (4xxx)
    Booking,
    /// Billing and payment errors (5xxx)
    Billing,
    /// Food order errors (6xxx)
    Order,
    /// Extra service errors (7xxx)
    ExtraService,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..4000 => Self::General,
            4000..5000 => Self::Booking,
            5000..6000 => Self::Billing,
            6000..7000 => Self::Order,
            7000..8000 => Self::ExtraService,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Booking => "booking",
            Self::Billing => "billing",
            Self::Order => "order",
            Self::ExtraService => "extra_service",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}
