//! Unified error codes
//!
//! All codes used across the server and frontend, organized by range:
//! - 0xxx: General errors
//! - 4xxx: Booking / room errors
//! - 5xxx: Billing / payment errors
//! - 6xxx: Food order errors
//! - 7xxx: Extra service errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Codes are represented as u16 values for efficient serialization and
/// cross-language compatibility (Rust, TypeScript).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 4xxx: Booking / Room ====================
    /// Booking not found
    BookingNotFound = 4001,
    /// Booking has already been checked out
    BookingAlreadyCheckedOut = 4002,
    /// Booking has been cancelled
    BookingCancelled = 4003,
    /// Room not found
    RoomNotFound = 4101,
    /// Room is occupied
    RoomOccupied = 4102,

    // ==================== 5xxx: Billing / Payment ====================
    /// Bill not found
    BillNotFound = 5001,
    /// Checkout blocked by unfinished food orders
    CheckoutBlockedByOrders = 5002,
    /// Pre-bill has not been presented to the guest
    PrebillNotSent = 5003,
    /// Invalid payment amount
    PaymentInvalidAmount = 5004,
    /// Bill merge request is invalid (too few or duplicate bookings)
    MergeInvalidSet = 5101,
    /// Bill merge references a missing booking
    MergeBookingMissing = 5102,

    // ==================== 6xxx: Food Orders ====================
    /// Food order not found
    OrderNotFound = 6001,
    /// Food order cannot be cancelled in its current status
    OrderNotCancellable = 6002,

    // ==================== 7xxx: Extra Services ====================
    /// Extra service not found
    ExtraServiceNotFound = 7001,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Network error
    NetworkError = 9003,
    /// Operation timeout
    TimeoutError = 9004,
    /// Configuration error
    ConfigError = 9005,
    /// Notification delivery failed (pre-bill / payment link)
    NotificationFailed = 9201,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",

            // Booking / Room
            ErrorCode::BookingNotFound => "Booking not found",
            ErrorCode::BookingAlreadyCheckedOut => "Booking has already been checked out",
            ErrorCode::BookingCancelled => "Booking has been cancelled",
            ErrorCode::RoomNotFound => "Room not found",
            ErrorCode::RoomOccupied => "Room is occupied",

            // Billing / Payment
            ErrorCode::BillNotFound => "Bill not found",
            ErrorCode::CheckoutBlockedByOrders => "Checkout blocked by unfinished food orders",
            ErrorCode::PrebillNotSent => "Pre-bill has not been presented to the guest",
            ErrorCode::PaymentInvalidAmount => "Invalid payment amount",
            ErrorCode::MergeInvalidSet => "Bill merge requires at least two distinct bookings",
            ErrorCode::MergeBookingMissing => "Bill merge references a missing booking",

            // Food Orders
            ErrorCode::OrderNotFound => "Food order not found",
            ErrorCode::OrderNotCancellable => "Food order cannot be cancelled",

            // Extra Services
            ErrorCode::ExtraServiceNotFound => "Extra service not found",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::NotificationFailed => "Notification delivery failed",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),

            // Booking / Room
            4001 => Ok(ErrorCode::BookingNotFound),
            4002 => Ok(ErrorCode::BookingAlreadyCheckedOut),
            4003 => Ok(ErrorCode::BookingCancelled),
            4101 => Ok(ErrorCode::RoomNotFound),
            4102 => Ok(ErrorCode::RoomOccupied),

            // Billing / Payment
            5001 => Ok(ErrorCode::BillNotFound),
            5002 => Ok(ErrorCode::CheckoutBlockedByOrders),
            5003 => Ok(ErrorCode::PrebillNotSent),
            5004 => Ok(ErrorCode::PaymentInvalidAmount),
            5101 => Ok(ErrorCode::MergeInvalidSet),
            5102 => Ok(ErrorCode::MergeBookingMissing),

            // Food Orders
            6001 => Ok(ErrorCode::OrderNotFound),
            6002 => Ok(ErrorCode::OrderNotCancellable),

            // Extra Services
            7001 => Ok(ErrorCode::ExtraServiceNotFound),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),
            9201 => Ok(ErrorCode::NotificationFailed),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::NotFound.code(), 3);
        assert_eq!(ErrorCode::BookingNotFound.code(), 4001);
        assert_eq!(ErrorCode::RoomNotFound.code(), 4101);
        assert_eq!(ErrorCode::CheckoutBlockedByOrders.code(), 5002);
        assert_eq!(ErrorCode::MergeInvalidSet.code(), 5101);
        assert_eq!(ErrorCode::OrderNotFound.code(), 6001);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
        assert_eq!(ErrorCode::DatabaseError.code(), 9002);
    }

    #[test]
    fn test_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::Unknown.is_success());
        assert!(!ErrorCode::BookingNotFound.is_success());
    }

    #[test]
    fn test_try_from_valid() {
        assert_eq!(ErrorCode::try_from(0), Ok(ErrorCode::Success));
        assert_eq!(ErrorCode::try_from(4001), Ok(ErrorCode::BookingNotFound));
        assert_eq!(
            ErrorCode::try_from(5002),
            Ok(ErrorCode::CheckoutBlockedByOrders)
        );
        assert_eq!(ErrorCode::try_from(9001), Ok(ErrorCode::InternalError));
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(999), Err(InvalidErrorCode(999)));
        assert_eq!(ErrorCode::try_from(10000), Err(InvalidErrorCode(10000)));
    }

    #[test]
    fn test_serialize_as_u16() {
        let json = serde_json::to_string(&ErrorCode::NotFound).unwrap();
        assert_eq!(json, "3");

        let code: ErrorCode = serde_json::from_str("4001").unwrap();
        assert_eq!(code, ErrorCode::BookingNotFound);
    }
}
