//! Booking Model

use serde::{Deserialize, Serialize};

/// Booking status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum BookingStatus {
    #[serde(rename = "PENDING")]
    Pending,
    #[serde(rename = "CONFIRMED")]
    Confirmed,
    #[serde(rename = "CHECKED_IN")]
    CheckedIn,
    #[serde(rename = "CHECKED_OUT")]
    CheckedOut,
    #[serde(rename = "CANCELLED")]
    Cancelled,
}

impl Default for BookingStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// Booking record - a guest's stay across one or more rooms
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Booking {
    pub id: i64,
    pub guest_name: String,
    pub guest_phone: Option<String>,
    /// Check-in timestamp (unix millis)
    pub check_in: i64,
    /// Check-out timestamp (unix millis)
    pub check_out: i64,
    /// Per-night price override for the whole booking; when None the sum
    /// of the rooms' nightly rates applies
    pub nightly_rate_override: Option<f64>,
    /// Advance amount already collected
    pub advance_paid: f64,
    pub status: BookingStatus,
    pub note: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,

    // -- Relations (populated by application code, skipped by FromRow) --

    /// Rooms covered by this booking (group bookings span several)
    #[cfg_attr(feature = "db", sqlx(skip))]
    #[serde(default)]
    pub room_ids: Vec<i64>,
}

/// Create booking payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingCreate {
    pub guest_name: String,
    pub guest_phone: Option<String>,
    pub room_ids: Vec<i64>,
    pub check_in: i64,
    pub check_out: i64,
    pub nightly_rate_override: Option<f64>,
    #[serde(default)]
    pub advance_paid: f64,
    pub note: Option<String>,
}

/// Update booking payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingUpdate {
    pub guest_name: Option<String>,
    pub guest_phone: Option<String>,
    pub room_ids: Option<Vec<i64>>,
    pub check_in: Option<i64>,
    pub check_out: Option<i64>,
    pub nightly_rate_override: Option<f64>,
    pub advance_paid: Option<f64>,
    pub note: Option<String>,
}

/// Charges accumulated against a booking, as consumed by the billing core
///
/// `room_charges` is derived (nights x rate), the other two are sums over
/// linked records. All values are plain totals with no tax applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingCharges {
    pub room_charges: f64,
    pub food_charges: f64,
    pub extra_charges: f64,
    pub advance_paid: f64,
}
