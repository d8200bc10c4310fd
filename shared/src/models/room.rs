//! Room Model

use serde::{Deserialize, Serialize};

/// Room status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum RoomStatus {
    #[serde(rename = "AVAILABLE")]
    Available,
    #[serde(rename = "OCCUPIED")]
    Occupied,
    /// Guest has left, housekeeping pending
    #[serde(rename = "CLEANING")]
    Cleaning,
    #[serde(rename = "MAINTENANCE")]
    Maintenance,
}

impl Default for RoomStatus {
    fn default() -> Self {
        Self::Available
    }
}

/// Room entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Room {
    pub id: i64,
    /// Display number ("101", "D-2")
    pub number: String,
    /// Optional friendly name ("Lake View Deluxe")
    pub name: Option<String>,
    /// Room type ("dorm", "private", "deluxe")
    pub room_type: String,
    /// Default nightly rate
    pub nightly_rate: f64,
    pub status: RoomStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create room payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomCreate {
    pub number: String,
    pub name: Option<String>,
    pub room_type: String,
    pub nightly_rate: f64,
}

/// Update room payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomUpdate {
    pub number: Option<String>,
    pub name: Option<String>,
    pub room_type: Option<String>,
    pub nightly_rate: Option<f64>,
    pub status: Option<RoomStatus>,
}
