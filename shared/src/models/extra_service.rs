//! Extra Service Model (taxi, guide, adventure bookings billed to the room)

use serde::{Deserialize, Serialize};

/// Kind of billable extra service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum ServiceKind {
    #[serde(rename = "TAXI")]
    Taxi,
    #[serde(rename = "GUIDE")]
    Guide,
    #[serde(rename = "ADVENTURE")]
    Adventure,
    #[serde(rename = "COMMISSION")]
    Commission,
    #[serde(rename = "OTHER")]
    Other,
}

/// Extra service charged to a booking
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ExtraService {
    pub id: i64,
    pub booking_id: i64,
    pub kind: ServiceKind,
    pub description: Option<String>,
    pub amount: f64,
    /// Date the service was rendered (unix millis)
    pub service_date: i64,
    pub created_at: i64,
}

/// Create extra service payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtraServiceCreate {
    pub booking_id: i64,
    pub kind: ServiceKind,
    pub description: Option<String>,
    pub amount: f64,
    pub service_date: Option<i64>,
}
