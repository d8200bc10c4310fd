//! Food Order Model (cafe / kitchen)

use serde::{Deserialize, Serialize};

/// Food order status
///
/// `Pending` and `Preparing` orders block checkout of their booking;
/// the kitchen must finish or cancel them first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum OrderStatus {
    #[serde(rename = "PENDING")]
    Pending,
    #[serde(rename = "PREPARING")]
    Preparing,
    #[serde(rename = "READY")]
    Ready,
    #[serde(rename = "COMPLETED")]
    Completed,
    #[serde(rename = "CANCELLED")]
    Cancelled,
}

impl Default for OrderStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl OrderStatus {
    /// Whether an order in this status blocks checkout of its booking
    pub fn blocks_checkout(&self) -> bool {
        matches!(self, Self::Pending | Self::Preparing)
    }
}

/// Food order record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct FoodOrder {
    pub id: i64,
    /// None for walk-in cafe orders with no room attached
    pub booking_id: Option<i64>,
    /// Line items as entered in the cafe UI (opaque JSON)
    pub items: String,
    pub total_amount: f64,
    pub status: OrderStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create food order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodOrderCreate {
    pub booking_id: Option<i64>,
    pub items: String,
    pub total_amount: f64,
}

/// Order status transition payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
}
