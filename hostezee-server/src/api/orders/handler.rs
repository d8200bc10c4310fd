//! Food Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use serde_json::json;

use crate::audit::AuditAction;
use crate::core::ServerState;
use crate::db::repository::food_order;
use crate::utils::validation::validate_amount;
use crate::utils::{AppError, AppResult};
use shared::error::ErrorCode;
use shared::models::{FoodOrder, FoodOrderCreate, OrderStatus, OrderStatusUpdate};

const RESOURCE: &str = "order";

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: i32,
    #[serde(default)]
    pub offset: i32,
}

fn default_limit() -> i32 {
    50
}

/// GET /api/orders - list orders
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<FoodOrder>>> {
    let orders = food_order::find_all(&state.pool, query.limit, query.offset).await?;
    Ok(Json(orders))
}

/// GET /api/orders/:id - fetch one order
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<FoodOrder>> {
    let order = food_order::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| order_not_found(id))?;
    Ok(Json(order))
}

/// POST /api/orders - create an order
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<FoodOrderCreate>,
) -> AppResult<Json<FoodOrder>> {
    validate_amount(payload.total_amount, "total_amount")?;

    let order = food_order::create(&state.pool, payload).await?;

    let id = order.id.to_string();
    state.audit.record(
        AuditAction::OrderCreated,
        RESOURCE,
        &id,
        None,
        json!({
            "booking_id": order.booking_id,
            "total_amount": order.total_amount,
        }),
    );
    state.broadcast_sync(RESOURCE, "created", &id, Some(&order));

    Ok(Json(order))
}

/// PUT /api/orders/:id/status - kitchen status transition
pub async fn set_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<OrderStatusUpdate>,
) -> AppResult<Json<FoodOrder>> {
    let order = food_order::set_status(&state.pool, id, payload.status).await?;

    let id_str = id.to_string();
    state.audit.record(
        AuditAction::OrderStatusChanged,
        RESOURCE,
        &id_str,
        None,
        json!({ "status": order.status }),
    );
    state.broadcast_sync(RESOURCE, "updated", &id_str, Some(&order));

    Ok(Json(order))
}

/// POST /api/orders/:id/cancel - cancel an order still in the kitchen
pub async fn cancel(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<FoodOrder>> {
    let current = food_order::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| order_not_found(id))?;

    // Completed orders are already on a bill trail; they stay
    if current.status == OrderStatus::Completed {
        return Err(AppError::with_message(
            ErrorCode::OrderNotCancellable,
            format!("Order {id} is already completed"),
        ));
    }

    let order = food_order::set_status(&state.pool, id, OrderStatus::Cancelled).await?;

    let id_str = id.to_string();
    state.audit.record(
        AuditAction::OrderCancelled,
        RESOURCE,
        &id_str,
        None,
        json!({}),
    );
    state.broadcast_sync(RESOURCE, "cancelled", &id_str, Some(&order));

    Ok(Json(order))
}

fn order_not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::OrderNotFound, format!("Order {id} not found"))
}
