//! Bill API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::repository::bill;
use crate::services::merge as merge_service;
use crate::utils::{AppError, AppResult};
use shared::error::ErrorCode;
use shared::models::{Bill, MergeBillsRequest};

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

/// GET /api/bills - list bills, newest first
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Bill>>> {
    let bills = bill::find_all(&state.pool, query.limit, query.offset).await?;
    Ok(Json(bills))
}

/// GET /api/bills/:id - fetch one bill
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Bill>> {
    let b = bill::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::BillNotFound, format!("Bill {id} not found"))
        })?;
    Ok(Json(b))
}

/// POST /api/bills/merge - consolidate several bookings into one bill
pub async fn merge(
    State(state): State<ServerState>,
    Json(payload): Json<MergeBillsRequest>,
) -> AppResult<Json<Bill>> {
    let merged =
        merge_service::merge_bills(&state, &payload.booking_ids, payload.primary_booking_id)
            .await?;
    Ok(Json(merged))
}
