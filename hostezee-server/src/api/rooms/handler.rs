//! Room API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use serde_json::json;

use crate::audit::AuditAction;
use crate::core::ServerState;
use crate::db::repository::room;
use crate::utils::validation::{MAX_SHORT_TEXT_LEN, validate_required_text};
use crate::utils::{AppError, AppResult};
use shared::models::{Room, RoomCreate, RoomStatus, RoomUpdate};

const RESOURCE: &str = "room";

/// GET /api/rooms - list rooms
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Room>>> {
    let rooms = room::find_all(&state.pool).await?;
    Ok(Json(rooms))
}

/// GET /api/rooms/:id - fetch one room
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Room>> {
    let r = room::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Room {id}")))?;
    Ok(Json(r))
}

/// POST /api/rooms - create a room
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<RoomCreate>,
) -> AppResult<Json<Room>> {
    validate_required_text(&payload.number, "number", MAX_SHORT_TEXT_LEN)?;

    let r = room::create(&state.pool, payload).await?;

    let id = r.id.to_string();
    state.audit.record(
        AuditAction::RoomCreated,
        RESOURCE,
        &id,
        None,
        json!({ "number": r.number, "nightly_rate": r.nightly_rate }),
    );
    state.broadcast_sync(RESOURCE, "created", &id, Some(&r));

    Ok(Json(r))
}

/// PUT /api/rooms/:id - update a room
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<RoomUpdate>,
) -> AppResult<Json<Room>> {
    let r = room::update(&state.pool, id, payload).await?;

    let id_str = id.to_string();
    state.audit.record(
        AuditAction::RoomUpdated,
        RESOURCE,
        &id_str,
        None,
        json!({ "nightly_rate": r.nightly_rate, "status": r.status }),
    );
    state.broadcast_sync(RESOURCE, "updated", &id_str, Some(&r));

    Ok(Json(r))
}

#[derive(Debug, Deserialize)]
pub struct StatusPayload {
    pub status: RoomStatus,
}

/// PUT /api/rooms/:id/status - housekeeping status flip
pub async fn set_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<StatusPayload>,
) -> AppResult<Json<Room>> {
    let r = room::update(
        &state.pool,
        id,
        RoomUpdate {
            number: None,
            name: None,
            room_type: None,
            nightly_rate: None,
            status: Some(payload.status),
        },
    )
    .await?;

    state.broadcast_sync(RESOURCE, "updated", &id.to_string(), Some(&r));
    Ok(Json(r))
}

/// DELETE /api/rooms/:id - remove a room
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let deleted = room::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("Room {id}")));
    }

    let id_str = id.to_string();
    state
        .audit
        .record(AuditAction::RoomDeleted, RESOURCE, &id_str, None, json!({}));
    state.broadcast_sync::<Room>(RESOURCE, "deleted", &id_str, None);

    Ok(Json(true))
}
