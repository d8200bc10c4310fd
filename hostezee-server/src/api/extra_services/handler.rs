//! Extra Service API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::json;

use crate::audit::AuditAction;
use crate::core::ServerState;
use crate::db::repository::{booking, extra_service};
use crate::utils::validation::{MAX_NOTE_LEN, validate_amount, validate_optional_text};
use crate::utils::{AppError, AppResult};
use shared::error::ErrorCode;
use shared::models::{ExtraService, ExtraServiceCreate};

const RESOURCE: &str = "extra_service";

/// POST /api/extra-services - charge an extra to a booking
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ExtraServiceCreate>,
) -> AppResult<Json<ExtraService>> {
    validate_amount(payload.amount, "amount")?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;

    // The booking must exist; extras are never free-floating
    booking::find_by_id(&state.pool, payload.booking_id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::BookingNotFound,
                format!("Booking {} not found", payload.booking_id),
            )
        })?;

    let service = extra_service::create(&state.pool, payload).await?;

    let id = service.id.to_string();
    state.audit.record(
        AuditAction::ExtraServiceAdded,
        RESOURCE,
        &id,
        None,
        json!({
            "booking_id": service.booking_id,
            "kind": service.kind,
            "amount": service.amount,
        }),
    );
    state.broadcast_sync(RESOURCE, "created", &id, Some(&service));

    Ok(Json(service))
}

/// DELETE /api/extra-services/:id - remove an extra
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let deleted = extra_service::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::with_message(
            ErrorCode::ExtraServiceNotFound,
            format!("Extra service {id} not found"),
        ));
    }

    let id_str = id.to_string();
    state.audit.record(
        AuditAction::ExtraServiceRemoved,
        RESOURCE,
        &id_str,
        None,
        json!({}),
    );
    state.broadcast_sync::<ExtraService>(RESOURCE, "deleted", &id_str, None);

    Ok(Json(true))
}
