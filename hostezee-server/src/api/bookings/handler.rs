//! Booking API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::audit::AuditAction;
use crate::core::ServerState;
use crate::db::repository::{bill, booking, extra_service, food_order};
use crate::services::{charges as charges_service, checkout as checkout_service};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_amount, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, AppResult};
use shared::error::ErrorCode;
use shared::models::{
    Bill, BillBreakdownView, Booking, BookingCharges, BookingCreate, BookingStatus, BookingUpdate,
    CheckoutRequest, ExtraService, FoodOrder, PreviewBillRequest,
};

const RESOURCE: &str = "booking";

/// Query params for listing bookings
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

/// GET /api/bookings - list bookings
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Booking>>> {
    let bookings = booking::find_all(&state.pool, query.limit, query.offset).await?;
    Ok(Json(bookings))
}

/// GET /api/bookings/:id - fetch one booking
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Booking>> {
    let b = booking::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| booking_not_found(id))?;
    Ok(Json(b))
}

/// POST /api/bookings - create a booking
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<BookingCreate>,
) -> AppResult<Json<Booking>> {
    validate_required_text(&payload.guest_name, "guest_name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.guest_phone, "guest_phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.note, "note", MAX_NOTE_LEN)?;
    validate_amount(payload.advance_paid, "advance_paid")?;

    let b = booking::create(&state.pool, payload).await?;

    let id = b.id.to_string();
    state.audit.record(
        AuditAction::BookingCreated,
        RESOURCE,
        &id,
        None,
        json!({
            "guest_name": b.guest_name,
            "room_ids": b.room_ids,
            "advance_paid": b.advance_paid,
        }),
    );
    state.broadcast_sync(RESOURCE, "created", &id, Some(&b));

    Ok(Json(b))
}

/// PUT /api/bookings/:id - update a booking
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<BookingUpdate>,
) -> AppResult<Json<Booking>> {
    validate_optional_text(&payload.guest_name, "guest_name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.note, "note", MAX_NOTE_LEN)?;
    if let Some(advance) = payload.advance_paid {
        validate_amount(advance, "advance_paid")?;
    }

    let b = booking::update(&state.pool, id, payload).await?;

    let id_str = id.to_string();
    state.audit.record(
        AuditAction::BookingUpdated,
        RESOURCE,
        &id_str,
        None,
        json!({ "guest_name": b.guest_name }),
    );
    state.broadcast_sync(RESOURCE, "updated", &id_str, Some(&b));

    Ok(Json(b))
}

/// POST /api/bookings/:id/cancel - cancel a booking
pub async fn cancel(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Booking>> {
    let current = booking::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| booking_not_found(id))?;
    if current.status == BookingStatus::CheckedOut {
        return Err(AppError::new(ErrorCode::BookingAlreadyCheckedOut));
    }

    let b = booking::transition(&state.pool, id, BookingStatus::Cancelled).await?;

    let id_str = id.to_string();
    state.audit.record(
        AuditAction::BookingCancelled,
        RESOURCE,
        &id_str,
        None,
        json!({}),
    );
    state.broadcast_sync(RESOURCE, "cancelled", &id_str, Some(&b));

    Ok(Json(b))
}

/// POST /api/bookings/:id/check-in - move guest in
pub async fn check_in(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Booking>> {
    let current = booking::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| booking_not_found(id))?;
    match current.status {
        BookingStatus::Pending | BookingStatus::Confirmed => {}
        BookingStatus::CheckedIn => return Ok(Json(current)),
        BookingStatus::CheckedOut => {
            return Err(AppError::new(ErrorCode::BookingAlreadyCheckedOut));
        }
        BookingStatus::Cancelled => return Err(AppError::new(ErrorCode::BookingCancelled)),
    }

    let b = booking::transition(&state.pool, id, BookingStatus::CheckedIn).await?;

    let id_str = id.to_string();
    state.audit.record(
        AuditAction::BookingCheckedIn,
        RESOURCE,
        &id_str,
        None,
        json!({}),
    );
    state.broadcast_sync(RESOURCE, "checked_in", &id_str, Some(&b));

    Ok(Json(b))
}

/// GET /api/bookings/:id/charges - the charges object billing consumes
pub async fn charges(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<BookingCharges>> {
    let b = booking::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| booking_not_found(id))?;
    let c = charges_service::booking_charges(&state.pool, &b).await?;
    Ok(Json(c))
}

/// GET /api/bookings/:id/bill - the settlement bill, if one exists
pub async fn settlement_bill(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Bill>> {
    booking::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| booking_not_found(id))?;

    let b = bill::find_settlement_for_booking(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::BillNotFound,
                format!("Booking {id} has no settlement bill"),
            )
        })?;
    Ok(Json(b))
}

/// GET /api/bookings/:id/orders - linked food orders
pub async fn orders(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<FoodOrder>>> {
    let list = food_order::find_by_booking(&state.pool, id).await?;
    Ok(Json(list))
}

/// GET /api/bookings/:id/extra-services - linked extras
pub async fn extra_services(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<ExtraService>>> {
    let list = extra_service::find_by_booking(&state.pool, id).await?;
    Ok(Json(list))
}

/// POST /api/bookings/:id/preview-bill - breakdown without settlement
pub async fn preview_bill(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<PreviewBillRequest>,
) -> AppResult<Json<BillBreakdownView>> {
    let view = checkout_service::preview(&state, id, &payload).await?;
    Ok(Json(view))
}

/// POST /api/bookings/:id/prebill - send the itemized bill to the guest
pub async fn send_prebill(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<PreviewBillRequest>,
) -> AppResult<Json<BillBreakdownView>> {
    let view = checkout_service::send_prebill(&state, id, &payload).await?;
    Ok(Json(view))
}

#[derive(Debug, Serialize)]
pub struct PaymentLinkResponse {
    pub url: String,
}

/// POST /api/bookings/:id/payment-link - generate and send a payment link
pub async fn payment_link(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<PreviewBillRequest>,
) -> AppResult<Json<PaymentLinkResponse>> {
    let url = checkout_service::generate_payment_link(&state, id, &payload).await?;
    Ok(Json(PaymentLinkResponse { url }))
}

/// POST /api/bookings/:id/checkout - settle the booking
pub async fn checkout(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<CheckoutRequest>,
) -> AppResult<Json<Bill>> {
    let bill = checkout_service::perform_checkout(&state, id, payload).await?;
    Ok(Json(bill))
}

fn booking_not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::BookingNotFound, format!("Booking {id} not found"))
}
