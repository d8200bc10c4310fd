//! Checkout orchestration
//!
//! The single path that settles a booking. Every guard lives here,
//! kitchen gate and pre-bill gate included, so no HTTP caller can reach
//! a settlement write around them.

use serde_json::json;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    Bill, BillBreakdownView, Booking, BookingStatus, CheckoutRequest, PaymentStatus,
    PreviewBillRequest, RoomStatus,
};

use crate::audit::AuditAction;
use crate::billing::{self, DiscountSpec, TaxPolicy};
use crate::core::ServerState;
use crate::db::repository::{bill, booking, food_order, room};
use crate::services::charges;
use crate::utils::validation::{MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text};

/// Load a booking that is still allowed to settle
async fn load_open_booking(state: &ServerState, booking_id: i64) -> AppResult<Booking> {
    let b = booking::find_by_id(&state.pool, booking_id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::BookingNotFound,
                format!("Booking {booking_id} not found"),
            )
        })?;

    match b.status {
        BookingStatus::CheckedOut => Err(AppError::new(ErrorCode::BookingAlreadyCheckedOut)),
        BookingStatus::Cancelled => Err(AppError::new(ErrorCode::BookingCancelled)),
        _ => Ok(b),
    }
}

/// Compute the bill breakdown without touching anything.
///
/// Preview reuses the exact checkout calculator, so what the guest sees
/// is what settlement will write.
pub async fn preview(
    state: &ServerState,
    booking_id: i64,
    req: &PreviewBillRequest,
) -> AppResult<BillBreakdownView> {
    let b = load_open_booking(state, booking_id).await?;
    let c = charges::booking_charges(&state.pool, &b).await?;

    let discount = DiscountSpec {
        discount_type: req.discount_type,
        value: req.discount_value.clone(),
    };
    let breakdown = billing::compute_bill(
        &c,
        &req.manual_charges,
        req.gst_on_rooms,
        req.gst_on_food,
        req.include_service_charge,
        &discount,
        TaxPolicy::CHECKOUT,
    );
    Ok(breakdown.to_view())
}

/// Settle a booking.
///
/// Guards, in order, with no mutation before all pass:
/// 1. booking exists and is not already checked out / cancelled
/// 2. no food order is still in the kitchen
/// 3. the operator acknowledged a pre-bill, a payment link, or the
///    explicit skip flag
///
/// Then, inside one transaction: upsert the settlement bill, move the
/// booking to `CheckedOut` and its rooms to `Cleaning`.
pub async fn perform_checkout(
    state: &ServerState,
    booking_id: i64,
    req: CheckoutRequest,
) -> AppResult<Bill> {
    let b = load_open_booking(state, booking_id).await?;

    // Kitchen gate
    let blocking = food_order::count_blocking(&state.pool, booking_id)
        .await
        .map_err(AppError::from)?;
    if blocking > 0 {
        return Err(AppError::with_message(
            ErrorCode::CheckoutBlockedByOrders,
            format!("{blocking} food order(s) are still pending or preparing; complete or cancel them before checkout"),
        )
        .with_detail("blocking_orders", blocking));
    }

    // Pre-bill gate: the guest must have seen the bill, unless the
    // operator explicitly overrides
    if !(req.prebill_sent || req.payment_link_sent || req.skip_confirmation) {
        return Err(AppError::new(ErrorCode::PrebillNotSent));
    }

    validate_optional_text(&req.payment_method, "payment_method", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&req.pending_reason, "pending_reason", MAX_NOTE_LEN)?;

    // Compute the final breakdown
    let c = charges::booking_charges(&state.pool, &b).await?;
    let discount = DiscountSpec {
        discount_type: req.discount_type,
        value: req.discount_value.clone(),
    };
    let breakdown = billing::compute_bill(
        &c,
        &req.manual_charges,
        req.gst_on_rooms,
        req.gst_on_food,
        req.include_service_charge,
        &discount,
        TaxPolicy::CHECKOUT,
    );

    // Resolve the tender per payment status
    let (tender, payment_method, due_date, pending_reason) = match req.payment_status {
        PaymentStatus::Paid => {
            if breakdown.balance_due > 0.0 && req.payment_method.is_none() {
                return Err(AppError::validation(
                    "payment_method is required to settle a non-zero balance",
                ));
            }
            let tender =
                billing::resolve_split(breakdown.balance_due, req.cash_amount, req.online_amount)?;
            (tender, req.payment_method.clone(), None, None)
        }
        PaymentStatus::Pending => {
            // Guest settles later; whatever cash was handed over now is
            // recorded, the rest stays on the bill with a due date and
            // reason. No payment method required.
            let tender = billing::resolve_partial(
                breakdown.balance_due,
                req.cash_amount,
                req.online_amount,
            )?;
            (
                tender,
                req.payment_method.clone(),
                req.due_date,
                req.pending_reason.clone(),
            )
        }
        PaymentStatus::Unpaid => {
            return Err(AppError::validation(
                "Checkout settles as paid or pending; unpaid is not a settlement status",
            ));
        }
    };

    let write = bill::BillWrite {
        booking_id,
        room_charges: breakdown.room_charges,
        food_charges: breakdown.food_charges,
        extra_charges: breakdown.extra_charges,
        manual_charges_total: breakdown.manual_charges_total,
        gst_rate: breakdown.gst_rate,
        gst_amount: breakdown.gst_amount,
        service_charge_rate: breakdown.service_charge_rate,
        service_charge_amount: breakdown.service_charge_amount,
        discount_type: req.discount_type,
        discount_value: breakdown.discount_value,
        discount_amount: breakdown.discount_amount,
        total_amount: breakdown.total_amount,
        advance_paid: breakdown.advance_paid,
        cash_received: tender.cash_received,
        online_received: tender.online_received,
        change_due: tender.change_due,
        balance_amount: tender.outstanding,
        payment_status: req.payment_status,
        payment_method,
        due_date,
        pending_reason,
        merged_booking_ids: None,
    };

    // One transaction: bill + booking status + room statuses
    let mut tx = state
        .pool
        .begin()
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    let bill_id = bill::upsert_settlement(&mut tx, &write).await?;
    booking::set_status(&mut tx, booking_id, BookingStatus::CheckedOut).await?;
    for room_id in &b.room_ids {
        room::set_status(&mut tx, *room_id, RoomStatus::Cleaning).await?;
    }

    tx.commit()
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    let settled = bill::find_by_id(&state.pool, bill_id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::new(ErrorCode::BillNotFound))?;

    state.audit.record(
        AuditAction::BookingCheckedOut,
        "booking",
        booking_id.to_string(),
        None,
        json!({
            "bill_id": settled.id,
            "total_amount": settled.total_amount,
            "payment_status": settled.payment_status,
        }),
    );
    state.audit.record(
        AuditAction::BillSettled,
        "bill",
        settled.id.to_string(),
        None,
        json!({
            "booking_id": booking_id,
            "total_amount": settled.total_amount,
            "balance_amount": settled.balance_amount,
            "cash_received": settled.cash_received,
            "online_received": settled.online_received,
        }),
    );

    state.broadcast_sync("booking", "checked_out", &booking_id.to_string(), Some(&settled));
    state.broadcast_sync("bill", "settled", &settled.id.to_string(), Some(&settled));

    Ok(settled)
}

/// Send an itemized pre-bill to the guest.
///
/// Pure read plus an external call; nothing local mutates, so a gateway
/// failure surfaces to the operator with no rollback needed.
pub async fn send_prebill(
    state: &ServerState,
    booking_id: i64,
    req: &PreviewBillRequest,
) -> AppResult<BillBreakdownView> {
    let b = load_open_booking(state, booking_id).await?;
    let view = preview(state, booking_id, req).await?;

    state.notifier.send_prebill(&b, &view).await?;

    state.audit.record(
        AuditAction::PrebillSent,
        "booking",
        booking_id.to_string(),
        None,
        json!({ "total_amount": view.total_amount }),
    );
    Ok(view)
}

/// Generate and send a payment link for the outstanding balance
pub async fn generate_payment_link(
    state: &ServerState,
    booking_id: i64,
    req: &PreviewBillRequest,
) -> AppResult<String> {
    let b = load_open_booking(state, booking_id).await?;
    let view = preview(state, booking_id, req).await?;

    let url = state.notifier.send_payment_link(&b, &view).await?;

    state.audit.record(
        AuditAction::PaymentLinkGenerated,
        "booking",
        booking_id.to_string(),
        None,
        json!({ "amount": view.balance_due, "url": url }),
    );
    Ok(url)
}
