//! Bill merge orchestration
//!
//! Folds several bookings' charges into one consolidated bill attached
//! to a designated primary booking. Existing per-booking bills stay
//! untouched; the merged bill is an additional record carrying the
//! combined totals and the full booking ID set.

use std::collections::HashSet;

use serde_json::json;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Bill, DiscountType, PaymentStatus};

use crate::audit::AuditAction;
use crate::billing::{self, money};
use crate::core::ServerState;
use crate::db::repository::{RepoError, bill, booking, extra_service, food_order};
use crate::services::charges;

/// Merge the named bookings into one bill on the primary booking.
///
/// Validation (no mutation before all pass):
/// - at least two distinct booking IDs
/// - the primary ID is drawn from the set
/// - every named booking exists
///
/// The aggregation and the insert run inside one transaction, so a
/// concurrent order edit cannot land between the sums and the write.
/// Nothing guards against overlapping merge sets across calls; each
/// merge is an independent additional bill row.
pub async fn merge_bills(
    state: &ServerState,
    booking_ids: &[i64],
    primary_booking_id: i64,
) -> AppResult<Bill> {
    let distinct: HashSet<i64> = booking_ids.iter().copied().collect();
    if booking_ids.len() < 2 || distinct.len() != booking_ids.len() {
        return Err(AppError::with_message(
            ErrorCode::MergeInvalidSet,
            format!(
                "Merge requires at least two distinct booking IDs, got {:?}",
                booking_ids
            ),
        ));
    }
    if !distinct.contains(&primary_booking_id) {
        return Err(AppError::with_message(
            ErrorCode::MergeInvalidSet,
            format!("Primary booking {primary_booking_id} is not part of the merge set"),
        ));
    }

    // All bookings must exist; report the missing ones by ID
    let bookings = match booking::find_all_required(&state.pool, booking_ids).await {
        Ok(b) => b,
        Err(RepoError::NotFound(msg)) => {
            return Err(AppError::with_message(
                ErrorCode::MergeBookingMissing,
                format!("{msg} not found"),
            ));
        }
        Err(e) => return Err(e.into()),
    };

    // Room-side totals per booking (nights x rate); food and extras are
    // summed separately below so nothing counts twice
    let mut total_room_charges = rust_decimal::Decimal::ZERO;
    for b in &bookings {
        let c = charges::booking_charges(&state.pool, b).await?;
        total_room_charges += money::to_decimal(c.room_charges);
    }

    let mut tx = state
        .pool
        .begin()
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    let total_food = food_order::sum_for_bookings(&mut *tx, booking_ids).await?;
    let total_extra = extra_service::sum_for_bookings(&mut *tx, booking_ids).await?;

    let breakdown = billing::compute_merge(
        money::to_f64(total_room_charges),
        total_food,
        total_extra,
    );

    let write = bill::BillWrite {
        booking_id: primary_booking_id,
        room_charges: breakdown.room_charges,
        food_charges: breakdown.food_charges,
        extra_charges: breakdown.extra_charges,
        manual_charges_total: 0.0,
        gst_rate: breakdown.gst_rate,
        gst_amount: breakdown.gst_amount,
        service_charge_rate: breakdown.service_charge_rate,
        service_charge_amount: breakdown.service_charge_amount,
        discount_type: DiscountType::None,
        discount_value: 0.0,
        discount_amount: 0.0,
        total_amount: breakdown.total_amount,
        advance_paid: 0.0,
        cash_received: 0.0,
        online_received: 0.0,
        change_due: 0.0,
        balance_amount: breakdown.total_amount,
        payment_status: PaymentStatus::Unpaid,
        payment_method: None,
        due_date: None,
        pending_reason: None,
        merged_booking_ids: Some(booking_ids.to_vec()),
    };

    let bill_id = bill::create_merged(&mut tx, &write).await?;

    tx.commit()
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    let merged = bill::find_by_id(&state.pool, bill_id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::new(ErrorCode::BillNotFound))?;

    state.audit.record(
        AuditAction::BillMerged,
        "bill",
        merged.id.to_string(),
        None,
        json!({
            "primary_booking_id": primary_booking_id,
            "booking_ids": booking_ids,
            "total_amount": merged.total_amount,
        }),
    );
    state.broadcast_sync("bill", "merged", &merged.id.to_string(), Some(&merged));

    Ok(merged)
}
