//! Booking charge derivation
//!
//! Builds the `BookingCharges` read model the billing core consumes:
//! room charges from the stay span and rates, food from linked orders,
//! extras from linked services.

use rust_decimal::prelude::*;
use shared::error::AppResult;
use shared::models::{Booking, BookingCharges};
use sqlx::SqlitePool;

use crate::billing::money::{to_decimal, to_f64};
use crate::db::repository::{extra_service, food_order, room};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Nights billed for a stay span: ceiling of the day count, minimum 1.
///
/// A late checkout past the 24h mark bills the extra night; a same-day
/// stay still bills one.
pub fn billable_nights(check_in: i64, check_out: i64) -> i64 {
    let span = check_out.saturating_sub(check_in);
    if span <= 0 {
        return 1;
    }
    // `span > 0` here, so this equals `span.div_ceil(MILLIS_PER_DAY)`
    // (signed `div_ceil` is still unstable under `int_roundings`).
    ((span + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY).max(1)
}

/// Derive the full charges object for one booking
pub async fn booking_charges(pool: &SqlitePool, booking: &Booking) -> AppResult<BookingCharges> {
    let nights = billable_nights(booking.check_in, booking.check_out);

    // Override rate wins; otherwise the booked rooms' rates are summed
    let nightly_rate = match booking.nightly_rate_override {
        Some(rate) => to_decimal(rate),
        None => {
            let rooms = room::find_by_ids(pool, &booking.room_ids).await?;
            rooms.iter().map(|r| to_decimal(r.nightly_rate)).sum()
        }
    };
    let room_charges = nightly_rate * Decimal::from(nights);

    let food_charges = food_order::sum_for_bookings(pool, &[booking.id]).await?;
    let extra_charges = extra_service::sum_for_bookings(pool, &[booking.id]).await?;

    Ok(BookingCharges {
        room_charges: to_f64(room_charges),
        food_charges,
        extra_charges,
        advance_paid: booking.advance_paid,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_billable_nights_exact_days() {
        assert_eq!(billable_nights(0, MILLIS_PER_DAY), 1);
        assert_eq!(billable_nights(0, 3 * MILLIS_PER_DAY), 3);
    }

    #[test]
    fn test_billable_nights_rounds_up() {
        // 1 day + 1 hour bills 2 nights
        assert_eq!(billable_nights(0, MILLIS_PER_DAY + 3_600_000), 2);
    }

    #[test]
    fn test_billable_nights_minimum_one() {
        assert_eq!(billable_nights(0, 0), 1);
        assert_eq!(billable_nights(0, 3_600_000), 1);
        // Degenerate input never yields zero nights
        assert_eq!(billable_nights(100, 50), 1);
    }
}
