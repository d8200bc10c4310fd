//! Booking Repository

use super::{RepoError, RepoResult};
use shared::models::{Booking, BookingCreate, BookingStatus, BookingUpdate};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, guest_name, guest_phone, check_in, check_out, nightly_rate_override, \
                       advance_paid, status, note, created_at, updated_at";

/// Attach the junction-table room IDs to a fetched booking
async fn load_room_ids(pool: &SqlitePool, booking: &mut Booking) -> RepoResult<()> {
    let ids: Vec<i64> = sqlx::query_scalar(
        "SELECT room_id FROM booking_room WHERE booking_id = ? ORDER BY room_id",
    )
    .bind(booking.id)
    .fetch_all(pool)
    .await?;
    booking.room_ids = ids;
    Ok(())
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Booking>> {
    let booking =
        sqlx::query_as::<_, Booking>(&format!("SELECT {COLUMNS} FROM booking WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?;

    match booking {
        Some(mut b) => {
            load_room_ids(pool, &mut b).await?;
            Ok(Some(b))
        }
        None => Ok(None),
    }
}

pub async fn find_all(pool: &SqlitePool, limit: i32, offset: i32) -> RepoResult<Vec<Booking>> {
    let mut bookings = sqlx::query_as::<_, Booking>(&format!(
        "SELECT {COLUMNS} FROM booking ORDER BY check_in DESC LIMIT ? OFFSET ?"
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    for booking in &mut bookings {
        load_room_ids(pool, booking).await?;
    }
    Ok(bookings)
}

/// Fetch the named bookings; errors listing the missing IDs when any are
/// absent (merge validation wants all-or-nothing)
pub async fn find_all_required(pool: &SqlitePool, ids: &[i64]) -> RepoResult<Vec<Booking>> {
    let mut found = Vec::with_capacity(ids.len());
    let mut missing = Vec::new();
    for &id in ids {
        match find_by_id(pool, id).await? {
            Some(b) => found.push(b),
            None => missing.push(id.to_string()),
        }
    }
    if !missing.is_empty() {
        return Err(RepoError::NotFound(format!(
            "Booking(s) {}",
            missing.join(", ")
        )));
    }
    Ok(found)
}

pub async fn create(pool: &SqlitePool, data: BookingCreate) -> RepoResult<Booking> {
    if data.guest_name.trim().is_empty() {
        return Err(RepoError::Validation("Guest name cannot be empty".into()));
    }
    if data.room_ids.is_empty() {
        return Err(RepoError::Validation(
            "Booking must cover at least one room".into(),
        ));
    }
    if data.check_out <= data.check_in {
        return Err(RepoError::Validation(
            "Check-out must be after check-in".into(),
        ));
    }
    if !data.advance_paid.is_finite() || data.advance_paid < 0.0 {
        return Err(RepoError::Validation(format!(
            "Advance must be non-negative, got {}",
            data.advance_paid
        )));
    }

    let id = snowflake_id();
    let now = now_millis();

    let mut tx = pool.begin().await?;

    sqlx::query(
        "INSERT INTO booking (id, guest_name, guest_phone, check_in, check_out, \
            nightly_rate_override, advance_paid, status, note, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, 'PENDING', ?, ?, ?)",
    )
    .bind(id)
    .bind(data.guest_name.trim())
    .bind(&data.guest_phone)
    .bind(data.check_in)
    .bind(data.check_out)
    .bind(data.nightly_rate_override)
    .bind(data.advance_paid)
    .bind(&data.note)
    .bind(now)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    for room_id in &data.room_ids {
        sqlx::query("INSERT INTO booking_room (booking_id, room_id) VALUES (?, ?)")
            .bind(id)
            .bind(room_id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create booking".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: BookingUpdate) -> RepoResult<Booking> {
    if let Some(advance) = data.advance_paid
        && (!advance.is_finite() || advance < 0.0)
    {
        return Err(RepoError::Validation(format!(
            "Advance must be non-negative, got {advance}"
        )));
    }

    let now = now_millis();
    let mut tx = pool.begin().await?;

    let rows = sqlx::query(
        "UPDATE booking SET \
            guest_name = COALESCE(?, guest_name), \
            guest_phone = COALESCE(?, guest_phone), \
            check_in = COALESCE(?, check_in), \
            check_out = COALESCE(?, check_out), \
            nightly_rate_override = COALESCE(?, nightly_rate_override), \
            advance_paid = COALESCE(?, advance_paid), \
            note = COALESCE(?, note), \
            updated_at = ? \
         WHERE id = ?",
    )
    .bind(&data.guest_name)
    .bind(&data.guest_phone)
    .bind(data.check_in)
    .bind(data.check_out)
    .bind(data.nightly_rate_override)
    .bind(data.advance_paid)
    .bind(&data.note)
    .bind(now)
    .bind(id)
    .execute(&mut *tx)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Booking {id} not found")));
    }

    if let Some(room_ids) = &data.room_ids {
        if room_ids.is_empty() {
            return Err(RepoError::Validation(
                "Booking must cover at least one room".into(),
            ));
        }
        sqlx::query("DELETE FROM booking_room WHERE booking_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        for room_id in room_ids {
            sqlx::query("INSERT INTO booking_room (booking_id, room_id) VALUES (?, ?)")
                .bind(id)
                .bind(room_id)
                .execute(&mut *tx)
                .await?;
        }
    }

    tx.commit().await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Booking {id} not found")))
}

/// Move a booking to a new status within a caller-owned transaction
pub async fn set_status(
    tx: &mut sqlx::SqliteConnection,
    id: i64,
    status: BookingStatus,
) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE booking SET status = ?, updated_at = ? WHERE id = ?")
        .bind(status)
        .bind(now_millis())
        .bind(id)
        .execute(tx)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Booking {id} not found")));
    }
    Ok(())
}

/// Status transition against the pool (cancel, check-in)
pub async fn transition(pool: &SqlitePool, id: i64, status: BookingStatus) -> RepoResult<Booking> {
    let mut conn = pool.acquire().await?;
    set_status(&mut *conn, id, status).await?;
    drop(conn);
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Booking {id} not found")))
}
