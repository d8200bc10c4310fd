//! Extra Service Repository

use super::{RepoError, RepoResult};
use shared::models::{ExtraService, ExtraServiceCreate};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, booking_id, kind, description, amount, service_date, created_at";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<ExtraService>> {
    let service = sqlx::query_as::<_, ExtraService>(&format!(
        "SELECT {COLUMNS} FROM extra_service WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(service)
}

pub async fn find_by_booking(pool: &SqlitePool, booking_id: i64) -> RepoResult<Vec<ExtraService>> {
    let services = sqlx::query_as::<_, ExtraService>(&format!(
        "SELECT {COLUMNS} FROM extra_service WHERE booking_id = ? ORDER BY service_date"
    ))
    .bind(booking_id)
    .fetch_all(pool)
    .await?;
    Ok(services)
}

/// Sum of extra service amounts across a booking set.
///
/// Takes any executor so merge can aggregate inside its transaction.
pub async fn sum_for_bookings(
    executor: impl sqlx::SqliteExecutor<'_>,
    booking_ids: &[i64],
) -> RepoResult<f64> {
    if booking_ids.is_empty() {
        return Ok(0.0);
    }
    let placeholders = vec!["?"; booking_ids.len()].join(", ");
    let sql = format!(
        "SELECT COALESCE(SUM(amount), 0.0) FROM extra_service WHERE booking_id IN ({placeholders})"
    );
    let mut query = sqlx::query_scalar::<_, f64>(&sql);
    for id in booking_ids {
        query = query.bind(id);
    }
    Ok(query.fetch_one(executor).await?)
}

pub async fn create(pool: &SqlitePool, data: ExtraServiceCreate) -> RepoResult<ExtraService> {
    if !data.amount.is_finite() || data.amount < 0.0 {
        return Err(RepoError::Validation(format!(
            "Service amount must be non-negative, got {}",
            data.amount
        )));
    }

    let id = snowflake_id();
    let now = now_millis();
    sqlx::query(
        "INSERT INTO extra_service (id, booking_id, kind, description, amount, service_date, created_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(data.booking_id)
    .bind(data.kind)
    .bind(&data.description)
    .bind(data.amount)
    .bind(data.service_date.unwrap_or(now))
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create extra service".into()))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM extra_service WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
