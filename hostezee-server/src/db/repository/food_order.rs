//! Food Order Repository

use super::{RepoError, RepoResult};
use shared::models::{FoodOrder, FoodOrderCreate, OrderStatus};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, booking_id, items, total_amount, status, created_at, updated_at";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<FoodOrder>> {
    let order =
        sqlx::query_as::<_, FoodOrder>(&format!("SELECT {COLUMNS} FROM food_order WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(order)
}

pub async fn find_all(pool: &SqlitePool, limit: i32, offset: i32) -> RepoResult<Vec<FoodOrder>> {
    let orders = sqlx::query_as::<_, FoodOrder>(&format!(
        "SELECT {COLUMNS} FROM food_order ORDER BY created_at DESC LIMIT ? OFFSET ?"
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    Ok(orders)
}

pub async fn find_by_booking(pool: &SqlitePool, booking_id: i64) -> RepoResult<Vec<FoodOrder>> {
    let orders = sqlx::query_as::<_, FoodOrder>(&format!(
        "SELECT {COLUMNS} FROM food_order WHERE booking_id = ? ORDER BY created_at"
    ))
    .bind(booking_id)
    .fetch_all(pool)
    .await?;
    Ok(orders)
}

/// Count orders still in the kitchen (pending/preparing) for a booking;
/// these block checkout
pub async fn count_blocking(pool: &SqlitePool, booking_id: i64) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM food_order \
         WHERE booking_id = ? AND status IN ('PENDING', 'PREPARING')",
    )
    .bind(booking_id)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

/// Sum of non-cancelled order totals across a booking set.
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
        "SELECT COALESCE(SUM(total_amount), 0.0) FROM food_order \
         WHERE booking_id IN ({placeholders}) AND status != 'CANCELLED'"
    );
    let mut query = sqlx::query_scalar::<_, f64>(&sql);
    for id in booking_ids {
        query = query.bind(id);
    }
    Ok(query.fetch_one(executor).await?)
}

pub async fn create(pool: &SqlitePool, data: FoodOrderCreate) -> RepoResult<FoodOrder> {
    if !data.total_amount.is_finite() || data.total_amount < 0.0 {
        return Err(RepoError::Validation(format!(
            "Order total must be non-negative, got {}",
            data.total_amount
        )));
    }

    let id = snowflake_id();
    let now = now_millis();
    sqlx::query(
        "INSERT INTO food_order (id, booking_id, items, total_amount, status, created_at, updated_at) \
         VALUES (?, ?, ?, ?, 'PENDING', ?, ?)",
    )
    .bind(id)
    .bind(data.booking_id)
    .bind(&data.items)
    .bind(data.total_amount)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create order".into()))
}

pub async fn set_status(pool: &SqlitePool, id: i64, status: OrderStatus) -> RepoResult<FoodOrder> {
    let rows = sqlx::query("UPDATE food_order SET status = ?, updated_at = ? WHERE id = ?")
        .bind(status)
        .bind(now_millis())
        .bind(id)
        .execute(pool)
        .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Order {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Order {id} not found")))
}
