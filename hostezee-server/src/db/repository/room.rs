//! Room Repository

use super::{RepoError, RepoResult};
use shared::models::{Room, RoomCreate, RoomStatus, RoomUpdate};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, number, name, room_type, nightly_rate, status, created_at, updated_at";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Room>> {
    let room = sqlx::query_as::<_, Room>(&format!("SELECT {COLUMNS} FROM room WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(room)
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Room>> {
    let rooms = sqlx::query_as::<_, Room>(&format!("SELECT {COLUMNS} FROM room ORDER BY number"))
        .fetch_all(pool)
        .await?;
    Ok(rooms)
}

/// Fetch several rooms at once; missing IDs are simply absent
pub async fn find_by_ids(pool: &SqlitePool, ids: &[i64]) -> RepoResult<Vec<Room>> {
    if ids.is_empty() {
        return Ok(vec![]);
    }
    let placeholders = vec!["?"; ids.len()].join(", ");
    let sql = format!("SELECT {COLUMNS} FROM room WHERE id IN ({placeholders}) ORDER BY number");
    let mut query = sqlx::query_as::<_, Room>(&sql);
    for id in ids {
        query = query.bind(id);
    }
    Ok(query.fetch_all(pool).await?)
}

pub async fn create(pool: &SqlitePool, data: RoomCreate) -> RepoResult<Room> {
    if data.number.trim().is_empty() {
        return Err(RepoError::Validation("Room number cannot be empty".into()));
    }
    if !data.nightly_rate.is_finite() || data.nightly_rate < 0.0 {
        return Err(RepoError::Validation(format!(
            "Nightly rate must be non-negative, got {}",
            data.nightly_rate
        )));
    }

    let id = snowflake_id();
    let now = now_millis();
    sqlx::query(
        "INSERT INTO room (id, number, name, room_type, nightly_rate, status, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, 'AVAILABLE', ?, ?)",
    )
    .bind(id)
    .bind(data.number.trim())
    .bind(&data.name)
    .bind(&data.room_type)
    .bind(data.nightly_rate)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create room".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: RoomUpdate) -> RepoResult<Room> {
    if let Some(rate) = data.nightly_rate
        && (!rate.is_finite() || rate < 0.0)
    {
        return Err(RepoError::Validation(format!(
            "Nightly rate must be non-negative, got {rate}"
        )));
    }

    let now = now_millis();
    let rows = sqlx::query(
        "UPDATE room SET \
            number = COALESCE(?, number), \
            name = COALESCE(?, name), \
            room_type = COALESCE(?, room_type), \
            nightly_rate = COALESCE(?, nightly_rate), \
            status = COALESCE(?, status), \
            updated_at = ? \
         WHERE id = ?",
    )
    .bind(&data.number)
    .bind(&data.name)
    .bind(&data.room_type)
    .bind(data.nightly_rate)
    .bind(data.status)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Room {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Room {id} not found")))
}

/// Flip status only; used by checkout to send rooms to housekeeping
pub async fn set_status(
    tx: &mut sqlx::SqliteConnection,
    id: i64,
    status: RoomStatus,
) -> RepoResult<()> {
    sqlx::query("UPDATE room SET status = ?, updated_at = ? WHERE id = ?")
        .bind(status)
        .bind(now_millis())
        .bind(id)
        .execute(tx)
        .await?;
    Ok(())
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM room WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
