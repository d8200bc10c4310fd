//! Bill Repository
//!
//! Settlement bills are upserted keyed by `booking_id`; merged bills are
//! always fresh rows carrying the folded-in booking IDs as a JSON array.
//! Both writes run inside caller-owned transactions so status flips land
//! atomically with the bill.

use super::{RepoError, RepoResult};
use shared::models::{Bill, DiscountType, PaymentStatus};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, booking_id, room_charges, food_charges, extra_charges, \
    manual_charges_total, gst_rate, gst_amount, service_charge_rate, service_charge_amount, \
    discount_type, discount_value, discount_amount, total_amount, advance_paid, cash_received, \
    online_received, change_due, balance_amount, payment_status, payment_method, due_date, \
    pending_reason, merged_booking_ids, created_at, updated_at";

/// Raw row; `merged_booking_ids` is JSON text in the column
#[derive(Debug, sqlx::FromRow)]
struct BillRow {
    id: i64,
    booking_id: i64,
    room_charges: f64,
    food_charges: f64,
    extra_charges: f64,
    manual_charges_total: f64,
    gst_rate: f64,
    gst_amount: f64,
    service_charge_rate: f64,
    service_charge_amount: f64,
    discount_type: DiscountType,
    discount_value: f64,
    discount_amount: f64,
    total_amount: f64,
    advance_paid: f64,
    cash_received: f64,
    online_received: f64,
    change_due: f64,
    balance_amount: f64,
    payment_status: PaymentStatus,
    payment_method: Option<String>,
    due_date: Option<i64>,
    pending_reason: Option<String>,
    merged_booking_ids: Option<String>,
    created_at: i64,
    updated_at: i64,
}

impl From<BillRow> for Bill {
    fn from(row: BillRow) -> Self {
        let merged_booking_ids = row
            .merged_booking_ids
            .as_deref()
            .and_then(|raw| serde_json::from_str::<Vec<i64>>(raw).ok());
        Bill {
            id: row.id,
            booking_id: row.booking_id,
            room_charges: row.room_charges,
            food_charges: row.food_charges,
            extra_charges: row.extra_charges,
            manual_charges_total: row.manual_charges_total,
            gst_rate: row.gst_rate,
            gst_amount: row.gst_amount,
            service_charge_rate: row.service_charge_rate,
            service_charge_amount: row.service_charge_amount,
            discount_type: row.discount_type,
            discount_value: row.discount_value,
            discount_amount: row.discount_amount,
            total_amount: row.total_amount,
            advance_paid: row.advance_paid,
            cash_received: row.cash_received,
            online_received: row.online_received,
            change_due: row.change_due,
            balance_amount: row.balance_amount,
            payment_status: row.payment_status,
            payment_method: row.payment_method,
            due_date: row.due_date,
            pending_reason: row.pending_reason,
            merged_booking_ids,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Values for one bill write; filled from the billing core's breakdown
#[derive(Debug, Clone)]
pub struct BillWrite {
    pub booking_id: i64,
    pub room_charges: f64,
    pub food_charges: f64,
    pub extra_charges: f64,
    pub manual_charges_total: f64,
    pub gst_rate: f64,
    pub gst_amount: f64,
    pub service_charge_rate: f64,
    pub service_charge_amount: f64,
    pub discount_type: DiscountType,
    pub discount_value: f64,
    pub discount_amount: f64,
    pub total_amount: f64,
    pub advance_paid: f64,
    pub cash_received: f64,
    pub online_received: f64,
    pub change_due: f64,
    pub balance_amount: f64,
    pub payment_status: PaymentStatus,
    pub payment_method: Option<String>,
    pub due_date: Option<i64>,
    pub pending_reason: Option<String>,
    pub merged_booking_ids: Option<Vec<i64>>,
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Bill>> {
    let row = sqlx::query_as::<_, BillRow>(&format!("SELECT {COLUMNS} FROM bill WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Bill::from))
}

/// The settlement bill for a booking (merged bills excluded)
pub async fn find_settlement_for_booking(
    pool: &SqlitePool,
    booking_id: i64,
) -> RepoResult<Option<Bill>> {
    let row = sqlx::query_as::<_, BillRow>(&format!(
        "SELECT {COLUMNS} FROM bill WHERE booking_id = ? AND merged_booking_ids IS NULL"
    ))
    .bind(booking_id)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(Bill::from))
}

pub async fn find_all(pool: &SqlitePool, limit: i32, offset: i32) -> RepoResult<Vec<Bill>> {
    let rows = sqlx::query_as::<_, BillRow>(&format!(
        "SELECT {COLUMNS} FROM bill ORDER BY created_at DESC LIMIT ? OFFSET ?"
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(Bill::from).collect())
}

/// Upsert the settlement bill for a booking inside a caller transaction.
///
/// Re-running checkout for the same booking overwrites the previous
/// settlement instead of stacking rows.
pub async fn upsert_settlement(
    tx: &mut sqlx::SqliteConnection,
    write: &BillWrite,
) -> RepoResult<i64> {
    if write.merged_booking_ids.is_some() {
        return Err(RepoError::Validation(
            "Settlement upsert cannot carry merged booking IDs".into(),
        ));
    }

    let id = snowflake_id();
    let now = now_millis();

    sqlx::query(
        "INSERT INTO bill (id, booking_id, room_charges, food_charges, extra_charges, \
            manual_charges_total, gst_rate, gst_amount, service_charge_rate, \
            service_charge_amount, discount_type, discount_value, discount_amount, \
            total_amount, advance_paid, cash_received, online_received, change_due, \
            balance_amount, payment_status, payment_method, due_date, pending_reason, \
            merged_booking_ids, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, NULL, ?, ?) \
         ON CONFLICT(booking_id) WHERE merged_booking_ids IS NULL DO UPDATE SET \
            room_charges = excluded.room_charges, \
            food_charges = excluded.food_charges, \
            extra_charges = excluded.extra_charges, \
            manual_charges_total = excluded.manual_charges_total, \
            gst_rate = excluded.gst_rate, \
            gst_amount = excluded.gst_amount, \
            service_charge_rate = excluded.service_charge_rate, \
            service_charge_amount = excluded.service_charge_amount, \
            discount_type = excluded.discount_type, \
            discount_value = excluded.discount_value, \
            discount_amount = excluded.discount_amount, \
            total_amount = excluded.total_amount, \
            advance_paid = excluded.advance_paid, \
            cash_received = excluded.cash_received, \
            online_received = excluded.online_received, \
            change_due = excluded.change_due, \
            balance_amount = excluded.balance_amount, \
            payment_status = excluded.payment_status, \
            payment_method = excluded.payment_method, \
            due_date = excluded.due_date, \
            pending_reason = excluded.pending_reason, \
            updated_at = excluded.updated_at",
    )
    .bind(id)
    .bind(write.booking_id)
    .bind(write.room_charges)
    .bind(write.food_charges)
    .bind(write.extra_charges)
    .bind(write.manual_charges_total)
    .bind(write.gst_rate)
    .bind(write.gst_amount)
    .bind(write.service_charge_rate)
    .bind(write.service_charge_amount)
    .bind(write.discount_type)
    .bind(write.discount_value)
    .bind(write.discount_amount)
    .bind(write.total_amount)
    .bind(write.advance_paid)
    .bind(write.cash_received)
    .bind(write.online_received)
    .bind(write.change_due)
    .bind(write.balance_amount)
    .bind(write.payment_status)
    .bind(&write.payment_method)
    .bind(write.due_date)
    .bind(&write.pending_reason)
    .bind(now)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    // The row may predate this call; fetch the surviving ID
    let bill_id: i64 = sqlx::query_scalar(
        "SELECT id FROM bill WHERE booking_id = ? AND merged_booking_ids IS NULL",
    )
    .bind(write.booking_id)
    .fetch_one(&mut *tx)
    .await?;

    Ok(bill_id)
}

/// Insert a merged bill inside a caller transaction; always a new row
pub async fn create_merged(
    tx: &mut sqlx::SqliteConnection,
    write: &BillWrite,
) -> RepoResult<i64> {
    let merged = write.merged_booking_ids.as_ref().ok_or_else(|| {
        RepoError::Validation("Merged bill requires the folded-in booking IDs".into())
    })?;
    let merged_json = serde_json::to_string(merged)
        .map_err(|e| RepoError::Database(format!("Failed to encode booking IDs: {e}")))?;

    let id = snowflake_id();
    let now = now_millis();

    sqlx::query(
        "INSERT INTO bill (id, booking_id, room_charges, food_charges, extra_charges, \
            manual_charges_total, gst_rate, gst_amount, service_charge_rate, \
            service_charge_amount, discount_type, discount_value, discount_amount, \
            total_amount, advance_paid, cash_received, online_received, change_due, \
            balance_amount, payment_status, payment_method, due_date, pending_reason, \
            merged_booking_ids, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(write.booking_id)
    .bind(write.room_charges)
    .bind(write.food_charges)
    .bind(write.extra_charges)
    .bind(write.manual_charges_total)
    .bind(write.gst_rate)
    .bind(write.gst_amount)
    .bind(write.service_charge_rate)
    .bind(write.service_charge_amount)
    .bind(write.discount_type)
    .bind(write.discount_value)
    .bind(write.discount_amount)
    .bind(write.total_amount)
    .bind(write.advance_paid)
    .bind(write.cash_received)
    .bind(write.online_received)
    .bind(write.change_due)
    .bind(write.balance_amount)
    .bind(write.payment_status)
    .bind(&write.payment_method)
    .bind(write.due_date)
    .bind(&write.pending_reason)
    .bind(&merged_json)
    .bind(now)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    Ok(id)
}
