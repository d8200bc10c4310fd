//! Split settlement resolution
//!
//! Nets the grand total against cash tendered at the desk and the online
//! portion. Cash is deliberately NOT capped at the balance: a guest
//! handing over a larger note is recorded in full and the surplus comes
//! back as change.

use rust_decimal::prelude::*;
use shared::error::{AppError, AppResult};

use super::money::{to_decimal, to_f64};

/// Resolved split settlement for a checkout
#[derive(Debug, Clone, PartialEq)]
pub struct SplitTender {
    /// Cash tendered, as entered (not clamped to the balance)
    pub cash_received: f64,
    /// Online portion: max(0, balance - cash)
    pub online_received: f64,
    /// Cash returned to the guest: max(0, cash - balance)
    pub change_due: f64,
    /// What remains unpaid after both portions
    pub outstanding: f64,
}

/// Resolve the cash/online split against a balance due.
///
/// The online portion is always derived from the balance and the cash
/// tendered; a caller-supplied online amount only tightens validation
/// (it must not be negative). Negative or non-finite inputs are rejected
/// before any money moves.
pub fn resolve_split(
    balance_due: f64,
    cash_amount: Option<f64>,
    online_amount: Option<f64>,
) -> AppResult<SplitTender> {
    for (value, field) in [(cash_amount, "cash_amount"), (online_amount, "online_amount")] {
        if let Some(v) = value {
            if !v.is_finite() {
                return Err(AppError::validation(format!(
                    "{field} must be a finite number"
                )));
            }
            if v < 0.0 {
                return Err(AppError::validation(format!(
                    "{field} must be non-negative, got {v}"
                )));
            }
        }
    }

    let balance = to_decimal(balance_due).max(Decimal::ZERO);
    let cash = to_decimal(cash_amount.unwrap_or(0.0));

    let online = (balance - cash).max(Decimal::ZERO);
    let change = (cash - balance).max(Decimal::ZERO);
    let outstanding = (balance - cash - online).max(Decimal::ZERO);

    Ok(SplitTender {
        cash_received: to_f64(cash),
        online_received: to_f64(online),
        change_due: to_f64(change),
        outstanding: to_f64(outstanding),
    })
}

/// Resolve a partial collection against a balance that stays open.
///
/// Used for Pending settlements: nothing is derived, both portions are
/// recorded as entered and the remainder stays on the bill for later
/// collection.
pub fn resolve_partial(
    balance_due: f64,
    cash_amount: Option<f64>,
    online_amount: Option<f64>,
) -> AppResult<SplitTender> {
    for (value, field) in [(cash_amount, "cash_amount"), (online_amount, "online_amount")] {
        if let Some(v) = value {
            if !v.is_finite() {
                return Err(AppError::validation(format!(
                    "{field} must be a finite number"
                )));
            }
            if v < 0.0 {
                return Err(AppError::validation(format!(
                    "{field} must be non-negative, got {v}"
                )));
            }
        }
    }

    let balance = to_decimal(balance_due).max(Decimal::ZERO);
    let cash = to_decimal(cash_amount.unwrap_or(0.0));
    let online = to_decimal(online_amount.unwrap_or(0.0));

    let collected = cash + online;
    let change = (collected - balance).max(Decimal::ZERO);
    let outstanding = (balance - collected).max(Decimal::ZERO);

    Ok(SplitTender {
        cash_received: to_f64(cash),
        online_received: to_f64(online),
        change_due: to_f64(change),
        outstanding: to_f64(outstanding),
    })
}
