//! Merged-bill totals
//!
//! Combines charges from several bookings into one consolidated bill at
//! the fixed merge policy (GST 18%, service charge 10%, both flat on the
//! full subtotal). Pure arithmetic; the orchestration around it lives in
//! `services::merge`.

use rust_decimal::prelude::*;

use super::money::{round_money, to_decimal, to_f64};
use super::policy::TaxPolicy;

/// Totals for a consolidated multi-booking bill
#[derive(Debug, Clone, PartialEq)]
pub struct MergeBreakdown {
    /// Sum of each booking's room-side total
    pub room_charges: f64,
    /// Sum of the food orders across the booking set
    pub food_charges: f64,
    /// Sum of the extra services across the booking set
    pub extra_charges: f64,
    pub subtotal: f64,
    pub gst_rate: f64,
    pub gst_amount: f64,
    pub service_charge_rate: f64,
    pub service_charge_amount: f64,
    pub total_amount: f64,
}

/// Compute consolidated totals over the aggregated charge streams.
///
/// Unlike single-booking checkout, GST here applies flat to the whole
/// subtotal; there is no per-stream scoping, no discount and no advance
/// netting at merge time.
pub fn compute_merge(room_charges: f64, food_charges: f64, extra_charges: f64) -> MergeBreakdown {
    let policy = TaxPolicy::MERGE;

    let room = to_decimal(room_charges);
    let food = to_decimal(food_charges);
    let extra = to_decimal(extra_charges);
    let subtotal = room + food + extra;

    let gst = round_money(subtotal * policy.gst_fraction());
    let service_charge = round_money(subtotal * policy.service_charge_fraction());
    let total = subtotal + gst + service_charge;

    MergeBreakdown {
        room_charges: to_f64(room),
        food_charges: to_f64(food),
        extra_charges: to_f64(extra),
        subtotal: to_f64(subtotal),
        gst_rate: to_f64(policy.gst_rate),
        gst_amount: to_f64(gst),
        service_charge_rate: to_f64(policy.service_charge_rate),
        service_charge_amount: to_f64(service_charge),
        total_amount: to_f64(total),
    }
}
