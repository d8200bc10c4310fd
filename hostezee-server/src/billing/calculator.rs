//! Bill breakdown calculator
//!
//! Pure calculation of a booking's settlement bill:
//! 1. Aggregate charges (room + food + extra + valid manual charges)
//! 2. Apply GST per revenue stream and the optional service charge
//! 3. Apply the discount on the post-tax total
//!
//! No I/O and no hidden state: recomputing from the same inputs yields
//! identical numbers.

use rust_decimal::prelude::*;
use shared::models::{BillBreakdownView, BookingCharges, DiscountType, ManualCharge};

use super::money::{parse_amount, round_money, to_decimal, to_f64};
use super::policy::TaxPolicy;

/// Discount selection as it arrives from the operator
#[derive(Debug, Clone, Default)]
pub struct DiscountSpec {
    pub discount_type: DiscountType,
    /// Raw value as typed; parsed leniently (unparsable -> no discount)
    pub value: Option<String>,
}

impl DiscountSpec {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn percentage(value: impl Into<String>) -> Self {
        Self {
            discount_type: DiscountType::Percentage,
            value: Some(value.into()),
        }
    }

    pub fn fixed(value: impl Into<String>) -> Self {
        Self {
            discount_type: DiscountType::Fixed,
            value: Some(value.into()),
        }
    }
}

/// Result of a bill calculation
///
/// All intermediate values are kept for display and persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct BillBreakdown {
    pub room_charges: f64,
    pub food_charges: f64,
    pub extra_charges: f64,
    /// Sum of the valid manual charge rows
    pub manual_charges_total: f64,
    /// room + food + extra + manual
    pub subtotal: f64,
    /// GST percentage applied (policy rate)
    pub gst_rate: f64,
    pub gst_amount: f64,
    /// Service charge percentage applied (policy rate)
    pub service_charge_rate: f64,
    pub service_charge_amount: f64,
    /// Discount value as parsed (percent or fixed amount)
    pub discount_value: f64,
    pub discount_amount: f64,
    /// subtotal + gst + service charge - discount
    pub total_amount: f64,
    pub advance_paid: f64,
    /// max(0, total - advance)
    pub balance_due: f64,
}

impl BillBreakdown {
    pub fn to_view(&self) -> BillBreakdownView {
        BillBreakdownView {
            room_charges: self.room_charges,
            food_charges: self.food_charges,
            extra_charges: self.extra_charges,
            manual_charges_total: self.manual_charges_total,
            subtotal: self.subtotal,
            gst_rate: self.gst_rate,
            gst_amount: self.gst_amount,
            service_charge_rate: self.service_charge_rate,
            service_charge_amount: self.service_charge_amount,
            discount_amount: self.discount_amount,
            total_amount: self.total_amount,
            advance_paid: self.advance_paid,
            balance_due: self.balance_due,
        }
    }
}

/// Sum the valid manual charge rows.
///
/// A row counts only when its name is non-empty after trimming AND its
/// amount parses to a strictly positive number; everything else is
/// silently dropped so a half-filled grid never blocks checkout.
pub fn sum_manual_charges(manual_charges: &[ManualCharge]) -> Decimal {
    manual_charges
        .iter()
        .filter(|c| !c.name.trim().is_empty())
        .map(|c| parse_amount(&c.amount))
        .filter(|amount| *amount > Decimal::ZERO)
        .sum()
}

/// Calculate the full bill breakdown for one booking.
///
/// # Calculation Steps
/// 1. `subtotal = room + food + extra + valid manual charges`
/// 2. GST per stream: rooms and food each carry GST only when flagged
/// 3. Service charge on the full subtotal when enabled
/// 4. Discount on the post-tax total (the last deduction), clamped so
///    the grand total never goes negative
/// 5. `balance_due = max(0, total - advance_paid)`
pub fn compute_bill(
    charges: &BookingCharges,
    manual_charges: &[ManualCharge],
    gst_on_rooms: bool,
    gst_on_food: bool,
    include_service_charge: bool,
    discount: &DiscountSpec,
    policy: TaxPolicy,
) -> BillBreakdown {
    let room = to_decimal(charges.room_charges);
    let food = to_decimal(charges.food_charges);
    let extra = to_decimal(charges.extra_charges);
    let manual = sum_manual_charges(manual_charges);

    // Step 1: subtotal
    let subtotal = room + food + extra + manual;

    // Step 2: GST, scoped per revenue stream
    let gst_fraction = policy.gst_fraction();
    let mut gst = Decimal::ZERO;
    if gst_on_rooms {
        gst += room * gst_fraction;
    }
    if gst_on_food {
        gst += food * gst_fraction;
    }
    let gst = round_money(gst);

    // Step 3: service charge on the full subtotal
    let service_charge = if include_service_charge {
        round_money(subtotal * policy.service_charge_fraction())
    } else {
        Decimal::ZERO
    };

    let pre_discount_total = subtotal + gst + service_charge;

    // Step 4: discount on the post-tax total
    let discount_value = match discount.discount_type {
        DiscountType::None => Decimal::ZERO,
        _ => discount
            .value
            .as_deref()
            .map(parse_amount)
            .unwrap_or(Decimal::ZERO)
            .max(Decimal::ZERO),
    };
    let discount_amount = match discount.discount_type {
        DiscountType::None => Decimal::ZERO,
        DiscountType::Percentage => {
            round_money(pre_discount_total * discount_value / Decimal::ONE_HUNDRED)
        }
        DiscountType::Fixed => discount_value,
    }
    .min(pre_discount_total.max(Decimal::ZERO));

    let total = (pre_discount_total - discount_amount).max(Decimal::ZERO);

    // Step 5: net against the advance
    let advance = to_decimal(charges.advance_paid);
    let balance_due = (total - advance).max(Decimal::ZERO);

    BillBreakdown {
        room_charges: to_f64(room),
        food_charges: to_f64(food),
        extra_charges: to_f64(extra),
        manual_charges_total: to_f64(manual),
        subtotal: to_f64(subtotal),
        gst_rate: to_f64(policy.gst_rate),
        gst_amount: to_f64(gst),
        service_charge_rate: to_f64(policy.service_charge_rate),
        service_charge_amount: to_f64(service_charge),
        discount_value: to_f64(discount_value),
        discount_amount: to_f64(discount_amount),
        total_amount: to_f64(total),
        advance_paid: to_f64(advance),
        balance_due: to_f64(balance_due),
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    fn charges(room: f64, food: f64, extra: f64, advance: f64) -> BookingCharges {
        BookingCharges {
            room_charges: room,
            food_charges: food,
            extra_charges: extra,
            advance_paid: advance,
        }
    }

    fn manual(name: &str, amount: &str) -> ManualCharge {
        ManualCharge {
            name: name.to_string(),
            amount: amount.to_string(),
        }
    }

    // ==================== Charge Aggregation ====================

    #[test]
    fn test_subtotal_sums_all_streams() {
        let result = compute_bill(
            &charges(2000.0, 500.0, 300.0, 0.0),
            &[manual("Laundry", "150")],
            false,
            false,
            false,
            &DiscountSpec::none(),
            TaxPolicy::CHECKOUT,
        );

        assert_eq!(result.subtotal, 2950.0);
        assert_eq!(result.manual_charges_total, 150.0);
        assert_eq!(result.total_amount, 2950.0);
    }

    #[test]
    fn test_invalid_manual_charges_dropped() {
        // Empty name, unparsable amount, zero and negative amounts all
        // contribute nothing
        let result = compute_bill(
            &charges(1000.0, 0.0, 0.0, 0.0),
            &[
                manual("", "500"),
                manual("Laundry", "abc"),
                manual("Minibar", "0"),
                manual("Towel", "-20"),
                manual("  ", "100"),
                manual("Late fee", "75.50"),
            ],
            false,
            false,
            false,
            &DiscountSpec::none(),
            TaxPolicy::CHECKOUT,
        );

        assert_eq!(result.manual_charges_total, 75.5);
        assert_eq!(result.subtotal, 1075.5);
    }

    // ==================== GST Scoping ====================

    #[test]
    fn test_gst_on_rooms_only() {
        // Rooms 2000, food 500, GST on rooms only:
        // subtotal=2500, gst=100 (5% of 2000), total=2600
        let result = compute_bill(
            &charges(2000.0, 500.0, 0.0, 0.0),
            &[],
            true,
            false,
            false,
            &DiscountSpec::none(),
            TaxPolicy::CHECKOUT,
        );

        assert_eq!(result.subtotal, 2500.0);
        assert_eq!(result.gst_amount, 100.0);
        assert_eq!(result.service_charge_amount, 0.0);
        assert_eq!(result.total_amount, 2600.0);
        assert_eq!(result.balance_due, 2600.0);
    }

    #[test]
    fn test_gst_on_both_streams() {
        let result = compute_bill(
            &charges(2000.0, 500.0, 0.0, 0.0),
            &[],
            true,
            true,
            false,
            &DiscountSpec::none(),
            TaxPolicy::CHECKOUT,
        );

        // 5% of 2000 + 5% of 500
        assert_eq!(result.gst_amount, 125.0);
        assert_eq!(result.total_amount, 2625.0);
    }

    #[test]
    fn test_gst_never_touches_extras_or_manual() {
        let result = compute_bill(
            &charges(1000.0, 200.0, 500.0, 0.0),
            &[manual("Taxi tip", "100")],
            true,
            true,
            false,
            &DiscountSpec::none(),
            TaxPolicy::CHECKOUT,
        );

        // GST base is rooms+food only
        assert_eq!(result.gst_amount, 60.0);
        assert_eq!(result.subtotal, 1800.0);
    }

    #[test]
    fn test_service_charge_on_full_subtotal() {
        let result = compute_bill(
            &charges(1000.0, 200.0, 300.0, 0.0),
            &[manual("Extra bed", "500")],
            false,
            false,
            true,
            &DiscountSpec::none(),
            TaxPolicy::CHECKOUT,
        );

        // 10% of 2000 (room+food+extra+manual)
        assert_eq!(result.subtotal, 2000.0);
        assert_eq!(result.service_charge_amount, 200.0);
        assert_eq!(result.total_amount, 2200.0);
    }

    // ==================== Discounts ====================

    #[test]
    fn test_percentage_discount_on_post_tax_total() {
        // 2500 subtotal + 100 gst = 2600; 10% discount = 260; total 2340
        let result = compute_bill(
            &charges(2000.0, 500.0, 0.0, 0.0),
            &[],
            true,
            false,
            false,
            &DiscountSpec::percentage("10"),
            TaxPolicy::CHECKOUT,
        );

        assert_eq!(result.discount_amount, 260.0);
        assert_eq!(result.total_amount, 2340.0);
        assert_eq!(result.balance_due, 2340.0);
    }

    #[test]
    fn test_fixed_discount() {
        let result = compute_bill(
            &charges(2000.0, 0.0, 0.0, 0.0),
            &[],
            false,
            false,
            false,
            &DiscountSpec::fixed("250.50"),
            TaxPolicy::CHECKOUT,
        );

        assert_eq!(result.discount_amount, 250.5);
        assert_eq!(result.total_amount, 1749.5);
    }

    #[test]
    fn test_unparsable_discount_is_zero() {
        let result = compute_bill(
            &charges(1000.0, 0.0, 0.0, 0.0),
            &[],
            false,
            false,
            false,
            &DiscountSpec::percentage("ten percent"),
            TaxPolicy::CHECKOUT,
        );

        assert_eq!(result.discount_amount, 0.0);
        assert_eq!(result.total_amount, 1000.0);
    }

    #[test]
    fn test_fixed_discount_cannot_push_total_negative() {
        let result = compute_bill(
            &charges(100.0, 0.0, 0.0, 0.0),
            &[],
            false,
            false,
            false,
            &DiscountSpec::fixed("500"),
            TaxPolicy::CHECKOUT,
        );

        assert_eq!(result.discount_amount, 100.0);
        assert_eq!(result.total_amount, 0.0);
    }

    // ==================== Balance ====================

    #[test]
    fn test_advance_netted_from_total() {
        let result = compute_bill(
            &charges(2000.0, 500.0, 0.0, 1000.0),
            &[],
            true,
            false,
            false,
            &DiscountSpec::none(),
            TaxPolicy::CHECKOUT,
        );

        assert_eq!(result.total_amount, 2600.0);
        assert_eq!(result.balance_due, 1600.0);
    }

    #[test]
    fn test_balance_never_negative() {
        let result = compute_bill(
            &charges(500.0, 0.0, 0.0, 2000.0),
            &[],
            false,
            false,
            false,
            &DiscountSpec::none(),
            TaxPolicy::CHECKOUT,
        );

        assert_eq!(result.total_amount, 500.0);
        assert_eq!(result.balance_due, 0.0);
    }

    // ==================== Invariants ====================

    #[test]
    fn test_total_identity_holds() {
        use super::super::money::{MONEY_TOLERANCE, to_decimal};

        let result = compute_bill(
            &charges(1234.56, 789.10, 55.5, 100.0),
            &[manual("Misc", "44.44")],
            true,
            true,
            true,
            &DiscountSpec::percentage("7.5"),
            TaxPolicy::CHECKOUT,
        );

        let expected = result.subtotal + result.gst_amount + result.service_charge_amount
            - result.discount_amount;
        let diff = (to_decimal(result.total_amount) - to_decimal(expected)).abs();
        assert!(diff <= MONEY_TOLERANCE);
    }

    #[test]
    fn test_idempotent() {
        let c = charges(999.99, 123.45, 67.89, 50.0);
        let m = vec![manual("Laundry", "30")];
        let d = DiscountSpec::percentage("12.5");

        let a = compute_bill(&c, &m, true, false, true, &d, TaxPolicy::CHECKOUT);
        let b = compute_bill(&c, &m, true, false, true, &d, TaxPolicy::CHECKOUT);
        assert_eq!(a, b);
    }

    #[test]
    fn test_merge_policy_rates_flow_through() {
        let result = compute_bill(
            &charges(1000.0, 0.0, 0.0, 0.0),
            &[],
            true,
            false,
            true,
            &DiscountSpec::none(),
            TaxPolicy::MERGE,
        );

        assert_eq!(result.gst_rate, 18.0);
        assert_eq!(result.gst_amount, 180.0);
        assert_eq!(result.service_charge_amount, 100.0);
    }
}
