//! Bill Model - the financial settlement record for a booking

use serde::{Deserialize, Serialize};

/// Bill payment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum PaymentStatus {
    #[serde(rename = "UNPAID")]
    Unpaid,
    #[serde(rename = "PAID")]
    Paid,
    /// Settled later; carries an optional due date and reason
    #[serde(rename = "PENDING")]
    Pending,
}

impl Default for PaymentStatus {
    fn default() -> Self {
        Self::Unpaid
    }
}

/// Discount kind selected at checkout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    None,
    Percentage,
    Fixed,
}

impl Default for DiscountType {
    fn default() -> Self {
        Self::None
    }
}

/// Ad-hoc charge entered at checkout time
///
/// Never persisted on its own; valid rows are folded into the bill's
/// manual charges total. The amount arrives as the raw text the operator
/// typed, parsed leniently by the billing core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManualCharge {
    pub name: String,
    pub amount: String,
}

/// Bill record
///
/// One per booking (upsert keyed by `booking_id`); merged bills are
/// additional rows attached to the primary booking and carry the full
/// set of folded-in booking IDs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bill {
    pub id: i64,
    pub booking_id: i64,
    pub room_charges: f64,
    pub food_charges: f64,
    pub extra_charges: f64,
    pub manual_charges_total: f64,
    /// GST rate actually applied, percent (5 at checkout, 18 at merge)
    pub gst_rate: f64,
    pub gst_amount: f64,
    /// Service charge rate actually applied, percent
    pub service_charge_rate: f64,
    pub service_charge_amount: f64,
    pub discount_type: DiscountType,
    pub discount_value: f64,
    pub discount_amount: f64,
    /// subtotal + gst + service charge - discount
    pub total_amount: f64,
    pub advance_paid: f64,
    pub cash_received: f64,
    pub online_received: f64,
    /// Cash returned when the guest over-tenders
    pub change_due: f64,
    /// max(0, total - advance - cash - online)
    pub balance_amount: f64,
    pub payment_status: PaymentStatus,
    pub payment_method: Option<String>,
    /// Collection due date for Pending bills (unix millis)
    pub due_date: Option<i64>,
    pub pending_reason: Option<String>,
    /// All booking IDs folded into this bill; None for ordinary bills
    pub merged_booking_ids: Option<Vec<i64>>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Checkout request
///
/// Settles a booking: computes the final bill, writes it, and flips the
/// booking/room statuses. Tax flags select which revenue streams carry
/// GST; the rates themselves are server policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutRequest {
    #[serde(default)]
    pub gst_on_rooms: bool,
    #[serde(default)]
    pub gst_on_food: bool,
    #[serde(default)]
    pub include_service_charge: bool,
    #[serde(default)]
    pub discount_type: DiscountType,
    /// Raw discount value as typed ("10", "250.50"); parsed leniently
    pub discount_value: Option<String>,
    /// Accepted for frontend compatibility; the discount always applies
    /// to the post-tax total
    pub discount_applies_to: Option<String>,
    #[serde(default)]
    pub manual_charges: Vec<ManualCharge>,
    /// Final payment status: Paid or Pending
    pub payment_status: PaymentStatus,
    /// Required for Paid unless the balance is zero; not required for Pending
    pub payment_method: Option<String>,
    pub due_date: Option<i64>,
    pub pending_reason: Option<String>,
    /// Cash tendered at the desk (split settlement)
    pub cash_amount: Option<f64>,
    /// Online portion; derived from the balance when absent
    pub online_amount: Option<f64>,
    /// Operator confirmed the guest saw a pre-bill
    #[serde(default)]
    pub prebill_sent: bool,
    /// Operator sent a payment link instead
    #[serde(default)]
    pub payment_link_sent: bool,
    /// Explicit operator override of the pre-bill gate
    #[serde(default)]
    pub skip_confirmation: bool,
}

/// Bill preview request - same knobs as checkout, no settlement fields
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreviewBillRequest {
    #[serde(default)]
    pub gst_on_rooms: bool,
    #[serde(default)]
    pub gst_on_food: bool,
    #[serde(default)]
    pub include_service_charge: bool,
    #[serde(default)]
    pub discount_type: DiscountType,
    pub discount_value: Option<String>,
    /// Accepted for frontend compatibility; see [`CheckoutRequest`]
    pub discount_applies_to: Option<String>,
    #[serde(default)]
    pub manual_charges: Vec<ManualCharge>,
}

/// Merge request: fold several bookings' charges into one bill
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeBillsRequest {
    pub booking_ids: Vec<i64>,
    /// The booking the merged bill is attached to; must be in `booking_ids`
    pub primary_booking_id: i64,
}

/// Computed bill breakdown returned by preview (and embedded in checkout
/// responses); mirrors the billing core's result struct
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillBreakdownView {
    pub room_charges: f64,
    pub food_charges: f64,
    pub extra_charges: f64,
    pub manual_charges_total: f64,
    pub subtotal: f64,
    pub gst_rate: f64,
    pub gst_amount: f64,
    pub service_charge_rate: f64,
    pub service_charge_amount: f64,
    pub discount_amount: f64,
    pub total_amount: f64,
    pub advance_paid: f64,
    pub balance_due: f64,
}
