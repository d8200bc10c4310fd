//! Audit trail type definitions

use serde::{Deserialize, Serialize};

/// Audit action types (enum, not free text)
///
/// Grouped by domain so every financially sensitive operation has an
/// explicit identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    // ═══ Bookings ═══
    /// Booking created
    BookingCreated,
    /// Booking details updated
    BookingUpdated,
    /// Booking cancelled
    BookingCancelled,
    /// Guest checked in
    BookingCheckedIn,
    /// Guest checked out (settlement written)
    BookingCheckedOut,

    // ═══ Billing (financially sensitive) ═══
    /// Settlement bill written at checkout
    BillSettled,
    /// Consolidated bill created from several bookings
    BillMerged,
    /// Pre-bill sent to the guest
    PrebillSent,
    /// Payment link generated and sent
    PaymentLinkGenerated,

    // ═══ Cafe ═══
    /// Food order created
    OrderCreated,
    /// Food order status moved
    OrderStatusChanged,
    /// Food order cancelled
    OrderCancelled,

    // ═══ Extra services ═══
    /// Extra service charged to a booking
    ExtraServiceAdded,
    /// Extra service removed
    ExtraServiceRemoved,

    // ═══ Rooms ═══
    /// Room created
    RoomCreated,
    /// Room updated (rate, status)
    RoomUpdated,
    /// Room deleted
    RoomDeleted,
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// One audit trail entry
///
/// Held in the in-memory ring only; history is best-effort and bounded,
/// not a tamper-proof ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Process-local increasing sequence number
    pub id: u64,
    /// Timestamp (unix millis)
    pub timestamp: i64,
    pub action: AuditAction,
    /// Resource type ("booking", "bill", "order", ...)
    pub resource_type: String,
    /// Resource ID
    pub resource_id: String,
    /// Operator name as entered at the desk (None for system events)
    pub operator: Option<String>,
    /// Structured details (JSON)
    pub details: serde_json::Value,
}

/// Audit log query parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditQuery {
    /// Action filter
    pub action: Option<AuditAction>,
    /// Resource type filter
    pub resource_type: Option<String>,
    /// Max entries returned, newest last (default 50)
    pub limit: Option<usize>,
}

/// Audit log listing response
#[derive(Debug, Serialize)]
pub struct AuditListResponse {
    pub items: Vec<AuditEntry>,
    pub total: usize,
}
