//! Audit trail service
//!
//! Records who did what to which resource, keeps the last entries in
//! memory and republishes each entry on the event bus for live
//! consumers. Constructed once at startup and injected via
//! `ServerState`; never a module-level singleton.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use shared::message::BusMessage;
use shared::util::now_millis;

use super::types::{AuditAction, AuditEntry, AuditQuery};
use crate::events::EventBus;

/// Entries retained in memory
const HISTORY_CAPACITY: usize = 100;

/// In-memory audit trail
pub struct AuditService {
    bus: Arc<EventBus>,
    entries: Mutex<VecDeque<AuditEntry>>,
    next_id: AtomicU64,
}

impl std::fmt::Debug for AuditService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditService").finish_non_exhaustive()
    }
}

impl AuditService {
    pub fn new(bus: Arc<EventBus>) -> Self {
        Self {
            bus,
            entries: Mutex::new(VecDeque::with_capacity(HISTORY_CAPACITY)),
            next_id: AtomicU64::new(1),
        }
    }

    /// Record an audit entry and publish it on the bus
    pub fn record(
        &self,
        action: AuditAction,
        resource_type: impl Into<String>,
        resource_id: impl Into<String>,
        operator: Option<String>,
        details: serde_json::Value,
    ) -> AuditEntry {
        let entry = AuditEntry {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            timestamp: now_millis(),
            action,
            resource_type: resource_type.into(),
            resource_id: resource_id.into(),
            operator,
            details,
        };

        tracing::info!(
            target: "audit",
            action = %entry.action,
            resource = %entry.resource_type,
            id = %entry.resource_id,
            "audit"
        );

        {
            let mut entries = self.entries.lock().expect("audit history lock poisoned");
            if entries.len() == HISTORY_CAPACITY {
                entries.pop_front();
            }
            entries.push_back(entry.clone());
        }

        self.bus.publish(BusMessage::audit(&entry).with_source("audit"));
        entry
    }

    /// Query retained entries, oldest first
    pub fn query(&self, q: &AuditQuery) -> Vec<AuditEntry> {
        let entries = self.entries.lock().expect("audit history lock poisoned");
        let limit = q.limit.unwrap_or(50);

        entries
            .iter()
            .filter(|e| q.action.is_none_or(|a| e.action == a))
            .filter(|e| {
                q.resource_type
                    .as_deref()
                    .is_none_or(|rt| e.resource_type == rt)
            })
            .rev()
            .take(limit)
            .cloned()
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect()
    }

    /// Number of retained entries
    pub fn len(&self) -> usize {
        self.entries.lock().expect("audit history lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn service() -> AuditService {
        AuditService::new(Arc::new(EventBus::new()))
    }

    #[test]
    fn test_record_assigns_increasing_ids() {
        let audit = service();
        let a = audit.record(
            AuditAction::BookingCreated,
            "booking",
            "1",
            None,
            json!({}),
        );
        let b = audit.record(
            AuditAction::BookingCheckedOut,
            "booking",
            "1",
            Some("priya".to_string()),
            json!({"total": 2600.0}),
        );
        assert!(b.id > a.id);
        assert_eq!(audit.len(), 2);
    }

    #[test]
    fn test_record_publishes_on_bus() {
        let bus = Arc::new(EventBus::new());
        let audit = AuditService::new(bus.clone());

        audit.record(AuditAction::BillMerged, "bill", "9", None, json!({}));

        let recent = bus.recent();
        assert_eq!(recent.len(), 1);
        let entry: AuditEntry = recent[0].parse_payload().unwrap();
        assert_eq!(entry.action, AuditAction::BillMerged);
    }

    #[test]
    fn test_history_bounded() {
        let audit = service();
        for n in 0..130 {
            audit.record(
                AuditAction::OrderStatusChanged,
                "order",
                n.to_string(),
                None,
                json!({}),
            );
        }
        assert_eq!(audit.len(), 100);

        let all = audit.query(&AuditQuery {
            limit: Some(200),
            ..Default::default()
        });
        assert_eq!(all.first().unwrap().resource_id, "30");
    }

    #[test]
    fn test_query_filters() {
        let audit = service();
        audit.record(AuditAction::BookingCreated, "booking", "1", None, json!({}));
        audit.record(AuditAction::BillSettled, "bill", "2", None, json!({}));
        audit.record(AuditAction::BillMerged, "bill", "3", None, json!({}));

        let bills = audit.query(&AuditQuery {
            resource_type: Some("bill".to_string()),
            ..Default::default()
        });
        assert_eq!(bills.len(), 2);

        let merged = audit.query(&AuditQuery {
            action: Some(AuditAction::BillMerged),
            ..Default::default()
        });
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].resource_id, "3");
    }
}
