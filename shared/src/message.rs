//! Event bus message types
//!
//! Shared between the server's in-process event bus and any embedded
//! consumers (dashboards, audit readers). History is best-effort and
//! in-memory only; these types carry no durability guarantees.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Event bus message kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    /// Human-facing notification (toast material)
    Notification = 0,
    /// Resource change signal (created/updated/deleted)
    Sync = 1,
    /// Audit trail entry
    Audit = 2,
}

impl TryFrom<u8> for EventType {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(EventType::Notification),
            1 => Ok(EventType::Sync),
            2 => Ok(EventType::Audit),
            _ => Err(()),
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventType::Notification => write!(f, "notification"),
            EventType::Sync => write!(f, "sync"),
            EventType::Audit => write!(f, "audit"),
        }
    }
}

/// Resource change payload broadcast after a mutation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncPayload {
    /// Resource type ("booking", "bill", "room", ...)
    pub resource: String,
    /// Monotonic version per resource type
    pub version: u64,
    /// Change kind ("created", "updated", "deleted", "checked_out", ...)
    pub action: String,
    /// Resource ID
    pub id: String,
    /// Resource data (None for deletions)
    pub data: Option<serde_json::Value>,
}

/// Human-facing notification payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub title: String,
    pub body: String,
    /// Severity: "info" | "warning" | "error"
    pub level: String,
}

impl NotificationPayload {
    pub fn info(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            level: "info".to_string(),
        }
    }

    pub fn warning(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            level: "warning".to_string(),
        }
    }
}

/// Event bus message envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusMessage {
    pub request_id: Uuid,
    pub event_type: EventType,
    /// Emitting subsystem ("checkout", "merge", "api", ...)
    pub source: Option<String>,
    /// Unix millis at publish time
    pub timestamp: i64,
    pub payload: Vec<u8>,
}

impl BusMessage {
    pub fn new(event_type: EventType, payload: Vec<u8>) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            event_type,
            source: None,
            timestamp: crate::util::now_millis(),
            payload,
        }
    }

    /// Tag the emitting subsystem
    pub fn with_source(mut self, source: &str) -> Self {
        self.source = Some(source.to_string());
        self
    }

    /// Create a sync signal message
    pub fn sync(payload: &SyncPayload) -> Self {
        Self::new(
            EventType::Sync,
            serde_json::to_vec(payload).expect("Failed to serialize sync payload"),
        )
    }

    /// Create a notification message
    pub fn notification(payload: &NotificationPayload) -> Self {
        Self::new(
            EventType::Notification,
            serde_json::to_vec(payload).expect("Failed to serialize notification"),
        )
    }

    /// Create an audit trail message
    pub fn audit<T: Serialize>(entry: &T) -> Self {
        Self::new(
            EventType::Audit,
            serde_json::to_vec(entry).expect("Failed to serialize audit entry"),
        )
    }

    /// Parse the payload as the given type
    pub fn parse_payload<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.payload)
    }
}
