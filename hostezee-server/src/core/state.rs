//! Server state
//!
//! `ServerState` holds shared references to every service: the database
//! pool, the event bus, the audit trail and the notifier. Cloning is a
//! shallow Arc copy, which is what axum expects from its state type.

use std::sync::Arc;

use dashmap::DashMap;
use shared::message::{BusMessage, SyncPayload};
use sqlx::SqlitePool;

use crate::audit::AuditService;
use crate::core::Config;
use crate::db::DbService;
use crate::events::EventBus;
use crate::services::notify::{NoopNotifier, Notifier, WebhookNotifier};

/// Resource version manager
///
/// Lock-free per-resource version counters backing `broadcast_sync`, so
/// clients can order change notifications without timestamps.
#[derive(Debug, Default)]
pub struct ResourceVersions {
    versions: DashMap<String, u64>,
}

impl ResourceVersions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment the version for a resource type and return the new value
    pub fn increment(&self, resource: &str) -> u64 {
        let mut entry = self.versions.entry(resource.to_string()).or_insert(0);
        *entry += 1;
        *entry
    }

    /// Current version for a resource type (0 when never bumped)
    pub fn get(&self, resource: &str) -> u64 {
        self.versions.get(resource).map(|v| *v).unwrap_or(0)
    }
}

/// Shared server state
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    /// SQLite connection pool
    pub pool: SqlitePool,
    /// In-process event bus (injected, constructed once at startup)
    pub bus: Arc<EventBus>,
    /// Audit trail
    pub audit: Arc<AuditService>,
    /// Guest messaging collaborator
    pub notifier: Arc<dyn Notifier>,
    /// Per-resource version counters for sync broadcasts
    pub resource_versions: Arc<ResourceVersions>,
}

impl ServerState {
    /// Initialize every service in dependency order:
    /// work dir -> database -> event bus -> audit -> notifier
    pub async fn initialize(config: &Config) -> Result<Self, shared::error::AppError> {
        config
            .ensure_work_dir_structure()
            .map_err(|e| shared::error::AppError::internal(format!("Work dir setup: {e}")))?;

        let db_path = config.database_path();
        let db = DbService::new(&db_path.to_string_lossy()).await?;

        Ok(Self::with_db(config.clone(), db))
    }

    /// Assemble state around an existing database (tests use in-memory)
    pub fn with_db(config: Config, db: DbService) -> Self {
        let bus = Arc::new(EventBus::new());
        let audit = Arc::new(AuditService::new(bus.clone()));
        let notifier: Arc<dyn Notifier> = match &config.notify_gateway_url {
            Some(url) => Arc::new(WebhookNotifier::new(url.clone())),
            None => Arc::new(NoopNotifier),
        };

        Self {
            config,
            pool: db.pool,
            bus,
            audit,
            notifier,
            resource_versions: Arc::new(ResourceVersions::new()),
        }
    }

    /// Broadcast a resource change to every bus subscriber.
    ///
    /// The version number is auto-incremented per resource type.
    pub fn broadcast_sync<T: serde::Serialize>(
        &self,
        resource: &str,
        action: &str,
        id: &str,
        data: Option<&T>,
    ) {
        let version = self.resource_versions.increment(resource);
        let payload = SyncPayload {
            resource: resource.to_string(),
            version,
            action: action.to_string(),
            id: id.to_string(),
            data: data.and_then(|d| serde_json::to_value(d).ok()),
        };
        self.bus.publish(BusMessage::sync(&payload));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_versions_increment() {
        let versions = ResourceVersions::new();
        assert_eq!(versions.get("booking"), 0);
        assert_eq!(versions.increment("booking"), 1);
        assert_eq!(versions.increment("booking"), 2);
        assert_eq!(versions.increment("bill"), 1);
        assert_eq!(versions.get("booking"), 2);
    }
}
