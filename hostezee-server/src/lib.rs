//! Hostezee Server - multi-property hotel/hostel management backend
//!
//! # Architecture
//!
//! - **Billing core** (`billing`): pure decimal calculations for charge
//!   aggregation, GST/service charge, discounts, split settlement and
//!   merged-bill totals
//! - **Services** (`services`): checkout and merge orchestration, guest
//!   messaging collaborators
//! - **Database** (`db`): embedded SQLite via sqlx, repository modules
//! - **Event bus** (`events`): in-process pub/sub with bounded history
//! - **Audit** (`audit`): best-effort in-memory trail of sensitive ops
//! - **HTTP API** (`api`): RESTful routes
//!
//! # Module layout
//!
//! ```text
//! hostezee-server/src/
//! ├── core/          # config, state, server
//! ├── billing/       # pure calculation core
//! ├── services/      # checkout, merge, notifications
//! ├── db/            # pool + repositories
//! ├── events/        # event bus
//! ├── audit/         # audit trail
//! ├── api/           # HTTP routes and handlers
//! └── utils/         # logging, validation
//! ```

pub mod api;
pub mod audit;
pub mod billing;
pub mod core;
pub mod db;
pub mod events;
pub mod services;
pub mod utils;

// Re-export common types
pub use audit::{AuditAction, AuditService};
pub use billing::{BillBreakdown, DiscountSpec, TaxPolicy};
pub use core::{Config, Server, ServerState};
pub use db::DbService;
pub use events::EventBus;
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
