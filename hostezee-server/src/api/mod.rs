//! API route modules
//!
//! One module per resource, each exposing a `router()` nested under its
//! own `/api/...` prefix:
//!
//! - [`health`] - liveness
//! - [`rooms`] - room management
//! - [`bookings`] - bookings, charges, preview, checkout, pre-bill, payment link
//! - [`orders`] - cafe food orders
//! - [`extra_services`] - billable extras
//! - [`bills`] - bill listing and merge
//! - [`audit_log`] - recent audit trail

pub mod audit_log;
pub mod bills;
pub mod bookings;
pub mod extra_services;
pub mod health;
pub mod orders;
pub mod rooms;

use axum::Router;

use crate::core::ServerState;

/// Assemble the full API router
pub fn router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(rooms::router())
        .merge(bookings::router())
        .merge(orders::router())
        .merge(extra_services::router())
        .merge(bills::router())
        .merge(audit_log::router())
}
