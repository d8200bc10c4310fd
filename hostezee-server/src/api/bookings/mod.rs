//! Booking API module
//!
//! Bookings plus everything that hangs off one: charges, linked orders
//! and extras, bill preview, pre-bill, payment link and checkout.

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/bookings", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", get(handler::get_by_id).put(handler::update))
        .route("/{id}/cancel", post(handler::cancel))
        .route("/{id}/check-in", post(handler::check_in))
        .route("/{id}/charges", get(handler::charges))
        .route("/{id}/bill", get(handler::settlement_bill))
        .route("/{id}/orders", get(handler::orders))
        .route("/{id}/extra-services", get(handler::extra_services))
        .route("/{id}/preview-bill", post(handler::preview_bill))
        .route("/{id}/prebill", post(handler::send_prebill))
        .route("/{id}/payment-link", post(handler::payment_link))
        .route("/{id}/checkout", post(handler::checkout))
}
