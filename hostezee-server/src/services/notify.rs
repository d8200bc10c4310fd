//! Notification collaborators
//!
//! Pre-bills and payment links leave the building through a messaging
//! gateway (WhatsApp templates, payment provider). The gateway is an
//! opaque collaborator behind the [`Notifier`] trait; failures are
//! reported to the caller and never touch local state, because these
//! calls precede any mutation in their flows.

use async_trait::async_trait;
use serde_json::json;
use shared::error::{AppError, AppResult};
use shared::models::{BillBreakdownView, Booking};

/// Outbound guest messaging seam
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send an itemized pre-bill to the guest for review
    async fn send_prebill(&self, booking: &Booking, bill: &BillBreakdownView) -> AppResult<()>;

    /// Generate and send a payment link; returns the link URL
    async fn send_payment_link(
        &self,
        booking: &Booking,
        bill: &BillBreakdownView,
    ) -> AppResult<String>;
}

/// Gateway-backed notifier (HTTP POST to the configured messaging service)
pub struct WebhookNotifier {
    client: reqwest::Client,
    gateway_url: String,
}

impl WebhookNotifier {
    pub fn new(gateway_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            gateway_url,
        }
    }

    async fn post(&self, path: &str, body: serde_json::Value) -> AppResult<serde_json::Value> {
        let url = format!("{}/{}", self.gateway_url.trim_end_matches('/'), path);
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::notification(format!("Gateway unreachable: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::notification(format!(
                "Gateway returned {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::notification(format!("Invalid gateway response: {e}")))
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn send_prebill(&self, booking: &Booking, bill: &BillBreakdownView) -> AppResult<()> {
        let body = json!({
            "booking_id": booking.id,
            "guest_name": booking.guest_name,
            "guest_phone": booking.guest_phone,
            "bill": bill,
        });
        self.post("prebill", body).await?;
        tracing::info!(booking_id = booking.id, "Pre-bill sent");
        Ok(())
    }

    async fn send_payment_link(
        &self,
        booking: &Booking,
        bill: &BillBreakdownView,
    ) -> AppResult<String> {
        let body = json!({
            "booking_id": booking.id,
            "guest_name": booking.guest_name,
            "guest_phone": booking.guest_phone,
            "amount": bill.balance_due,
        });
        let response = self.post("payment-link", body).await?;
        let url = response
            .get("url")
            .and_then(|v| v.as_str())
            .ok_or_else(|| AppError::notification("Gateway response missing link URL"))?
            .to_string();
        tracing::info!(booking_id = booking.id, "Payment link generated");
        Ok(url)
    }
}

/// Logging-only notifier; default when no gateway is configured
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn send_prebill(&self, booking: &Booking, bill: &BillBreakdownView) -> AppResult<()> {
        tracing::info!(
            booking_id = booking.id,
            total = bill.total_amount,
            "Pre-bill (no gateway configured, logged only)"
        );
        Ok(())
    }

    async fn send_payment_link(
        &self,
        booking: &Booking,
        bill: &BillBreakdownView,
    ) -> AppResult<String> {
        tracing::info!(
            booking_id = booking.id,
            amount = bill.balance_due,
            "Payment link (no gateway configured, logged only)"
        );
        Ok(format!("https://pay.invalid/booking/{}", booking.id))
    }
}
