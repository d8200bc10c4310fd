//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::BookingNotFound
            | Self::RoomNotFound
            | Self::BillNotFound
            | Self::OrderNotFound
            | Self::ExtraServiceNotFound
            | Self::MergeBookingMissing => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists
            | Self::BookingAlreadyCheckedOut
            | Self::BookingCancelled
            | Self::RoomOccupied
            | Self::OrderNotCancellable => StatusCode::CONFLICT,

            // 422 Unprocessable (business-rule blocks the operator can resolve)
            Self::CheckoutBlockedByOrders | Self::PrebillNotSent => {
                StatusCode::UNPROCESSABLE_ENTITY
            }

            // 503 Service Unavailable (transient errors, client can retry)
            Self::NetworkError | Self::TimeoutError | Self::NotificationFailed => {
                StatusCode::SERVICE_UNAVAILABLE
            }

            // 500 Internal Server Error
            Self::InternalError | Self::DatabaseError | Self::ConfigError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            // 400 Bad Request (default for validation/business errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
