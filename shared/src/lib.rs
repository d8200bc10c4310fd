//! Shared types for the Hostezee property server
//!
//! Common types used across the workspace: domain models, request/response
//! DTOs, the unified error type, event-bus message types, and small
//! utilities.

pub mod error;
pub mod message;
pub mod models;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};

// Error re-exports (for convenient access)
pub use error::{ApiResponse, AppError, AppResult, ErrorCode};

// Event bus re-exports
pub use message::{BusMessage, EventType};
