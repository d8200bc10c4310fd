//! Unified error handling for the Hostezee workspace
//!
//! - [`ErrorCode`] - stable numeric codes shared with the frontend
//! - [`AppError`] - application error carrying a code, message and details
//! - [`ApiResponse`] - unified response envelope with axum integration

pub mod category;
pub mod codes;
pub mod http;
pub mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
