//! Utility module - logging and validation helpers

pub mod logger;
pub mod validation;

// Re-export the unified error types from shared
pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

pub use logger::{init_logger, init_logger_with_file};
