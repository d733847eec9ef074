//! Shared types for the marketplace backend
//!
//! Domain models, error codes and response structures used by the HTTP
//! server and by any future worker binaries. Keeping these in one crate
//! guarantees a single source of truth for status enums and wire formats.

pub mod error;
pub mod models;
pub mod response;
pub mod util;

pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use response::ApiResponse;
