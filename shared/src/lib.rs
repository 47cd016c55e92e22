//! Shared types for the OrderIt core
//!
//! Domain models, error types and ID/time utilities used by the
//! state-management crates.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCode};
