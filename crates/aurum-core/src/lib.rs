//! Shared error taxonomy and types for the Aurum autopost workspace.

pub mod error;
pub mod types;

pub use error::AppError;
pub use types::{Combination, OutputFormat, SERIAL_CEILING, format_serial, next_serial_after};
