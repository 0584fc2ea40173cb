//! Error handling for the scope service
//!
//! This module defines the crate error type, its constructor helpers and the
//! mapping onto HTTP responses.

mod conversions;
mod helpers;
mod response;
mod types;

pub use response::{ErrorDetail, ErrorResponse};
pub use types::{FixzitError, Result};
