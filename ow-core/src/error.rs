//! Error types for owneo core
//!
//! Re-exported from `ow-error` so the whole workspace shares one error type.

pub use ow_error::{OwError, Result};
