//! Common types and utilities.

pub use crate::error::Error;

/// Crate result type.
pub type Result<T> = core::result::Result<T, Error>;
