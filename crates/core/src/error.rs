//! Domain error model.

use thiserror::Error;

/// Domain-level error.
///
/// Deterministic failures only (validation, bad identifiers).
/// Transport failures live in the client crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. empty seller name).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. empty product id).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
