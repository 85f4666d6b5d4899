use thiserror::Error;

use storedesk_sales::DraftValidationError;

/// Failure talking to the sales API.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response (connect, timeout, body read).
    #[error("network error: {0}")]
    Network(String),
    /// The API answered with a non-2xx status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
    /// A 2xx response whose body could not be used.
    #[error("parse error: {0}")]
    Parse(String),
    /// The HTTP client could not be constructed.
    #[error("client setup failed: {0}")]
    Client(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid API URL {value:?}: {reason}")]
    InvalidUrl { value: String, reason: String },
    #[error("invalid timeout {0:?}: expected whole seconds greater than zero")]
    InvalidTimeout(String),
}

/// Why a form session refused or failed a command.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("no sale draft is open")]
    NoDraft,
    #[error("a submission for this draft is already in flight")]
    SubmitInFlight,
    #[error("the draft cannot change while its submission is in flight")]
    DraftLocked,
    #[error(transparent)]
    Invalid(#[from] DraftValidationError),
    #[error(transparent)]
    Api(#[from] ApiError),
}
