//! HTTP client and form session for the StoreDesk sales entry workflow.
//!
//! - [`config`]: API location, token and timeout from the environment.
//! - [`api`]: the [`SalesApi`] seam and its reqwest implementation.
//! - [`submission`]: submit debouncing.
//! - [`session`]: the typed dispatcher that ties draft, catalog and API together.

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod session;
pub mod submission;

pub use api::{SaleReceipt, SalesApi};
pub use config::ApiConfig;
pub use error::{ApiError, ConfigError, SessionError};
pub use http::HttpSalesApi;
pub use session::{FormCommand, FormOutcome, PendingSubmission, SalesEntrySession};
pub use submission::{ReleaseOnDrop, SubmissionGuard, SubmissionTicket};
