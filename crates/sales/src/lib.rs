//! Sales entry form calculator.
//!
//! Keeps the line items of one in-progress sale, maintains subtotals and the
//! running total on every edit, and assembles the payload for the create-sale
//! call. Pure state; no IO.

pub mod command;
pub mod draft;
pub mod line;
pub mod payload;
pub mod summary;

pub use command::{DraftCommand, apply};
pub use draft::{SaleDraft, StockShortfall};
pub use line::{LineItem, LineProduct};
pub use payload::{DraftValidationError, PayloadItem, SalePayload, ValidationIssue};
pub use summary::{SaleSummary, SoldItem, sort_newest_first};
