//! `storedesk-core`: shared building blocks for the StoreDesk sales core.
//!
//! Identifiers, the `Money` value object and the domain error model. No IO.

pub mod entity;
pub mod error;
pub mod id;
pub mod money;
pub mod parse;

pub use entity::Entity;
pub use error::DomainError;
pub use id::{DraftId, ProductId, SaleId};
pub use money::Money;
