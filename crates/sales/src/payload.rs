//! The create-sale request body and its validation errors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use storedesk_core::{DomainError, Money, ProductId};

/// Body of the create-sale call.
///
/// ```json
/// { "sellerName": "Ani", "items": [...], "total": 35000, "timestamp": "2024-05-01T10:00:00Z" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalePayload {
    pub seller_name: String,
    pub items: Vec<PayloadItem>,
    pub total: Money,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u64,
    pub unit_price: Money,
    pub subtotal: Money,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationIssue {
    #[error("seller name is required")]
    EmptySellerName,
    #[error("at least one product with a positive quantity is required")]
    NoValidLines,
}

/// The draft cannot be submitted yet. Carries every failing check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("draft is not ready to submit: {}", join(.issues))]
pub struct DraftValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl DraftValidationError {
    pub fn has(&self, issue: ValidationIssue) -> bool {
        self.issues.contains(&issue)
    }
}

fn join(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<DraftValidationError> for DomainError {
    fn from(err: DraftValidationError) -> Self {
        DomainError::validation(join(&err.issues))
    }
}
