//! The seam between the form session and the backend.

use storedesk_core::SaleId;
use storedesk_products::ProductRecord;
use storedesk_sales::{SalePayload, SaleSummary};

use crate::error::ApiError;

/// What the backend acknowledged for a created sale.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SaleReceipt {
    /// Server-assigned identifier, when the response carried one.
    pub id: Option<SaleId>,
    pub message: Option<String>,
}

/// Remote operations the sales entry workflow needs.
///
/// Success contract for every call: a 2xx status is success, anything else is
/// [`ApiError::Api`]. Response wording is never used to decide.
pub trait SalesApi {
    /// Raw catalog records; validation and filtering happen in `Catalog`.
    fn fetch_catalog(&self) -> impl Future<Output = Result<Vec<ProductRecord>, ApiError>> + Send;

    fn create_sale(
        &self,
        payload: &SalePayload,
    ) -> impl Future<Output = Result<SaleReceipt, ApiError>> + Send;

    /// Recorded sales, newest first.
    fn list_sales(&self) -> impl Future<Output = Result<Vec<SaleSummary>, ApiError>> + Send;

    /// One recorded sale with its items, for the detail view.
    fn get_sale(&self, id: &SaleId) -> impl Future<Output = Result<SaleSummary, ApiError>> + Send;

    fn delete_sale(&self, id: &SaleId) -> impl Future<Output = Result<(), ApiError>> + Send;
}
