//! The sales entry form session.
//!
//! Owns everything the entry screen used to keep in page globals: the catalog,
//! the open draft, the submission guard and the sales table. UI events arrive
//! as [`FormCommand`]s through [`SalesEntrySession::dispatch`].

use storedesk_core::{DraftId, Money, SaleId};
use storedesk_products::Catalog;
use storedesk_sales::{DraftCommand, SaleDraft, SalePayload, SaleSummary, apply};

use crate::api::{SaleReceipt, SalesApi};
use crate::error::{ApiError, SessionError};
use crate::submission::{SubmissionGuard, SubmissionTicket};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormCommand {
    /// Open the entry form with a fresh, empty draft.
    Open,
    /// Close the entry form, discarding the draft.
    Cancel,
    Edit(DraftCommand),
    Submit,
    RefreshCatalog,
    RefreshSales,
    /// Load one recorded sale with its items for the detail view.
    ShowSale(SaleId),
    DeleteSale(SaleId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    Opened(DraftId),
    Cancelled,
    /// The draft after the edit; `total` is what the form displays.
    Edited { total: Money },
    Submitted(SaleReceipt),
    CatalogLoaded { products: usize },
    SalesLoaded { rows: usize },
    SaleShown(SaleSummary),
    Deleted(SaleId),
}

/// A submission that passed validation and holds the guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSubmission {
    pub ticket: SubmissionTicket,
    pub payload: SalePayload,
}

pub struct SalesEntrySession<A> {
    api: A,
    catalog: Catalog,
    draft: Option<SaleDraft>,
    guard: SubmissionGuard,
    sales: Vec<SaleSummary>,
}

impl<A: SalesApi> SalesEntrySession<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            catalog: Catalog::new(),
            draft: None,
            guard: SubmissionGuard::new(),
            sales: Vec::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn draft(&self) -> Option<&SaleDraft> {
        self.draft.as_ref()
    }

    /// The sales table, newest first.
    pub fn sales(&self) -> &[SaleSummary] {
        &self.sales
    }

    pub fn is_submitting(&self) -> bool {
        self.guard.is_in_flight()
    }

    pub async fn dispatch(&mut self, command: FormCommand) -> Result<FormOutcome, SessionError> {
        match command {
            FormCommand::Open => self.open_draft().map(FormOutcome::Opened),
            FormCommand::Cancel => self.cancel().map(|()| FormOutcome::Cancelled),
            FormCommand::Edit(cmd) => self
                .edit(cmd)
                .map(|draft| FormOutcome::Edited { total: draft.total() }),
            FormCommand::Submit => self.submit().await.map(FormOutcome::Submitted),
            FormCommand::RefreshCatalog => self
                .refresh_catalog()
                .await
                .map(|products| FormOutcome::CatalogLoaded { products }),
            FormCommand::RefreshSales => self
                .refresh_sales()
                .await
                .map(|rows| FormOutcome::SalesLoaded { rows }),
            FormCommand::ShowSale(id) => self.show_sale(&id).await.map(FormOutcome::SaleShown),
            FormCommand::DeleteSale(id) => self
                .delete_sale(&id)
                .await
                .map(|()| FormOutcome::Deleted(id)),
        }
    }

    /// Start a new draft, replacing any open one.
    pub fn open_draft(&mut self) -> Result<DraftId, SessionError> {
        self.ensure_not_submitting()?;
        let draft = SaleDraft::open();
        let id = draft.id();
        tracing::debug!(draft = %id, "sale draft opened");
        self.draft = Some(draft);
        Ok(id)
    }

    pub fn cancel(&mut self) -> Result<(), SessionError> {
        self.ensure_not_submitting()?;
        if let Some(draft) = self.draft.take() {
            tracing::debug!(
                draft = %draft.id(),
                lines = draft.lines().len(),
                "sale draft discarded"
            );
        }
        Ok(())
    }

    pub fn edit(&mut self, command: DraftCommand) -> Result<&SaleDraft, SessionError> {
        self.ensure_not_submitting()?;
        let draft = self.draft.take().ok_or(SessionError::NoDraft)?;
        Ok(self.draft.insert(apply(draft, command, &self.catalog)))
    }

    /// Validate the open draft and take the submission guard.
    ///
    /// Refused with `SubmitInFlight` while another submission is running and
    /// with `Invalid` when the draft fails validation. Neither touches the network.
    pub fn begin_submit(&mut self) -> Result<PendingSubmission, SessionError> {
        let draft = self.draft.as_ref().ok_or(SessionError::NoDraft)?;
        if self.guard.is_in_flight() {
            tracing::debug!(draft = %draft.id(), "submit ignored: already in flight");
            return Err(SessionError::SubmitInFlight);
        }

        let payload = draft.build_payload()?;
        let ticket = self
            .guard
            .begin(draft.id())
            .map_err(|_| SessionError::SubmitInFlight)?;

        tracing::info!(
            draft = %draft.id(),
            items = payload.items.len(),
            total = payload.total.amount(),
            "submitting sale"
        );
        Ok(PendingSubmission { ticket, payload })
    }

    /// Release the guard and settle the draft: discarded on success, kept
    /// intact on failure so the user can retry.
    pub fn finish_submit(
        &mut self,
        ticket: &SubmissionTicket,
        result: Result<SaleReceipt, ApiError>,
    ) -> Result<SaleReceipt, SessionError> {
        if !self.guard.finish(ticket) {
            tracing::warn!(draft = %ticket.draft(), "stale submission result");
        }

        match result {
            Ok(receipt) => {
                if self.draft.as_ref().is_some_and(|d| d.id() == ticket.draft()) {
                    self.draft = None;
                }
                Ok(receipt)
            }
            Err(err) => {
                tracing::warn!(
                    draft = %ticket.draft(),
                    error = %err,
                    "sale submission failed; draft kept"
                );
                Err(err.into())
            }
        }
    }

    /// Submit the open draft, then refresh the sales table on success.
    ///
    /// A failed refresh is logged and does not turn the submission into a failure.
    /// If this future is dropped before the backend answers, the guard is
    /// released and the draft stays open.
    pub async fn submit(&mut self) -> Result<SaleReceipt, SessionError> {
        let pending = self.begin_submit()?;
        let release = self.guard.release_on_drop(&pending.ticket);
        let result = self.api.create_sale(&pending.payload).await;
        release.disarm();
        let receipt = self.finish_submit(&pending.ticket, result)?;

        if let Err(err) = self.refresh_sales().await {
            tracing::warn!(error = %err, "sales table refresh after submit failed");
        }
        Ok(receipt)
    }

    /// Reload the catalog. On failure the previous catalog stays in place.
    pub async fn refresh_catalog(&mut self) -> Result<usize, SessionError> {
        let records = self.api.fetch_catalog().await?;
        self.catalog = Catalog::from_records(records);
        tracing::info!(products = self.catalog.len(), "catalog loaded");
        Ok(self.catalog.len())
    }

    /// Reload the sales table. On failure the previous rows stay in place.
    pub async fn refresh_sales(&mut self) -> Result<usize, SessionError> {
        self.sales = self.api.list_sales().await?;
        Ok(self.sales.len())
    }

    /// Fetch one recorded sale with its items. The sales table is left as is.
    pub async fn show_sale(&self, id: &SaleId) -> Result<SaleSummary, SessionError> {
        Ok(self.api.get_sale(id).await?)
    }

    /// Delete a recorded sale and reload the table.
    pub async fn delete_sale(&mut self, id: &SaleId) -> Result<(), SessionError> {
        self.api.delete_sale(id).await?;
        self.sales.retain(|row| &row.id != id);
        if let Err(err) = self.refresh_sales().await {
            tracing::warn!(error = %err, "sales table refresh after delete failed");
        }
        Ok(())
    }

    fn ensure_not_submitting(&self) -> Result<(), SessionError> {
        if self.guard.is_in_flight() {
            return Err(SessionError::DraftLocked);
        }
        Ok(())
    }
}
