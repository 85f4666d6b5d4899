//! The in-progress sale.

use chrono::{DateTime, Utc};

use storedesk_core::{DraftId, Money, ProductId};
use storedesk_products::CatalogProduct;

use crate::line::{LineItem, LineProduct};
use crate::payload::{DraftValidationError, PayloadItem, SalePayload, ValidationIssue};

/// A line asking for more units than the catalog says are in stock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockShortfall {
    pub index: usize,
    pub product_id: ProductId,
    pub requested: u64,
    pub available: u32,
}

/// State of one sales entry form session.
///
/// Invariant: `total()` always equals the sum of the line subtotals. Every
/// mutator recomputes it before returning. Edits addressed to a line index
/// that does not exist are ignored and return `false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleDraft {
    id: DraftId,
    seller_name: String,
    lines: Vec<LineItem>,
    total: Money,
    opened_at: DateTime<Utc>,
}

impl SaleDraft {
    /// An empty draft, as when the entry form opens.
    pub fn open() -> Self {
        Self::opened_at(DraftId::new(), Utc::now())
    }

    pub fn opened_at(id: DraftId, opened_at: DateTime<Utc>) -> Self {
        Self {
            id,
            seller_name: String::new(),
            lines: Vec::new(),
            total: Money::ZERO,
            opened_at,
        }
    }

    pub fn id(&self) -> DraftId {
        self.id
    }

    pub fn opened_at_time(&self) -> DateTime<Utc> {
        self.opened_at
    }

    pub fn seller_name(&self) -> &str {
        &self.seller_name
    }

    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    pub fn line(&self, index: usize) -> Option<&LineItem> {
        self.lines.get(index)
    }

    pub fn total(&self) -> Money {
        self.total
    }

    pub fn set_seller_name(&mut self, name: impl Into<String>) {
        self.seller_name = name.into();
    }

    /// Append an empty row. Returns its index.
    pub fn add_line(&mut self) -> usize {
        self.lines.push(LineItem::empty());
        // An empty line contributes nothing, but keep every mutator uniform.
        self.recompute();
        self.lines.len() - 1
    }

    pub fn remove_line(&mut self, index: usize) -> bool {
        if index >= self.lines.len() {
            tracing::debug!(draft = %self.id, index, "remove_line: no such line");
            return false;
        }
        self.lines.remove(index);
        self.recompute();
        true
    }

    /// Put a product on a line. Stock becomes unknown; use
    /// [`select_product`](Self::select_product) to carry the catalog's figure.
    pub fn set_line_product(
        &mut self,
        index: usize,
        product_id: ProductId,
        product_name: impl Into<String>,
        unit_price: Money,
    ) -> bool {
        let name = product_name.into();
        self.edit_line(index, "set_line_product", |line| {
            line.product = Some(LineProduct { id: product_id, name });
            line.unit_price = unit_price;
            line.available_stock = None;
        })
    }

    /// Put a catalog product on a line: id, name, price (0 when unknown) and stock.
    pub fn select_product(&mut self, index: usize, product: &CatalogProduct) -> bool {
        self.edit_line(index, "select_product", |line| {
            line.product = Some(LineProduct {
                id: product.id.clone(),
                name: product.name.clone(),
            });
            line.unit_price = product.price_or_zero();
            line.available_stock = product.stock;
        })
    }

    /// Deselect the product of a line; the quantity is kept.
    pub fn clear_line_product(&mut self, index: usize) -> bool {
        self.edit_line(index, "clear_line_product", |line| {
            line.product = None;
            line.unit_price = Money::ZERO;
            line.available_stock = None;
        })
    }

    pub fn set_line_quantity(&mut self, index: usize, quantity: i64) -> bool {
        self.edit_line(index, "set_line_quantity", |line| line.quantity = quantity)
    }

    /// Set a quantity from raw form text: the leading integer, or 0 if there is none.
    pub fn set_line_quantity_input(&mut self, index: usize, input: &str) -> bool {
        let quantity = storedesk_core::parse::leading_int(input).unwrap_or(0);
        self.set_line_quantity(index, quantity)
    }

    /// Drop every line and the seller name, keeping the session id.
    pub fn clear(&mut self) {
        self.seller_name.clear();
        self.lines.clear();
        self.recompute();
    }

    /// Sum of subtotals over lines with a product and a positive quantity.
    pub fn compute_total(&self) -> Money {
        self.lines.iter().map(LineItem::subtotal).sum()
    }

    /// Lines whose quantity exceeds the stock the catalog reported.
    pub fn stock_shortfalls(&self) -> Vec<StockShortfall> {
        self.lines
            .iter()
            .enumerate()
            .filter_map(|(index, line)| {
                let missing = line.stock_shortfall()?;
                let product = line.product()?;
                let available = line.available_stock()?;
                Some(StockShortfall {
                    index,
                    product_id: product.id.clone(),
                    requested: u64::from(available) + missing,
                    available,
                })
            })
            .collect()
    }

    /// Build the create-sale payload stamped with the current time.
    pub fn build_payload(&self) -> Result<SalePayload, DraftValidationError> {
        self.build_payload_at(Utc::now())
    }

    /// Build the create-sale payload from submittable lines only.
    ///
    /// Fails when the trimmed seller name is empty or no line is submittable;
    /// all failing checks are reported together.
    pub fn build_payload_at(
        &self,
        timestamp: DateTime<Utc>,
    ) -> Result<SalePayload, DraftValidationError> {
        let seller_name = self.seller_name.trim();
        let items: Vec<PayloadItem> = self
            .lines
            .iter()
            .filter(|line| line.is_submittable())
            .filter_map(|line| {
                let product = line.product()?;
                Some(PayloadItem {
                    product_id: product.id.clone(),
                    product_name: product.name.clone(),
                    quantity: line.quantity().unsigned_abs(),
                    unit_price: line.unit_price(),
                    subtotal: line.subtotal(),
                })
            })
            .collect();

        let mut issues = Vec::new();
        if seller_name.is_empty() {
            issues.push(ValidationIssue::EmptySellerName);
        }
        if items.is_empty() {
            issues.push(ValidationIssue::NoValidLines);
        }
        if !issues.is_empty() {
            return Err(DraftValidationError { issues });
        }

        let total = items.iter().map(|item| item.subtotal).sum();
        Ok(SalePayload {
            seller_name: seller_name.to_string(),
            items,
            total,
            timestamp,
        })
    }

    fn edit_line(
        &mut self,
        index: usize,
        op: &'static str,
        edit: impl FnOnce(&mut LineItem),
    ) -> bool {
        let Some(line) = self.lines.get_mut(index) else {
            tracing::debug!(draft = %self.id, index, op, "edit ignored: no such line");
            return false;
        };
        edit(line);
        self.recompute();
        true
    }

    fn recompute(&mut self) {
        self.total = self.compute_total();
    }
}

impl Default for SaleDraft {
    fn default() -> Self {
        Self::open()
    }
}
