//! Typed draft edits.
//!
//! Every form interaction is expressed as a [`DraftCommand`] and applied with
//! [`apply`], which takes the draft by value and returns the next draft.

use serde::{Deserialize, Serialize};

use storedesk_core::ProductId;
use storedesk_products::Catalog;

use crate::draft::SaleDraft;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DraftCommand {
    AddLine,
    RemoveLine { index: usize },
    /// Choose a product from the catalog for a line.
    SelectProduct { index: usize, product_id: ProductId },
    ClearProduct { index: usize },
    SetQuantity { index: usize, quantity: i64 },
    /// Raw text from the quantity field.
    SetQuantityInput { index: usize, input: String },
    SetSellerName { name: String },
    Clear,
}

/// Apply one command. Commands addressing a missing line, or a product the
/// catalog does not know, leave the draft unchanged.
pub fn apply(mut draft: SaleDraft, command: DraftCommand, catalog: &Catalog) -> SaleDraft {
    match command {
        DraftCommand::AddLine => {
            draft.add_line();
        }
        DraftCommand::RemoveLine { index } => {
            draft.remove_line(index);
        }
        DraftCommand::SelectProduct { index, product_id } => match catalog.get(&product_id) {
            Some(product) => {
                draft.select_product(index, product);
            }
            None => {
                tracing::debug!(draft = %draft.id(), %product_id, "product not in catalog");
            }
        },
        DraftCommand::ClearProduct { index } => {
            draft.clear_line_product(index);
        }
        DraftCommand::SetQuantity { index, quantity } => {
            draft.set_line_quantity(index, quantity);
        }
        DraftCommand::SetQuantityInput { index, input } => {
            draft.set_line_quantity_input(index, &input);
        }
        DraftCommand::SetSellerName { name } => draft.set_seller_name(name),
        DraftCommand::Clear => draft.clear(),
    }
    draft
}

#[cfg(test)]
mod tests {
    use super::*;
    use storedesk_core::Money;
    use storedesk_products::ProductRecord;

    fn catalog() -> Catalog {
        let records: Vec<ProductRecord> = serde_json::from_value(serde_json::json!([
            {"id_produk": "PRD001", "nama_produk": "Kopi Susu", "harga": 10000, "stok_barang": 10},
            {"id_produk": "PRD002", "nama_produk": "Roti Bakar", "harga": 5000, "stok_barang": 10}
        ]))
        .unwrap();
        Catalog::from_records(records)
    }

    fn pid(s: &str) -> ProductId {
        ProductId::new(s).unwrap()
    }

    fn run(commands: Vec<DraftCommand>) -> SaleDraft {
        let catalog = catalog();
        commands
            .into_iter()
            .fold(SaleDraft::open(), |draft, cmd| apply(draft, cmd, &catalog))
    }

    #[test]
    fn command_sequence_builds_expected_total() {
        let draft = run(vec![
            DraftCommand::SetSellerName { name: "Ani".into() },
            DraftCommand::AddLine,
            DraftCommand::SelectProduct { index: 0, product_id: pid("PRD001") },
            DraftCommand::SetQuantityInput { index: 0, input: "2".into() },
            DraftCommand::AddLine,
            DraftCommand::SelectProduct { index: 1, product_id: pid("PRD002") },
            DraftCommand::SetQuantity { index: 1, quantity: 3 },
        ]);

        assert_eq!(draft.total(), Money::new(35_000));
        assert_eq!(draft.line(0).unwrap().product().unwrap().name, "Kopi Susu");
        assert_eq!(draft.line(0).unwrap().available_stock(), Some(10));
    }

    #[test]
    fn unknown_product_leaves_line_untouched() {
        let draft = run(vec![
            DraftCommand::AddLine,
            DraftCommand::SelectProduct { index: 0, product_id: pid("NOPE") },
        ]);
        assert!(draft.line(0).unwrap().product().is_none());
    }

    #[test]
    fn remove_and_clear() {
        let draft = run(vec![
            DraftCommand::AddLine,
            DraftCommand::SelectProduct { index: 0, product_id: pid("PRD001") },
            DraftCommand::SetQuantity { index: 0, quantity: 1 },
            DraftCommand::AddLine,
            DraftCommand::RemoveLine { index: 0 },
        ]);
        assert_eq!(draft.lines().len(), 1);
        assert_eq!(draft.total(), Money::ZERO);

        let draft = apply(draft, DraftCommand::Clear, &catalog());
        assert!(draft.lines().is_empty());
    }

    #[test]
    fn commands_decode_from_tagged_json() {
        let cmd: DraftCommand = serde_json::from_value(serde_json::json!({
            "type": "select_product",
            "index": 0,
            "product_id": "PRD001"
        }))
        .unwrap();
        assert_eq!(cmd, DraftCommand::SelectProduct { index: 0, product_id: pid("PRD001") });
    }
}
