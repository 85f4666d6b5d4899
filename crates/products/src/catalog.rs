//! The selectable product catalog.

use std::collections::HashMap;

use storedesk_core::{Entity, ProductId};

use crate::product::{CatalogProduct, ProductRecord};

/// One entry of the product picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductOption {
    pub id: ProductId,
    pub label: String,
    pub stock: Option<u32>,
}

/// Products that can be put on a sale, in the order the backend listed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<CatalogProduct>,
    index: HashMap<ProductId, usize>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from raw records.
    ///
    /// Soft-deleted records and records without an id are dropped. When an id
    /// repeats, the first occurrence wins.
    pub fn from_records(records: impl IntoIterator<Item = ProductRecord>) -> Self {
        let mut catalog = Self::new();
        let mut skipped = 0usize;

        for record in records {
            if record.deleted {
                continue;
            }
            match CatalogProduct::from_record(record) {
                Ok(product) => {
                    if !catalog.insert(product) {
                        skipped += 1;
                    }
                }
                Err(err) => {
                    tracing::warn!(error = %err, "skipping catalog record");
                    skipped += 1;
                }
            }
        }

        if skipped > 0 {
            tracing::debug!(skipped, kept = catalog.len(), "catalog built with skipped records");
        }
        catalog
    }

    /// Returns `false` (and keeps the existing entry) if the id is already present.
    fn insert(&mut self, product: CatalogProduct) -> bool {
        if self.index.contains_key(product.id()) {
            return false;
        }
        self.index.insert(product.id().clone(), self.products.len());
        self.products.push(product);
        true
    }

    pub fn get(&self, id: &ProductId) -> Option<&CatalogProduct> {
        self.index.get(id).map(|&i| &self.products[i])
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn products(&self) -> &[CatalogProduct] {
        &self.products
    }

    /// Picker entries in catalog order.
    pub fn options(&self) -> Vec<ProductOption> {
        self.products
            .iter()
            .map(|p| ProductOption {
                id: p.id.clone(),
                label: p.label(),
                stock: p.stock,
            })
            .collect()
    }

    /// Products whose id, name, category, sub-category or barcode contains
    /// `term`, ignoring case. A blank term matches everything.
    pub fn search(&self, term: &str) -> Vec<&CatalogProduct> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return self.products.iter().collect();
        }
        self.products
            .iter()
            .filter(|p| p.matches_lowercase(&needle))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records() -> Vec<ProductRecord> {
        serde_json::from_value(json!([
            {
                "id_produk": "PRD001",
                "nama_produk": "Kopi Susu",
                "kategori": "Minuman",
                "harga": 10000,
                "stok_barang": 12
            },
            {
                "id_produk": "PRD002",
                "nama_produk": "Roti Bakar",
                "kategori": "Makanan",
                "barcode_produk": "8991234",
                "harga": 5000
            },
            {
                "id_produk": "PRD003",
                "nama_produk": "Teh Lama",
                "harga": 3000,
                "is_deleted": "2024-01-01T00:00:00Z"
            },
            {"nama_produk": "No Id"},
            {"id_produk": "PRD001", "nama_produk": "Duplicate", "harga": 1}
        ]))
        .unwrap()
    }

    #[test]
    fn drops_deleted_idless_and_duplicate_records() {
        let catalog = Catalog::from_records(records());
        assert_eq!(catalog.len(), 2);

        let first = catalog.get(&ProductId::new("PRD001").unwrap()).unwrap();
        assert_eq!(first.name, "Kopi Susu");
        assert!(catalog.get(&ProductId::new("PRD003").unwrap()).is_none());
    }

    #[test]
    fn options_keep_backend_order() {
        let catalog = Catalog::from_records(records());
        let labels: Vec<_> = catalog.options().into_iter().map(|o| o.label).collect();
        assert_eq!(labels, vec!["Kopi Susu - Rp 10.000", "Roti Bakar - Rp 5.000"]);
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let catalog = Catalog::from_records(records());

        let by_name: Vec<_> = catalog.search("kopi").iter().map(|p| p.id.to_string()).collect();
        assert_eq!(by_name, vec!["PRD001"]);

        let by_category: Vec<_> = catalog
            .search("MAKANAN")
            .iter()
            .map(|p| p.id.to_string())
            .collect();
        assert_eq!(by_category, vec!["PRD002"]);

        let by_barcode = catalog.search("1234");
        assert_eq!(by_barcode.len(), 1);

        assert_eq!(catalog.search("prd").len(), 2);
        assert_eq!(catalog.search("   ").len(), 2);
        assert!(catalog.search("sepatu").is_empty());
    }
}
