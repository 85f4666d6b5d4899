use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use storedesk_core::parse::leading_int;
use storedesk_core::{DomainError, Entity, Money, ProductId};

/// One product as delivered by the catalog endpoint, before validation.
///
/// Every field is optional: the listing is produced by another system and the
/// form must keep working when a record is incomplete. Field names accept both
/// the English names and the backend's own (`id_produk`, `harga`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    #[serde(default, alias = "id_produk")]
    pub id: Option<String>,
    #[serde(default, alias = "nama_produk")]
    pub name: Option<String>,
    #[serde(default, alias = "kategori")]
    pub category: Option<String>,
    #[serde(default, alias = "sub_kategori")]
    pub sub_category: Option<String>,
    #[serde(default, alias = "barcode_produk")]
    pub barcode: Option<String>,
    #[serde(default, alias = "harga", deserialize_with = "lenient_amount")]
    pub price: Option<u64>,
    #[serde(default, alias = "stok_barang", deserialize_with = "lenient_amount")]
    pub stock: Option<u64>,
    #[serde(default, alias = "is_deleted", deserialize_with = "lenient_flag")]
    pub deleted: bool,
}

/// Accepts a non-negative JSON number or a numeric string; anything else is `None`.
fn lenient_amount<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(amount_from_value(&value))
}

/// `null`/`false`/missing mean "not deleted"; any other value (a deletion
/// timestamp, `true`) means deleted.
fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(!matches!(value, Value::Null | Value::Bool(false)))
}

fn amount_from_value(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => leading_int(s).and_then(|v| u64::try_from(v).ok()),
        _ => None,
    }
}

/// A sellable product in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogProduct {
    pub id: ProductId,
    pub name: String,
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub barcode: Option<String>,
    /// `None` when the backend sent no usable price.
    pub price: Option<Money>,
    /// `None` when the backend sent no usable stock figure.
    pub stock: Option<u32>,
}

impl CatalogProduct {
    /// Validate a raw record. Fails only when the record has no usable id.
    ///
    /// A missing name falls back to the id. Deletion is not checked here.
    pub fn from_record(record: ProductRecord) -> Result<Self, DomainError> {
        let id = ProductId::new(record.id.unwrap_or_default())?;
        let name = record
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| id.to_string());

        Ok(Self {
            name,
            category: non_blank(record.category),
            sub_category: non_blank(record.sub_category),
            barcode: non_blank(record.barcode),
            price: record.price.map(Money::new),
            stock: record.stock.map(|s| u32::try_from(s).unwrap_or(u32::MAX)),
            id,
        })
    }

    /// Price used when the product is put on a line: unknown prices count as 0.
    pub fn price_or_zero(&self) -> Money {
        self.price.unwrap_or(Money::ZERO)
    }

    /// Option label shown in the product picker, e.g. `Kopi Susu - Rp 10.000`.
    pub fn label(&self) -> String {
        format!("{} - {}", self.name, self.price_or_zero())
    }

    /// Case-insensitive substring match over id, name, categories and barcode.
    ///
    /// `needle` must already be lowercase.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        let fields = [
            Some(self.id.as_str()),
            Some(self.name.as_str()),
            self.category.as_deref(),
            self.sub_category.as_deref(),
            self.barcode.as_deref(),
        ];
        fields
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

impl Entity for CatalogProduct {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> ProductRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn decodes_backend_field_names() {
        let r = record(json!({
            "id_produk": "PRD001",
            "nama_produk": "Kopi Susu",
            "kategori": "Minuman",
            "sub_kategori": "Kopi",
            "barcode_produk": "899100",
            "harga": 10000,
            "stok_barang": 25,
            "updated_at": "2024-05-01T10:00:00Z",
            "is_deleted": null
        }));

        assert_eq!(r.id.as_deref(), Some("PRD001"));
        assert_eq!(r.price, Some(10000));
        assert_eq!(r.stock, Some(25));
        assert!(!r.deleted);

        let p = CatalogProduct::from_record(r).unwrap();
        assert_eq!(p.label(), "Kopi Susu - Rp 10.000");
        assert_eq!(p.stock, Some(25));
    }

    #[test]
    fn decodes_english_field_names() {
        let r = record(json!({"id": "P1", "name": "Tea", "price": 5000, "stock": 3}));
        let p = CatalogProduct::from_record(r).unwrap();
        assert_eq!(p.id.as_str(), "P1");
        assert_eq!(p.price, Some(Money::new(5000)));
    }

    #[test]
    fn malformed_price_and_stock_become_missing() {
        let r = record(json!({"id": "P1", "name": "Tea", "price": "n/a", "stock": -4}));
        assert_eq!(r.price, None);
        assert_eq!(r.stock, None);

        let p = CatalogProduct::from_record(r).unwrap();
        assert_eq!(p.price_or_zero(), Money::ZERO);
        assert_eq!(p.label(), "Tea - Rp 0");
    }

    #[test]
    fn numeric_strings_are_accepted() {
        let r = record(json!({"id": "P1", "harga": "12500", "stok_barang": "7"}));
        assert_eq!(r.price, Some(12500));
        assert_eq!(r.stock, Some(7));
    }

    #[test]
    fn deletion_marker_is_any_non_null_value() {
        let r = record(json!({"id": "P1", "is_deleted": "2024-05-01T10:00:00Z"}));
        assert!(r.deleted);
        let r = record(json!({"id": "P1", "is_deleted": false}));
        assert!(!r.deleted);
    }

    #[test]
    fn missing_id_is_rejected_and_missing_name_falls_back() {
        assert!(CatalogProduct::from_record(record(json!({"name": "Ghost"}))).is_err());

        let p = CatalogProduct::from_record(record(json!({"id": "P9", "name": "  "}))).unwrap();
        assert_eq!(p.name, "P9");
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: a price sent as a number or as a numeric string decodes the same.
            #[test]
            fn numeric_string_prices_match_numbers(price in any::<u32>()) {
                let as_number = record(json!({"id": "P1", "harga": price}));
                let as_string = record(json!({"id": "P1", "harga": price.to_string()}));
                prop_assert_eq!(as_number.price, Some(u64::from(price)));
                prop_assert_eq!(as_string.price, as_number.price);
            }

            /// Property: negative prices never decode.
            #[test]
            fn negative_prices_are_missing(price in i64::MIN..0) {
                prop_assert_eq!(record(json!({"id": "P1", "harga": price})).price, None);
                let as_string = record(json!({"id": "P1", "harga": price.to_string()}));
                prop_assert_eq!(as_string.price, None);
            }
        }
    }
}
