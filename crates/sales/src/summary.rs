//! Recorded sales as listed by the backend (the sales table).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storedesk_core::{Entity, Money, SaleId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoldItem {
    #[serde(alias = "id_produk")]
    pub product_id: String,
    #[serde(default, alias = "nama_produk")]
    pub product_name: String,
    #[serde(alias = "jumlah_produk", alias = "jumlah")]
    pub quantity: u64,
    #[serde(alias = "harga")]
    pub unit_price: Money,
    #[serde(default)]
    pub subtotal: Money,
}

/// One row of the sales table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleSummary {
    #[serde(alias = "id_penjualan")]
    pub id: SaleId,
    #[serde(alias = "nama_penjual")]
    pub seller_name: String,
    #[serde(default)]
    pub total: Money,
    #[serde(alias = "tanggal")]
    pub timestamp: DateTime<Utc>,
    #[serde(default, alias = "produk")]
    pub items: Vec<SoldItem>,
}

impl Entity for SaleSummary {
    type Id = SaleId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Order rows the way the table shows them: newest first, ties by id.
pub fn sort_newest_first(rows: &mut [SaleSummary]) {
    rows.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then_with(|| a.id.cmp(&b.id)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_backend_rows() {
        let row: SaleSummary = serde_json::from_value(json!({
            "id_penjualan": "PJ001",
            "nama_penjual": "Ani",
            "tanggal": "2024-05-01T10:00:00Z",
            "produk": [
                {
                    "id_produk": "PRD001",
                    "nama_produk": "Kopi",
                    "jumlah_produk": 2,
                    "harga": 10000,
                    "subtotal": 20000
                }
            ],
            "total": 20000,
            "updated_at": "2024-05-01T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(row.id.as_str(), "PJ001");
        assert_eq!(row.items[0].quantity, 2);
        assert_eq!(row.total, Money::new(20_000));
    }

    #[test]
    fn sorts_newest_first() {
        let mk = |id: &str, ts: &str| SaleSummary {
            id: SaleId::new(id).unwrap(),
            seller_name: "x".into(),
            total: Money::ZERO,
            timestamp: ts.parse().unwrap(),
            items: Vec::new(),
        };
        let mut rows = vec![
            mk("A", "2024-05-01T10:00:00Z"),
            mk("B", "2024-05-03T10:00:00Z"),
            mk("C", "2024-05-02T10:00:00Z"),
        ];
        sort_newest_first(&mut rows);
        let ids: Vec<_> = rows.iter().map(|r| r.id.to_string()).collect();
        assert_eq!(ids, vec!["B", "C", "A"]);
    }
}
