//! One row of the sales entry form.

use storedesk_core::{Money, ProductId};

/// The product chosen on a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineProduct {
    pub id: ProductId,
    pub name: String,
}

/// A line item. Starts empty (no product, quantity 0) and is filled in by the
/// form; it only counts once a product is chosen and the quantity is positive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineItem {
    pub(crate) product: Option<LineProduct>,
    pub(crate) unit_price: Money,
    /// Raw quantity as entered; may be zero or negative while the user edits.
    pub(crate) quantity: i64,
    pub(crate) available_stock: Option<u32>,
}

impl LineItem {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn product(&self) -> Option<&LineProduct> {
        self.product.as_ref()
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn available_stock(&self) -> Option<u32> {
        self.available_stock
    }

    /// Product chosen and quantity positive.
    pub fn counts_toward_total(&self) -> bool {
        self.product.is_some() && self.quantity > 0
    }

    /// Counted and priced. A line whose price is unknown (0) stays off the
    /// payload until a priced product is chosen.
    pub fn is_submittable(&self) -> bool {
        self.counts_toward_total() && !self.unit_price.is_zero()
    }

    /// `unit_price × quantity` for counted lines, otherwise zero.
    pub fn subtotal(&self) -> Money {
        if self.counts_toward_total() {
            self.unit_price.times(self.quantity.unsigned_abs())
        } else {
            Money::ZERO
        }
    }

    /// Units requested beyond the stock the catalog reported, if any.
    pub fn stock_shortfall(&self) -> Option<u64> {
        let stock = u64::from(self.available_stock?);
        let wanted = u64::try_from(self.quantity).ok()?;
        (self.product.is_some() && wanted > stock).then(|| wanted - stock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(price: u64, quantity: i64) -> LineItem {
        LineItem {
            product: Some(LineProduct {
                id: ProductId::new("P1").unwrap(),
                name: "Kopi".into(),
            }),
            unit_price: Money::new(price),
            quantity,
            available_stock: None,
        }
    }

    #[test]
    fn empty_line_contributes_nothing() {
        let l = LineItem::empty();
        assert!(!l.counts_toward_total());
        assert_eq!(l.subtotal(), Money::ZERO);
    }

    #[test]
    fn subtotal_is_price_times_quantity() {
        assert_eq!(line(10_000, 2).subtotal(), Money::new(20_000));
    }

    #[test]
    fn non_positive_quantity_contributes_nothing() {
        assert_eq!(line(10_000, 0).subtotal(), Money::ZERO);
        assert_eq!(line(10_000, -5).subtotal(), Money::ZERO);
        assert!(!line(10_000, -5).is_submittable());
    }

    #[test]
    fn unpriced_line_counts_but_is_not_submittable() {
        let l = line(0, 3);
        assert!(l.counts_toward_total());
        assert!(!l.is_submittable());
        assert_eq!(l.subtotal(), Money::ZERO);
    }

    #[test]
    fn shortfall_only_when_quantity_exceeds_known_stock() {
        let mut l = line(1000, 5);
        assert_eq!(l.stock_shortfall(), None);
        l.available_stock = Some(3);
        assert_eq!(l.stock_shortfall(), Some(2));
        l.quantity = 3;
        assert_eq!(l.stock_shortfall(), None);
    }
}
