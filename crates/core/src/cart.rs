//! Cart line items and derived pricing.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One product entry in the cart with an aggregated quantity.
///
/// Identity key is `id`: the cart holds at most one line item per id, and
/// `quantity` is always >= 1 (decrementing the last unit removes the row
/// instead of persisting a zero-quantity entry).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: i64,
    pub name: String,
    /// Unit price in the currency's standard unit. Serialized as a plain
    /// JSON number.
    pub price: Decimal,
    pub quantity: u32,
}

impl LineItem {
    /// Price of the whole line (`price * quantity`).
    #[must_use]
    pub fn line_price(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// The tax rate applied when a deployment does not configure its own.
#[must_use]
pub fn default_tax_rate() -> Decimal {
    // 0.13
    Decimal::new(13, 2)
}

/// Derived cart totals, computed on demand from a cart snapshot.
///
/// Never stored: every render recomputes these from the current line items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl CartTotals {
    /// Compute totals from a cart snapshot.
    ///
    /// `subtotal` is the sum of `price * quantity` over all line items,
    /// `tax` is `subtotal * tax_rate`, and `total` is their sum.
    #[must_use]
    pub fn compute(items: &[LineItem], tax_rate: Decimal) -> Self {
        let subtotal: Decimal = items.iter().map(LineItem::line_price).sum();
        let tax = subtotal * tax_rate;
        Self {
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, price: Decimal, quantity: u32) -> LineItem {
        LineItem {
            id,
            name: format!("Item {id}"),
            price,
            quantity,
        }
    }

    #[test]
    fn totals_from_spec_example() {
        // [{price: 10, quantity: 2}, {price: 5, quantity: 1}]
        let items = vec![
            item(1, Decimal::from(10), 2),
            item(2, Decimal::from(5), 1),
        ];
        let totals = CartTotals::compute(&items, default_tax_rate());

        assert_eq!(totals.subtotal, Decimal::from(25));
        assert_eq!(totals.tax, Decimal::new(325, 2)); // 3.25
        assert_eq!(totals.total, Decimal::new(2825, 2)); // 28.25
    }

    #[test]
    fn totals_of_empty_cart_are_zero() {
        let totals = CartTotals::compute(&[], default_tax_rate());
        assert_eq!(totals.subtotal, Decimal::ZERO);
        assert_eq!(totals.tax, Decimal::ZERO);
        assert_eq!(totals.total, Decimal::ZERO);
    }

    #[test]
    fn line_item_price_serializes_as_number() {
        let line = item(7, Decimal::new(1999, 2), 3);
        let json = serde_json::to_value(&line).expect("serialize");
        assert_eq!(json["price"], serde_json::json!(19.99));
        assert_eq!(json["quantity"], serde_json::json!(3));
    }

    #[test]
    fn line_item_deserializes_from_plain_numbers() {
        let line: LineItem =
            serde_json::from_str(r#"{"id":1,"name":"A","price":10,"quantity":2}"#)
                .expect("deserialize");
        assert_eq!(line.price, Decimal::from(10));
        assert_eq!(line.line_price(), Decimal::from(20));
    }
}
