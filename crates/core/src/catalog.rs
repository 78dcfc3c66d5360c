//! Catalog product projection and partition views.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Read-only projection of an upstream catalog record.
///
/// Not persisted by any KubeMart component; the Catalog Gateway reshapes
/// upstream data into this form per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogProduct {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
    pub category: String,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<Decimal>,
}

/// The three-way catalog partition served by the gateway.
///
/// `all` is an order-preserving passthrough of the full upstream list;
/// `best_sellers` and `on_sale` are threshold-filtered subsets of it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub best_sellers: Vec<CatalogProduct>,
    pub on_sale: Vec<CatalogProduct>,
    pub all: Vec<CatalogProduct>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_uses_camel_case_field_names() {
        let json = serde_json::to_value(Catalog::default()).expect("serialize");
        assert!(json.get("bestSellers").is_some());
        assert!(json.get("onSale").is_some());
        assert!(json.get("all").is_some());
    }

    #[test]
    fn absent_optional_fields_are_omitted() {
        let product = CatalogProduct {
            id: 1,
            name: "Widget".to_string(),
            price: Decimal::from(12),
            category: "tools".to_string(),
            image: "https://cdn.example.com/widget.png".to_string(),
            discount: None,
            stock: Some(90),
            brand: None,
            description: None,
            rating: None,
        };
        let json = serde_json::to_value(&product).expect("serialize");
        assert!(json.get("discount").is_none());
        assert!(json.get("brand").is_none());
        assert_eq!(json["stock"], serde_json::json!(90));
    }
}
