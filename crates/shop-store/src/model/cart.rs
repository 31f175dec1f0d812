use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use uuid::Uuid;

use crate::error::StoreError;
use crate::model::ProductId;

/// Type-safe identifier for Carts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartId(pub Uuid);

impl CartId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parses a cart id received from a caller.
    pub fn parse(raw: &str) -> Result<Self, StoreError> {
        Uuid::parse_str(raw.trim())
            .map(Self)
            .map_err(|_| StoreError::validation(format!("cart id must be a valid UUID: {raw}")))
    }
}

impl Display for CartId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One product in a cart. A product id appears at most once per cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub product: ProductId,
    pub quantity: u32,
}

/// A shopping cart and its line items, in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub id: CartId,
    pub products: Vec<LineItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    pub fn new(id: CartId) -> Self {
        let now = Utc::now();
        Self {
            id,
            products: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn line_item(&self, product: &ProductId) -> Option<&LineItem> {
        self.products.iter().find(|item| &item.product == product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cart_is_empty_with_equal_timestamps() {
        let cart = Cart::new(CartId::new_v4());
        assert!(cart.products.is_empty());
        assert_eq!(cart.created_at, cart.updated_at);
    }

    #[test]
    fn test_cart_json_field_names() {
        let mut cart = Cart::new(CartId::new_v4());
        let product = ProductId::new_v4();
        cart.products.push(LineItem { product, quantity: 2 });

        let value = serde_json::to_value(&cart).unwrap();
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
        assert_eq!(value["products"][0]["product"], product.to_string());
        assert_eq!(value["products"][0]["quantity"], 2);

        let back: Cart = serde_json::from_value(value).unwrap();
        assert_eq!(back, cart);
    }
}
