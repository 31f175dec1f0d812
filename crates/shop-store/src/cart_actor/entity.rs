//! [`ActorEntity`] implementation for the [`Cart`] domain type.
//!
//! Carts are created empty and only change through [`CartAction`]s, so the update
//! payload is uninhabited. Line items reference products by id only; whether the
//! product exists in the catalog is not checked.

use super::actions::CartAction;
use crate::error::StoreError;
use crate::model::{Cart, CartId, LineItem};
use chrono::Utc;
use collection_actor::ActorEntity;
use std::convert::Infallible;

impl ActorEntity for Cart {
    type Id = CartId;
    type Create = ();
    type Update = Infallible;
    type Action = CartAction;
    type ActionResult = Cart;
    type Query = ();
    type Page = Vec<Cart>;
    type Error = StoreError;

    fn id(&self) -> &CartId {
        &self.id
    }

    fn from_create_params(id: CartId, _params: (), _collection: &[Self]) -> Result<Self, StoreError> {
        Ok(Cart::new(id))
    }

    fn on_update(&mut self, update: Infallible, _collection: &[Self]) -> Result<(), StoreError> {
        match update {}
    }

    /// Applies a line-item action and refreshes `updatedAt`.
    ///
    /// # Actions
    /// - `AddProduct`: increments an existing line item or appends a new one
    /// - `UpdateQuantity`: overwrites the quantity of an existing line item
    /// - `RemoveProduct`: drops an existing line item
    /// - `Clear`: empties the cart
    fn handle_action(&mut self, action: CartAction) -> Result<Cart, StoreError> {
        match action {
            CartAction::AddProduct { product, quantity } => {
                ensure_positive(quantity)?;
                match self.products.iter_mut().find(|item| item.product == product) {
                    Some(item) => {
                        item.quantity = item.quantity.checked_add(quantity).ok_or_else(|| {
                            StoreError::validation(format!(
                                "quantity of product {product} would exceed {}",
                                u32::MAX
                            ))
                        })?;
                    }
                    None => self.products.push(LineItem { product, quantity }),
                }
            }
            CartAction::UpdateQuantity { product, quantity } => {
                ensure_positive(quantity)?;
                let item = self
                    .products
                    .iter_mut()
                    .find(|item| item.product == product)
                    .ok_or_else(|| StoreError::not_found("Product in cart", product))?;
                item.quantity = quantity;
            }
            CartAction::RemoveProduct { product } => {
                let index = self
                    .products
                    .iter()
                    .position(|item| item.product == product)
                    .ok_or_else(|| StoreError::not_found("Product in cart", product))?;
                self.products.remove(index);
            }
            CartAction::Clear => self.products.clear(),
        }

        self.updated_at = Utc::now();
        Ok(self.clone())
    }

    fn query(collection: Vec<Self>, _query: ()) -> Result<Vec<Cart>, StoreError> {
        Ok(collection)
    }
}

/// Line-item quantities start at one.
pub fn ensure_positive(quantity: u32) -> Result<(), StoreError> {
    if quantity == 0 {
        return Err(StoreError::validation("quantity must be an integer >= 1"));
    }
    Ok(())
}
