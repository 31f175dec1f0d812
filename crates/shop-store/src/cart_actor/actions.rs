//! Custom actions for the Cart actor.

use crate::model::ProductId;

/// Line-item operations on a single cart.
///
/// Every action returns the whole updated [`Cart`](crate::model::Cart).
#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    /// Adds `quantity` units, merging into an existing line item.
    AddProduct { product: ProductId, quantity: u32 },
    /// Overwrites the quantity of an existing line item.
    UpdateQuantity { product: ProductId, quantity: u32 },
    /// Removes a line item.
    RemoveProduct { product: ProductId },
    /// Removes every line item.
    Clear,
}
