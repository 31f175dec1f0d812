//! # Cart Actor
//!
//! This module implements the Cart resource actor. Carts are created empty and then
//! changed only through custom actions on their line items.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](collection_actor::ActorEntity) implementation for [`Cart`]
//! - [`actions`] - [`CartAction`] for line-item operations
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Custom Actions
//!
//! ```rust,ignore
//! let cart = cart_client.create_cart().await?;
//! let id = cart.id.to_string();
//! cart_client.add_product(&id, &product_id, Some(2)).await?;
//! cart_client.update_quantity(&id, &product_id, 5).await?;
//! cart_client.remove_product(&id, &product_id).await?;
//! ```
//!
//! Because each action runs inside the actor, two requests adding different products
//! to the same cart at the same time both end up in the file.

pub mod actions;
pub mod entity;

pub use actions::*;

use crate::model::{Cart, CartId};
use collection_actor::{JsonCollection, ResourceActor, ResourceClient};
use std::path::PathBuf;

/// Creates a new Cart actor owning the collection file at `path`, and its client.
pub fn new(
    path: impl Into<PathBuf>,
    buffer_size: usize,
) -> (ResourceActor<Cart>, ResourceClient<Cart>) {
    ResourceActor::new(buffer_size, JsonCollection::new(path), CartId::new_v4)
}
