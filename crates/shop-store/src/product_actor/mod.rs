//! # Product Actor
//!
//! This module implements the Product resource actor: the catalog, persisted in one
//! JSON collection file.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](collection_actor::ActorEntity) implementation for [`Product`]
//! - [`validation`] - field rules shared by creation and partial updates
//! - [`query`] - filter, sort and pagination of listings
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use shop_store::clients::ProductClient;
//! use shop_store::model::{ProductDraft, ProductQuery};
//! use shop_store::product_actor;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dir = tempfile::tempdir()?;
//!     let (actor, generic_client) = product_actor::new(dir.path().join("products.json"), 8);
//!     let client = ProductClient::new(generic_client);
//!     tokio::spawn(actor.run());
//!
//!     let draft = ProductDraft {
//!         title: Some("Widget".into()),
//!         description: Some("A very useful widget".into()),
//!         price: Some(29.99),
//!         stock: Some(100),
//!         category: Some("tools".into()),
//!         code: Some("WDG-1".into()),
//!         ..Default::default()
//!     };
//!     let product = client.add_product(draft).await?;
//!
//!     let page = client.list_products(ProductQuery::default()).await?;
//!     assert_eq!(page.items, vec![product]);
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod query;
pub mod validation;

use crate::model::{Product, ProductId};
use collection_actor::{JsonCollection, ResourceActor, ResourceClient};
use std::path::PathBuf;

/// Creates a new Product actor owning the collection file at `path`, and its client.
pub fn new(
    path: impl Into<PathBuf>,
    buffer_size: usize,
) -> (ResourceActor<Product>, ResourceClient<Product>) {
    ResourceActor::new(buffer_size, JsonCollection::new(path), ProductId::new_v4)
}
