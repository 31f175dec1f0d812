//! Type-safe wrappers around the generic `ResourceClient`s.
//!
//! Callers hand in ids as received (`&str`). The clients parse them, send the request
//! to the owning actor and map every failure onto [`StoreError`](crate::error::StoreError).

pub mod cart_client;
pub mod product_client;

pub use cart_client::CartClient;
pub use product_client::ProductClient;
