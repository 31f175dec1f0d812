//! Represents a product in the catalog.
//!
//! # Actor Framework
//! [`Product`] implements the [`ActorEntity`](collection_actor::ActorEntity) trait,
//! allowing it to be managed by a [`ResourceActor`](collection_actor::ResourceActor).
//!
//! See [`product_actor`](crate::product_actor) for details on:
//! - Creation parameters ([`ProductDraft`])
//! - Update parameters ([`ProductPatch`])
//! - List parameters ([`ProductQuery`](crate::model::ProductQuery))

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use uuid::Uuid;

use crate::error::StoreError;

/// Type-safe identifier for Products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub Uuid);

impl ProductId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parses a product id received from a caller.
    pub fn parse(raw: &str) -> Result<Self, StoreError> {
        Uuid::parse_str(raw.trim())
            .map(Self)
            .map_err(|_| StoreError::validation(format!("product id must be a valid UUID: {raw}")))
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub stock: u32,
    pub category: String,
    pub code: String,
    #[serde(default = "default_status")]
    pub status: bool,
    #[serde(default)]
    pub thumbnails: Vec<String>,
}

fn default_status() -> bool {
    true
}

/// DTO for Product creation.
///
/// Every field is optional at the type level so that a single validation pass can
/// report all missing fields at once. `stock` is signed so a negative value is
/// reported as out of range rather than as a malformed body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i64>,
    pub category: Option<String>,
    pub code: Option<String>,
    pub status: Option<bool>,
    pub thumbnails: Option<Vec<String>>,
}

/// DTO for Product updates. Only the fields present are validated and applied.
///
/// An `id` in the incoming body is not part of the patch and is dropped on
/// deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i64>,
    pub category: Option<String>,
    pub code: Option<String>,
    pub status: Option<bool>,
    pub thumbnails: Option<Vec<String>>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.stock.is_none()
            && self.category.is_none()
            && self.code.is_none()
            && self.status.is_none()
            && self.thumbnails.is_none()
    }
}
