//! # Cart Client
//!
//! Provides a high-level API for interacting with the `Cart` actor. Every line-item
//! operation is sent as a [`CartAction`] and answered with the updated cart.
use crate::cart_actor::entity::ensure_positive;
use crate::cart_actor::CartAction;
use crate::error::StoreError;
use crate::model::{Cart, CartId, ProductId};
use async_trait::async_trait;
use collection_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

const RESOURCE: &str = "Cart";

/// Client for interacting with the Cart actor.
#[derive(Clone)]
pub struct CartClient {
    inner: ResourceClient<Cart>,
}

impl CartClient {
    pub fn new(inner: ResourceClient<Cart>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Cart> for CartClient {
    type Error = StoreError;

    fn inner(&self) -> &ResourceClient<Cart> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        StoreError::from_framework(RESOURCE, e)
    }
}

impl CartClient {
    /// Creates and stores an empty cart.
    #[instrument(skip(self))]
    pub async fn create_cart(&self) -> Result<Cart, StoreError> {
        self.inner.create(()).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn get_cart(&self, cid: &str) -> Result<Cart, StoreError> {
        let id = CartId::parse(cid)?;
        self.get(id)
            .await?
            .ok_or_else(|| StoreError::not_found(RESOURCE, id))
    }

    /// Every stored cart, in stored order.
    pub async fn list_carts(&self) -> Result<Vec<Cart>, StoreError> {
        self.list(()).await
    }

    /// Adds `quantity` units of a product (1 when `None`), merging with an existing
    /// line item. The product is not looked up in the catalog.
    #[instrument(skip(self))]
    pub async fn add_product(
        &self,
        cid: &str,
        pid: &str,
        quantity: Option<u32>,
    ) -> Result<Cart, StoreError> {
        let quantity = quantity.unwrap_or(1);
        let (id, product) = parse_line(cid, pid, quantity)?;
        debug!(%id, %product, quantity, "Adding product to cart");
        self.action(id, CartAction::AddProduct { product, quantity })
            .await
    }

    #[instrument(skip(self))]
    pub async fn update_quantity(
        &self,
        cid: &str,
        pid: &str,
        quantity: u32,
    ) -> Result<Cart, StoreError> {
        let (id, product) = parse_line(cid, pid, quantity)?;
        self.action(id, CartAction::UpdateQuantity { product, quantity })
            .await
    }

    #[instrument(skip(self))]
    pub async fn remove_product(&self, cid: &str, pid: &str) -> Result<Cart, StoreError> {
        let (id, product) = parse_ids(cid, pid)?;
        self.action(id, CartAction::RemoveProduct { product }).await
    }

    /// Removes every line item. The cart itself is kept.
    #[instrument(skip(self))]
    pub async fn clear(&self, cid: &str) -> Result<Cart, StoreError> {
        let id = CartId::parse(cid)?;
        self.action(id, CartAction::Clear).await
    }

    async fn action(&self, id: CartId, action: CartAction) -> Result<Cart, StoreError> {
        self.inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)
    }
}

/// Parses both ids, reporting every malformed one.
fn parse_ids(cid: &str, pid: &str) -> Result<(CartId, ProductId), StoreError> {
    match (CartId::parse(cid), ProductId::parse(pid)) {
        (Ok(cart), Ok(product)) => Ok((cart, product)),
        (Err(StoreError::Validation(mut a)), Err(StoreError::Validation(b))) => {
            a.extend(b);
            Err(StoreError::Validation(a))
        }
        (Err(e), _) | (_, Err(e)) => Err(e),
    }
}

/// Checks the ids and the quantity before the cart is looked up.
fn parse_line(cid: &str, pid: &str, quantity: u32) -> Result<(CartId, ProductId), StoreError> {
    match (parse_ids(cid, pid), ensure_positive(quantity)) {
        (Ok(ids), Ok(())) => Ok(ids),
        (Err(StoreError::Validation(mut a)), Err(StoreError::Validation(b))) => {
            a.extend(b);
            Err(StoreError::Validation(a))
        }
        (Err(e), _) | (_, Err(e)) => Err(e),
    }
}
