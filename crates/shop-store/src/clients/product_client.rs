//! # Product Client
//!
//! Provides a high-level API for interacting with the `Product` actor.
//! It wraps a `ResourceClient<Product>`, parses caller-supplied ids and turns framework
//! failures into [`StoreError`]s.
use crate::error::StoreError;
use crate::model::{Page, Product, ProductDraft, ProductId, ProductPatch, ProductQuery};
use collection_actor::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

const RESOURCE: &str = "Product";

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Product> for ProductClient {
    type Error = StoreError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        StoreError::from_framework(RESOURCE, e)
    }
}

impl ProductClient {
    /// Lists products matching `query`, one page at a time.
    pub async fn list_products(&self, query: ProductQuery) -> Result<Page<Product>, StoreError> {
        self.list(query).await
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: &str) -> Result<Product, StoreError> {
        let id = ProductId::parse(id)?;
        self.get(id)
            .await?
            .ok_or_else(|| StoreError::not_found(RESOURCE, id))
    }

    /// Validates and stores a new product. The id is assigned by the store.
    #[instrument(skip(self, draft))]
    pub async fn add_product(&self, draft: ProductDraft) -> Result<Product, StoreError> {
        debug!(?draft, "add_product called");
        self.inner.create(draft).await.map_err(Self::map_error)
    }

    #[instrument(skip(self, patch))]
    pub async fn update_product(
        &self,
        id: &str,
        patch: ProductPatch,
    ) -> Result<Product, StoreError> {
        let id = ProductId::parse(id)?;
        debug!(?patch, "update_product called");
        self.inner.update(id, patch).await.map_err(Self::map_error)
    }

    /// Deletes a product and returns the removed record.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: &str) -> Result<Product, StoreError> {
        let id = ProductId::parse(id)?;
        self.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use collection_actor::mock::{create_mock_client, expect_update, MockClient};
    use collection_actor::StorageError;

    fn product(id: ProductId) -> Product {
        Product {
            id,
            title: "Kettle".into(),
            description: "Electric kettle 1.7L".into(),
            price: 40.0,
            stock: 3,
            category: "kitchen".into(),
            code: "KTL-1".into(),
            status: true,
            thumbnails: vec![],
        }
    }

    #[tokio::test]
    async fn test_get_product_parses_id_and_returns_record() {
        let id = ProductId::new_v4();
        let mut mock = MockClient::<Product>::new();
        mock.expect_get(id).return_ok(Some(product(id)));

        let client = ProductClient::new(mock.client());
        let found = client.get_product(&id.to_string()).await.unwrap();
        assert_eq!(found.id, id);
        mock.verify();
    }

    #[tokio::test]
    async fn test_get_missing_product_is_not_found() {
        let id = ProductId::new_v4();
        let mut mock = MockClient::<Product>::new();
        mock.expect_get(id).return_ok(None);

        let client = ProductClient::new(mock.client());
        let err = client.get_product(&id.to_string()).await.unwrap_err();
        assert_eq!(err, StoreError::not_found("Product", id));
        mock.verify();
    }

    #[tokio::test]
    async fn test_malformed_id_never_reaches_the_actor() {
        let mock = MockClient::<Product>::new();
        let client = ProductClient::new(mock.client());

        for result in [
            client.get_product("42").await,
            client.update_product("42", ProductPatch::default()).await,
            client.delete_product("42").await,
        ] {
            assert!(matches!(result, Err(StoreError::Validation(_))));
        }
        mock.verify();
    }

    #[tokio::test]
    async fn test_update_sends_patch_to_the_actor() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);
        let id = ProductId::new_v4();

        let update_task = tokio::spawn(async move {
            let patch = ProductPatch {
                stock: Some(9),
                ..Default::default()
            };
            product_client.update_product(&id.to_string(), patch).await
        });

        let (got_id, patch, responder) = expect_update(&mut receiver)
            .await
            .expect("Expected Update request");
        assert_eq!(got_id, id);
        assert_eq!(patch.stock, Some(9));

        let mut updated = product(id);
        updated.stock = 9;
        responder.send(Ok(updated)).unwrap();

        assert_eq!(update_task.await.unwrap().unwrap().stock, 9);
    }

    #[tokio::test]
    async fn test_entity_conflict_is_recovered() {
        let mut mock = MockClient::<Product>::new();
        mock.expect_create().return_err(FrameworkError::EntityError(Box::new(
            StoreError::Conflict("a product with code KTL-1 already exists".into()),
        )));

        let client = ProductClient::new(mock.client());
        let err = client.add_product(ProductDraft::default()).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
        mock.verify();
    }

    #[tokio::test]
    async fn test_storage_failures_keep_their_kind() {
        let parse_error = serde_json::from_str::<Vec<Product>>("{").unwrap_err();
        let mut mock = MockClient::<Product>::new();
        mock.expect_list()
            .return_err(FrameworkError::Storage(StorageError::Parse {
                path: "products.json".into(),
                source: parse_error,
            }));
        mock.expect_list().return_err(FrameworkError::ActorClosed);

        let client = ProductClient::new(mock.client());
        assert!(matches!(
            client.list_products(ProductQuery::default()).await,
            Err(StoreError::Parse(_))
        ));
        assert!(matches!(
            client.list_products(ProductQuery::default()).await,
            Err(StoreError::Internal(_))
        ));
        mock.verify();
    }
}
