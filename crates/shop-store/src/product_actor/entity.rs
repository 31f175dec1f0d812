//! [`ActorEntity`] implementation for the [`Product`] domain type.
//!
//! Field rules live in [`validation`](super::validation) and listing logic in
//! [`query`](super::query); this module enforces the collection-wide rule that no two
//! products share a `code`.

use super::query::run_query;
use super::validation::{validate_draft, validate_patch};
use crate::error::StoreError;
use crate::model::{Page, Product, ProductDraft, ProductId, ProductPatch, ProductQuery};
use collection_actor::ActorEntity;

impl ActorEntity for Product {
    type Id = ProductId;
    type Create = ProductDraft;
    type Update = ProductPatch;
    type Action = ();
    type ActionResult = ();
    type Query = ProductQuery;
    type Page = Page<Product>;
    type Error = StoreError;

    fn id(&self) -> &ProductId {
        &self.id
    }

    /// Validates the draft and rejects a `code` already used by another product.
    fn from_create_params(
        id: ProductId,
        draft: ProductDraft,
        collection: &[Self],
    ) -> Result<Self, StoreError> {
        let fields = validate_draft(draft)?;
        ensure_unique_code(&fields.code, &id, collection)?;

        Ok(Self {
            id,
            title: fields.title,
            description: fields.description,
            price: fields.price,
            stock: fields.stock,
            category: fields.category,
            code: fields.code,
            status: fields.status,
            thumbnails: fields.thumbnails,
        })
    }

    /// Merges the fields present in the patch. The id never changes.
    fn on_update(&mut self, patch: ProductPatch, collection: &[Self]) -> Result<(), StoreError> {
        let patch = validate_patch(patch)?;
        if let Some(code) = &patch.code {
            ensure_unique_code(code, &self.id, collection)?;
        }

        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(stock) = patch.stock {
            self.stock = stock;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(code) = patch.code {
            self.code = code;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(thumbnails) = patch.thumbnails {
            self.thumbnails = thumbnails;
        }
        Ok(())
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), StoreError> {
        Ok(())
    }

    fn query(collection: Vec<Self>, query: ProductQuery) -> Result<Page<Product>, StoreError> {
        run_query(collection, query)
    }
}

fn ensure_unique_code(code: &str, owner: &ProductId, collection: &[Product]) -> Result<(), StoreError> {
    if collection.iter().any(|p| &p.id != owner && p.code == code) {
        return Err(StoreError::Conflict(format!(
            "a product with code {code} already exists"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(code: &str) -> ProductDraft {
        ProductDraft {
            title: Some("Teapot".into()),
            description: Some("Cast iron teapot, 1L".into()),
            price: Some(30.0),
            stock: Some(2),
            category: Some("kitchen".into()),
            code: Some(code.into()),
            status: Some(false),
            thumbnails: Some(vec!["teapot.png".into()]),
        }
    }

    #[test]
    fn test_create_keeps_optional_fields() {
        let product = Product::from_create_params(ProductId::new_v4(), draft("TEA-1"), &[]).unwrap();
        assert!(!product.status);
        assert_eq!(product.thumbnails, vec!["teapot.png".to_string()]);
    }

    #[test]
    fn test_duplicate_code_is_a_conflict() {
        let existing = Product::from_create_params(ProductId::new_v4(), draft("TEA-1"), &[]).unwrap();
        let err = Product::from_create_params(ProductId::new_v4(), draft(" TEA-1 "), &[existing])
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[test]
    fn test_code_comparison_is_case_sensitive() {
        let existing = Product::from_create_params(ProductId::new_v4(), draft("TEA-1"), &[]).unwrap();
        assert!(Product::from_create_params(ProductId::new_v4(), draft("tea-1"), &[existing]).is_ok());
    }

    #[test]
    fn test_update_may_keep_its_own_code() {
        let mut product = Product::from_create_params(ProductId::new_v4(), draft("TEA-1"), &[]).unwrap();
        let collection = vec![product.clone()];
        let patch = ProductPatch {
            code: Some("TEA-1".into()),
            price: Some(25.0),
            ..Default::default()
        };
        product.on_update(patch, &collection).unwrap();
        assert_eq!(product.price, 25.0);
    }

    #[test]
    fn test_update_to_another_products_code_conflicts() {
        let a = Product::from_create_params(ProductId::new_v4(), draft("TEA-1"), &[]).unwrap();
        let mut b = Product::from_create_params(ProductId::new_v4(), draft("TEA-2"), &[a.clone()]).unwrap();
        let collection = vec![a, b.clone()];
        let patch = ProductPatch {
            code: Some("TEA-1".into()),
            ..Default::default()
        };
        assert!(matches!(b.on_update(patch, &collection), Err(StoreError::Conflict(_))));
    }

    #[test]
    fn test_empty_patch_changes_nothing() {
        let mut product = Product::from_create_params(ProductId::new_v4(), draft("TEA-1"), &[]).unwrap();
        let before = product.clone();
        product.on_update(ProductPatch::default(), &[before.clone()]).unwrap();
        assert_eq!(product, before);
    }
}
