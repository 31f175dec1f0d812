//! Field rules for products.
//!
//! Every rule is checked and every violation is collected, so one
//! [`StoreError::Validation`] names all bad fields of a request.

use crate::error::StoreError;
use crate::model::{ProductDraft, ProductPatch};

/// Inclusive length bounds, in characters, of the text fields.
const TITLE: (usize, usize) = (3, 100);
const DESCRIPTION: (usize, usize) = (10, 500);
const CATEGORY: (usize, usize) = (2, 50);
const CODE: (usize, usize) = (3, 20);

/// The fields of a product after validation, trimmed and range checked.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidFields {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub stock: u32,
    pub category: String,
    pub code: String,
    pub status: bool,
    pub thumbnails: Vec<String>,
}

/// Subset of [`ValidFields`] present in a patch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<u32>,
    pub category: Option<String>,
    pub code: Option<String>,
    pub status: Option<bool>,
    pub thumbnails: Option<Vec<String>>,
}

#[derive(Default)]
struct Errors(Vec<String>);

impl Errors {
    fn required<T>(&mut self, name: &str, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.0.push(format!("{name} is required"));
        }
        value
    }

    fn text(&mut self, name: &str, value: &str, (min, max): (usize, usize)) -> Option<String> {
        let trimmed = value.trim();
        let len = trimmed.chars().count();
        if len < min || len > max {
            self.0
                .push(format!("{name} must be between {min} and {max} characters"));
            return None;
        }
        Some(trimmed.to_string())
    }

    fn price(&mut self, value: f64) -> Option<f64> {
        if !value.is_finite() || value < 0.0 {
            self.0.push("price must be a non-negative number".to_string());
            return None;
        }
        Some(value)
    }

    fn stock(&mut self, value: i64) -> Option<u32> {
        if value < 0 {
            self.0.push("stock must be a non-negative integer".to_string());
            return None;
        }
        match u32::try_from(value) {
            Ok(stock) => Some(stock),
            Err(_) => {
                self.0.push(format!("stock must be at most {}", u32::MAX));
                None
            }
        }
    }

    fn finish(self) -> Result<(), StoreError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(StoreError::Validation(self.0))
        }
    }
}

pub fn validate_draft(draft: ProductDraft) -> Result<ValidFields, StoreError> {
    let mut errors = Errors::default();

    let title = errors
        .required("title", draft.title)
        .and_then(|v| errors.text("title", &v, TITLE));
    let description = errors
        .required("description", draft.description)
        .and_then(|v| errors.text("description", &v, DESCRIPTION));
    let price = errors
        .required("price", draft.price)
        .and_then(|v| errors.price(v));
    let stock = errors
        .required("stock", draft.stock)
        .and_then(|v| errors.stock(v));
    let category = errors
        .required("category", draft.category)
        .and_then(|v| errors.text("category", &v, CATEGORY));
    let code = errors
        .required("code", draft.code)
        .and_then(|v| errors.text("code", &v, CODE));

    // finish() returns Err whenever any of the options above is None
    errors.finish()?;
    match (title, description, price, stock, category, code) {
        (Some(title), Some(description), Some(price), Some(stock), Some(category), Some(code)) => {
            Ok(ValidFields {
                title,
                description,
                price,
                stock,
                category,
                code,
                status: draft.status.unwrap_or(true),
                thumbnails: draft.thumbnails.unwrap_or_default(),
            })
        }
        _ => Err(StoreError::validation("incomplete product")),
    }
}

pub fn validate_patch(patch: ProductPatch) -> Result<ValidPatch, StoreError> {
    let mut errors = Errors::default();

    let valid = ValidPatch {
        title: patch.title.and_then(|v| errors.text("title", &v, TITLE)),
        description: patch
            .description
            .and_then(|v| errors.text("description", &v, DESCRIPTION)),
        price: patch.price.and_then(|v| errors.price(v)),
        stock: patch.stock.and_then(|v| errors.stock(v)),
        category: patch
            .category
            .and_then(|v| errors.text("category", &v, CATEGORY)),
        code: patch.code.and_then(|v| errors.text("code", &v, CODE)),
        status: patch.status,
        thumbnails: patch.thumbnails,
    };

    errors.finish()?;
    Ok(valid)
}
