//! `/api/products` handlers.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};

use super::error::ApiError;
use super::AppState;
use crate::model::{Page, Product, ProductDraft, ProductPatch, ProductQuery};

pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<ProductQuery>, QueryRejection>,
) -> Result<Json<Page<Product>>, ApiError> {
    let Query(query) = query?;
    Ok(Json(state.products.list_products(query).await?))
}

pub async fn get(
    State(state): State<AppState>,
    Path(pid): Path<String>,
) -> Result<Json<Product>, ApiError> {
    Ok(Json(state.products.get_product(&pid).await?))
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<ProductDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let Json(draft) = body?;
    let product = state.products.add_product(draft).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(pid): Path<String>,
    body: Result<Json<ProductPatch>, JsonRejection>,
) -> Result<Json<Product>, ApiError> {
    let Json(patch) = body?;
    Ok(Json(state.products.update_product(&pid, patch).await?))
}

/// Responds with the removed product.
pub async fn delete(
    State(state): State<AppState>,
    Path(pid): Path<String>,
) -> Result<Json<Product>, ApiError> {
    Ok(Json(state.products.delete_product(&pid).await?))
}
