//! `/api/carts` handlers.

use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use super::error::ApiError;
use super::AppState;
use crate::model::Cart;

/// Body of the quantity endpoints.
///
/// Signed so that `0` and negative values reach validation and are reported as such.
#[derive(Debug, Deserialize)]
pub struct QuantityBody {
    pub quantity: Option<i64>,
}

pub async fn create(State(state): State<AppState>) -> Result<(StatusCode, Json<Cart>), ApiError> {
    let cart = state.carts.create_cart().await?;
    Ok((StatusCode::CREATED, Json(cart)))
}

pub async fn get(
    State(state): State<AppState>,
    Path(cid): Path<String>,
) -> Result<Json<Cart>, ApiError> {
    Ok(Json(state.carts.get_cart(&cid).await?))
}

/// The body is optional here; without one a single unit is added.
pub async fn add_product(
    State(state): State<AppState>,
    Path((cid, pid)): Path<(String, String)>,
    body: Bytes,
) -> Result<Json<Cart>, ApiError> {
    let quantity = if body.iter().all(u8::is_ascii_whitespace) {
        None
    } else {
        let body: QuantityBody = serde_json::from_slice(&body)
            .map_err(|e| ApiError::BadRequest(format!("Failed to parse the request body as JSON: {e}")))?;
        body.quantity.map(to_quantity).transpose()?
    };
    Ok(Json(state.carts.add_product(&cid, &pid, quantity).await?))
}

pub async fn update_quantity(
    State(state): State<AppState>,
    Path((cid, pid)): Path<(String, String)>,
    body: Result<Json<QuantityBody>, JsonRejection>,
) -> Result<Json<Cart>, ApiError> {
    let Json(body) = body?;
    let quantity = body
        .quantity
        .ok_or_else(|| crate::error::StoreError::validation("quantity is required"))?;
    let quantity = to_quantity(quantity)?;
    Ok(Json(state.carts.update_quantity(&cid, &pid, quantity).await?))
}

pub async fn remove_product(
    State(state): State<AppState>,
    Path((cid, pid)): Path<(String, String)>,
) -> Result<Json<Cart>, ApiError> {
    Ok(Json(state.carts.remove_product(&cid, &pid).await?))
}

pub async fn clear(
    State(state): State<AppState>,
    Path(cid): Path<String>,
) -> Result<Json<Cart>, ApiError> {
    Ok(Json(state.carts.clear(&cid).await?))
}

fn to_quantity(raw: i64) -> Result<u32, ApiError> {
    match u32::try_from(raw) {
        Ok(quantity) if quantity >= 1 => Ok(quantity),
        _ => Err(crate::error::StoreError::validation("quantity must be an integer >= 1").into()),
    }
}
