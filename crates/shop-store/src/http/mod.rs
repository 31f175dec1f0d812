//! HTTP boundary: routes, extraction and error translation.
//!
//! Handlers are thin. They pull ids, query strings and bodies out of the request,
//! call a client and turn the result into JSON. All rules live in the stores.

pub mod carts;
pub mod error;
pub mod products;

use axum::{
    http::{Method, Uri},
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::clients::{CartClient, ProductClient};
use error::ApiError;

/// Shared application state, cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub products: ProductClient,
    pub carts: CartClient,
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/api/products", get(products::list).post(products::create))
        .route(
            "/api/products/{pid}",
            get(products::get)
                .put(products::update)
                .delete(products::delete),
        )
        .route("/api/carts", post(carts::create))
        .route("/api/carts/{cid}", get(carts::get).delete(carts::clear))
        .route(
            "/api/carts/{cid}/product/{pid}",
            post(carts::add_product)
                .put(carts::update_quantity)
                .delete(carts::remove_product),
        )
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness probe. Does not touch the collection files.
async fn health() -> &'static str {
    "Shop store is running"
}

async fn not_found(method: Method, uri: Uri) -> ApiError {
    ApiError::RouteNotFound(format!("{method} {uri}"))
}
