use serde::{Deserialize, Serialize};

/// Price ordering for product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Filter, sort and paging options for listing products.
///
/// Deserializes from the `GET /api/products` query string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    /// Case-insensitive substring of the product category.
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub sort: Option<SortOrder>,
    /// 1-based page number. Defaults to 1.
    pub page: Option<u64>,
    /// Page size. Defaults to the number of matching products.
    pub limit: Option<u64>,
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Number of records matching the filter, across all pages.
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}
