//! Filtering, sorting and paging of product listings.

use crate::error::StoreError;
use crate::model::{Page, Product, ProductQuery, SortOrder};

/// Largest page a listing may ask for.
pub const MAX_LIMIT: u64 = 100;
const CATEGORY_FILTER: (usize, usize) = (2, 50);

/// Answers a listing request: filter, then sort, then slice out one page.
pub fn run_query(products: Vec<Product>, query: ProductQuery) -> Result<Page<Product>, StoreError> {
    check(&query)?;

    let category = query.category.as_deref().map(str::to_lowercase);
    let mut matching: Vec<Product> = products
        .into_iter()
        .filter(|p| {
            category
                .as_deref()
                .map_or(true, |c| p.category.to_lowercase().contains(c))
        })
        .filter(|p| query.min_price.map_or(true, |min| p.price >= min))
        .filter(|p| query.max_price.map_or(true, |max| p.price <= max))
        .collect();

    // sort_by is stable, equal prices keep their stored order
    match query.sort {
        Some(SortOrder::Asc) => matching.sort_by(|a, b| a.price.total_cmp(&b.price)),
        Some(SortOrder::Desc) => matching.sort_by(|a, b| b.price.total_cmp(&a.price)),
        None => {}
    }

    let total = matching.len() as u64;
    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(total);
    let total_pages = if limit == 0 { 0 } else { total.div_ceil(limit) };

    let start = (page - 1).saturating_mul(limit);
    let items = matching
        .into_iter()
        .skip(usize::try_from(start).unwrap_or(usize::MAX))
        .take(usize::try_from(limit).unwrap_or(usize::MAX))
        .collect();

    Ok(Page {
        items,
        total,
        page,
        limit,
        total_pages,
    })
}

fn check(query: &ProductQuery) -> Result<(), StoreError> {
    let mut errors = Vec::new();
    if query.page == Some(0) {
        errors.push("page must be a positive integer".to_string());
    }
    if query.limit.is_some_and(|limit| limit > MAX_LIMIT) {
        errors.push(format!("limit must be at most {MAX_LIMIT}"));
    }
    if let Some(category) = &query.category {
        let (min, max) = CATEGORY_FILTER;
        let len = category.trim().chars().count();
        if len < min || len > max {
            errors.push(format!("category must be between {min} and {max} characters"));
        }
    }
    for (name, bound) in [("minPrice", query.min_price), ("maxPrice", query.max_price)] {
        if bound.is_some_and(|b| !b.is_finite() || b < 0.0) {
            errors.push(format!("{name} must be a non-negative number"));
        }
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(StoreError::Validation(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProductId;

    fn product(n: usize, price: f64, category: &str) -> Product {
        Product {
            id: ProductId::new_v4(),
            title: format!("Product {n}"),
            description: "Just a product".into(),
            price,
            stock: 1,
            category: category.into(),
            code: format!("CODE-{n}"),
            status: true,
            thumbnails: vec![],
        }
    }

    fn catalog(count: usize) -> Vec<Product> {
        (1..=count).map(|n| product(n, n as f64, "misc")).collect()
    }

    #[test]
    fn test_second_page_of_ten() {
        let query = ProductQuery {
            page: Some(2),
            limit: Some(10),
            ..Default::default()
        };
        let page = run_query(catalog(25), query).unwrap();
        let titles: Vec<_> = page.items.iter().map(|p| p.title.clone()).collect();
        assert_eq!(titles.first().unwrap(), "Product 11");
        assert_eq!(titles.last().unwrap(), "Product 20");
        assert_eq!(page.items.len(), 10);
        assert_eq!(page.total, 25);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn test_no_limit_returns_everything_on_one_page() {
        let page = run_query(catalog(7), ProductQuery::default()).unwrap();
        assert_eq!(page.items.len(), 7);
        assert_eq!((page.page, page.limit, page.total_pages), (1, 7, 1));
    }

    #[test]
    fn test_empty_result_has_zero_pages() {
        let page = run_query(vec![], ProductQuery::default()).unwrap();
        assert!(page.items.is_empty());
        assert_eq!((page.limit, page.total_pages), (0, 0));
    }

    #[test]
    fn test_zero_limit_yields_no_items() {
        let query = ProductQuery {
            limit: Some(0),
            ..Default::default()
        };
        let page = run_query(catalog(5), query).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total, 5);
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn test_page_past_the_end_is_empty() {
        let query = ProductQuery {
            page: Some(9),
            limit: Some(10),
            ..Default::default()
        };
        let page = run_query(catalog(25), query).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn test_category_filter_is_case_insensitive_substring() {
        let products = vec![
            product(1, 1.0, "Kitchen"),
            product(2, 2.0, "Garden"),
            product(3, 3.0, "kitchenware"),
        ];
        let query = ProductQuery {
            category: Some("KITCHEN".into()),
            ..Default::default()
        };
        let page = run_query(products, query).unwrap();
        assert_eq!(page.total, 2);
    }

    #[test]
    fn test_price_bounds_are_inclusive_and_sort_is_stable() {
        let products = vec![
            product(1, 5.0, "a"),
            product(2, 1.0, "a"),
            product(3, 5.0, "a"),
            product(4, 9.0, "a"),
        ];
        let query = ProductQuery {
            min_price: Some(1.0),
            max_price: Some(5.0),
            sort: Some(SortOrder::Desc),
            ..Default::default()
        };
        let page = run_query(products, query).unwrap();
        let titles: Vec<_> = page.items.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Product 1", "Product 3", "Product 2"]);
    }

    #[test]
    fn test_invalid_paging_is_rejected() {
        let query = ProductQuery {
            page: Some(0),
            min_price: Some(-1.0),
            ..Default::default()
        };
        let StoreError::Validation(messages) = run_query(catalog(3), query).unwrap_err() else {
            panic!("expected validation error");
        };
        assert_eq!(messages.len(), 2);
    }

    #[test]
    fn test_listing_bounds() {
        let oversized = ProductQuery {
            limit: Some(MAX_LIMIT + 1),
            category: Some(" k ".into()),
            ..Default::default()
        };
        let StoreError::Validation(messages) = run_query(catalog(3), oversized).unwrap_err() else {
            panic!("expected validation error");
        };
        assert_eq!(
            messages,
            vec![
                "limit must be at most 100".to_string(),
                "category must be between 2 and 50 characters".to_string(),
            ]
        );

        let largest = ProductQuery {
            limit: Some(MAX_LIMIT),
            ..Default::default()
        };
        let page = run_query(catalog(150), largest).unwrap();
        assert_eq!(page.items.len(), 100);
        assert_eq!(page.total_pages, 2);
    }
}
