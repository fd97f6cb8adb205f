use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;

/// Product entity
///
/// Stored as a document with the same six fields; the store's own `_id` is
/// ignored on read and never serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Externally supplied identifier, unique across products
    #[schema(example = "1")]
    pub id: String,
    #[schema(example = "Laptop")]
    pub name: String,
    #[schema(example = "High-performance laptop with 16GB RAM")]
    pub description: String,
    /// Any finite number, negative values included
    #[schema(example = 1200)]
    pub price: f64,
    /// Free-form grouping key
    #[schema(example = "electronics")]
    pub category: String,
    pub in_stock: bool,
}

/// Create body: a single product or a batch
#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum ProductPayload {
    One(Product),
    Many(Vec<Product>),
}

/// Query parameters for listing products
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductQuery {
    /// Exact category match; empty means no filter
    pub category: Option<String>,
    /// 1-based page number
    #[serde(default = "default_page")]
    #[validate(range(min = 1))]
    #[param(minimum = 1, default = 1)]
    pub page: u64,
    /// Page size
    #[serde(default = "default_limit")]
    #[validate(range(min = 1))]
    #[param(minimum = 1, default = 10)]
    pub limit: u64,
}

fn default_page() -> u64 {
    DEFAULT_PAGE
}

fn default_limit() -> u64 {
    DEFAULT_LIMIT
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            category: None,
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl ProductQuery {
    pub fn filter(&self) -> ProductFilter {
        ProductFilter {
            category: self.category.clone().filter(|c| !c.is_empty()),
        }
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.limit)
    }
}

/// Store-level filter for listing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub category: Option<String>,
}

/// Skip/limit window derived from page and page size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub skip: u64,
    pub limit: i64,
}

impl Pagination {
    /// `skip = (page - 1) * limit`. Both values are capped at `i64::MAX`,
    /// the largest skip and limit the store accepts.
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            skip: page
                .saturating_sub(1)
                .saturating_mul(limit)
                .min(i64::MAX as u64),
            limit: i64::try_from(limit).unwrap_or(i64::MAX),
        }
    }
}

/// Query parameters for name search
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Case-insensitive substring of the product name
    pub name: Option<String>,
}

/// Product count per category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategoryStats {
    #[schema(example = "electronics")]
    pub category: String,
    #[schema(example = 2)]
    pub count: u64,
}
