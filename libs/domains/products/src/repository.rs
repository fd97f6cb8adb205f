use async_trait::async_trait;

use crate::error::ProductResult;
use crate::models::{CategoryStats, Pagination, Product, ProductFilter};

/// Repository trait for Product persistence
///
/// Lookups use the product's own `id` field, never a store-generated key.
/// Listing and search return documents in the store's natural order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// List products matching `filter` within the `pagination` window
    async fn list(&self, filter: ProductFilter, pagination: Pagination)
        -> ProductResult<Vec<Product>>;

    /// Case-insensitive literal substring match on `name`
    async fn search_by_name(&self, name: &str) -> ProductResult<Vec<Product>>;

    /// Number of products per category
    async fn category_stats(&self) -> ProductResult<Vec<CategoryStats>>;

    async fn get_by_id(&self, id: &str) -> ProductResult<Option<Product>>;

    /// Insert one product; a taken id is `ProductError::DuplicateId`
    async fn create(&self, product: Product) -> ProductResult<Product>;

    /// Ordered bulk insert; stops at the first failing document
    async fn create_many(&self, products: Vec<Product>) -> ProductResult<Vec<Product>>;

    /// Replace the product stored under `id`, returning the new version
    async fn replace(&self, id: &str, product: Product) -> ProductResult<Option<Product>>;

    /// Remove the product stored under `id`, returning what was removed
    async fn delete(&self, id: &str) -> ProductResult<Option<Product>>;

    async fn count(&self) -> ProductResult<u64>;
}
