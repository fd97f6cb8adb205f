//! Product Service - Business logic layer

use serde::Serialize;
use std::sync::Arc;
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::{CategoryStats, Product, ProductPayload, ProductQuery};
use crate::repository::ProductRepository;

pub const NAME_REQUIRED_MESSAGE: &str = "Name query parameter is required";

/// Result of a create call, shaped like the request body
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Created {
    One(Product),
    Many(Vec<Product>),
}

/// Product service providing business logic operations
///
/// Sits between the handlers and a [`ProductRepository`]; turns absent
/// documents into [`ProductError::NotFound`] and rejects blank ids before
/// they reach the store.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// List one page of products, optionally restricted to a category
    #[instrument(skip(self))]
    pub async fn list_products(&self, query: &ProductQuery) -> ProductResult<Vec<Product>> {
        self.repository
            .list(query.filter(), query.pagination())
            .await
    }

    #[instrument(skip(self))]
    pub async fn search_products(&self, name: &str) -> ProductResult<Vec<Product>> {
        if name.is_empty() {
            return Err(ProductError::Validation(NAME_REQUIRED_MESSAGE.to_string()));
        }
        self.repository.search_by_name(name).await
    }

    #[instrument(skip(self))]
    pub async fn category_stats(&self) -> ProductResult<Vec<CategoryStats>> {
        self.repository.category_stats().await
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: &str) -> ProductResult<Product> {
        ensure_id(id)?;
        self.repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))
    }

    /// Insert a single product or a batch
    ///
    /// An empty batch is a no-op. Batches are inserted in order; on a
    /// failure the products before the offending one stay stored.
    #[instrument(skip(self, payload))]
    pub async fn create_products(&self, payload: ProductPayload) -> ProductResult<Created> {
        match payload {
            ProductPayload::One(product) => {
                let product = self.repository.create(product).await?;
                Ok(Created::One(product))
            }
            ProductPayload::Many(products) if products.is_empty() => Ok(Created::Many(products)),
            ProductPayload::Many(products) => {
                let products = self.repository.create_many(products).await?;
                Ok(Created::Many(products))
            }
        }
    }

    /// Replace the whole document stored under `id`
    #[instrument(skip(self, product))]
    pub async fn update_product(&self, id: &str, product: Product) -> ProductResult<Product> {
        ensure_id(id)?;
        self.repository
            .replace(id, product)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: &str) -> ProductResult<Product> {
        ensure_id(id)?;
        self.repository
            .delete(id)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))
    }

    /// Insert `samples` when the store holds no products yet.
    ///
    /// Returns how many products were inserted.
    #[instrument(skip(self, samples), fields(samples = samples.len()))]
    pub async fn seed_if_empty(&self, samples: Vec<Product>) -> ProductResult<usize> {
        let existing = self.repository.count().await?;
        if existing > 0 {
            tracing::debug!(existing, "Store already has products, skipping seed");
            return Ok(0);
        }

        let inserted = self.repository.create_many(samples).await?;
        tracing::info!(count = inserted.len(), "Sample data inserted");
        Ok(inserted.len())
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

fn ensure_id(id: &str) -> ProductResult<()> {
    if id.trim().is_empty() {
        return Err(ProductError::InvalidId("id must not be blank".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Pagination, ProductFilter};
    use crate::repository::MockProductRepository;

    fn product(id: &str) -> Product {
        Product {
            id: id.to_string(),
            name: "Laptop".to_string(),
            description: "High-performance laptop with 16GB RAM".to_string(),
            price: 1200.0,
            category: "electronics".to_string(),
            in_stock: true,
        }
    }

    #[tokio::test]
    async fn test_list_passes_filter_and_window() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_list()
            .withf(|filter, pagination| {
                filter
                    == &ProductFilter {
                        category: Some("kitchen".into()),
                    }
                    && pagination == &Pagination { skip: 5, limit: 5 }
            })
            .returning(|_, _| Ok(vec![]));

        let service = ProductService::new(mock_repo);
        let query = ProductQuery {
            category: Some("kitchen".into()),
            page: 2,
            limit: 5,
        };
        assert!(service.list_products(&query).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_requires_name() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_search_by_name().never();

        let service = ProductService::new(mock_repo);
        let err = service.search_products("").await.unwrap_err();
        assert!(matches!(err, ProductError::Validation(msg) if msg == NAME_REQUIRED_MESSAGE));
    }

    #[tokio::test]
    async fn test_get_missing_product_is_not_found() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_get_by_id()
            .withf(|id| id == "42")
            .returning(|_| Ok(None));

        let service = ProductService::new(mock_repo);
        let err = service.get_product("42").await.unwrap_err();
        assert!(matches!(err, ProductError::NotFound(id) if id == "42"));
    }

    #[tokio::test]
    async fn test_blank_id_never_reaches_store() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_get_by_id().never();
        mock_repo.expect_delete().never();

        let service = ProductService::new(mock_repo);
        assert!(matches!(
            service.get_product(" ").await,
            Err(ProductError::InvalidId(_))
        ));
        assert!(matches!(
            service.delete_product("").await,
            Err(ProductError::InvalidId(_))
        ));
    }

    #[tokio::test]
    async fn test_create_single_and_batch() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_create().returning(Ok);
        mock_repo
            .expect_create_many()
            .times(1)
            .returning(|products| Ok(products));

        let service = ProductService::new(mock_repo);

        let one = service
            .create_products(ProductPayload::One(product("1")))
            .await
            .unwrap();
        assert_eq!(one, Created::One(product("1")));

        let many = service
            .create_products(ProductPayload::Many(vec![product("2"), product("3")]))
            .await
            .unwrap();
        assert!(matches!(many, Created::Many(v) if v.len() == 2));

        let empty = service
            .create_products(ProductPayload::Many(vec![]))
            .await
            .unwrap();
        assert_eq!(empty, Created::Many(vec![]));
    }

    #[tokio::test]
    async fn test_duplicate_id_propagates() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_create()
            .returning(|p| Err(ProductError::DuplicateId(p.id)));

        let service = ProductService::new(mock_repo);
        let err = service
            .create_products(ProductPayload::One(product("1")))
            .await
            .unwrap_err();
        assert!(matches!(err, ProductError::DuplicateId(id) if id == "1"));
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_replace().returning(|_, _| Ok(None));

        let service = ProductService::new(mock_repo);
        let err = service.update_product("9", product("9")).await.unwrap_err();
        assert!(matches!(err, ProductError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_returns_removed_document() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_delete()
            .withf(|id| id == "1")
            .returning(|id| Ok(Some(product(id))));

        let service = ProductService::new(mock_repo);
        assert_eq!(service.delete_product("1").await.unwrap().id, "1");
    }

    #[tokio::test]
    async fn test_seed_skips_non_empty_store() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_count().returning(|| Ok(3));
        mock_repo.expect_create_many().never();

        let service = ProductService::new(mock_repo);
        assert_eq!(service.seed_if_empty(vec![product("1")]).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_seed_inserts_into_empty_store() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_count().returning(|| Ok(0));
        mock_repo
            .expect_create_many()
            .times(1)
            .returning(|products| Ok(products));

        let service = ProductService::new(mock_repo);
        let inserted = service
            .seed_if_empty(vec![product("1"), product("2")])
            .await
            .unwrap();
        assert_eq!(inserted, 2);
    }
}
