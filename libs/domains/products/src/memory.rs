//! In-process ProductRepository
//!
//! Keeps products in insertion order behind a `tokio::sync::RwLock`. Used by
//! the handler tests and by `STORAGE_BACKEND=memory` for running without a
//! database. Mirrors the MongoDB repository's observable behavior: natural
//! order, unique ids, ordered bulk inserts that stop at the first duplicate.

use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::{CategoryStats, Pagination, Product, ProductFilter};
use crate::repository::ProductRepository;

#[derive(Default)]
pub struct InMemoryProductRepository {
    products: RwLock<Vec<Product>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: RwLock::new(products),
        }
    }

    fn matches(filter: &ProductFilter, product: &Product) -> bool {
        filter
            .category
            .as_ref()
            .map_or(true, |category| &product.category == category)
    }
}

fn position(products: &[Product], id: &str) -> Option<usize> {
    products.iter().position(|p| p.id == id)
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    #[instrument(skip(self))]
    async fn list(
        &self,
        filter: ProductFilter,
        pagination: Pagination,
    ) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;
        let skip = usize::try_from(pagination.skip).unwrap_or(usize::MAX);
        let limit = usize::try_from(pagination.limit).unwrap_or(usize::MAX);

        Ok(products
            .iter()
            .filter(|p| Self::matches(&filter, p))
            .skip(skip)
            .take(limit)
            .cloned()
            .collect())
    }

    #[instrument(skip(self))]
    async fn search_by_name(&self, name: &str) -> ProductResult<Vec<Product>> {
        let needle = name.to_lowercase();
        let products = self.products.read().await;

        Ok(products
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    #[instrument(skip(self))]
    async fn category_stats(&self) -> ProductResult<Vec<CategoryStats>> {
        let products = self.products.read().await;

        let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
        for product in products.iter() {
            *counts.entry(product.category.as_str()).or_default() += 1;
        }

        Ok(counts
            .into_iter()
            .map(|(category, count)| CategoryStats {
                category: category.to_string(),
                count,
            })
            .collect())
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: &str) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.iter().find(|p| p.id == id).cloned())
    }

    #[instrument(skip(self, product), fields(product_id = %product.id))]
    async fn create(&self, product: Product) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        if position(&products, &product.id).is_some() {
            return Err(ProductError::DuplicateId(product.id));
        }

        products.push(product.clone());
        Ok(product)
    }

    #[instrument(skip(self, batch), fields(count = batch.len()))]
    async fn create_many(&self, batch: Vec<Product>) -> ProductResult<Vec<Product>> {
        let mut products = self.products.write().await;

        for product in &batch {
            if position(&products, &product.id).is_some() {
                return Err(ProductError::DuplicateId(product.id.clone()));
            }
            products.push(product.clone());
        }

        Ok(batch)
    }

    #[instrument(skip(self, product))]
    async fn replace(&self, id: &str, product: Product) -> ProductResult<Option<Product>> {
        let mut products = self.products.write().await;

        let Some(index) = position(&products, id) else {
            return Ok(None);
        };

        if product.id != id && position(&products, &product.id).is_some() {
            return Err(ProductError::DuplicateId(product.id));
        }

        products[index] = product.clone();
        Ok(Some(product))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> ProductResult<Option<Product>> {
        let mut products = self.products.write().await;
        Ok(position(&products, id).map(|index| products.remove(index)))
    }

    #[instrument(skip(self))]
    async fn count(&self) -> ProductResult<u64> {
        Ok(self.products.read().await.len() as u64)
    }
}
