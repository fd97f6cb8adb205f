//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, from_document, Document},
    options::{FindOneAndReplaceOptions, FindOptions, IndexOptions, ReturnDocument},
    Collection, Database, IndexModel,
};
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::{CategoryStats, Pagination, Product, ProductFilter};
use crate::repository::ProductRepository;
use crate::schema::{mongo_json_schema, unique_fields};

pub const DEFAULT_COLLECTION: &str = "products";

/// MongoDB implementation of the ProductRepository
pub struct MongoProductRepository {
    db: Database,
    collection: Collection<Product>,
}

impl MongoProductRepository {
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, DEFAULT_COLLECTION)
    }

    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        Self {
            db: db.clone(),
            collection: db.collection::<Product>(collection_name),
        }
    }

    /// Install the `$jsonSchema` validator and indexes.
    ///
    /// Creates the collection with the validator when it does not exist yet;
    /// otherwise attaches it with `collMod`. Safe to call on every startup.
    pub async fn init_schema(&self) -> ProductResult<()> {
        let name = self.collection.name();
        let existing = self
            .db
            .list_collection_names()
            .filter(doc! { "name": name })
            .await?;

        if existing.is_empty() {
            self.db
                .create_collection(name)
                .validator(mongo_json_schema())
                .await?;
            tracing::info!(collection = name, "Created collection with schema validator");
        } else if let Err(e) = self
            .db
            .run_command(doc! { "collMod": name, "validator": mongo_json_schema() })
            .await
        {
            tracing::warn!(collection = name, error = %e, "Could not attach schema validator");
        }

        self.init_indexes().await
    }

    async fn init_indexes(&self) -> ProductResult<()> {
        let mut indexes: Vec<IndexModel> = unique_fields()
            .map(|field| {
                let mut keys = Document::new();
                keys.insert(field, 1);
                IndexModel::builder()
                    .keys(keys)
                    .options(
                        IndexOptions::builder()
                            .unique(true)
                            .name(format!("idx_{}_unique", field))
                            .build(),
                    )
                    .build()
            })
            .collect();

        indexes.push(
            IndexModel::builder()
                .keys(doc! { "category": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_category".to_string())
                        .build(),
                )
                .build(),
        );

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Product indexes created successfully");
        Ok(())
    }

    fn build_filter(filter: &ProductFilter) -> Document {
        let mut doc = doc! {};

        if let Some(ref category) = filter.category {
            doc.insert("category", category);
        }

        doc
    }

    /// Literal, case-insensitive substring match on `name`.
    fn name_filter(name: &str) -> Document {
        doc! {
            "name": { "$regex": regex::escape(name), "$options": "i" }
        }
    }

    fn stats_pipeline() -> Vec<Document> {
        vec![
            doc! { "$group": { "_id": "$category", "count": { "$sum": 1 } } },
            doc! { "$project": { "_id": 0, "category": "$_id", "count": 1 } },
        ]
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self))]
    async fn list(
        &self,
        filter: ProductFilter,
        pagination: Pagination,
    ) -> ProductResult<Vec<Product>> {
        let options = FindOptions::builder()
            .skip(pagination.skip)
            .limit(pagination.limit)
            .build();

        let cursor = self
            .collection
            .find(Self::build_filter(&filter))
            .with_options(options)
            .await?;
        let products: Vec<Product> = cursor.try_collect().await?;

        Ok(products)
    }

    #[instrument(skip(self))]
    async fn search_by_name(&self, name: &str) -> ProductResult<Vec<Product>> {
        let cursor = self.collection.find(Self::name_filter(name)).await?;
        let products: Vec<Product> = cursor.try_collect().await?;
        Ok(products)
    }

    #[instrument(skip(self))]
    async fn category_stats(&self) -> ProductResult<Vec<CategoryStats>> {
        let cursor = self.collection.aggregate(Self::stats_pipeline()).await?;
        let documents: Vec<Document> = cursor.try_collect().await?;

        documents
            .into_iter()
            .map(|d| from_document::<CategoryStats>(d).map_err(ProductError::from))
            .collect()
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: &str) -> ProductResult<Option<Product>> {
        let product = self.collection.find_one(doc! { "id": id }).await?;
        Ok(product)
    }

    #[instrument(skip(self, product), fields(product_id = %product.id))]
    async fn create(&self, product: Product) -> ProductResult<Product> {
        self.collection
            .insert_one(&product)
            .await
            .map_err(|e| ProductError::from_write(e, &product.id))?;

        tracing::info!(product_id = %product.id, "Product created successfully");
        Ok(product)
    }

    #[instrument(skip(self, products), fields(count = products.len()))]
    async fn create_many(&self, products: Vec<Product>) -> ProductResult<Vec<Product>> {
        if products.is_empty() {
            return Ok(products);
        }

        self.collection
            .insert_many(&products)
            .await
            .map_err(|e| ProductError::from_bulk_write(e, &products))?;

        tracing::info!(count = products.len(), "Products created successfully");
        Ok(products)
    }

    #[instrument(skip(self, product))]
    async fn replace(&self, id: &str, product: Product) -> ProductResult<Option<Product>> {
        let options = FindOneAndReplaceOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated = self
            .collection
            .find_one_and_replace(doc! { "id": id }, &product)
            .with_options(options)
            .await
            .map_err(|e| ProductError::from_write(e, &product.id))?;

        if updated.is_some() {
            tracing::info!(product_id = %id, "Product replaced successfully");
        }
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> ProductResult<Option<Product>> {
        let deleted = self.collection.find_one_and_delete(doc! { "id": id }).await?;

        if deleted.is_some() {
            tracing::info!(product_id = %id, "Product deleted successfully");
        }
        Ok(deleted)
    }

    #[instrument(skip(self))]
    async fn count(&self) -> ProductResult<u64> {
        let count = self.collection.count_documents(doc! {}).await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_empty() {
        let doc = MongoProductRepository::build_filter(&ProductFilter::default());
        assert!(doc.is_empty());
    }

    #[test]
    fn test_build_filter_with_category() {
        let filter = ProductFilter {
            category: Some("electronics".to_string()),
        };
        let doc = MongoProductRepository::build_filter(&filter);
        assert_eq!(doc.get_str("category").unwrap(), "electronics");
    }

    #[test]
    fn test_name_filter_escapes_metacharacters() {
        let doc = MongoProductRepository::name_filter("c++ (pro)");
        let inner = doc.get_document("name").unwrap();
        assert_eq!(inner.get_str("$regex").unwrap(), r"c\+\+ \(pro\)");
        assert_eq!(inner.get_str("$options").unwrap(), "i");
    }

    #[test]
    fn test_stats_pipeline_projects_category() {
        let pipeline = MongoProductRepository::stats_pipeline();
        assert_eq!(pipeline.len(), 2);
        let project = pipeline[1].get_document("$project").unwrap();
        assert_eq!(project.get_str("category").unwrap(), "$_id");
    }
}
