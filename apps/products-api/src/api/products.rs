//! Products API routes

use axum::Router;
use domain_products::{
    handlers, seed::sample_products, InMemoryProductRepository, MongoProductRepository,
    ProductRepository, ProductService,
};
use tracing::{error, info};

use crate::state::{AppState, Store};

/// Build the products router on the configured store.
///
/// For MongoDB this installs the collection validator and indexes first.
/// Sample data is inserted once into an empty store; a seeding failure is
/// logged and startup continues.
pub async fn router(state: &AppState) -> eyre::Result<Router> {
    match &state.store {
        Store::MongoDb { db, .. } => {
            let repository = MongoProductRepository::with_collection(db, &state.config.collection);
            repository.init_schema().await?;
            let service = ProductService::new(repository);
            seed(&service, state.config.seed_sample_data).await;
            Ok(handlers::router(service))
        }
        Store::Memory => {
            let service = ProductService::new(InMemoryProductRepository::new());
            seed(&service, state.config.seed_sample_data).await;
            Ok(handlers::router(service))
        }
    }
}

async fn seed<R: ProductRepository>(service: &ProductService<R>, enabled: bool) {
    if !enabled {
        return;
    }

    match service.seed_if_empty(sample_products()).await {
        Ok(0) => info!("Products already present, sample data not inserted"),
        Ok(count) => info!(count, "Sample data inserted"),
        Err(e) => error!(error = %e, "Error inserting sample data"),
    }
}
