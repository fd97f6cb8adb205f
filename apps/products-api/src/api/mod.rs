//! API routes module

pub mod health;
pub mod products;

use axum::{routing::get, Router};
use axum_helpers::{create_router, StaticApiKey};
use std::sync::Arc;

use crate::openapi::ApiDoc;
use crate::state::AppState;

pub const WELCOME_MESSAGE: &str =
    "Welcome to the Product API! Go to /api/products to see all products.";

async fn welcome() -> &'static str {
    WELCOME_MESSAGE
}

/// Routes outside the `/api` prefix
pub fn root_routes(state: &AppState) -> Router {
    Router::new()
        .route("/", get(welcome))
        .merge(health::router(state.clone()))
}

/// Routes nested under `/api`
pub async fn api_routes(state: &AppState) -> eyre::Result<Router> {
    Ok(Router::new().nest("/products", products::router(state).await?))
}

/// Fully layered application router
pub async fn app(state: &AppState) -> eyre::Result<Router> {
    let verifier = Arc::new(StaticApiKey::from(&state.config.api_key));
    let router = create_router::<ApiDoc>(root_routes(state), api_routes(state).await?, verifier);
    Ok(router)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, StorageBackend};
    use crate::state::Store;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum_helpers::{ApiKeyConfig, API_KEY_HEADER};
    use core_config::{app_info, server::ServerConfig, Environment};
    use database::mongodb::MongoConfig;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    const KEY: &str = "test-key";

    fn state(seed_sample_data: bool) -> AppState {
        AppState {
            config: Config {
                app: app_info!(),
                environment: Environment::Development,
                server: ServerConfig::default(),
                mongodb: MongoConfig::default(),
                collection: "products".to_string(),
                api_key: ApiKeyConfig::new(KEY),
                storage: StorageBackend::Memory,
                seed_sample_data,
            },
            store: Store::Memory,
        }
    }

    async fn seeded_app() -> Router {
        app(&state(true)).await.unwrap()
    }

    fn authed(method: &str, uri: &str) -> axum::http::request::Builder {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(API_KEY_HEADER, KEY)
    }

    async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
        response.into_body().collect().await.unwrap().to_bytes().to_vec()
    }

    #[tokio::test]
    async fn test_welcome_requires_key() {
        let app = seeded_app().await;

        let response = app
            .clone()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body["message"], "Unauthorized: Invalid API Key");

        let response = app
            .oneshot(authed("GET", "/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_bytes(response).await, WELCOME_MESSAGE.as_bytes());
    }

    #[tokio::test]
    async fn test_every_path_requires_key() {
        let app = seeded_app().await;

        for uri in ["/api/products", "/api/products/1", "/health", "/nowhere"] {
            let response = app
                .clone()
                .oneshot(
                    Request::get(uri)
                        .header(API_KEY_HEADER, "wrong")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_sample_data_seeded_under_api_prefix() {
        let response = seeded_app()
            .await
            .oneshot(authed("GET", "/api/products").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let products: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(products.as_array().unwrap().len(), 3);
        assert_eq!(products[0]["name"], "Laptop");
    }

    #[tokio::test]
    async fn test_seeding_can_be_disabled() {
        let app = app(&state(false)).await.unwrap();
        let response = app
            .oneshot(authed("GET", "/api/products/stats").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let stats: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(stats, json!([]));
    }

    #[tokio::test]
    async fn test_post_then_get_through_full_stack() {
        let app = seeded_app().await;
        let product = json!({
            "id": "42",
            "name": "Desk Lamp",
            "description": "LED",
            "price": 35.5,
            "category": "home",
            "inStock": false
        });

        let response = app
            .clone()
            .oneshot(
                authed("POST", "/api/products")
                    .header("content-type", "application/json")
                    .body(Body::from(product.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .oneshot(authed("GET", "/api/products/42").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let fetched: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(fetched, product);
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_not_found() {
        let response = seeded_app()
            .await
            .oneshot(authed("GET", "/api/nothing").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body["error"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_health_and_ready_without_database() {
        let app = seeded_app().await;

        let response = app
            .clone()
            .oneshot(authed("GET", "/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body["name"], "products_api");

        let response = app
            .oneshot(authed("GET", "/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body["status"], "ready");
    }
}
