//! # Axum Helpers
//!
//! Shared plumbing for the catalog's Axum services.
//!
//! ## Modules
//!
//! - **[`auth`]**: static API key verification and middleware
//! - **[`server`]**: router assembly, health checks, graceful shutdown
//! - **[`http`]**: request logging and security headers
//! - **[`errors`]**: structured error responses with error codes
//! - **[`extractors`]**: id path and validated query extractors
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::{StaticApiKey, create_router, create_production_app};
//! use core_config::server::ServerConfig;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let verifier = Arc::new(StaticApiKey::new("secret"));
//!     let router = create_router::<ApiDoc>(Router::new(), Router::new(), verifier);
//!     create_production_app(router, &ServerConfig::default(), Duration::from_secs(30), async {}).await
//! }
//! ```

pub mod auth;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use auth::{
    API_KEY_HEADER, ApiKeyConfig, ApiKeyVerifier, StaticApiKey, UNAUTHORIZED_MESSAGE, api_key_auth,
};

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks,
};

pub use http::{request_logger, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::{IdPath, ValidatedQuery};
