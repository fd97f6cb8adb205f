//! Shared-secret API key authentication.
//!
//! - [`ApiKeyConfig`] loads the expected key from the environment
//! - [`ApiKeyVerifier`] is the pluggable credential check
//! - [`api_key_auth`] is the middleware guarding every route
//!
//! ```ignore
//! use axum_helpers::auth::{ApiKeyConfig, StaticApiKey, api_key_auth};
//! use core_config::FromEnv;
//!
//! let config = ApiKeyConfig::from_env()?;
//! let verifier: Arc<dyn ApiKeyVerifier> = Arc::new(StaticApiKey::from(&config));
//!
//! let app = Router::new()
//!     .route("/", get(handler))
//!     .layer(axum::middleware::from_fn_with_state(verifier, api_key_auth));
//! ```

pub mod api_key;
pub mod config;
pub mod middleware;

pub use api_key::{ApiKeyVerifier, StaticApiKey};
pub use config::{ApiKeyConfig, DEVELOPMENT_API_KEY};
pub use middleware::{API_KEY_HEADER, UNAUTHORIZED_MESSAGE, api_key_auth};
