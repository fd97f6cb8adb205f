//! HTTP middleware: security headers and request logging.
//!
//! ```ignore
//! use axum_helpers::http::{request_logger, security_headers};
//!
//! let app = Router::new()
//!     .layer(axum::middleware::from_fn(request_logger))
//!     .layer(axum::middleware::from_fn(security_headers));
//! ```

pub mod request_logger;
pub mod security;

pub use request_logger::request_logger;
pub use security::security_headers;
