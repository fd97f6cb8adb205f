//! Custom extractors for Axum handlers.
//!
//! Rejections from every extractor here render as the shared
//! [`ErrorResponse`](crate::errors::ErrorResponse) body.

pub mod id_path;
pub mod validated_query;

pub use id_path::IdPath;
pub use validated_query::ValidatedQuery;
