use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use mongodb::error::{ErrorKind, WriteFailure};
use thiserror::Error;

use crate::models::Product;

const DUPLICATE_KEY: i32 = 11000;
const DOCUMENT_VALIDATION_FAILURE: i32 = 121;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product {0} not found")]
    NotFound(String),

    #[error("Product with id '{0}' already exists")]
    DuplicateId(String),

    #[error("Invalid product id: {0}")]
    InvalidId(String),

    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl ProductError {
    /// Map a driver error from a write that involved product `id`.
    ///
    /// Duplicate-key failures become [`ProductError::DuplicateId`], schema
    /// validator rejections become [`ProductError::Validation`].
    pub fn from_write(err: mongodb::error::Error, id: &str) -> Self {
        match server_error_code(&err) {
            Some(DUPLICATE_KEY) => ProductError::DuplicateId(id.to_string()),
            Some(DOCUMENT_VALIDATION_FAILURE) => {
                ProductError::Validation("Document failed validation".to_string())
            }
            _ => ProductError::from(err),
        }
    }

    /// Like [`ProductError::from_write`], resolving the offending id from
    /// the index reported by an ordered bulk insert.
    pub fn from_bulk_write(err: mongodb::error::Error, products: &[Product]) -> Self {
        let id = match err.kind.as_ref() {
            ErrorKind::InsertMany(e) => e
                .write_errors
                .as_ref()
                .and_then(|errors| errors.first())
                .and_then(|e| products.get(e.index))
                .map(|p| p.id.clone()),
            _ => None,
        };
        Self::from_write(err, id.as_deref().unwrap_or_default())
    }
}

/// First server-reported error code carried by `err`, if any.
fn server_error_code(err: &mongodb::error::Error) -> Option<i32> {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(e)) => Some(e.code),
        ErrorKind::Command(e) => Some(e.code),
        ErrorKind::InsertMany(e) => e
            .write_errors
            .as_ref()
            .and_then(|errors| errors.first())
            .map(|e| e.code),
        _ => None,
    }
}

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(id) => AppError::NotFound(format!("Product {} not found", id)),
            ProductError::DuplicateId(id) => {
                AppError::BadRequest(format!("Product with id '{}' already exists", id))
            }
            ProductError::InvalidId(msg) => AppError::InvalidId(msg),
            ProductError::Validation(msg) => AppError::InvalidPayload {
                message: msg,
                details: None,
            },
            ProductError::Database(msg) => AppError::Database(msg),
            ProductError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for ProductError {
    fn from(err: mongodb::error::Error) -> Self {
        ProductError::Database(err.to_string())
    }
}

impl From<mongodb::bson::de::Error> for ProductError {
    fn from(err: mongodb::bson::de::Error) -> Self {
        ProductError::Internal(format!("Failed to decode document: {}", err))
    }
}
