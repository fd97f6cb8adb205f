//! Body extractors that check the product shape before deserializing.
//!
//! Both read the body as raw JSON, run [`check_document`] over every
//! candidate object and only then build typed [`Product`] values. A batch is
//! accepted only when every element passes.

use axum::{
    extract::{FromRequest, Request},
    response::{IntoResponse, Response},
    Json,
};
use axum_helpers::AppError;
use serde_json::{json, Value};

use crate::models::{Product, ProductPayload};
use crate::schema::{check_document, FieldViolation};

pub const INVALID_PRODUCT: &str = "Invalid product data";
pub const INVALID_PRODUCT_IN_ARRAY: &str = "Invalid product data in array";

/// Create body: one product object or an array of them
pub struct ValidatedProducts(pub ProductPayload);

/// Update body: exactly one product object
pub struct ValidatedProduct(pub Product);

impl<S> FromRequest<S> for ValidatedProducts
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let value = read_json(req, state).await?;

        match value {
            Value::Array(items) => {
                let violations: Vec<Value> = items
                    .iter()
                    .enumerate()
                    .filter_map(|(index, item)| {
                        check_document(item)
                            .err()
                            .map(|v| json!({ "index": index, "violations": v }))
                    })
                    .collect();

                if !violations.is_empty() {
                    return Err(invalid(INVALID_PRODUCT_IN_ARRAY, Value::Array(violations)));
                }

                let products = items
                    .into_iter()
                    .map(into_product)
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|e| invalid(INVALID_PRODUCT_IN_ARRAY, e))?;
                Ok(ValidatedProducts(ProductPayload::Many(products)))
            }
            value => {
                let product = validate_one(value)?;
                Ok(ValidatedProducts(ProductPayload::One(product)))
            }
        }
    }
}

impl<S> FromRequest<S> for ValidatedProduct
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let value = read_json(req, state).await?;
        validate_one(value).map(ValidatedProduct)
    }
}

async fn read_json<S: Send + Sync>(req: Request, state: &S) -> Result<Value, Response> {
    let Json(value) = Json::<Value>::from_request(req, state)
        .await
        .map_err(|e| AppError::from(e).into_response())?;
    Ok(value)
}

fn validate_one(value: Value) -> Result<Product, Response> {
    check_document(&value).map_err(|v| invalid(INVALID_PRODUCT, violations(v)))?;
    into_product(value).map_err(|e| invalid(INVALID_PRODUCT, e))
}

fn into_product(value: Value) -> Result<Product, Value> {
    serde_json::from_value(value).map_err(|e| json!([{ "field": "", "reason": e.to_string() }]))
}

fn violations(v: Vec<FieldViolation>) -> Value {
    serde_json::to_value(v).unwrap_or(Value::Null)
}

fn invalid(message: &str, details: Value) -> Response {
    AppError::InvalidPayload {
        message: message.to_string(),
        details: Some(details),
    }
    .into_response()
}
