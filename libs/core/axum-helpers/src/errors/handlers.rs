use axum::{
    http::{StatusCode, Uri},
    response::Response,
};
use std::any::Any;

use super::{ErrorCode, ErrorResponse};

/// Router fallback for unmatched paths.
pub async fn not_found(uri: Uri) -> Response {
    tracing::info!(error_code = ErrorCode::NotFound.code(), %uri, "No route matched");

    ErrorResponse::new(
        ErrorCode::NotFound,
        format!("No route for {}", uri.path()),
    )
    .into_response_with(StatusCode::NOT_FOUND)
}

/// Fallback for a known path with an unsupported method.
pub async fn method_not_allowed() -> Response {
    let code = ErrorCode::MethodNotAllowed;
    ErrorResponse::new(code, code.default_message())
        .into_response_with(StatusCode::METHOD_NOT_ALLOWED)
}

/// Turns a handler panic into a 500 response.
///
/// Installed through `tower_http::catch_panic::CatchPanicLayer::custom`. The
/// panic payload is logged; clients only see the generic message.
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };

    tracing::error!(
        error_code = ErrorCode::InternalError.code(),
        panic = detail,
        "Request handler panicked"
    );

    let code = ErrorCode::InternalError;
    ErrorResponse::new(code, code.default_message())
        .into_response_with(StatusCode::INTERNAL_SERVER_ERROR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn test_not_found_names_path() {
        let response = not_found(Uri::from_static("/nope?x=1")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["message"], "No route for /nope");
    }

    #[tokio::test]
    async fn test_handle_panic_hides_payload() {
        let response = handle_panic(Box::new(String::from("index out of bounds")));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "INTERNAL_ERROR");
        assert_eq!(body["message"], "An internal server error occurred");
    }
}
