use super::ApiKeyVerifier;
use crate::errors::AppError;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

pub const API_KEY_HEADER: &str = "x-api-key";
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized: Invalid API Key";

/// Rejects any request whose `x-api-key` header fails verification.
///
/// Runs ahead of body parsing and routing, so it applies equally to matched,
/// unmatched and documentation paths.
///
/// ```ignore
/// let verifier: Arc<dyn ApiKeyVerifier> = Arc::new(StaticApiKey::new(key));
/// let app = router.layer(axum::middleware::from_fn_with_state(verifier, api_key_auth));
/// ```
pub async fn api_key_auth(
    State(verifier): State<Arc<dyn ApiKeyVerifier>>,
    request: Request,
    next: Next,
) -> Response {
    let header = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok());

    if !verifier.validate(header) {
        tracing::debug!(
            path = %request.uri().path(),
            present = header.is_some(),
            "Rejected request with invalid API key"
        );
        return AppError::Unauthorized(UNAUTHORIZED_MESSAGE.to_string()).into_response();
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticApiKey;
    use axum::{Router, body::Body, http::StatusCode, middleware, routing::get};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn app() -> Router {
        let verifier: Arc<dyn ApiKeyVerifier> = Arc::new(StaticApiKey::new("k"));
        Router::new()
            .route("/", get(|| async { "hello" }))
            .layer(middleware::from_fn_with_state(verifier, api_key_auth))
    }

    #[tokio::test]
    async fn test_valid_key_reaches_handler() {
        let response = app()
            .oneshot(
                Request::get("/")
                    .header(API_KEY_HEADER, "k")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_key_is_unauthorized() {
        let response = app()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["message"], UNAUTHORIZED_MESSAGE);
        assert_eq!(body["error"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_wrong_key_is_unauthorized() {
        let response = app()
            .oneshot(
                Request::get("/")
                    .header(API_KEY_HEADER, "nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
