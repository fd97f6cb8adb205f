use axum::{extract::Request, middleware::Next, response::Response};
use chrono::{SecondsFormat, Utc};

/// Logs one line per inbound request, before routing.
///
/// Records the wall-clock timestamp, the method and the full request target
/// (path and query). Never short-circuits, so unauthenticated and unmatched
/// requests are logged too.
pub async fn request_logger(request: Request, next: Next) -> Response {
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    let uri = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_owned())
        .unwrap_or_else(|| request.uri().path().to_owned());

    tracing::info!(
        timestamp = %timestamp,
        method = %request.method(),
        uri = %uri,
        "Incoming request"
    );

    next.run(request).await
}
