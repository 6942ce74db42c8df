//! Middleware for logging requests and responses.

use axum::{body::Body, extract::Request, middleware::Next, response::Response};

/// The maximum number of body bytes written to the log at the info level.
const LOG_BODY_LENGTH_LIMIT: usize = 256;

/// Log the request and response for each request.
///
/// Both are logged at the `info` level. If a body is longer than
/// `LOG_BODY_LENGTH_LIMIT` bytes, it is truncated and logged in full at the
/// `debug` level instead.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body_text = read_body_text(body).await;
    log_payload(
        "Received request",
        &format!("{} {}", parts.method, parts.uri),
        &body_text,
    );

    let request = Request::from_parts(parts, Body::from(body_text));
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let body_text = read_body_text(body).await;
    log_payload("Sending response", &parts.status.to_string(), &body_text);

    Response::from_parts(parts, Body::from(body_text))
}

async fn read_body_text(body: Body) -> String {
    let body_bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();

    String::from_utf8_lossy(&body_bytes).to_string()
}

fn log_payload(prefix: &str, summary: &str, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        let cutoff = (0..=LOG_BODY_LENGTH_LIMIT)
            .rev()
            .find(|&index| body.is_char_boundary(index))
            .unwrap_or(0);

        tracing::info!("{prefix}: {summary} body: {}...", &body[..cutoff]);
        tracing::debug!("{prefix}: {summary} full body: {body}");
    } else {
        tracing::info!("{prefix}: {summary} body: {body:?}");
    }
}
