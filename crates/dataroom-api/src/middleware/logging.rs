//! Request logging middleware.

use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use tracing::info;

/// Logs method, path, status, and latency for every request.
///
/// Download token paths are logged truncated: the token IS the
/// authorization, so it must not land in log files.
pub async fn request_logging(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = loggable_path(req.uri().path());
    let start = Instant::now();

    let response = next.run(req).await;

    info!(
        %method,
        %path,
        status = response.status().as_u16(),
        latency_ms = start.elapsed().as_millis() as u64,
        "Request handled"
    );

    response
}

/// Truncates signed-token path segments for safe logging.
fn loggable_path(path: &str) -> String {
    match path.strip_prefix("/api/guest/download/") {
        Some(_) => "/api/guest/download/<token>".to_string(),
        None => path.to_string(),
    }
}
