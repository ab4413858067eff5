use crate::server::AdminState;
use axum::extract::{MatchedPath, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;
use std::time::Instant;

/// First path segment of the matched route: `/routes/{id}/plugins` → `routes`.
fn resource_label(path: &str) -> &str {
    path.trim_start_matches('/')
        .split('/')
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or("root")
}

/// Count every admin request by resource, method and status.
pub async fn track_metrics(
    State(state): State<Arc<AdminState>>,
    request: Request,
    next: Next,
) -> Response {
    if !state.metrics.is_enabled() {
        return next.run(request).await;
    }

    let resource = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| resource_label(p.as_str()).to_string())
        .unwrap_or_else(|| "unmatched".to_string());
    let method = request.method().clone();
    let started = Instant::now();

    let response = next.run(request).await;

    state.metrics.record_request(
        &resource,
        method.as_str(),
        response.status().as_u16(),
        started.elapsed().as_secs_f64(),
    );
    response
}
