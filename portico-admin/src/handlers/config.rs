use crate::server::AdminState;
use axum::extract::State;
use axum::response::Json;
use portico_core::ConfigDocument;
use std::sync::Arc;

/// GET /config
pub async fn get_config(State(state): State<Arc<AdminState>>) -> Json<ConfigDocument> {
    let document = state.resolver.resolve();
    state.metrics.record_config_render(document.domains.len());
    Json(document)
}

/// GET /metrics
pub async fn metrics(State(state): State<Arc<AdminState>>) -> String {
    state.metrics.render()
}
