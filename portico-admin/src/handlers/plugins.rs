use super::{data_body, list_body, message_body, parse_id};
use crate::error::ApiResult;
use crate::server::AdminState;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use portico_core::Plugin;
use portico_core::request::{CreatePluginRequest, PluginFilter, UpdatePluginRequest};
use std::sync::Arc;

/// GET /plugins
pub async fn list_plugins(
    State(state): State<Arc<AdminState>>,
    query: Result<Query<PluginFilter>, QueryRejection>,
) -> ApiResult {
    let Query(filter) = query?;
    Ok(list_body(state.facade.list_plugins(&filter)))
}

/// GET /plugins/:id
pub async fn get_plugin(
    State(state): State<Arc<AdminState>>,
    Path(id): Path<String>,
) -> ApiResult {
    let id = parse_id::<Plugin>(&id)?;
    Ok(data_body(StatusCode::OK, state.facade.get_plugin(id)?))
}

/// POST /plugins
pub async fn create_plugin(
    State(state): State<Arc<AdminState>>,
    payload: Result<Json<CreatePluginRequest>, JsonRejection>,
) -> ApiResult {
    let Json(req) = payload?;
    let plugin = state.facade.create_plugin(req).await?;
    Ok(data_body(StatusCode::CREATED, plugin))
}

/// PUT /plugins/:id
pub async fn update_plugin(
    State(state): State<Arc<AdminState>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdatePluginRequest>, JsonRejection>,
) -> ApiResult {
    let id = parse_id::<Plugin>(&id)?;
    state.facade.get_plugin(id)?;
    let Json(req) = payload?;
    Ok(data_body(StatusCode::OK, state.facade.update_plugin(id, req).await?))
}

/// DELETE /plugins/:id
pub async fn delete_plugin(
    State(state): State<Arc<AdminState>>,
    Path(id): Path<String>,
) -> ApiResult {
    let id = parse_id::<Plugin>(&id)?;
    state.facade.delete_plugin(id).await?;
    Ok(message_body("Plugin deleted successfully"))
}
