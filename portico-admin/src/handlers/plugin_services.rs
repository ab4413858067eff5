use super::{data_body, list_body, message_body, parse_id};
use crate::error::ApiResult;
use crate::server::AdminState;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use portico_core::PluginService;
use portico_core::request::{
    CreatePluginServiceRequest, PluginServiceFilter, UpdatePluginServiceRequest,
};
use std::sync::Arc;

/// GET /plugin-services
pub async fn list_plugin_services(
    State(state): State<Arc<AdminState>>,
    query: Result<Query<PluginServiceFilter>, QueryRejection>,
) -> ApiResult {
    let Query(filter) = query?;
    Ok(list_body(state.facade.list_plugin_services(&filter)))
}

/// GET /plugin-services/:id
pub async fn get_plugin_service(
    State(state): State<Arc<AdminState>>,
    Path(id): Path<String>,
) -> ApiResult {
    let id = parse_id::<PluginService>(&id)?;
    Ok(data_body(StatusCode::OK, state.facade.get_plugin_service(id)?))
}

/// POST /plugin-services
pub async fn create_plugin_service(
    State(state): State<Arc<AdminState>>,
    payload: Result<Json<CreatePluginServiceRequest>, JsonRejection>,
) -> ApiResult {
    let Json(req) = payload?;
    let service = state.facade.create_plugin_service(req).await?;
    Ok(data_body(StatusCode::CREATED, service))
}

/// PUT /plugin-services/:id
pub async fn update_plugin_service(
    State(state): State<Arc<AdminState>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdatePluginServiceRequest>, JsonRejection>,
) -> ApiResult {
    let id = parse_id::<PluginService>(&id)?;
    state.facade.get_plugin_service(id)?;
    let Json(req) = payload?;
    let service = state.facade.update_plugin_service(id, req).await?;
    Ok(data_body(StatusCode::OK, service))
}

/// DELETE /plugin-services/:id
pub async fn delete_plugin_service(
    State(state): State<Arc<AdminState>>,
    Path(id): Path<String>,
) -> ApiResult {
    let id = parse_id::<PluginService>(&id)?;
    state.facade.delete_plugin_service(id).await?;
    Ok(message_body("Plugin service deleted successfully"))
}
