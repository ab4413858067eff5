use super::{data_body, list_body, message_body, parse_id};
use crate::error::ApiResult;
use crate::server::AdminState;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use portico_core::Route;
use portico_core::request::{
    CreateRouteRequest, RouteFilter, UpdateRoutePluginRequest, UpdateRouteRequest,
};
use std::sync::Arc;

/// GET /routes
pub async fn list_routes(
    State(state): State<Arc<AdminState>>,
    query: Result<Query<RouteFilter>, QueryRejection>,
) -> ApiResult {
    let Query(filter) = query?;
    Ok(list_body(state.facade.list_routes(&filter)))
}

/// GET /routes/:id
pub async fn get_route(
    State(state): State<Arc<AdminState>>,
    Path(id): Path<String>,
) -> ApiResult {
    let id = parse_id::<Route>(&id)?;
    Ok(data_body(StatusCode::OK, state.facade.get_route(id)?))
}

/// POST /routes
pub async fn create_route(
    State(state): State<Arc<AdminState>>,
    payload: Result<Json<CreateRouteRequest>, JsonRejection>,
) -> ApiResult {
    let Json(req) = payload?;
    let route = state.facade.create_route(req).await?;
    Ok(data_body(StatusCode::CREATED, route))
}

/// PUT /routes/:id
pub async fn update_route(
    State(state): State<Arc<AdminState>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateRouteRequest>, JsonRejection>,
) -> ApiResult {
    let id = parse_id::<Route>(&id)?;
    state.facade.get_route(id)?;
    let Json(req) = payload?;
    Ok(data_body(StatusCode::OK, state.facade.update_route(id, req).await?))
}

/// PUT /routes/:id/plugins
pub async fn update_route_plugins(
    State(state): State<Arc<AdminState>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateRoutePluginRequest>, JsonRejection>,
) -> ApiResult {
    let id = parse_id::<Route>(&id)?;
    state.facade.get_route(id)?;
    let Json(req) = payload?;
    let route = state.facade.update_route_plugins(id, req).await?;
    Ok(data_body(StatusCode::OK, route))
}

/// DELETE /routes/:id
pub async fn delete_route(
    State(state): State<Arc<AdminState>>,
    Path(id): Path<String>,
) -> ApiResult {
    let id = parse_id::<Route>(&id)?;
    state.facade.delete_route(id).await?;
    Ok(message_body("Route deleted successfully"))
}
