use super::{data_body, list_body, message_body, parse_id};
use crate::error::ApiResult;
use crate::server::AdminState;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use portico_core::Domain;
use portico_core::request::{CreateDomainRequest, DomainFilter, UpdateDomainRequest};
use std::sync::Arc;

/// GET /domains
pub async fn list_domains(
    State(state): State<Arc<AdminState>>,
    query: Result<Query<DomainFilter>, QueryRejection>,
) -> ApiResult {
    let Query(filter) = query?;
    Ok(list_body(state.facade.list_domains(&filter)))
}

/// GET /domains/:id
pub async fn get_domain(
    State(state): State<Arc<AdminState>>,
    Path(id): Path<String>,
) -> ApiResult {
    let id = parse_id::<Domain>(&id)?;
    Ok(data_body(StatusCode::OK, state.facade.get_domain(id)?))
}

/// POST /domains
pub async fn create_domain(
    State(state): State<Arc<AdminState>>,
    payload: Result<Json<CreateDomainRequest>, JsonRejection>,
) -> ApiResult {
    let Json(req) = payload?;
    let view = state.facade.create_domain(req).await?;
    Ok(data_body(StatusCode::CREATED, view))
}

/// PUT /domains/:id
pub async fn update_domain(
    State(state): State<Arc<AdminState>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateDomainRequest>, JsonRejection>,
) -> ApiResult {
    let id = parse_id::<Domain>(&id)?;
    state.facade.get_domain(id)?;
    let Json(req) = payload?;
    let view = state.facade.update_domain(id, req).await?;
    Ok(data_body(StatusCode::OK, view))
}

/// DELETE /domains/:id
pub async fn delete_domain(
    State(state): State<Arc<AdminState>>,
    Path(id): Path<String>,
) -> ApiResult {
    let id = parse_id::<Domain>(&id)?;
    state.facade.delete_domain(id).await?;
    Ok(message_body("Domain and associated routes deleted successfully"))
}
