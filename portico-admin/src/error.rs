use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use portico_core::PorticoError;

/// Error returned by admin handlers; renders as `{"error": "..."}`.
#[derive(Debug)]
pub struct ApiError(pub PorticoError);

pub type ApiResult = Result<(StatusCode, Json<serde_json::Value>), ApiError>;

impl From<PorticoError> for ApiError {
    fn from(err: PorticoError) -> Self {
        ApiError(err)
    }
}

/// Malformed or mistyped JSON body.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(PorticoError::Validation(rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError(PorticoError::Validation(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            tracing::error!(error = %self.0, "admin: request failed");
        }
        (status, Json(self.0.to_json_body())).into_response()
    }
}
