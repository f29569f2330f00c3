use crate::app::catalog_service::ServiceError;
use crate::domain::product::ProductId;
use crate::transport::http::types::ApiResponse;
use axum::extract::rejection::PathRejection;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value as JsonValue};

pub type HandlerError = (StatusCode, Json<ApiResponse>);

pub fn ok(data: JsonValue) -> Response {
    (StatusCode::OK, Json(ApiResponse::ok(data))).into_response()
}

pub fn failure(status: StatusCode, error: impl Into<String>) -> HandlerError {
    (status, Json(ApiResponse::err(error)))
}

/// Maps service errors onto HTTP statuses.
///
/// Remote failures all become 502; the upstream status is passed along in `data`.
pub fn service_error(err: ServiceError) -> HandlerError {
    match err {
        ServiceError::NotLoaded => failure(
            StatusCode::CONFLICT,
            "Catalog session is not loaded; POST /api/session/load first",
        ),
        ServiceError::Discarded => failure(StatusCode::CONFLICT, err.to_string()),
        ServiceError::InvalidDraft(ref draft_err) => (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse {
                success: false,
                data: Some(json!({ "field": draft_err.field() })),
                error: Some(draft_err.to_string()),
            }),
        ),
        ServiceError::Remote(ref remote) => (
            StatusCode::BAD_GATEWAY,
            Json(ApiResponse {
                success: false,
                data: Some(json!({
                    "operation": remote.operation(),
                    "upstream_status": remote.status().map(|s| s.as_u16()),
                    "reason": remote.reason(),
                })),
                error: Some(remote.to_string()),
            }),
        ),
    }
}

pub fn product_id(path: Result<Path<ProductId>, PathRejection>) -> Result<ProductId, HandlerError> {
    path.map(|Path(id)| id)
        .map_err(|e| failure(StatusCode::BAD_REQUEST, format!("Invalid product id: {}", e)))
}
