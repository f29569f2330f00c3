use crate::transport::http::handlers::common::{failure, ok};
use crate::transport::http::types::AppState;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

#[utoipa::path(
    get,
    path = "/api/notices",
    responses(
        (status = 200, description = "Pending notices, oldest first", body = ApiResponse)
    )
)]
pub async fn list_notices_handler(State(state): State<AppState>) -> impl IntoResponse {
    ok(json!({ "notices": state.catalog.notices().await }))
}

#[utoipa::path(
    delete,
    path = "/api/notices/{id}",
    params(
        ("id" = u64, Path, description = "Notice id")
    ),
    responses(
        (status = 200, description = "Notice dismissed", body = ApiResponse),
        (status = 404, description = "No such notice", body = ApiResponse)
    )
)]
pub async fn dismiss_notice_handler(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> impl IntoResponse {
    let id = match id {
        Ok(Path(id)) => id,
        Err(e) => {
            return failure(StatusCode::BAD_REQUEST, format!("Invalid notice id: {}", e))
                .into_response()
        }
    };
    if state.catalog.dismiss_notice(id).await {
        ok(json!({ "dismissed": id }))
    } else {
        failure(StatusCode::NOT_FOUND, format!("Notice {} not found", id)).into_response()
    }
}
