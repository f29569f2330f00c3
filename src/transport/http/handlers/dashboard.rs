use crate::transport::http::handlers::common::{ok, service_error};
use crate::transport::http::types::AppState;
use axum::extract::State;
use axum::response::IntoResponse;

#[utoipa::path(
    get,
    path = "/api/dashboard",
    responses(
        (status = 200, description = "Local collection statistics", body = ApiResponse),
        (status = 409, description = "Session not loaded", body = ApiResponse)
    )
)]
pub async fn dashboard_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.catalog.stats().await {
        Ok(stats) => ok(serde_json::json!(stats)),
        Err(e) => service_error(e).into_response(),
    }
}
