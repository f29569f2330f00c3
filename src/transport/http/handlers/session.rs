use crate::transport::http::handlers::common::{ok, service_error};
use crate::transport::http::types::AppState;
use axum::extract::State;
use axum::response::IntoResponse;
use serde_json::json;

#[utoipa::path(
    post,
    path = "/api/session/load",
    responses(
        (status = 200, description = "Products and categories loaded", body = ApiResponse),
        (status = 409, description = "Superseded by a newer load or teardown", body = ApiResponse),
        (status = 502, description = "Remote catalog request failed", body = ApiResponse)
    )
)]
pub async fn load_session_handler(State(state): State<AppState>) -> impl IntoResponse {
    if let Err(e) = state.catalog.load().await {
        return service_error(e).into_response();
    }
    let status = state.catalog.status().await;
    let categories = state.catalog.categories().await.unwrap_or_default();
    let total = state
        .catalog
        .stats()
        .await
        .map(|s| s.total_products)
        .unwrap_or_default();
    ok(json!({
        "session": status,
        "total": total,
        "categories": categories,
    }))
}

#[utoipa::path(
    delete,
    path = "/api/session",
    responses(
        (status = 200, description = "Session dropped", body = ApiResponse)
    )
)]
pub async fn teardown_session_handler(State(state): State<AppState>) -> impl IntoResponse {
    state.catalog.teardown().await;
    ok(json!({ "session": state.catalog.status().await }))
}
