use crate::app::catalog_service::DeleteOutcome;
use crate::domain::catalog::ProductFilter;
use crate::domain::product::{ProductDraft, ProductId};
use crate::transport::http::handlers::common::{failure, ok, product_id, service_error};
use crate::transport::http::types::{json_422, AppState, DeleteParams};
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

const DRAFT_SHAPE: &str =
    "{\"title\": ..., \"price\": ..., \"description\": ..., \"category\": ..., \"image\": ...}";

#[utoipa::path(
    get,
    path = "/api/products",
    params(ProductFilter),
    responses(
        (status = 200, description = "Visible products, shown/total", body = ApiResponse),
        (status = 409, description = "Session not loaded", body = ApiResponse)
    )
)]
pub async fn list_products_handler(
    State(state): State<AppState>,
    Query(filter): Query<ProductFilter>,
) -> impl IntoResponse {
    match state.catalog.visible(&filter).await {
        Ok(view) => ok(json!(view)),
        Err(e) => service_error(e).into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(
        ("id" = u64, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Product from the local collection", body = ApiResponse),
        (status = 404, description = "Not in the local collection", body = ApiResponse),
        (status = 409, description = "Session not loaded", body = ApiResponse)
    )
)]
pub async fn get_product_handler(
    State(state): State<AppState>,
    id: Result<Path<ProductId>, PathRejection>,
) -> impl IntoResponse {
    let id = match product_id(id) {
        Ok(id) => id,
        Err(resp) => return resp.into_response(),
    };
    match state.catalog.product(id).await {
        Ok(Some(product)) => ok(json!(product)),
        Ok(None) => failure(StatusCode::NOT_FOUND, format!("Product {} not found", id))
            .into_response(),
        Err(e) => service_error(e).into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/products/category/{category}",
    params(
        ("category" = String, Path, description = "Category label (e.g. jewelery)")
    ),
    responses(
        (status = 200, description = "Category products from the remote", body = ApiResponse),
        (status = 502, description = "Remote catalog request failed", body = ApiResponse)
    )
)]
pub async fn products_by_category_handler(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> impl IntoResponse {
    match state.catalog.remote_category(&category).await {
        Ok(products) => ok(json!({ "category": category, "products": products })),
        Err(e) => service_error(e).into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "Known category labels", body = ApiResponse),
        (status = 409, description = "Session not loaded", body = ApiResponse)
    )
)]
pub async fn categories_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.catalog.categories().await {
        Ok(categories) => ok(json!(categories)),
        Err(e) => service_error(e).into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/api/products",
    request_body = ProductDraft,
    responses(
        (status = 200, description = "Created and prepended", body = ApiResponse),
        (status = 400, description = "Invalid draft", body = ApiResponse),
        (status = 409, description = "Session not loaded", body = ApiResponse),
        (status = 422, description = "Invalid JSON body", body = ApiResponse),
        (status = 502, description = "Remote catalog request failed", body = ApiResponse)
    )
)]
pub async fn create_product_handler(
    State(state): State<AppState>,
    request: Result<Json<ProductDraft>, JsonRejection>,
) -> impl IntoResponse {
    let Json(draft) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, DRAFT_SHAPE).into_response(),
    };
    match state.catalog.create(draft).await {
        Ok(outcome) => ok(json!(outcome)),
        Err(e) => service_error(e).into_response(),
    }
}

#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(
        ("id" = u64, Path, description = "Product id")
    ),
    request_body = ProductDraft,
    responses(
        (status = 200, description = "Product updated in place", body = ApiResponse),
        (status = 400, description = "Invalid draft or id", body = ApiResponse),
        (status = 409, description = "Session not loaded", body = ApiResponse),
        (status = 422, description = "Invalid JSON body", body = ApiResponse),
        (status = 502, description = "Remote catalog request failed", body = ApiResponse)
    )
)]
pub async fn update_product_handler(
    State(state): State<AppState>,
    id: Result<Path<ProductId>, PathRejection>,
    request: Result<Json<ProductDraft>, JsonRejection>,
) -> impl IntoResponse {
    let id = match product_id(id) {
        Ok(id) => id,
        Err(resp) => return resp.into_response(),
    };
    let Json(draft) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, DRAFT_SHAPE).into_response(),
    };
    match state.catalog.update(id, draft).await {
        Ok(outcome) => ok(json!(outcome)),
        Err(e) => service_error(e).into_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(
        ("id" = u64, Path, description = "Product id"),
        DeleteParams
    ),
    responses(
        (status = 200, description = "Deleted and removed locally", body = ApiResponse),
        (status = 400, description = "Missing confirmation or invalid id", body = ApiResponse),
        (status = 409, description = "Session not loaded", body = ApiResponse),
        (status = 502, description = "Remote catalog request failed", body = ApiResponse)
    )
)]
pub async fn delete_product_handler(
    State(state): State<AppState>,
    id: Result<Path<ProductId>, PathRejection>,
    Query(params): Query<DeleteParams>,
) -> impl IntoResponse {
    let id = match product_id(id) {
        Ok(id) => id,
        Err(resp) => return resp.into_response(),
    };
    match state.catalog.delete(id, params.confirmation()).await {
        Ok(DeleteOutcome::Deleted(outcome)) => ok(json!(outcome)),
        Ok(DeleteOutcome::Cancelled) => failure(
            StatusCode::BAD_REQUEST,
            "Deletion must be confirmed with ?confirm=true",
        )
        .into_response(),
        Err(e) => service_error(e).into_response(),
    }
}
