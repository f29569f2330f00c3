use crate::app::catalog_service::FilteredView;
use crate::app::notices::{Notice, NoticeLevel};
use crate::domain::catalog::DashboardStats;
use crate::domain::product::{Product, ProductDraft, Rating};
use crate::transport::http::handlers::{dashboard, health, notices, products, session};
use crate::transport::http::types::ApiResponse;
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        session::load_session_handler,
        session::teardown_session_handler,
        products::list_products_handler,
        products::get_product_handler,
        products::products_by_category_handler,
        products::categories_handler,
        products::create_product_handler,
        products::update_product_handler,
        products::delete_product_handler,
        dashboard::dashboard_handler,
        notices::list_notices_handler,
        notices::dismiss_notice_handler
    ),
    components(schemas(
        ApiResponse,
        Product,
        ProductDraft,
        Rating,
        FilteredView,
        DashboardStats,
        Notice,
        NoticeLevel
    ))
)]
pub struct ApiDoc;

pub fn create_router(app_state: crate::transport::http::types::AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route("/api/session/load", post(session::load_session_handler))
        .route("/api/session", delete(session::teardown_session_handler))
        .route(
            "/api/products",
            get(products::list_products_handler).post(products::create_product_handler),
        )
        .route(
            "/api/products/:id",
            get(products::get_product_handler)
                .put(products::update_product_handler)
                .delete(products::delete_product_handler),
        )
        .route(
            "/api/products/category/:category",
            get(products::products_by_category_handler),
        )
        .route("/api/categories", get(products::categories_handler))
        .route("/api/dashboard", get(dashboard::dashboard_handler))
        .route("/api/notices", get(notices::list_notices_handler))
        .route("/api/notices/:id", delete(notices::dismiss_notice_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
