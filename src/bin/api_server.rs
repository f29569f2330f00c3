// src/bin/api_server.rs

use catalog_admin::infra::logging;
use catalog_admin::transport;
use catalog_admin::{AdminConfig, CatalogService, HttpCatalogClient};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();
    let config = AdminConfig::from_env()?;

    // --- Remote catalog + session service ---
    info!(base_url = %config.api_base_url, "using remote catalog");
    let remote = Arc::new(HttpCatalogClient::new(config.api_base_url.clone()));
    let catalog = Arc::new(CatalogService::new(remote, config.notice_capacity));

    // Warm the session so the views have data on first paint. A failure here is not fatal:
    // the front end can retry through POST /api/session/load.
    match catalog.load().await {
        Ok(()) => info!("catalog session loaded at startup"),
        Err(e) => warn!(
            error = %e,
            "initial catalog load failed; continuing with an unloaded session"
        ),
    }

    let app_state = transport::http::AppState {
        catalog: catalog.clone(),
    };

    // --- API Server Initialization ---
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);
    let app = transport::http::create_router(app_state)
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()),
        )
        .layer(cors);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "admin API listening");
    info!("Swagger UI available at http://{}/swagger-ui", config.bind_addr);

    tokio::select! {
        result = axum::serve(listener, app) => {
            if let Err(e) = result {
                error!(error = %e, "server exited with an error");
                return Err(e.into());
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received");
            let in_flight = catalog.in_flight();
            if in_flight > 0 {
                warn!(in_flight, "dropping mutations still awaiting the remote catalog");
            }
            catalog.teardown().await;
            info!("graceful shutdown complete");
        }
    }

    Ok(())
}
