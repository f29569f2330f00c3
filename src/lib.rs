pub mod app;
pub mod domain;
pub mod infra;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::catalog_service::{CatalogService, DeleteConfirmation, ServiceError};
pub use domain::catalog::{visible, DashboardStats, ProductCollection, ProductFilter};
pub use domain::product::{Product, ProductDraft, ProductId, Rating};
pub use infra::config::AdminConfig;
pub use infra::remote::{CatalogRemote, HttpCatalogClient, RequestFailure};
