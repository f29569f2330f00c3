//! Tracing subscriber setup shared by the binaries.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str =
    "catalog_admin=info,api_server=info,preflight=info,tower_http=info";

/// Installs the global fmt subscriber. `RUST_LOG` overrides the default filter.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    // A subscriber may already be installed (e.g. by a test harness).
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
