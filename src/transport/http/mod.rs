pub mod router;
pub mod types;
pub mod handlers {
    pub mod common;
    pub mod dashboard;
    pub mod health;
    pub mod notices;
    pub mod products;
    pub mod session;
}

pub use router::{create_router, ApiDoc};
pub use types::AppState;
