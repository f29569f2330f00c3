pub mod client;
pub mod error;

pub use client::{CatalogRemote, HttpCatalogClient};
pub use error::RequestFailure;
