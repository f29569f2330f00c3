//! The local product catalog: mirrored collection, filtering and dashboard figures.

pub mod collection;
pub mod filter;
pub mod stats;

pub use collection::{CollectionError, ProductCollection};
pub use filter::{visible, ProductFilter};
pub use stats::DashboardStats;
