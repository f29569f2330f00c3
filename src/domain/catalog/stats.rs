//! Aggregate figures shown on the dashboard tiles.

use crate::domain::product::Product;
use serde::Serialize;
use utoipa::ToSchema;

/// Number of leading records listed as top products.
pub const TOP_PRODUCTS: usize = 5;

#[derive(Serialize, Debug, Clone, PartialEq, ToSchema)]
pub struct DashboardStats {
    pub total_products: usize,
    /// Sum of prices, rounded to cents.
    pub total_value: f64,
    /// Mean rating; unrated records count as zero.
    pub average_rating: f64,
    pub top_products: Vec<Product>,
}

impl DashboardStats {
    pub fn from_products(products: &[Product]) -> Self {
        let total_value: f64 = products.iter().map(|p| p.price).sum();
        let average_rating = if products.is_empty() {
            0.0
        } else {
            let sum: f64 = products
                .iter()
                .map(|p| p.rating.as_ref().map_or(0.0, |r| r.rate))
                .sum();
            sum / products.len() as f64
        };

        Self {
            total_products: products.len(),
            total_value: (total_value * 100.0).round() / 100.0,
            average_rating,
            top_products: products.iter().take(TOP_PRODUCTS).cloned().collect(),
        }
    }
}
