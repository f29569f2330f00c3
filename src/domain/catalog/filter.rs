//! Title/category filtering over a product collection.

use crate::domain::product::Product;
use serde::Deserialize;
use utoipa::IntoParams;

/// Two independent criteria; an empty criterion matches everything.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductFilter {
    /// Case-insensitive substring matched against the title.
    #[serde(default, rename = "q")]
    pub title_query: String,
    /// Exact, case-sensitive category.
    #[serde(default)]
    pub category: String,
}

impl ProductFilter {
    pub fn new(title_query: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            title_query: title_query.into(),
            category: category.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title_query.is_empty() && self.category.is_empty()
    }

    /// Returns the matching records in their original order.
    pub fn visible<'a>(&self, collection: &'a [Product]) -> Vec<&'a Product> {
        let needle = self.title_query.to_lowercase();
        collection
            .iter()
            .filter(|p| self.category.is_empty() || p.category == self.category)
            .filter(|p| needle.is_empty() || p.title.to_lowercase().contains(&needle))
            .collect()
    }
}

/// Free-function form of [`ProductFilter::visible`].
pub fn visible<'a>(
    collection: &'a [Product],
    title_query: &str,
    category_filter: &str,
) -> Vec<&'a Product> {
    ProductFilter::new(title_query, category_filter).visible(collection)
}
