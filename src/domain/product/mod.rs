//! Product records as served by the remote catalog, and the editable draft.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Identifier assigned by the remote catalog. Immutable after creation.
pub type ProductId = u64;

/// Review aggregate. Populated only by the remote catalog.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, ToSchema)]
pub struct Rating {
    /// Average score.
    pub rate: f64,
    /// Number of reviews.
    pub count: u32,
}

/// A product record mirrored from the remote catalog.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, ToSchema)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
}

impl Product {
    /// Returns the editable fields of this record.
    pub fn to_draft(&self) -> ProductDraft {
        ProductDraft {
            title: self.title.clone(),
            price: self.price,
            description: self.description.clone(),
            category: self.category.clone(),
            image: self.image.clone().unwrap_or_default(),
        }
    }
}

/// The editable fields of a product: everything except the identifier and rating.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, ToSchema)]
pub struct ProductDraft {
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    /// Image URI; empty when absent.
    #[serde(default)]
    pub image: String,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DraftError {
    #[error("Title is required")]
    MissingTitle,
    #[error("Description is required")]
    MissingDescription,
    #[error("Category is required")]
    MissingCategory,
    #[error("Price must be a non-negative number, got {0}")]
    InvalidPrice(f64),
}

impl DraftError {
    /// Name of the offending draft field.
    pub fn field(&self) -> &'static str {
        match self {
            DraftError::MissingTitle => "title",
            DraftError::MissingDescription => "description",
            DraftError::MissingCategory => "category",
            DraftError::InvalidPrice(_) => "price",
        }
    }
}

impl ProductDraft {
    /// Checks the draft before it is sent to the remote catalog.
    ///
    /// Category membership in the known category set is not enforced.
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.title.trim().is_empty() {
            return Err(DraftError::MissingTitle);
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(DraftError::InvalidPrice(self.price));
        }
        if self.description.trim().is_empty() {
            return Err(DraftError::MissingDescription);
        }
        if self.category.trim().is_empty() {
            return Err(DraftError::MissingCategory);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn draft() -> ProductDraft {
        ProductDraft {
            title: "New Cap".to_string(),
            price: 10.0,
            description: "d".to_string(),
            category: "hats".to_string(),
            image: String::new(),
        }
    }

    #[test]
    fn decodes_remote_record_with_rating() {
        let product: Product = serde_json::from_value(json!({
            "id": 1,
            "title": "Fjallraven Backpack",
            "price": 109.95,
            "description": "Your perfect pack",
            "category": "men's clothing",
            "image": "https://example.test/1.jpg",
            "rating": { "rate": 3.9, "count": 120 }
        }))
        .unwrap();

        assert_eq!(product.id, 1);
        assert_eq!(product.rating, Some(Rating { rate: 3.9, count: 120 }));
        assert_eq!(product.image.as_deref(), Some("https://example.test/1.jpg"));
    }

    #[test]
    fn decodes_created_record_without_rating() {
        let product: Product = serde_json::from_value(json!({
            "id": 21,
            "title": "New Cap",
            "price": 10,
            "description": "d",
            "category": "hats",
            "image": ""
        }))
        .unwrap();

        assert_eq!(product.rating, None);
        assert_eq!(product.price, 10.0);
    }

    #[test]
    fn draft_never_carries_id_or_rating() {
        let value = serde_json::to_value(draft()).unwrap();
        assert!(value.get("id").is_none());
        assert!(value.get("rating").is_none());
    }

    #[test]
    fn validate_accepts_complete_draft() {
        assert_eq!(draft().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_blank_title() {
        let mut d = draft();
        d.title = "   ".to_string();
        assert_eq!(d.validate(), Err(DraftError::MissingTitle));
        assert_eq!(DraftError::MissingTitle.field(), "title");
    }

    #[test]
    fn validate_rejects_negative_or_nan_price() {
        let mut d = draft();
        d.price = -1.0;
        assert_eq!(d.validate(), Err(DraftError::InvalidPrice(-1.0)));
        d.price = f64::NAN;
        assert!(matches!(d.validate(), Err(DraftError::InvalidPrice(_))));
    }

    #[test]
    fn validate_allows_zero_price() {
        let mut d = draft();
        d.price = 0.0;
        assert_eq!(d.validate(), Ok(()));
    }

    #[test]
    fn to_draft_keeps_editable_fields() {
        let product = Product {
            id: 7,
            title: "Red Shoe".to_string(),
            price: 25.5,
            description: "comfy".to_string(),
            category: "shoes".to_string(),
            image: None,
            rating: Some(Rating { rate: 4.0, count: 2 }),
        };
        let d = product.to_draft();
        assert_eq!(d.title, "Red Shoe");
        assert_eq!(d.image, "");
    }
}
