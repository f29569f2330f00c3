//! Local mirror of the remote product collection.

use crate::domain::product::{Product, ProductId};
use thiserror::Error;

/// A mutation referenced an identifier that does not fit the local mirror.
///
/// The collection is left unchanged whenever one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    #[error("product {0} is not present in the local collection")]
    UnknownProduct(ProductId),
    #[error("product {0} is already present in the local collection")]
    DuplicateProduct(ProductId),
}

/// Ordered sequence of products as of the last successful remote response.
///
/// Newly created records are prepended; otherwise order is the order the
/// remote listing returned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductCollection {
    products: Vec<Product>,
}

impl ProductCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the held collection wholesale.
    pub fn initialize(&mut self, records: Vec<Product>) {
        self.products = records;
    }

    /// Prepends a freshly created record.
    pub fn record_created(&mut self, record: Product) -> Result<(), CollectionError> {
        if self.position(record.id).is_some() {
            return Err(CollectionError::DuplicateProduct(record.id));
        }
        self.products.insert(0, record);
        Ok(())
    }

    /// Replaces the record with identifier `id`, keeping its position.
    pub fn record_updated(
        &mut self,
        id: ProductId,
        record: Product,
    ) -> Result<(), CollectionError> {
        let idx = self
            .position(id)
            .ok_or(CollectionError::UnknownProduct(id))?;
        self.products[idx] = record;
        Ok(())
    }

    /// Removes the record with identifier `id` and returns it.
    pub fn record_removed(&mut self, id: ProductId) -> Result<Product, CollectionError> {
        let idx = self
            .position(id)
            .ok_or(CollectionError::UnknownProduct(id))?;
        Ok(self.products.remove(idx))
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.position(id).is_some()
    }

    pub fn as_slice(&self) -> &[Product] {
        &self.products
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.products.iter()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    fn position(&self, id: ProductId) -> Option<usize> {
        self.products.iter().position(|p| p.id == id)
    }
}

impl From<Vec<Product>> for ProductCollection {
    fn from(products: Vec<Product>) -> Self {
        Self { products }
    }
}
