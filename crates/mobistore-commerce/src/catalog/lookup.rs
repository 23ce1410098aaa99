//! Product-lookup collaborator.

use std::sync::Arc;

use async_trait::async_trait;

use crate::catalog::ProductRecord;
use crate::error::LookupError;
use crate::ids::ProductId;

/// Fetches full product records by id.
///
/// Implementations must be idempotent reads without side effects; the
/// cart may call them any number of times for the same id.
#[async_trait]
pub trait ProductLookup: Send + Sync {
    /// Fetch one product.
    async fn fetch_product(&self, id: &ProductId) -> Result<ProductRecord, LookupError>;
}

#[async_trait]
impl<T: ProductLookup + ?Sized> ProductLookup for Arc<T> {
    async fn fetch_product(&self, id: &ProductId) -> Result<ProductRecord, LookupError> {
        (**self).fetch_product(id).await
    }
}

#[async_trait]
impl<T: ProductLookup + ?Sized> ProductLookup for Box<T> {
    async fn fetch_product(&self, id: &ProductId) -> Result<ProductRecord, LookupError> {
        (**self).fetch_product(id).await
    }
}
