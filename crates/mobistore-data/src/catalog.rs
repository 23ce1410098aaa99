//! In-memory product catalog.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use mobistore_commerce::catalog::{ProductLookup, ProductRecord};
use mobistore_commerce::{LookupError, ProductId};

use crate::error::DataError;

/// Product lookup served from memory.
///
/// Used for offline demos and tests; a catalog file is a JSON array of
/// product records.
#[derive(Debug, Clone, Default)]
pub struct CatalogLookup {
    products: HashMap<ProductId, ProductRecord>,
}

impl CatalogLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from records; later duplicates replace earlier ones.
    pub fn from_records(records: impl IntoIterator<Item = ProductRecord>) -> Self {
        Self {
            products: records
                .into_iter()
                .map(|record| (record.id.clone(), record))
                .collect(),
        }
    }

    /// Load a catalog file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let records: Vec<ProductRecord> =
            serde_json::from_str(&content).map_err(|source| DataError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::from_records(records))
    }

    /// Add or replace a product.
    pub fn insert(&mut self, record: ProductRecord) {
        self.products.insert(record.id.clone(), record);
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[async_trait]
impl ProductLookup for CatalogLookup {
    async fn fetch_product(&self, id: &ProductId) -> Result<ProductRecord, LookupError> {
        self.products
            .get(id)
            .cloned()
            .ok_or_else(|| LookupError::NotFound(id.to_string()))
    }
}
