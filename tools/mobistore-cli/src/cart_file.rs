//! The cart's item references on disk.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use mobistore_commerce::cart::{LineItem, MAX_QUANTITY_PER_ITEM};
use mobistore_commerce::catalog::ItemRef;
use mobistore_commerce::ids::ProductId;

/// JSON list of [`ItemRef`]s.
#[derive(Debug, Clone)]
pub struct CartFile {
    path: PathBuf,
}

impl CartFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the references; a missing file is an empty cart.
    pub fn load(&self) -> Result<Vec<ItemRef>> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse cart file: {}", self.path.display())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to read cart file: {}", self.path.display())),
        }
    }

    pub fn save(&self, refs: &[ItemRef]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(refs)?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write cart file: {}", self.path.display()))
    }
}

/// Add `quantity` units of `id`, merging with an existing reference.
///
/// Returns the resulting quantity.
pub fn add_item(refs: &mut Vec<ItemRef>, id: ProductId, quantity: i64) -> Result<i64> {
    if !LineItem::is_valid_quantity(quantity) {
        bail!("Quantity must be between 1 and {}", MAX_QUANTITY_PER_ITEM);
    }

    match refs.iter_mut().find(|r| r.id == id) {
        Some(existing) => {
            let merged = existing.quantity.unwrap_or(1).max(1).saturating_add(quantity);
            if !LineItem::is_valid_quantity(merged) {
                bail!(
                    "{} would have {} units, more than the limit of {}",
                    id,
                    merged,
                    MAX_QUANTITY_PER_ITEM
                );
            }
            existing.quantity = Some(merged);
            Ok(merged)
        }
        None => {
            refs.push(ItemRef::new(id, quantity));
            Ok(quantity)
        }
    }
}
