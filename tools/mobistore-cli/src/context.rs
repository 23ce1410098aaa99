//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context as _, Result};
use mobistore_auth::{LocalSession, SessionStore};
use mobistore_commerce::cart::CartStore;
use mobistore_commerce::catalog::ProductLookup;
use mobistore_data::{CatalogLookup, FetchPolicy, HttpProductLookup};
use mobistore_router::RouteTable;

use crate::cart_file::CartFile;
use crate::config::{StoreConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: StoreConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = match config_path {
            Some(path) => {
                let path = resolve_against(&cwd, path);
                (StoreConfig::load(&path)?, Some(path))
            }
            None => match Self::find_config(&cwd) {
                Some(path) => (StoreConfig::load(&path)?, Some(path)),
                None => (StoreConfig::default(), None),
            },
        };

        match &config_path {
            Some(path) => output.debug(&format!("Using config {}", path.display())),
            None => output.debug("No config file found, using defaults"),
        }

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    pub fn find_config(start: &Path) -> Option<PathBuf> {
        start.ancestors().find_map(|dir| {
            CONFIG_FILE_NAMES
                .iter()
                .map(|name| dir.join(name))
                .find(|path| path.is_file())
        })
    }

    /// Directory relative paths in the config are resolved against.
    pub fn base_dir(&self) -> &Path {
        self.config_path
            .as_deref()
            .and_then(Path::parent)
            .unwrap_or(self.cwd.as_path())
    }

    /// Resolve a configured path.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        resolve_against(self.base_dir(), path)
    }

    /// The stored cart's item references.
    pub fn cart_file(&self) -> CartFile {
        CartFile::new(self.resolve_path(&self.config.cart.items_file))
    }

    pub fn session_store(&self) -> SessionStore {
        SessionStore::new(self.resolve_path(&self.config.session.file))
    }

    /// Load the session with the configured login lifetime.
    pub fn load_session(&self) -> Result<LocalSession> {
        let store = self.session_store();
        let session = store
            .load()
            .with_context(|| format!("Failed to load session from {}", store.path().display()))?;
        Ok(session.with_lifetime(self.config.session.lifetime_secs)?)
    }

    /// An empty cart configured for this storefront.
    pub fn cart_store(&self) -> Result<CartStore> {
        let currency = self
            .config
            .cart
            .currency()
            .ok_or_else(|| anyhow!("Unsupported currency: {}", self.config.cart.currency))?;

        Ok(CartStore::new(currency)
            .with_hydration_mode(self.config.cart.hydration)
            .with_failure_policy(self.config.cart.on_lookup_error))
    }

    /// Storefront routes with the configured guards.
    pub fn route_table(&self) -> RouteTable {
        self.config
            .routes
            .guarded
            .iter()
            .fold(RouteTable::storefront(), |table, kind| table.guard(*kind))
    }

    /// Product lookup backing hydration.
    ///
    /// A local catalog file takes precedence over the HTTP API.
    pub fn product_lookup(&self) -> Result<Box<dyn ProductLookup>> {
        let catalog = &self.config.catalog;

        if let Some(file) = &catalog.catalog_file {
            let path = self.resolve_path(file);
            let lookup = CatalogLookup::load(&path)
                .with_context(|| format!("Failed to load catalog {}", path.display()))?;
            self.output
                .debug(&format!("Catalog {} ({} products)", path.display(), lookup.len()));
            return Ok(Box::new(lookup));
        }

        if let Some(base_url) = &catalog.base_url {
            let policy = FetchPolicy::from_timeout_ms(catalog.timeout_ms);
            let lookup = HttpProductLookup::with_policy(base_url, policy)
                .with_context(|| format!("Failed to create product client for {}", base_url))?;
            self.output.debug(&format!("Product API {}", lookup.base_url()));
            return Ok(Box::new(lookup));
        }

        bail!("No product source configured. Set catalog.base_url or catalog.catalog_file.")
    }
}

fn resolve_against(base: &Path, path: &str) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("mobistore-cli-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_find_config_walks_up() {
        let root = temp_dir("walk");
        let nested = root.join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.join("mobistore.toml"), "").unwrap();

        let found = Context::find_config(&nested);
        std::fs::remove_dir_all(&root).unwrap();

        assert_eq!(found, Some(root.join("mobistore.toml")));
    }

    #[test]
    fn test_paths_resolve_against_config_dir() {
        let ctx = Context {
            config: StoreConfig::default(),
            config_path: Some(PathBuf::from("/srv/shop/mobistore.toml")),
            output: Output::new(false, true),
            cwd: PathBuf::from("/home/user"),
        };
        assert_eq!(ctx.cart_file().path(), Path::new("/srv/shop/cart.json"));
        assert_eq!(ctx.resolve_path("/abs/x.json"), PathBuf::from("/abs/x.json"));
    }

    #[test]
    fn test_missing_product_source() {
        let ctx = Context {
            config: StoreConfig::default(),
            config_path: None,
            output: Output::new(false, true),
            cwd: std::env::temp_dir(),
        };
        assert!(ctx.product_lookup().is_err());
    }
}
