//! CLI configuration.

use std::path::Path;

use anyhow::{Context, Result};
use mobistore_auth::LocalSession;
use mobistore_commerce::cart::{FailurePolicy, HydrationMode};
use mobistore_commerce::Currency;
use mobistore_router::RouteKind;
use serde::{Deserialize, Serialize};

/// File names searched for, in order, in each directory.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["mobistore.toml", ".mobistore.toml", "mobistore.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Where products come from.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Cart persistence and hydration.
    #[serde(default)]
    pub cart: CartConfig,

    /// Login session.
    #[serde(default)]
    pub session: SessionConfig,

    /// Route guards.
    #[serde(default)]
    pub routes: RoutesConfig,
}

impl StoreConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content, is_json(path))
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    fn parse(content: &str, json: bool) -> Result<Self> {
        if json {
            Ok(serde_json::from_str(content)?)
        } else {
            Ok(toml::from_str(content)?)
        }
    }

    /// Check the config, returning `(errors, warnings)`.
    pub fn check(&self) -> (Vec<String>, Vec<String>) {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        match (&self.catalog.base_url, &self.catalog.catalog_file) {
            (None, None) => errors.push("catalog.base_url or catalog.catalog_file is required".to_string()),
            (Some(_), Some(_)) => warnings.push(
                "both catalog.base_url and catalog.catalog_file are set; catalog_file wins".to_string(),
            ),
            _ => {}
        }

        if let Some(url) = &self.catalog.base_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                errors.push(format!("catalog.base_url '{}' must be an http(s) URL", url));
            }
        }

        if self.catalog.timeout_ms == 0 {
            errors.push("catalog.timeout_ms must be greater than 0".to_string());
        }

        if self.cart.currency().is_none() {
            errors.push(format!("cart.currency '{}' is not supported", self.cart.currency));
        }

        if self.cart.items_file.trim().is_empty() {
            errors.push("cart.items_file must not be empty".to_string());
        }

        if self.session.lifetime_secs <= 0 {
            errors.push("session.lifetime_secs must be greater than 0".to_string());
        } else if self.session.lifetime_secs < 60 {
            warnings.push("session.lifetime_secs is under a minute".to_string());
        }

        for kind in &self.routes.guarded {
            if !kind.is_guardable() {
                warnings.push(format!("routes.guarded: {:?} cannot be guarded", kind));
            }
        }

        (errors, warnings)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Product source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Base URL of the product API (`{base_url}/mobiles/{id}`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Local JSON catalog, used instead of the API when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_file: Option<String>,

    /// Per-request timeout.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_timeout_ms() -> u64 {
    5000
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            catalog_file: None,
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// Cart settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartConfig {
    /// ISO currency code.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// File holding the cart's item references.
    #[serde(default = "default_items_file")]
    pub items_file: String,

    /// Fetch strategy during hydration.
    #[serde(default)]
    pub hydration: HydrationMode,

    /// What to do when a product lookup fails.
    #[serde(default)]
    pub on_lookup_error: FailurePolicy,
}

impl CartConfig {
    pub fn currency(&self) -> Option<Currency> {
        Currency::from_code(&self.currency)
    }
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_items_file() -> String {
    "cart.json".to_string()
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            items_file: default_items_file(),
            hydration: HydrationMode::default(),
            on_lookup_error: FailurePolicy::default(),
        }
    }
}

/// Session settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Session file.
    #[serde(default = "default_session_file")]
    pub file: String,

    /// Login lifetime.
    #[serde(default = "default_lifetime_secs")]
    pub lifetime_secs: i64,
}

fn default_session_file() -> String {
    ".mobistore/session.json".to_string()
}

fn default_lifetime_secs() -> i64 {
    LocalSession::DEFAULT_DURATION_SECS
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            file: default_session_file(),
            lifetime_secs: default_lifetime_secs(),
        }
    }
}

/// Route settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoutesConfig {
    /// Routes that require a login.
    #[serde(default)]
    pub guarded: Vec<RouteKind>,
}

/// Generate a default mobistore.toml config file.
pub fn generate_default_config() -> String {
    r#"# Mobistore configuration

[catalog]
base_url = "http://localhost:3000"
# catalog_file = "catalog.json"
timeout_ms = 5000

[cart]
currency = "USD"
items_file = "cart.json"
hydration = "sequential"   # or "concurrent"
on_lookup_error = "abort"  # or "skip"

[session]
file = ".mobistore/session.json"
lifetime_secs = 604800

[routes]
guarded = []  # e.g. ["cart"]
"#
    .to_string()
}
