//! Product data access for the storefront.
//!
//! This crate provides:
//! - `HttpProductLookup` - fetches product records from the catalog API
//! - `CatalogLookup` - in-memory catalog, optionally loaded from a JSON file
//! - `FetchPolicy` / `TimeoutConfig` - request timeouts
//!
//! Both lookups implement [`mobistore_commerce::catalog::ProductLookup`].

mod catalog;
mod client;
mod error;
mod timeout;

pub use catalog::*;
pub use client::*;
pub use error::*;
pub use timeout::*;
