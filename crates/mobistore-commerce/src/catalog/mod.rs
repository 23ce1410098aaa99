//! Product catalog module.
//!
//! Contains the product record returned by the backend, the bare item
//! references stored in a cart, and the lookup seam that connects them.

mod lookup;
mod product;

pub use lookup::ProductLookup;
pub use product::{ItemRef, ProductRecord};
