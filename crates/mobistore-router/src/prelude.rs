//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use mobistore_router::prelude::*;
//! ```

pub use crate::{HistoryNavigator, Navigator, Resolution, Route, RouteKind, RouteTable};
pub use mobistore_commerce::navigation::NavigationDirective;
