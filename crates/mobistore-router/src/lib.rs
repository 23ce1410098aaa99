//! Routing for the mobistore storefront.
//!
//! Maps request paths onto pages:
//!
//! ```text
//! /                -> redirect to /mobile-phones
//! /login           -> Login
//! /logout          -> Logout
//! /mobile-phones   -> MobileList
//! /mobile/:id      -> MobileDetails
//! /cart            -> Cart
//! anything else    -> NotFound
//! ```
//!
//! Routes can be guarded; an unauthenticated visitor is sent to
//! `/login?returnUrl=<path>` instead.

pub mod prelude;

mod error;
mod navigator;
mod pattern;
mod query;
mod route;
mod table;

pub use error::RouteError;
pub use navigator::{HistoryNavigator, Navigator};
pub use pattern::RoutePattern;
pub use query::{split_url, QueryParams};
pub use route::{Route, RouteKind};
pub use table::{Resolution, RouteTable};
