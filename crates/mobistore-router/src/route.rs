//! Storefront pages.

use mobistore_commerce::ids::ProductId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The registered routes, independent of their parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteKind {
    Home,
    Login,
    Logout,
    MobileList,
    MobileDetails,
    Cart,
}

impl RouteKind {
    /// Every route, in registration order.
    pub const ALL: [RouteKind; 6] = [
        RouteKind::Home,
        RouteKind::Login,
        RouteKind::Logout,
        RouteKind::MobileList,
        RouteKind::MobileDetails,
        RouteKind::Cart,
    ];

    /// Path pattern the route is mounted at.
    pub fn pattern(&self) -> &'static str {
        match self {
            RouteKind::Home => "/",
            RouteKind::Login => "/login",
            RouteKind::Logout => "/logout",
            RouteKind::MobileList => "/mobile-phones",
            RouteKind::MobileDetails => "/mobile/:id",
            RouteKind::Cart => "/cart",
        }
    }

    /// Whether the route may be guarded.
    ///
    /// The home redirect and the login page itself are always reachable.
    pub fn is_guardable(&self) -> bool {
        !matches!(self, RouteKind::Home | RouteKind::Login)
    }
}

/// A resolved page with its parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum Route {
    Login { return_url: Option<String> },
    Logout,
    MobileList,
    MobileDetails { id: ProductId },
    Cart,
    NotFound { path: String },
}

impl Route {
    pub fn name(&self) -> &'static str {
        match self {
            Route::Login { .. } => "login",
            Route::Logout => "logout",
            Route::MobileList => "mobile_list",
            Route::MobileDetails { .. } => "mobile_details",
            Route::Cart => "cart",
            Route::NotFound { .. } => "not_found",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Login {
                return_url: Some(url),
            } => write!(f, "login (return to {})", url),
            Route::MobileDetails { id } => write!(f, "mobile_details ({})", id),
            Route::NotFound { path } => write!(f, "not_found ({})", path),
            other => f.write_str(other.name()),
        }
    }
}
