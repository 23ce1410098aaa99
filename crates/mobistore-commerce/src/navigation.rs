//! Navigation directives emitted by the core.
//!
//! The core never navigates by itself; it hands a directive to whatever
//! navigator the caller plugs in.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Path of the login page.
pub const LOGIN_PATH: &str = "/login";
/// Path of the cart page.
pub const CART_PATH: &str = "/cart";
/// Path of the product list, the landing page of the shop.
pub const PRODUCT_LIST_PATH: &str = "/mobile-phones";

/// Query parameter carrying the post-login destination.
pub const RETURN_URL_PARAM: &str = "returnUrl";

/// An instruction to move to another page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationDirective {
    /// Target path.
    pub path: String,
    /// Where to go once the target page is done (login only).
    pub return_url: Option<String>,
}

impl NavigationDirective {
    /// Plain navigation to `path`.
    pub fn to(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            return_url: None,
        }
    }

    /// Redirect to the login page, coming back to `return_to` afterwards.
    pub fn login_redirect(return_to: impl Into<String>) -> Self {
        Self {
            path: LOGIN_PATH.to_string(),
            return_url: Some(return_to.into()),
        }
    }

    /// Render as a URL, e.g. `/login?returnUrl=/cart`.
    pub fn to_url(&self) -> String {
        match &self.return_url {
            Some(ret) => format!("{}?{}={}", self.path, RETURN_URL_PARAM, ret),
            None => self.path.clone(),
        }
    }

    /// Check if this sends the user to the login page.
    pub fn is_login_redirect(&self) -> bool {
        self.path == LOGIN_PATH
    }
}

impl fmt::Display for NavigationDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_url())
    }
}
