//! Route table and resolution.

use std::collections::HashSet;

use mobistore_commerce::checkout::AuthContext;
use mobistore_commerce::ids::ProductId;
use mobistore_commerce::navigation::{NavigationDirective, PRODUCT_LIST_PATH};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{split_url, QueryParams, Route, RouteError, RouteKind, RoutePattern};

/// Outcome of resolving a URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Resolution {
    /// Show this page.
    Render { route: Route },
    /// Go somewhere else first.
    Redirect { to: NavigationDirective },
}

#[derive(Debug, Clone)]
struct RouteEntry {
    kind: RouteKind,
    pattern: RoutePattern,
}

/// Exact-match route table, first match wins.
#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
    guarded: HashSet<RouteKind>,
}

impl RouteTable {
    /// The storefront routes, none of them guarded.
    pub fn storefront() -> Self {
        let entries = RouteKind::ALL
            .iter()
            .filter_map(|kind| {
                let pattern = RoutePattern::parse(kind.pattern()).ok()?;
                Some(RouteEntry {
                    kind: *kind,
                    pattern,
                })
            })
            .collect();

        Self {
            entries,
            guarded: HashSet::new(),
        }
    }

    /// Require authentication for `kind`. Routes that cannot be guarded
    /// are left alone.
    pub fn guard(mut self, kind: RouteKind) -> Self {
        if kind.is_guardable() {
            self.guarded.insert(kind);
        }
        self
    }

    pub fn is_guarded(&self, kind: RouteKind) -> bool {
        self.guarded.contains(&kind)
    }

    /// Resolve a URL (path plus optional query string) for a session.
    pub fn resolve<A>(&self, url: &str, auth: &A) -> Result<Resolution, RouteError>
    where
        A: AuthContext + ?Sized,
    {
        let (path, query) = split_url(url);
        if !path.starts_with('/') {
            return Err(RouteError::InvalidPath(url.to_string()));
        }
        let query = query.map(QueryParams::parse).unwrap_or_default();

        let matched = self
            .entries
            .iter()
            .find_map(|entry| entry.pattern.matches(path).map(|params| (entry, params)));

        let Some((entry, mut params)) = matched else {
            debug!(path, "no route matched");
            return Ok(Resolution::Render {
                route: Route::NotFound {
                    path: path.to_string(),
                },
            });
        };

        if self.is_guarded(entry.kind) && !auth.is_authenticated() {
            debug!(path, route = ?entry.kind, "guarded route, redirecting to login");
            return Ok(Resolution::Redirect {
                to: NavigationDirective::login_redirect(path),
            });
        }

        let route = match entry.kind {
            RouteKind::Home => {
                return Ok(Resolution::Redirect {
                    to: NavigationDirective::to(PRODUCT_LIST_PATH),
                })
            }
            RouteKind::Login => Route::Login {
                return_url: query.return_url().map(str::to_string),
            },
            RouteKind::Logout => Route::Logout,
            RouteKind::MobileList => Route::MobileList,
            RouteKind::MobileDetails => Route::MobileDetails {
                id: ProductId::new(params.remove("id").unwrap_or_default()),
            },
            RouteKind::Cart => Route::Cart,
        };

        debug!(path, route = %route, "route resolved");
        Ok(Resolution::Render { route })
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::storefront()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mobistore_commerce::navigation::CART_PATH;

    struct Visitor(bool);

    impl AuthContext for Visitor {
        fn is_authenticated(&self) -> bool {
            self.0
        }
    }

    fn render(route: Route) -> Resolution {
        Resolution::Render { route }
    }

    #[test]
    fn test_every_route_is_registered() {
        assert_eq!(RouteTable::storefront().entries.len(), RouteKind::ALL.len());
    }

    #[test]
    fn test_home_redirects_to_product_list() {
        let table = RouteTable::storefront();
        assert_eq!(
            table.resolve("/", &Visitor(false)).unwrap(),
            Resolution::Redirect {
                to: NavigationDirective::to(PRODUCT_LIST_PATH)
            }
        );
    }

    #[test]
    fn test_static_routes() {
        let table = RouteTable::storefront();
        let anon = Visitor(false);
        assert_eq!(table.resolve("/logout", &anon).unwrap(), render(Route::Logout));
        assert_eq!(
            table.resolve("/mobile-phones", &anon).unwrap(),
            render(Route::MobileList)
        );
        assert_eq!(table.resolve("/cart", &anon).unwrap(), render(Route::Cart));
    }

    #[test]
    fn test_mobile_details_captures_id() {
        let table = RouteTable::storefront();
        assert_eq!(
            table.resolve("/mobile/m7", &Visitor(false)).unwrap(),
            render(Route::MobileDetails {
                id: ProductId::new("m7")
            })
        );
    }

    #[test]
    fn test_unknown_path_is_not_found() {
        let table = RouteTable::storefront();
        assert_eq!(
            table.resolve("/mobile/m7/reviews", &Visitor(true)).unwrap(),
            render(Route::NotFound {
                path: "/mobile/m7/reviews".to_string()
            })
        );
    }

    #[test]
    fn test_login_picks_up_return_url() {
        let table = RouteTable::storefront();
        assert_eq!(
            table
                .resolve("/login?returnUrl=/cart", &Visitor(false))
                .unwrap(),
            render(Route::Login {
                return_url: Some(CART_PATH.to_string())
            })
        );
    }

    #[test]
    fn test_guarded_route_redirects_anonymous_visitor() {
        let table = RouteTable::storefront().guard(RouteKind::Cart);

        assert_eq!(
            table.resolve("/cart", &Visitor(false)).unwrap(),
            Resolution::Redirect {
                to: NavigationDirective::login_redirect("/cart")
            }
        );
        assert_eq!(table.resolve("/cart", &Visitor(true)).unwrap(), render(Route::Cart));
    }

    #[test]
    fn test_login_cannot_be_guarded() {
        let table = RouteTable::storefront().guard(RouteKind::Login);
        assert!(!table.is_guarded(RouteKind::Login));
    }

    #[test]
    fn test_relative_path_is_rejected() {
        let table = RouteTable::storefront();
        assert!(matches!(
            table.resolve("cart", &Visitor(false)),
            Err(RouteError::InvalidPath(_))
        ));
    }

    #[test]
    fn test_resolution_serializes() {
        let json = serde_json::to_value(render(Route::Cart)).unwrap();
        assert_eq!(json["kind"], "render");
        assert_eq!(json["route"]["page"], "cart");
    }
}
