//! Query-string handling.

use mobistore_commerce::navigation::RETURN_URL_PARAM;

/// Split a URL into its path and query string (without the `?`).
pub fn split_url(url: &str) -> (&str, Option<&str>) {
    let url = url.split('#').next().unwrap_or(url);
    match url.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (url, None),
    }
}

/// Parsed `key=value` pairs of a query string, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Parse a raw query string. Keys without `=` get an empty value.
    ///
    /// Values are taken as-is; the storefront only puts plain paths in them.
    pub fn parse(query: &str) -> Self {
        let pairs = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| match pair.split_once('=') {
                Some((k, v)) => (k.to_string(), v.to_string()),
                None => (pair.to_string(), String::new()),
            })
            .collect();
        Self { pairs }
    }

    /// First value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The post-login destination, if it is a local path.
    ///
    /// Anything not starting with a single `/` is ignored so a login link
    /// cannot send the user off-site.
    pub fn return_url(&self) -> Option<&str> {
        self.get(RETURN_URL_PARAM)
            .filter(|url| url.starts_with('/') && !url.starts_with("//"))
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
