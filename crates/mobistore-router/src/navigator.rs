//! Navigation sinks.

use mobistore_commerce::navigation::NavigationDirective;
use tracing::debug;

/// Receives navigation directives.
pub trait Navigator {
    /// Move to the directive's target.
    fn navigate(&mut self, directive: &NavigationDirective);

    /// The URL currently shown, if any.
    fn current(&self) -> Option<&str>;
}

/// In-memory history stack with push semantics.
#[derive(Debug, Clone, Default)]
pub struct HistoryNavigator {
    entries: Vec<String>,
}

impl HistoryNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `url` already on the stack.
    pub fn starting_at(url: impl Into<String>) -> Self {
        Self {
            entries: vec![url.into()],
        }
    }

    /// Pop the current entry and return the one underneath.
    pub fn back(&mut self) -> Option<&str> {
        if self.entries.len() > 1 {
            self.entries.pop();
        }
        self.current()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Navigator for HistoryNavigator {
    fn navigate(&mut self, directive: &NavigationDirective) {
        let url = directive.to_url();
        debug!(url = %url, "navigate");
        self.entries.push(url);
    }

    fn current(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }
}
