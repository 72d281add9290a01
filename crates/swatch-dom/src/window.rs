//! Session history
//!
//! history.pushState / replaceState. The current entry's URL is the window
//! location.

use url::Url;

/// History entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub url: Url,
    pub title: String,
    /// JSON-serialized state
    pub state: Option<String>,
}

/// Session history for one browsing context. There is no traversal, so
/// the newest entry is always the current one.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new(initial_url: Url) -> Self {
        Self {
            entries: vec![HistoryEntry {
                url: initial_url,
                title: String::new(),
                state: None,
            }],
        }
    }

    /// Push a new history entry
    pub fn push_state(&mut self, state: Option<String>, title: String, url: Url) {
        self.entries.push(HistoryEntry { url, title, state });
    }

    /// Replace current entry in place
    pub fn replace_state(&mut self, state: Option<String>, title: String, url: Url) {
        let last = self.entries.len() - 1;
        self.entries[last] = HistoryEntry { url, title, state };
    }

    /// Get current entry
    pub fn current(&self) -> &HistoryEntry {
        &self.entries[self.entries.len() - 1]
    }

    /// Get history length
    pub fn length(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_replace_keeps_length() {
        let mut history = History::new(url("https://shop.test/products/wig"));
        history.replace_state(None, String::new(), url("https://shop.test/products/wig?variant=1"));

        assert_eq!(history.length(), 1);
        assert_eq!(history.current().url.query(), Some("variant=1"));
    }

    #[test]
    fn test_push_appends() {
        let mut history = History::new(url("https://shop.test/a"));
        history.push_state(None, String::new(), url("https://shop.test/b"));
        history.push_state(None, String::new(), url("https://shop.test/c"));

        assert_eq!(history.length(), 3);
        assert_eq!(history.current().url.path(), "/c");
    }
}
