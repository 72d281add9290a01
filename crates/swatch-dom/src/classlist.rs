//! DOMTokenList (classList)
//!
//! Implements classList for CSS class manipulation.

/// DOMTokenList for managing space-separated tokens (e.g., classList)
///
/// The serialized form is kept alongside the tokens so the `class`
/// attribute can be read back without allocating.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DOMTokenList {
    tokens: Vec<String>,
    serialized: String,
}

impl DOMTokenList {
    /// Create empty token list
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from space-separated string, dropping duplicates
    pub fn from_string(s: &str) -> Self {
        let mut list = Self::new();
        for token in s.split_whitespace() {
            if !list.contains(token) {
                list.tokens.push(token.to_string());
            }
        }
        list.reserialize();
        list
    }

    fn reserialize(&mut self) {
        self.serialized = self.tokens.join(" ");
    }

    /// Get number of tokens
    pub fn length(&self) -> usize {
        self.tokens.len()
    }

    /// Get token at index
    pub fn item(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(|s| s.as_str())
    }

    /// Check if token exists
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// Add token(s)
    pub fn add(&mut self, tokens: &[&str]) {
        for token in tokens {
            if !token.is_empty() && !self.contains(token) {
                self.tokens.push(token.to_string());
            }
        }
        self.reserialize();
    }

    /// Remove token(s)
    pub fn remove(&mut self, tokens: &[&str]) {
        self.tokens.retain(|t| !tokens.contains(&t.as_str()));
        self.reserialize();
    }

    /// Toggle token, returns new state
    pub fn toggle(&mut self, token: &str, force: Option<bool>) -> bool {
        let on = force.unwrap_or(!self.contains(token));
        if on {
            self.add(&[token]);
        } else {
            self.remove(&[token]);
        }
        on
    }

    /// Get value as string
    pub fn value(&self) -> String {
        self.serialized.clone()
    }

    /// Borrow the serialized value
    pub fn as_str(&self) -> &str {
        &self.serialized
    }

    /// Set from string
    pub fn set_value(&mut self, value: &str) {
        *self = Self::from_string(value);
    }

    /// Iterate over tokens
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(|s| s.as_str())
    }
}

impl std::fmt::Display for DOMTokenList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.serialized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_string() {
        let list = DOMTokenList::from_string("swatch-figure swatch-figure selected");
        assert_eq!(list.length(), 2);
        assert!(list.contains("swatch-figure"));
        assert_eq!(list.as_str(), "swatch-figure selected");
    }

    #[test]
    fn test_add_remove() {
        let mut list = DOMTokenList::new();
        list.add(&["price", "price--on-sale"]);
        assert_eq!(list.length(), 2);

        list.remove(&["price--on-sale"]);
        assert_eq!(list.length(), 1);
        assert!(!list.contains("price--on-sale"));
        assert_eq!(list.to_string(), "price");
    }

    #[test]
    fn test_toggle_forced_is_idempotent() {
        let mut list = DOMTokenList::new();

        assert!(list.toggle("selected", Some(true)));
        assert!(list.toggle("selected", Some(true)));
        assert_eq!(list.length(), 1);

        assert!(!list.toggle("selected", Some(false)));
        assert!(!list.toggle("selected", Some(false)));
        assert_eq!(list.length(), 0);
    }

    #[test]
    fn test_toggle_unforced() {
        let mut list = DOMTokenList::new();
        assert!(list.toggle("active", None));
        assert!(!list.toggle("active", None));
        assert!(!list.contains("active"));
    }
}
