//! `data-*` attribute naming
//!
//! Dataset keys are camelCase; the attributes behind them are kebab-case
//! with a `data-` prefix.

/// Attribute name for a camelCase dataset key
pub(crate) fn attribute_name(key: &str) -> String {
    let mut name = String::with_capacity(key.len() + 9);
    name.push_str("data-");

    for c in key.chars() {
        if c.is_ascii_uppercase() {
            name.push('-');
            name.push(c.to_ascii_lowercase());
        } else {
            name.push(c);
        }
    }

    name
}
