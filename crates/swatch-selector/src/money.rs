//! Money formatting
//!
//! Minor units to `$12.34`. Integer arithmetic only: no locale, no
//! thousands separators.

/// Format minor units with the default `$` symbol
pub fn format_money(cents: u64) -> String {
    format_money_with("$", cents)
}

/// Format minor units with a leading currency symbol
pub fn format_money_with(symbol: &str, cents: u64) -> String {
    format!("{}{}.{:02}", symbol, cents / 100, cents % 100)
}
