//! Swatch HTML Parser
//!
//! Storefront pages are parsed with html5ever and copied into a
//! `swatch-dom` arena, giving the selector a real page to bind against.

mod parser;

pub use parser::HtmlParser;

use swatch_dom::Document;

/// Parse an HTML string into a Document at `about:blank`
pub fn parse(html: &str) -> Result<Document, ParseError> {
    HtmlParser::new().parse(html)
}

/// Parse error
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Failed to read HTML input: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Dom(#[from] swatch_dom::DomError),
}
