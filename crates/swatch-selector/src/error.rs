//! Error types

use swatch_dom::DomError;

/// Construction and configuration errors. Selection itself never fails:
/// unknown ids are no-ops and step failures land in the `SyncReport`.
#[derive(Debug, thiserror::Error)]
pub enum SelectorError {
    #[error("No variant data found for section {section}")]
    MissingCatalog { section: String },

    #[error("Malformed variant data: {0}")]
    MalformedCatalog(#[from] serde_json::Error),

    #[error("Duplicate variant id {0} in catalog")]
    DuplicateVariant(crate::VariantId),

    #[error("Container is missing the {0} attribute")]
    MissingAttribute(&'static str),

    #[error("Invalid selector configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to load page: {0}")]
    Page(#[from] swatch_html::ParseError),
}

/// Failure applying a single patch or location update
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error(transparent)]
    Dom(#[from] DomError),

    #[error("Control has no option with value {0}")]
    UnknownOption(String),

    #[error("Location rejected: {0}")]
    Location(String),
}
