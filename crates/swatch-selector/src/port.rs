//! Page port
//!
//! The seam between the selection state machine and whatever renders the
//! page. The core only reads binding snapshots and hands back patches.

use std::fmt;

use crate::{Bindings, Patch, PortError};

/// Identifies one widget instance on the page.
/// Each container maps to exactly one (section, product) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContainerScope {
    pub section_id: String,
    pub product_id: Option<String>,
}

impl ContainerScope {
    pub fn new(section_id: impl Into<String>) -> Self {
        Self { section_id: section_id.into(), product_id: None }
    }

    pub fn with_product(mut self, product_id: impl Into<String>) -> Self {
        self.product_id = Some(product_id.into());
        self
    }

    /// `variant-data-{section}`
    pub fn catalog_element_id(&self) -> String {
        format!("variant-data-{}", self.section_id)
    }

    /// `variant-select-{section}`
    pub fn select_element_id(&self) -> String {
        format!("variant-select-{}", self.section_id)
    }

    /// `product-form-{section}`
    pub fn form_element_id(&self) -> String {
        format!("product-form-{}", self.section_id)
    }

    /// `MainProduct-{section}`
    pub fn product_info_element_id(&self) -> String {
        format!("MainProduct-{}", self.section_id)
    }
}

impl fmt::Display for ContainerScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.product_id {
            Some(product) => write!(f, "{}/{}", self.section_id, product),
            None => f.write_str(&self.section_id),
        }
    }
}

/// Rendering substrate the selector drives
pub trait PagePort {
    /// Opaque element handle
    type Handle: Copy + Eq + fmt::Debug;

    /// Resolve the elements currently bound to `scope`
    fn bindings(&self, scope: &ContainerScope) -> Bindings<Self::Handle>;

    /// Apply one patch
    fn apply(&mut self, patch: &Patch<Self::Handle>) -> Result<(), PortError>;

    /// Current address
    fn location(&self) -> String;

    /// Replace the current address without a new history entry or navigation
    fn replace_location(&mut self, url: &str) -> Result<(), PortError>;
}
