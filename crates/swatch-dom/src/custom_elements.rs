//! Custom Elements
//!
//! Registry of custom element definitions and the script methods an
//! upgraded element exposes. Method invocations are recorded rather than
//! executed, so the host can observe them.

use std::collections::HashMap;

use crate::{DomError, NodeId};

/// Custom element definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomElementDefinition {
    pub name: String,
    pub observed_attributes: Vec<String>,
    /// Script methods available on upgraded instances
    pub methods: Vec<String>,
}

/// Custom element options
#[derive(Debug, Clone, Default)]
pub struct CustomElementOptions {
    pub observed_attributes: Vec<String>,
    pub methods: Vec<String>,
}

/// A recorded method call on an upgraded element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodCall {
    pub target: NodeId,
    pub method: String,
    pub argument: String,
}

/// Custom elements registry
#[derive(Debug, Default)]
pub struct CustomElementRegistry {
    definitions: HashMap<String, CustomElementDefinition>,
}

impl CustomElementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a custom element
    pub fn define(&mut self, name: &str, options: CustomElementOptions) -> Result<(), DomError> {
        if !Self::is_valid_name(name) {
            return Err(DomError::InvalidElementName(name.to_string()));
        }
        if self.definitions.contains_key(name) {
            return Err(DomError::AlreadyDefined(name.to_string()));
        }

        tracing::debug!("Defined custom element <{}>", name);
        self.definitions.insert(name.to_string(), CustomElementDefinition {
            name: name.to_string(),
            observed_attributes: options.observed_attributes,
            methods: options.methods,
        });
        Ok(())
    }

    /// Get element definition
    pub fn get(&self, name: &str) -> Option<&CustomElementDefinition> {
        self.definitions.get(name)
    }

    /// Check if element is defined
    pub fn is_defined(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    /// Does an element with this tag expose `method`?
    pub fn has_method(&self, tag: &str, method: &str) -> bool {
        self.get(tag).is_some_and(|d| d.methods.iter().any(|m| m == method))
    }

    /// Validate custom element name
    pub fn is_valid_name(name: &str) -> bool {
        // Must contain hyphen
        if !name.contains('-') {
            return false;
        }

        // Must start with lowercase letter
        if !name.chars().next().is_some_and(|c| c.is_ascii_lowercase()) {
            return false;
        }

        if name.chars().any(|c| c.is_ascii_uppercase()) {
            return false;
        }

        let reserved = ["annotation-xml", "color-profile", "font-face",
                        "font-face-src", "font-face-uri", "font-face-format",
                        "font-face-name", "missing-glyph"];
        !reserved.contains(&name)
    }
}
