//! Page-ready discovery
//!
//! Finds every widget container on the page and builds one
//! [`VariantSelector`] per container. A container that cannot be built is
//! reported and skipped; the rest of the page is unaffected.

use std::sync::Arc;

use swatch_dom::{Document, NodeId};

use crate::{ContainerScope, SelectorConfig, SelectorError, VariantSelector};

/// What the page says about one container, before any validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerDescriptor {
    pub node: NodeId,
    /// `data-section-id`
    pub section_id: Option<String>,
    /// `data-product-id`
    pub product_id: Option<String>,
    /// Text of `#variant-data-{section}`
    pub catalog_json: Option<String>,
}

impl ContainerDescriptor {
    fn scope(&self) -> Result<ContainerScope, SelectorError> {
        let section = self.section_id.as_deref()
            .filter(|s| !s.is_empty())
            .ok_or(SelectorError::MissingAttribute("data-section-id"))?;
        let scope = ContainerScope::new(section);
        Ok(match &self.product_id {
            Some(product) => scope.with_product(product.clone()),
            None => scope,
        })
    }

    /// Build the selector for this container
    pub fn build(&self, config: Arc<SelectorConfig>) -> Result<VariantSelector, SelectorError> {
        let scope = self.scope()?;
        let json = self.catalog_json.as_deref()
            .ok_or_else(|| SelectorError::MissingCatalog { section: scope.section_id.clone() })?;
        VariantSelector::from_json(scope, json, config)
    }
}

/// A container that could not be brought up
#[derive(Debug)]
pub struct BootstrapFailure {
    pub node: NodeId,
    pub section_id: Option<String>,
    pub error: SelectorError,
}

/// Result of bringing up every container on a page
#[derive(Debug, Default)]
pub struct Bootstrap {
    pub instances: Vec<VariantSelector>,
    pub failures: Vec<BootstrapFailure>,
}

/// Read every `.{container_class}` element in document order
pub fn discover_containers(
    document: &Document,
    config: &SelectorConfig,
) -> Vec<ContainerDescriptor> {
    let tree = &document.tree;
    tree.get_elements_by_class_name(tree.root(), &config.container_class)
        .into_iter()
        .map(|node| {
            let section_id = tree.data(node, "sectionId").map(str::to_string);
            let catalog_json = section_id.as_deref()
                .map(|s| ContainerScope::new(s).catalog_element_id())
                .and_then(|id| document.get_element_by_id(&id))
                .map(|el| tree.text_content(el));
            ContainerDescriptor {
                node,
                section_id,
                product_id: tree.data(node, "productId").map(str::to_string),
                catalog_json,
            }
        })
        .collect()
}

/// Construct one selector per descriptor
pub fn bootstrap(descriptors: Vec<ContainerDescriptor>, config: Arc<SelectorConfig>) -> Bootstrap {
    let mut result = Bootstrap::default();

    for descriptor in descriptors {
        match descriptor.build(config.clone()) {
            Ok(selector) => {
                tracing::debug!("[{}] {} variants", selector.scope(), selector.catalog().len());
                result.instances.push(selector);
            }
            Err(error) => {
                tracing::error!("Swatch container {} ({:?}) failed to initialize: {}",
                    descriptor.node, descriptor.section_id, error);
                result.failures.push(BootstrapFailure {
                    node: descriptor.node,
                    section_id: descriptor.section_id,
                    error,
                });
            }
        }
    }

    tracing::info!(
        "Initialized {} swatch selectors ({} failed)",
        result.instances.len(),
        result.failures.len()
    );
    result
}
