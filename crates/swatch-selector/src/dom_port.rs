//! `PagePort` over a `swatch-dom` document

use swatch_dom::{Document, DomEvent, EventDispatcher, NodeId};

use crate::{
    AddToCartBinding, Bindings, ContainerScope, PagePort, Patch, PortError, ProductInfoBinding,
    SelectorConfig, SwatchBinding,
};

/// Native price capability exposed by upgraded product-info panels
pub const SET_ACTIVE_VARIANT: &str = "setActiveVariant";

/// Drives a [`Document`] for the duration of one trigger
pub struct DomPort<'a> {
    document: &'a mut Document,
    config: &'a SelectorConfig,
}

impl<'a> DomPort<'a> {
    pub fn new(document: &'a mut Document, config: &'a SelectorConfig) -> Self {
        Self { document, config }
    }

    /// The container element bound to `scope`
    pub fn container(&self, scope: &ContainerScope) -> Option<NodeId> {
        find_container(self.document, self.config, scope)
    }

    fn first_in(&self, scope: NodeId, selector: &str) -> Option<NodeId> {
        match self.document.tree.query_selector(scope, selector) {
            Ok(found) => found,
            Err(err) => {
                tracing::warn!("Bad selector {:?}: {}", selector, err);
                None
            }
        }
    }

    fn swatches(&self, container: NodeId) -> Vec<SwatchBinding<NodeId>> {
        let tree = &self.document.tree;
        tree.get_elements_by_class_name(container, &self.config.swatch_class)
            .into_iter()
            .map(|handle| SwatchBinding {
                handle,
                variant_id: tree.data(handle, "variantId").and_then(crate::VariantId::parse),
            })
            .collect()
    }

    /// Price and compare-at elements inside the panel
    fn price_targets(&self, panel: NodeId) -> (Option<NodeId>, Option<NodeId>) {
        let price_selector = SelectorConfig::class_selector(&self.config.price_class);
        let block_selector = SelectorConfig::class_selector(&self.config.price_block_class);
        let compare_selector = SelectorConfig::class_selector(&self.config.compare_price_class);
        match self.first_in(panel, &block_selector) {
            Some(block) => (
                self.first_in(block, &price_selector),
                self.first_in(block, &compare_selector),
            ),
            None => (self.first_in(panel, &price_selector), None),
        }
    }

    fn main_image(&self) -> Option<NodeId> {
        let root = self.document.tree.root();
        self.config.media_selectors.iter()
            .find_map(|selector| self.first_in(root, selector))
            .and_then(|media| self.first_in(media, "img"))
    }

    fn add_to_cart(&self, scope: &ContainerScope) -> Option<AddToCartBinding<NodeId>> {
        let form_id = scope.form_element_id();
        let handle = self.document.get_element_by_id(&form_id)
            .and_then(|form| self.first_in(form, &self.config.add_to_cart_selector))
            .or_else(|| {
                let fallback = format!("#{} {}", form_id, self.config.add_to_cart_selector);
                self.first_in(self.document.tree.root(), &fallback)
            })?;

        let tree = &self.document.tree;
        Some(AddToCartBinding {
            handle,
            add_to_cart_text: tree.data(handle, "addToCartText").map(str::to_string),
            sold_out_text: tree.data(handle, "soldOutText").map(str::to_string),
        })
    }
}

/// The `.{container_class}` element for `scope`, matched on
/// `data-section-id` (and `data-product-id` when the scope has one)
pub(crate) fn find_container(
    document: &Document,
    config: &SelectorConfig,
    scope: &ContainerScope,
) -> Option<NodeId> {
    let tree = &document.tree;
    tree.get_elements_by_class_name(tree.root(), &config.container_class)
        .into_iter()
        .find(|&node| {
            let product = scope.product_id.as_deref();
            tree.data(node, "sectionId") == Some(scope.section_id.as_str())
                && product.is_none_or(|p| tree.data(node, "productId") == Some(p))
        })
}

impl PagePort for DomPort<'_> {
    type Handle = NodeId;

    fn bindings(&self, scope: &ContainerScope) -> Bindings<NodeId> {
        let mut bindings = Bindings::default();

        match self.container(scope) {
            Some(container) => bindings.swatches = self.swatches(container),
            None => tracing::debug!("[{}] container not found", scope),
        }

        bindings.select = self.document.get_element_by_id(&scope.select_element_id());

        if let Some(panel) = self.document.get_element_by_id(&scope.product_info_element_id()) {
            bindings.product_info = Some(ProductInfoBinding {
                handle: panel,
                native_price_update: self.document.exposes_method(panel, SET_ACTIVE_VARIANT),
            });
            let (price, compare) = self.price_targets(panel);
            tracing::debug!("[{}] price element: {:?}", scope, price);
            bindings.price = price;
            bindings.compare_price = compare;
        }

        bindings.main_image = self.main_image();
        bindings.add_to_cart = self.add_to_cart(scope);
        bindings
    }

    fn apply(&mut self, patch: &Patch<NodeId>) -> Result<(), PortError> {
        let tree = &mut self.document.tree;
        match patch {
            Patch::ToggleClass { target, class, on } => {
                tree.class_list_mut(*target)?.toggle(class, Some(*on));
            }
            Patch::SetText { target, text } => {
                tracing::debug!("{} text -> {:?}", target, text);
                tree.set_text_content(*target, text)?;
            }
            Patch::SetAttribute { target, name, value } => {
                if name == "alt" {
                    tracing::debug!("{} alt -> {:?}", target, value);
                }
                tree.set_attribute(*target, name, value)?;
            }
            Patch::SetVisible { target, visible } => {
                tree.set_style_property(*target, "display", if *visible { "" } else { "none" })?;
            }
            Patch::SetDisabled { target, disabled } => {
                tree.set_disabled(*target, *disabled)?;
            }
            Patch::SetValue { target, value } => {
                if tree.tag_name(*target) == Some("select") {
                    if !tree.set_select_value(*target, value)? {
                        return Err(PortError::UnknownOption(value.clone()));
                    }
                } else {
                    tree.set_attribute(*target, "value", value)?;
                }
            }
            Patch::SetActiveVariant { target, id } => {
                self.document.invoke_method(*target, SET_ACTIVE_VARIANT, &id.to_string())?;
            }
            Patch::DispatchChange { target } => {
                if !self.document.dispatch_event(DomEvent::synthetic_change(*target)) {
                    return Err(swatch_dom::DomError::UnknownNode(*target).into());
                }
            }
        }
        Ok(())
    }

    fn location(&self) -> String {
        self.document.location().as_str().to_string()
    }

    fn replace_location(&mut self, url: &str) -> Result<(), PortError> {
        self.document.replace_state(None, url)
            .map_err(|e| PortError::Location(e.to_string()))
    }
}
