//! Page patches and binding snapshots
//!
//! Sync steps never touch the page directly. They read a [`Bindings`]
//! snapshot and return [`Patch`]es, which a [`PagePort`](crate::PagePort)
//! applies. `H` is the port's element handle.

use crate::VariantId;

/// One desired change to a bound element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<H> {
    /// Add (`on`) or remove a class
    ToggleClass { target: H, class: String, on: bool },
    /// Replace text content
    SetText { target: H, text: String },
    /// Set an attribute value
    SetAttribute { target: H, name: String, value: String },
    /// Clear (`visible`) or set `display: none`
    SetVisible { target: H, visible: bool },
    SetDisabled { target: H, disabled: bool },
    /// Set a form control's value
    SetValue { target: H, value: String },
    /// Hand the id to the panel's native price renderer
    SetActiveVariant { target: H, id: VariantId },
    /// Fire a bubbling synthetic `change` at the control
    DispatchChange { target: H },
}

impl<H: Copy> Patch<H> {
    /// Element the patch applies to
    pub fn target(&self) -> H {
        match self {
            Patch::ToggleClass { target, .. }
            | Patch::SetText { target, .. }
            | Patch::SetAttribute { target, .. }
            | Patch::SetVisible { target, .. }
            | Patch::SetDisabled { target, .. }
            | Patch::SetValue { target, .. }
            | Patch::SetActiveVariant { target, .. }
            | Patch::DispatchChange { target } => *target,
        }
    }
}

/// A swatch and the id it stands for (None if its attribute is unusable)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwatchBinding<H> {
    pub handle: H,
    pub variant_id: Option<VariantId>,
}

/// The product-info panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductInfoBinding<H> {
    pub handle: H,
    /// Panel exposes the platform's own `setActiveVariant`
    pub native_price_update: bool,
}

/// The add-to-cart control and its label overrides
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddToCartBinding<H> {
    pub handle: H,
    pub add_to_cart_text: Option<String>,
    pub sold_out_text: Option<String>,
}

/// Elements bound to one widget instance at one instant.
/// Anything the page lacks is `None` and its step is skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bindings<H> {
    pub swatches: Vec<SwatchBinding<H>>,
    pub select: Option<H>,
    pub product_info: Option<ProductInfoBinding<H>>,
    pub price: Option<H>,
    pub compare_price: Option<H>,
    pub main_image: Option<H>,
    pub add_to_cart: Option<AddToCartBinding<H>>,
}

impl<H> Default for Bindings<H> {
    fn default() -> Self {
        Self {
            swatches: Vec::new(),
            select: None,
            product_info: None,
            price: None,
            compare_price: None,
            main_image: None,
            add_to_cart: None,
        }
    }
}
