//! Swatch Selector
//!
//! Lets a shopper pick one of a product's variants through swatches or the
//! fallback `<select>`, and keeps the page in step with that choice: swatch
//! highlight, `?variant=` in the address bar, price, primary image and the
//! add-to-cart button.
//!
//! # Layout
//! - [`catalog`] / [`variant`]: the immutable variant list and its ids
//! - [`sync`]: pure per-step patch computation
//! - [`VariantSelector`]: the selection state machine
//! - [`PagePort`]: the seam to whatever renders the page; [`DomPort`] drives
//!   a `swatch-dom` document
//! - [`bootstrap`] / [`Storefront`]: page-ready discovery and event routing
//!
//! # Example
//! ```rust,ignore
//! use swatch_selector::{SelectorConfig, Storefront};
//!
//! let url = "https://shop.test/products/wig";
//! let mut store = Storefront::from_html(html, url, SelectorConfig::default())?;
//! store.page_ready();
//! store.run_until_idle();
//! ```

pub mod bootstrap;
pub mod catalog;
mod config;
mod dom_port;
mod error;
pub mod money;
pub mod patch;
mod port;
mod selector;
mod storefront;
pub mod sync;
pub mod variant;

pub use bootstrap::{
    bootstrap, discover_containers, Bootstrap, BootstrapFailure, ContainerDescriptor,
};
pub use catalog::Catalog;
pub use config::SelectorConfig;
pub use dom_port::DomPort;
pub use error::{PortError, SelectorError};
pub use money::format_money;
pub use patch::{AddToCartBinding, Bindings, Patch, ProductInfoBinding, SwatchBinding};
pub use port::{ContainerScope, PagePort};
pub use selector::{StepStatus, SyncReport, SyncStep, Trigger, VariantSelector};
pub use storefront::Storefront;
pub use variant::{FeaturedImage, VariantId, VariantRecord};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
