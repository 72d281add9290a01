//! Swatch DOM - Document Object Model
//!
//! Arena-backed document tree with the small slice of browser behavior a
//! storefront widget touches: class lists, `data-*` datasets, selector
//! queries, `<select>` values, inline display style, custom element methods,
//! window location/history and a pending event queue.

mod classlist;
mod custom_elements;
mod dataset;
mod document;
mod events;
mod forms;
mod node;
mod query;
mod style;
mod tree;
mod window;

pub use classlist::DOMTokenList;
pub use custom_elements::{
    CustomElementDefinition, CustomElementOptions, CustomElementRegistry, MethodCall,
};
pub use document::Document;
pub use events::{DomEvent, DomEventType, EventDispatcher};
pub use node::{Attribute, ElementData, Node, NodeData};
pub use query::{Selector, SelectorPart};
pub use style::InlineStyle;
pub use tree::{Children, DomTree};
pub use window::{History, HistoryEntry};

use std::fmt;

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root (document) node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check that this is not the sentinel
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Raw arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// DOM errors
#[derive(Debug, thiserror::Error)]
pub enum DomError {
    #[error("Unknown node {0}")]
    UnknownNode(NodeId),

    #[error("Node {0} is not an element")]
    NotAnElement(NodeId),

    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid custom element name: {0}")]
    InvalidElementName(String),

    #[error("Custom element already defined: {0}")]
    AlreadyDefined(String),

    #[error("Element {node} does not expose {method}()")]
    MissingMethod { node: NodeId, method: String },
}
