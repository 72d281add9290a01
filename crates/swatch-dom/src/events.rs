//! DOM Events
//!
//! The three events a storefront widget reacts to, plus the dispatcher seam.

use crate::NodeId;

/// DOM event types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomEventType {
    /// Pointer activation
    Click,
    /// Form control value committed
    Change,
    /// Page ready
    DOMContentLoaded,
}

/// DOM event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomEvent {
    pub event_type: DomEventType,
    pub target: NodeId,
    pub bubbles: bool,
    /// Dispatched by script rather than by the user
    pub synthetic: bool,
}

impl DomEvent {
    /// User click on `target`
    pub fn click(target: NodeId) -> Self {
        Self {
            event_type: DomEventType::Click,
            target,
            bubbles: true,
            synthetic: false,
        }
    }

    /// User-committed change on a form control
    pub fn change(target: NodeId) -> Self {
        Self {
            event_type: DomEventType::Change,
            target,
            bubbles: true,
            synthetic: false,
        }
    }

    /// `new Event('change', { bubbles: true })` dispatched from script
    pub fn synthetic_change(target: NodeId) -> Self {
        Self {
            synthetic: true,
            ..Self::change(target)
        }
    }

    /// DOMContentLoaded, targeted at the document
    pub fn content_loaded() -> Self {
        Self {
            event_type: DomEventType::DOMContentLoaded,
            target: NodeId::ROOT,
            bubbles: true,
            synthetic: false,
        }
    }
}

/// Event dispatcher trait
pub trait EventDispatcher {
    /// Hand an event to the dispatcher; false if it was refused
    fn dispatch_event(&mut self, event: DomEvent) -> bool;
}
