//! Document - High-level document API

use std::collections::VecDeque;

use url::Url;

use crate::{
    CustomElementOptions, CustomElementRegistry, DomError, DomEvent, DomTree, EventDispatcher,
    History, MethodCall, NodeId,
};

/// HTML Document together with its window-level state
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    history: History,
    custom_elements: CustomElementRegistry,
    /// Events dispatched but not yet delivered
    pending: VecDeque<DomEvent>,
    method_calls: Vec<MethodCall>,
}

impl Document {
    /// Create an empty document at `url`
    pub fn new(url: &str) -> Result<Self, DomError> {
        Ok(Self {
            tree: DomTree::new(),
            history: History::new(Url::parse(url)?),
            custom_elements: CustomElementRegistry::new(),
            pending: VecDeque::new(),
            method_calls: Vec::new(),
        })
    }

    /// `window.location`
    pub fn location(&self) -> &Url {
        &self.history.current().url
    }

    /// `window.history`
    pub fn history(&self) -> &History {
        &self.history
    }

    fn resolve(&self, url: &str) -> Result<Url, DomError> {
        Ok(self.location().join(url)?)
    }

    /// history.pushState
    pub fn push_state(&mut self, state: Option<String>, url: &str) -> Result<(), DomError> {
        let url = self.resolve(url)?;
        self.history.push_state(state, String::new(), url);
        Ok(())
    }

    /// history.replaceState: rewrites the current entry, never navigates
    pub fn replace_state(&mut self, state: Option<String>, url: &str) -> Result<(), DomError> {
        let url = self.resolve(url)?;
        tracing::debug!("history.replaceState({})", url);
        self.history.replace_state(state, String::new(), url);
        Ok(())
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    /// Get element by ID
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree.descendants(self.tree.root())
            .into_iter()
            .find(|&n| self.tree.element(n).is_ok_and(|e| e.id() == Some(id)))
    }

    /// document.querySelector
    pub fn query_selector(&self, selector: &str) -> Result<Option<NodeId>, DomError> {
        self.tree.query_selector(self.tree.root(), selector)
    }

    /// document.querySelectorAll
    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>, DomError> {
        self.tree.query_selector_all(self.tree.root(), selector)
    }

    /// customElements.define
    pub fn define_element(
        &mut self,
        name: &str,
        options: CustomElementOptions,
    ) -> Result<(), DomError> {
        self.custom_elements.define(name, options)
    }

    pub fn custom_elements(&self) -> &CustomElementRegistry {
        &self.custom_elements
    }

    /// Does the (upgraded) element at `node` expose `method`?
    pub fn exposes_method(&self, node: NodeId, method: &str) -> bool {
        self.tree.tag_name(node)
            .is_some_and(|tag| self.custom_elements.has_method(tag, method))
    }

    /// Call a custom element method with one argument
    pub fn invoke_method(
        &mut self,
        node: NodeId,
        method: &str,
        argument: &str,
    ) -> Result<(), DomError> {
        if !self.exposes_method(node, method) {
            return Err(DomError::MissingMethod { node, method: method.to_string() });
        }
        tracing::debug!("{}.{}({})", node, method, argument);
        self.method_calls.push(MethodCall {
            target: node,
            method: method.to_string(),
            argument: argument.to_string(),
        });
        Ok(())
    }

    /// Method calls made since the last drain, oldest first
    pub fn method_calls(&self) -> &[MethodCall] {
        &self.method_calls
    }

    /// Hand over the recorded method calls and clear the log
    pub fn take_method_calls(&mut self) -> Vec<MethodCall> {
        std::mem::take(&mut self.method_calls)
    }

    /// Next event waiting for delivery
    pub fn take_pending_event(&mut self) -> Option<DomEvent> {
        self.pending.pop_front()
    }

    pub fn pending_event_count(&self) -> usize {
        self.pending.len()
    }
}

impl EventDispatcher for Document {
    fn dispatch_event(&mut self, event: DomEvent) -> bool {
        if self.tree.get(event.target).is_none() {
            return false;
        }
        self.pending.push_back(event);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_state_merges_relative() {
        let mut doc = Document::new("https://shop.test/products/wig?ref=home").unwrap();
        doc.replace_state(None, "?ref=home&variant=7").unwrap();

        assert_eq!(doc.location().as_str(), "https://shop.test/products/wig?ref=home&variant=7");
        assert_eq!(doc.history().length(), 1);
    }

    #[test]
    fn test_push_state_grows_history() {
        let mut doc = Document::new("https://shop.test/").unwrap();
        doc.push_state(None, "/cart").unwrap();
        assert_eq!(doc.history().length(), 2);
        assert_eq!(doc.location().path(), "/cart");
    }

    #[test]
    fn test_get_element_by_id() {
        let mut doc = Document::new("https://shop.test/").unwrap();
        let div = doc.tree.create_element("div");
        doc.tree.set_attribute(div, "id", "MainProduct-main").unwrap();
        doc.tree.append_child(NodeId::ROOT, div);

        assert_eq!(doc.get_element_by_id("MainProduct-main"), Some(div));
        assert_eq!(doc.get_element_by_id("missing"), None);
    }

    #[test]
    fn test_invoke_requires_definition() {
        let mut doc = Document::new("https://shop.test/").unwrap();
        let panel = doc.tree.create_element("product-info");
        doc.tree.append_child(NodeId::ROOT, panel);

        assert!(doc.invoke_method(panel, "setActiveVariant", "1").is_err());

        doc.define_element("product-info", CustomElementOptions {
            methods: vec!["setActiveVariant".into()],
            ..Default::default()
        }).unwrap();
        doc.invoke_method(panel, "setActiveVariant", "1").unwrap();
        assert_eq!(doc.method_calls().len(), 1);
        assert_eq!(doc.method_calls()[0].argument, "1");
    }

    #[test]
    fn test_event_queue_fifo() {
        let mut doc = Document::new("https://shop.test/").unwrap();
        let a = doc.tree.create_element("a");
        assert!(doc.dispatch_event(DomEvent::click(a)));
        assert!(doc.dispatch_event(DomEvent::content_loaded()));
        assert!(!doc.dispatch_event(DomEvent::click(NodeId(999))));

        assert_eq!(doc.pending_event_count(), 2);
        assert_eq!(doc.take_pending_event(), Some(DomEvent::click(a)));
        assert_eq!(doc.take_pending_event(), Some(DomEvent::content_loaded()));
        assert_eq!(doc.take_pending_event(), None);
    }
}
