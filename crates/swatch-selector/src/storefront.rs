//! Storefront host loop
//!
//! Owns a parsed page and its selector instances, and delivers events the
//! way a browser tab would: user events in FIFO order, with every event a
//! handler dispatches delivered before the next user event is looked at.

use std::collections::VecDeque;
use std::sync::Arc;

use swatch_dom::{Document, DomEvent, DomEventType, NodeId};
use swatch_html::HtmlParser;

use crate::bootstrap::{bootstrap, discover_containers, BootstrapFailure};
use crate::dom_port::find_container;
use crate::{ContainerScope, DomPort, SelectorConfig, SelectorError, SyncReport, VariantSelector};

/// A page plus the swatch widgets running on it
pub struct Storefront {
    document: Document,
    config: Arc<SelectorConfig>,
    instances: Vec<VariantSelector>,
    failures: Vec<BootstrapFailure>,
    queue: VecDeque<DomEvent>,
    ready: bool,
}

impl Storefront {
    pub fn new(document: Document, config: SelectorConfig) -> Self {
        Self {
            document,
            config: Arc::new(config),
            instances: Vec::new(),
            failures: Vec::new(),
            queue: VecDeque::new(),
            ready: false,
        }
    }

    /// Parse `html` as the page at `url`
    pub fn from_html(html: &str, url: &str, config: SelectorConfig) -> Result<Self, SelectorError> {
        config.validate()?;
        let document = HtmlParser::new().parse_with_url(html, url)?;
        Ok(Self::new(document, config))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    /// Has DOMContentLoaded been delivered?
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn instances(&self) -> &[VariantSelector] {
        &self.instances
    }

    /// Instance bound to `section_id`
    pub fn instance(&self, section_id: &str) -> Option<&VariantSelector> {
        self.instances.iter().find(|i| i.scope().section_id == section_id)
    }

    /// Containers that failed to initialize
    pub fn failures(&self) -> &[BootstrapFailure] {
        &self.failures
    }

    /// Queue DOMContentLoaded
    pub fn page_ready(&mut self) {
        self.queue.push_back(DomEvent::content_loaded());
    }

    /// Queue a user click on `target`
    pub fn click(&mut self, target: NodeId) {
        self.queue.push_back(DomEvent::click(target));
    }

    /// Queue a user-committed change on `target`
    pub fn change(&mut self, target: NodeId) {
        self.queue.push_back(DomEvent::change(target));
    }

    /// Deliver queued events until nothing is left; one report per
    /// selection that happened
    pub fn run_until_idle(&mut self) -> Vec<SyncReport> {
        let mut reports = Vec::new();
        loop {
            let event = match self.document.take_pending_event() {
                Some(event) => event,
                None => match self.queue.pop_front() {
                    Some(event) => event,
                    None => break,
                },
            };
            reports.extend(self.handle(event));
        }
        reports
    }

    fn handle(&mut self, event: DomEvent) -> Option<SyncReport> {
        match event.event_type {
            DomEventType::DOMContentLoaded => {
                self.on_ready();
                None
            }
            _ if !self.ready => {
                tracing::debug!(
                    "{:?} on {} before page ready, no listeners",
                    event.event_type,
                    event.target
                );
                None
            }
            DomEventType::Click => self.on_click(event.target),
            DomEventType::Change => self.on_change(event.target),
        }
    }

    fn on_ready(&mut self) {
        if self.ready {
            return;
        }
        self.ready = true;
        let descriptors = discover_containers(&self.document, &self.config);
        let boot = bootstrap(descriptors, self.config.clone());
        self.instances = boot.instances;
        self.failures = boot.failures;
    }

    /// Clicks land on a swatch or something inside one
    fn on_click(&mut self, target: NodeId) -> Option<SyncReport> {
        let tree = &self.document.tree;
        let swatch_selector = SelectorConfig::class_selector(&self.config.swatch_class);
        let container_selector = SelectorConfig::class_selector(&self.config.container_class);
        let swatch = tree.closest(target, &swatch_selector).ok()??;
        let container = tree.closest(swatch, &container_selector).ok()??;
        let raw = tree.data(swatch, "variantId").unwrap_or_default().to_string();

        let index = self.instances.iter().position(|i| {
            find_container(&self.document, &self.config, i.scope()) == Some(container)
        })?;

        let mut port = DomPort::new(&mut self.document, &self.config);
        self.instances[index].select_variant(&raw, &mut port)
    }

    fn on_change(&mut self, target: NodeId) -> Option<SyncReport> {
        let select_id = self.document.tree.element(target).ok()?.id()?;
        let index = self.instances.iter()
            .position(|i| i.scope().select_element_id() == select_id)?;
        let raw = self.document.tree.select_value(target);

        let mut port = DomPort::new(&mut self.document, &self.config);
        self.instances[index].handle_select_change(&raw, &mut port)
    }

    /// Scope a container element belongs to, if it is a bound container
    pub fn scope_of(&self, container: NodeId) -> Option<&ContainerScope> {
        self.instances.iter()
            .map(VariantSelector::scope)
            .find(|scope| find_container(&self.document, &self.config, scope) == Some(container))
    }
}
