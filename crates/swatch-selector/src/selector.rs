//! Variant selection state machine

use std::fmt;
use std::sync::Arc;

use crate::sync;
use crate::{
    Catalog, ContainerScope, PagePort, Patch, SelectorConfig, SelectorError, VariantId,
    VariantRecord,
};

/// What started a selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Swatch activation (or a programmatic select)
    Swatch,
    /// `change` on the fallback `<select>`, user or synthetic
    SelectChange,
}

/// One synchronization step, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStep {
    Highlight,
    SelectValue,
    Location,
    NativePrice,
    Price,
    Image,
    PurchaseControl,
    ChangeNotification,
}

impl fmt::Display for SyncStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SyncStep::Highlight => "highlight",
            SyncStep::SelectValue => "select value",
            SyncStep::Location => "location",
            SyncStep::NativePrice => "native price",
            SyncStep::Price => "price",
            SyncStep::Image => "image",
            SyncStep::PurchaseControl => "purchase control",
            SyncStep::ChangeNotification => "change notification",
        };
        f.write_str(name)
    }
}

/// Outcome of one step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    /// All patches applied (count)
    Applied(usize),
    /// Nothing to do: target missing or variant lacks the data
    Skipped,
    /// A patch failed; later steps still ran
    Failed(String),
}

/// What a selection did to the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub variant_id: VariantId,
    pub trigger: Trigger,
    pub steps: Vec<(SyncStep, StepStatus)>,
}

impl SyncReport {
    fn new(variant_id: VariantId, trigger: Trigger) -> Self {
        Self { variant_id, trigger, steps: Vec::with_capacity(8) }
    }

    fn record(&mut self, step: SyncStep, status: StepStatus) {
        self.steps.push((step, status));
    }

    fn run<P: PagePort>(&mut self, port: &mut P, step: SyncStep, patches: Vec<Patch<P::Handle>>) {
        self.record(step, apply_step(port, step, patches));
    }

    /// Status of a step, if it ran for this trigger
    pub fn status(&self, step: SyncStep) -> Option<&StepStatus> {
        self.steps.iter().find(|(s, _)| *s == step).map(|(_, status)| status)
    }

    /// Steps that failed, with their error text
    pub fn failures(&self) -> impl Iterator<Item = (SyncStep, &str)> {
        self.steps.iter().filter_map(|(step, status)| match status {
            StepStatus::Failed(err) => Some((*step, err.as_str())),
            _ => None,
        })
    }

    pub fn is_clean(&self) -> bool {
        self.failures().next().is_none()
    }
}

/// One swatch widget bound to one page section.
///
/// Only the last selected id is stored; the selected record is always
/// looked up from the catalog.
#[derive(Debug, Clone)]
pub struct VariantSelector {
    scope: ContainerScope,
    catalog: Catalog,
    config: Arc<SelectorConfig>,
    selected: Option<VariantId>,
}

impl VariantSelector {
    pub fn new(scope: ContainerScope, catalog: Catalog, config: Arc<SelectorConfig>) -> Self {
        Self { scope, catalog, config, selected: None }
    }

    /// Build from the section's embedded catalog JSON
    pub fn from_json(
        scope: ContainerScope,
        json: &str,
        config: Arc<SelectorConfig>,
    ) -> Result<Self, SelectorError> {
        Ok(Self::new(scope, Catalog::from_json(json)?, config))
    }

    pub fn scope(&self) -> &ContainerScope {
        &self.scope
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    pub fn selected_id(&self) -> Option<VariantId> {
        self.selected
    }

    /// The selected record; None before the first selection
    pub fn selected_variant(&self) -> Option<&VariantRecord> {
        self.catalog.find(self.selected?)
    }

    /// Swatch activation. Unknown ids are ignored and return None.
    /// Unavailable variants are selectable; the purchase control shows it.
    pub fn select_variant<P: PagePort>(
        &mut self,
        raw_id: &str,
        port: &mut P,
    ) -> Option<SyncReport> {
        self.trigger(raw_id, Trigger::Swatch, port)
    }

    /// `change` on the fallback select. Does not write the select back or
    /// re-dispatch, since the select is the source.
    pub fn handle_select_change<P: PagePort>(
        &mut self,
        raw_id: &str,
        port: &mut P,
    ) -> Option<SyncReport> {
        self.trigger(raw_id, Trigger::SelectChange, port)
    }

    fn trigger<P: PagePort>(
        &mut self,
        raw_id: &str,
        trigger: Trigger,
        port: &mut P,
    ) -> Option<SyncReport> {
        let Some(variant) = self.catalog.find_raw(raw_id) else {
            tracing::debug!("[{}] ignoring unknown variant {:?}", self.scope, raw_id);
            return None;
        };
        let report = self.synchronize(variant, trigger, port);
        self.selected = Some(report.variant_id);
        Some(report)
    }

    fn synchronize<P: PagePort>(
        &self,
        variant: &VariantRecord,
        trigger: Trigger,
        port: &mut P,
    ) -> SyncReport {
        let config = &*self.config;
        let id = variant.id;
        let bindings = port.bindings(&self.scope);
        let mut report = SyncReport::new(id, trigger);

        report.run(port, SyncStep::Highlight, sync::highlight(&bindings, id, config));
        if trigger == Trigger::Swatch {
            report.run(port, SyncStep::SelectValue, sync::select_value(&bindings, id));
        }
        report.record(SyncStep::Location, self.sync_location(id, port));

        tracing::debug!("[{}] Updating product info for variant {}", self.scope, id);
        report.run(port, SyncStep::NativePrice, sync::native_price(&bindings, variant));
        report.run(port, SyncStep::Price, sync::price(&bindings, variant, config));
        report.run(port, SyncStep::Image, sync::image(&bindings, variant, config));
        report.run(port, SyncStep::PurchaseControl, sync::purchase(&bindings, variant, config));

        if trigger == Trigger::Swatch {
            report.run(port, SyncStep::ChangeNotification, sync::change_notification(&bindings));
        }
        report
    }

    fn sync_location<P: PagePort>(&self, id: VariantId, port: &mut P) -> StepStatus {
        let current = port.location();
        let result = sync::location_with_variant(&current, &self.config.variant_param, id)
            .map_err(|e| e.to_string())
            .and_then(|url| port.replace_location(&url).map_err(|e| e.to_string()));

        match result {
            Ok(()) => StepStatus::Applied(1),
            Err(err) => {
                tracing::warn!("[{}] location step failed for {:?}: {}", self.scope, current, err);
                StepStatus::Failed(err)
            }
        }
    }
}

/// Apply a step's patches in order; stop at the first failure of this step
fn apply_step<P: PagePort>(
    port: &mut P,
    step: SyncStep,
    patches: Vec<Patch<P::Handle>>,
) -> StepStatus {
    if patches.is_empty() {
        return StepStatus::Skipped;
    }
    for patch in &patches {
        if let Err(err) = port.apply(patch) {
            tracing::warn!("{} step failed on {:?}: {}", step, patch.target(), err);
            return StepStatus::Failed(err.to_string());
        }
    }
    StepStatus::Applied(patches.len())
}
