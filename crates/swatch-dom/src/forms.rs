//! Select and Option element behavior
//!
//! Selectedness is carried by the `selected` attribute on `<option>`
//! children. An untouched single-select with nothing marked falls back to
//! its first option, as browsers do; one whose value was set to something
//! no option carries has no selection at all.

use crate::{DomError, DomTree, NodeId};

impl DomTree {
    /// `<option>` descendants of a select, in document order
    pub fn select_options(&self, select: NodeId) -> Vec<NodeId> {
        self.descendants(select)
            .into_iter()
            .filter(|&n| self.tag_name(n) == Some("option"))
            .collect()
    }

    /// Option value: the `value` attribute, else its trimmed text
    pub fn option_value(&self, option: NodeId) -> String {
        match self.get_attribute(option, "value") {
            Some(v) => v.to_string(),
            None => self.text_content(option).trim().to_string(),
        }
    }

    /// Index of the selected option, if any
    pub fn selected_index(&self, select: NodeId) -> Option<usize> {
        let options = self.select_options(select);
        let marked = options.iter().position(|&o| self.get_attribute(o, "selected").is_some());
        if marked.is_some() {
            return marked;
        }
        let cleared = self.element(select).is_ok_and(|e| e.selection_cleared);
        (!cleared && !options.is_empty()).then_some(0)
    }

    /// `select.value`; empty when no option is selected
    pub fn select_value(&self, select: NodeId) -> String {
        let options = self.select_options(select);
        self.selected_index(select)
            .and_then(|i| options.get(i).copied())
            .map(|o| self.option_value(o))
            .unwrap_or_default()
    }

    /// `select.value = value`. Returns false if no option carries `value`;
    /// every option is then unmarked and the value reads back empty.
    pub fn set_select_value(&mut self, select: NodeId, value: &str) -> Result<bool, DomError> {
        if self.tag_name(select) != Some("select") {
            return Err(DomError::NotAnElement(select));
        }
        let options = self.select_options(select);
        let target = options.iter().copied().find(|&o| self.option_value(o) == value);

        for option in options {
            if Some(option) == target {
                self.set_attribute(option, "selected", "")?;
            } else {
                self.remove_attribute(option, "selected")?;
            }
        }
        self.element_mut(select)?.selection_cleared = target.is_none();
        Ok(target.is_some())
    }
}
