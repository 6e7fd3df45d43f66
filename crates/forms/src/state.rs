//! Form runtime (mutable) state.
//!
//! Values are keyed by `(tab id, field name)`. The store only grows while a
//! wizard is open: switching a type back and forth keeps what was typed into
//! a tab that became hidden, and `FormResult` later filters by visibility.
//!
//! `FormState::set` is the single mutation entry point used by the wizard
//! controller; everything else is read-only.

use std::collections::HashMap;

use crate::value::FieldValue;

/// Values captured for one tab, keyed by field name.
pub type TabValues = HashMap<String, FieldValue>;

/// Mutable state captured while a wizard is open.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FormState {
    tabs: HashMap<String, TabValues>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set (or replace) the value of `field` in `tab`.
    pub fn set(&mut self, tab: &str, field: &str, value: impl Into<FieldValue>) {
        self.tabs
            .entry(tab.to_string())
            .or_default()
            .insert(field.to_string(), value.into());
    }

    pub fn get(&self, tab: &str, field: &str) -> Option<&FieldValue> {
        self.tabs.get(tab).and_then(|values| values.get(field))
    }

    /// Borrow all values of a tab (if the user touched it at all).
    pub fn tab(&self, tab: &str) -> Option<&TabValues> {
        self.tabs.get(tab)
    }

    pub fn text(&self, tab: &str, field: &str) -> Option<&str> {
        self.get(tab, field).and_then(FieldValue::as_text)
    }

    pub fn flag(&self, tab: &str, field: &str) -> Option<bool> {
        self.get(tab, field).and_then(FieldValue::as_flag)
    }

    /// True if the field holds a value counting as present for required checks.
    pub fn is_present(&self, tab: &str, field: &str) -> bool {
        self.get(tab, field).is_some_and(FieldValue::is_present)
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn clear(&mut self) {
        self.tabs.clear();
    }

    pub(crate) fn into_tabs(self) -> HashMap<String, TabValues> {
        self.tabs
    }
}
