//! Form schema definition.
//!
//! `FormSchema` groups an ordered list of `FormTab`s (wizard steps). Each tab
//! carries its fields and an optional visibility `Condition`. Schemas are
//! plain data: building one performs no I/O, and rebuilding with fresh option
//! lists yields a schema whose tabs and fields match the old one by id/name.
//!
//! ```ignore
//! let schema = FormSchema::new(vec![
//!     FormTab::new("generic", "Generic", "New Glyph")
//!         .field(FormField::new("id", "Glyph ID", FieldKind::Text).required()),
//! ]);
//! ```

use std::collections::HashSet;

use crate::condition::Condition;
use crate::errors::SchemaError;
use crate::field::FormField;
use crate::state::FormState;

/// One wizard step.
#[derive(Debug, Clone)]
pub struct FormTab {
    pub id: String,
    pub tab_label: String,
    pub title: String,
    pub fields: Vec<FormField>,
    pub condition: Option<Condition>,
}

impl FormTab {
    pub fn new(
        id: impl Into<String>,
        tab_label: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            tab_label: tab_label.into(),
            title: title.into(),
            fields: Vec::new(),
            condition: None,
        }
    }

    pub fn field(mut self, field: FormField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn when(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn field_by_name(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_by_name_mut(&mut self, name: &str) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|f| f.name == name)
    }

    /// Tabs without a condition are always visible.
    pub fn is_visible(&self, state: &FormState) -> bool {
        self.condition
            .as_ref()
            .map_or(true, |condition| condition.evaluate(state))
    }

    /// Required-field predicate: every required field is present and every
    /// validator accepts the current textual value.
    pub fn is_complete(&self, state: &FormState) -> bool {
        self.first_problem(state).is_none()
    }

    /// First field (in display order) blocking this tab, with a message.
    pub fn first_problem(&self, state: &FormState) -> Option<(&FormField, String)> {
        for field in &self.fields {
            if field.required && !state.is_present(&self.id, &field.name) {
                return Some((field, format!("{} is required", field.label)));
            }
            if let Some(text) = state.text(&self.id, &field.name) {
                if !text.is_empty() {
                    if let Err(message) = field.validate(text) {
                        return Some((field, message));
                    }
                }
            }
        }
        None
    }
}

/// Declarative schema for a multi-step form.
#[derive(Debug, Clone, Default)]
pub struct FormSchema {
    pub tabs: Vec<FormTab>,
}

impl FormSchema {
    pub fn new(tabs: Vec<FormTab>) -> Self {
        Self { tabs }
    }

    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    pub fn tab_by_id(&self, id: &str) -> Option<&FormTab> {
        self.tabs.iter().find(|t| t.id == id)
    }

    pub fn tab_by_id_mut(&mut self, id: &str) -> Option<&mut FormTab> {
        self.tabs.iter_mut().find(|t| t.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == id)
    }

    pub fn field(&self, tab: &str, name: &str) -> Option<&FormField> {
        self.tab_by_id(tab).and_then(|t| t.field_by_name(name))
    }

    /// Check the structural invariants: unique tab ids, unique field names
    /// per tab, and options present on single-choice fields.
    pub fn validate(&self) -> Result<(), SchemaError> {
        let mut tab_ids = HashSet::new();
        for tab in &self.tabs {
            if !tab_ids.insert(tab.id.as_str()) {
                return Err(SchemaError::DuplicateTab(tab.id.clone()));
            }
            let mut names = HashSet::new();
            for field in &tab.fields {
                if !names.insert(field.name.as_str()) {
                    return Err(SchemaError::DuplicateField {
                        tab: tab.id.clone(),
                        field: field.name.clone(),
                    });
                }
                if field.kind.requires_options() && field.options.is_empty() {
                    return Err(SchemaError::MissingOptions {
                        tab: tab.id.clone(),
                        field: field.name.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldKind;

    #[test]
    fn duplicate_ids_are_rejected() {
        let schema = FormSchema::new(vec![
            FormTab::new("a", "A", "A"),
            FormTab::new("a", "A", "A again"),
        ]);
        assert!(matches!(schema.validate(), Err(SchemaError::DuplicateTab(id)) if id == "a"));

        let schema = FormSchema::new(vec![FormTab::new("a", "A", "A")
            .field(FormField::new("x", "X", FieldKind::Text))
            .field(FormField::new("x", "X", FieldKind::Int))]);
        assert!(matches!(schema.validate(), Err(SchemaError::DuplicateField { .. })));
    }

    #[test]
    fn select_without_options_is_rejected() {
        let schema = FormSchema::new(vec![
            FormTab::new("a", "A", "A").field(FormField::new("type", "Type", FieldKind::Select)),
        ]);
        assert!(matches!(schema.validate(), Err(SchemaError::MissingOptions { .. })));
    }

    #[test]
    fn completeness_checks_required_then_validators() {
        let tab = FormTab::new("generic", "Generic", "New Glyph")
            .field(FormField::new("id", "Glyph ID", FieldKind::Text).required().validator(|v| {
                if v.contains('!') {
                    Err("no bangs".into())
                } else {
                    Ok(())
                }
            }))
            .field(FormField::new("height", "Height", FieldKind::Int));

        let mut state = FormState::new();
        assert!(!tab.is_complete(&state));

        state.set("generic", "id", "");
        assert!(!tab.is_complete(&state));

        state.set("generic", "id", "note!");
        assert_eq!(tab.first_problem(&state).map(|(_, m)| m), Some("no bangs".to_string()));

        state.set("generic", "id", "note");
        assert!(tab.is_complete(&state));
    }
}
