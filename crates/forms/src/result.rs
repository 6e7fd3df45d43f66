//! Typed snapshot handed out on submit.

use std::collections::HashMap;

use serde::Serialize;

use crate::schema::FormSchema;
use crate::state::{FormState, TabValues};
use crate::value::{FieldValue, LocalizedNames};
use crate::visibility::visible_tabs;

/// Values of a completed wizard, restricted to the tabs that were visible at
/// submit time. Data typed into a tab that later became hidden is dropped.
///
/// Empty strings are treated as "not entered" by every accessor.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FormResult {
    tabs: HashMap<String, TabValues>,
}

impl FormResult {
    pub fn from_state(schema: &FormSchema, state: &FormState) -> Self {
        let visible: Vec<&str> = visible_tabs(schema, state)
            .into_iter()
            .map(|idx| schema.tabs[idx].id.as_str())
            .collect();
        let tabs = state
            .clone()
            .into_tabs()
            .into_iter()
            .filter(|(id, _)| visible.contains(&id.as_str()))
            .map(|(id, values)| {
                let values: TabValues = values
                    .into_iter()
                    .filter(|(_, value)| value.is_present())
                    .collect();
                (id, values)
            })
            .filter(|(_, values)| !values.is_empty())
            .collect();
        Self { tabs }
    }

    /// Values of a tab, or `None` if the tab was hidden or left untouched.
    pub fn tab(&self, tab: &str) -> Option<&TabValues> {
        self.tabs.get(tab)
    }

    pub fn has_tab(&self, tab: &str) -> bool {
        self.tabs.contains_key(tab)
    }

    pub fn get(&self, tab: &str, field: &str) -> Option<&FieldValue> {
        self.tabs.get(tab).and_then(|values| values.get(field))
    }

    pub fn text(&self, tab: &str, field: &str) -> Option<&str> {
        self.get(tab, field).and_then(FieldValue::as_text)
    }

    /// Owned variant of `text`, convenient when filling records.
    pub fn string(&self, tab: &str, field: &str) -> Option<String> {
        self.text(tab, field).map(str::to_string)
    }

    pub fn flag(&self, tab: &str, field: &str) -> Option<bool> {
        self.get(tab, field).and_then(FieldValue::as_flag)
    }

    pub fn names(&self, tab: &str, field: &str) -> Option<&LocalizedNames> {
        self.get(tab, field).and_then(FieldValue::as_names)
    }

    pub fn tab_ids(&self) -> impl Iterator<Item = &str> {
        self.tabs.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Condition;
    use crate::schema::FormTab;

    #[test]
    fn hidden_and_untouched_tabs_are_dropped() {
        let schema = FormSchema::new(vec![
            FormTab::new("id", "Id", "Id"),
            FormTab::new("elytra", "Elytra", "Elytra")
                .when(Condition::equals("id", "type", "elytra")),
            FormTab::new("pack", "Pack", "Pack"),
        ]);
        let mut state = FormState::new();
        state.set("id", "type", "elytra");
        state.set("elytra", "durability", "432");
        state.set("pack", "icon", "");

        let result = FormResult::from_state(&schema, &state);
        assert_eq!(result.text("elytra", "durability"), Some("432"));
        assert!(!result.has_tab("pack"), "only empty values were entered");

        state.set("id", "type", "generic");
        let result = FormResult::from_state(&schema, &state);
        assert!(!result.has_tab("elytra"));
        assert_eq!(result.text("id", "type"), Some("generic"));
    }
}
