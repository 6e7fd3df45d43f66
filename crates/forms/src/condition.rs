//! Tab visibility predicates.
//!
//! A condition looks at values other tabs already hold. It is a small closed
//! set of combinators instead of an expression language:
//!
//! ```ignore
//! // visible for the five tool types
//! Condition::one_of("itemIDAndType", "type", ["sword", "shovel", "pickaxe", "axe", "hoe"]);
//! // visible once the food component is switched on
//! Condition::flag("components", "food");
//! ```
//!
//! Evaluation is total: a reference to a tab or field that holds no value, or
//! holds a value of another kind, is simply `false`.

use tracing::trace;

use crate::state::FormState;
use crate::value::FieldValue;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// `tab.field == value` (text values only).
    Equals {
        tab: String,
        field: String,
        value: String,
    },
    /// `tab.field` is one of `values` (text values only).
    OneOf {
        tab: String,
        field: String,
        values: Vec<String>,
    },
    /// `tab.field` is a flag set to `true`.
    FlagSet { tab: String, field: String },
    Any(Vec<Condition>),
    All(Vec<Condition>),
}

impl Condition {
    pub fn equals(
        tab: impl Into<String>,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Condition::Equals {
            tab: tab.into(),
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn one_of<I, S>(tab: impl Into<String>, field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Condition::OneOf {
            tab: tab.into(),
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn flag(tab: impl Into<String>, field: impl Into<String>) -> Self {
        Condition::FlagSet {
            tab: tab.into(),
            field: field.into(),
        }
    }

    pub fn evaluate(&self, state: &FormState) -> bool {
        match self {
            Condition::Equals { tab, field, value } => {
                lookup(state, tab, field).and_then(FieldValue::as_text) == Some(value.as_str())
            }
            Condition::OneOf { tab, field, values } => lookup(state, tab, field)
                .and_then(FieldValue::as_text)
                .is_some_and(|v| values.iter().any(|candidate| candidate == v)),
            Condition::FlagSet { tab, field } => {
                lookup(state, tab, field).and_then(FieldValue::as_flag) == Some(true)
            }
            Condition::Any(conditions) => conditions.iter().any(|c| c.evaluate(state)),
            Condition::All(conditions) => conditions.iter().all(|c| c.evaluate(state)),
        }
    }

    /// Tab ids this condition reads from.
    pub fn referenced_tabs(&self) -> Vec<&str> {
        match self {
            Condition::Equals { tab, .. }
            | Condition::OneOf { tab, .. }
            | Condition::FlagSet { tab, .. } => vec![tab.as_str()],
            Condition::Any(conditions) | Condition::All(conditions) => conditions
                .iter()
                .flat_map(Condition::referenced_tabs)
                .collect(),
        }
    }
}

fn lookup<'a>(state: &'a FormState, tab: &str, field: &str) -> Option<&'a FieldValue> {
    let value = state.get(tab, field);
    if value.is_none() {
        trace!(tab, field, "condition references a value that is not set");
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with_type(ty: &str) -> FormState {
        let mut state = FormState::new();
        state.set("itemIDAndType", "type", ty);
        state
    }

    #[test]
    fn missing_reference_is_false() {
        let state = FormState::new();
        assert!(!Condition::equals("itemIDAndType", "type", "armor").evaluate(&state));
        assert!(!Condition::flag("components", "food").evaluate(&state));
        assert!(!Condition::one_of("itemIDAndType", "type", ["sword"]).evaluate(&state));
    }

    #[test]
    fn membership_and_equality() {
        let tool = Condition::one_of("itemIDAndType", "type", ["sword", "axe"]);
        assert!(tool.evaluate(&state_with_type("axe")));
        assert!(!tool.evaluate(&state_with_type("armor")));
        let armor = Condition::equals("itemIDAndType", "type", "armor");
        assert!(armor.evaluate(&state_with_type("armor")));
    }

    #[test]
    fn flag_requires_true_boolean() {
        let mut state = FormState::new();
        let food = Condition::flag("components", "food");

        state.set("components", "food", "true");
        assert!(!food.evaluate(&state), "text is not a flag");

        state.set("components", "food", false);
        assert!(!food.evaluate(&state));

        state.set("components", "food", true);
        assert!(food.evaluate(&state));
    }

    #[test]
    fn combinators() {
        let mut state = FormState::new();
        state.set("a", "x", "1");
        state.set("b", "on", true);

        let both = Condition::All(vec![
            Condition::equals("a", "x", "1"),
            Condition::flag("b", "on"),
        ]);
        let either = Condition::Any(vec![
            Condition::equals("a", "x", "2"),
            Condition::flag("b", "on"),
        ]);
        assert!(both.evaluate(&state));
        assert!(either.evaluate(&state));
        assert!(!Condition::All(vec![Condition::equals("a", "x", "2")]).evaluate(&state));
        assert_eq!(both.referenced_tabs(), vec!["a", "b"]);
    }
}
