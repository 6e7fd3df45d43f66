//! Wizard controller (state machine).
//!
//! A `Wizard` owns the schema and the form state of one creation flow. All
//! transitions go through `Wizard::dispatch`, which either applies an
//! `Intent` or explains why it is currently disabled (`Blocked`).
//!
//! States: one per visible tab position `0..visible.len()`, plus the terminal
//! phases `Submitted` and `Cancelled`. After a terminal phase every intent is
//! refused with `Blocked::Finished`.
//!
//! Policy:
//!   - `Next` / `Submit` need the active tab's required fields (and validators).
//!   - `Back` is refused on the first visible tab.
//!   - `JumpTo` may always go backwards; going forwards needs a complete tab.
//!   - `Set` may hide the active tab; the position is re-clamped immediately.
//!   - Nothing leaves the wizard except through the submit callback.

use std::fmt;

use tracing::{debug, trace};

use crate::errors::Blocked;
use crate::result::FormResult;
use crate::schema::{FormSchema, FormTab};
use crate::state::FormState;
use crate::value::FieldValue;
use crate::visibility::{clamp_active, visible_tabs};

/// User intents understood by the wizard.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Next,
    Back,
    JumpTo(String),
    Set {
        tab: String,
        field: String,
        value: FieldValue,
    },
    Submit,
    Cancel,
}

impl Intent {
    pub fn set(
        tab: impl Into<String>,
        field: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Self {
        Intent::Set {
            tab: tab.into(),
            field: field.into(),
            value: value.into(),
        }
    }
}

/// What an accepted intent did.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// Active position changed (positions into the visible tab list).
    Moved { from: usize, to: usize },
    /// A value was stored; `visibility_changed` tells whether tabs appeared or vanished.
    Updated { visibility_changed: bool },
    Submitted(FormResult),
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Editing,
    Submitted,
    Cancelled,
}

pub type SubmitCallback = Box<dyn FnMut(&FormResult) + Send>;

pub struct Wizard {
    schema: FormSchema,
    state: FormState,
    visible: Vec<usize>,
    active: usize,
    phase: Phase,
    on_submit: Option<SubmitCallback>,
}

impl Wizard {
    pub fn new(schema: FormSchema) -> Self {
        let state = FormState::new();
        let visible = visible_tabs(&schema, &state);
        Self {
            schema,
            state,
            visible,
            active: 0,
            phase: Phase::Editing,
            on_submit: None,
        }
    }

    /// Register the completion callback invoked once on a successful submit.
    pub fn on_submit(mut self, callback: impl FnMut(&FormResult) + Send + 'static) -> Self {
        self.on_submit = Some(Box::new(callback));
        self
    }

    // --- Accessors used by renderers ----------------------------------------------------------

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Position of the active tab inside `visible_tabs()`.
    pub fn active_position(&self) -> usize {
        self.active
    }

    pub fn active_tab(&self) -> Option<&FormTab> {
        self.visible
            .get(self.active)
            .and_then(|&idx| self.schema.tabs.get(idx))
    }

    pub fn visible_tabs(&self) -> impl Iterator<Item = &FormTab> {
        self.visible.iter().map(|&idx| &self.schema.tabs[idx])
    }

    /// Schema indices of the visible tabs, in display order.
    pub fn visible_indices(&self) -> &[usize] {
        &self.visible
    }

    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    pub fn is_first(&self) -> bool {
        self.active == 0
    }

    pub fn is_last(&self) -> bool {
        self.active + 1 >= self.visible.len()
    }

    /// Required-field predicate of the active tab.
    pub fn active_complete(&self) -> bool {
        self.active_tab()
            .is_some_and(|tab| tab.is_complete(&self.state))
    }

    /// Message explaining why the active tab is incomplete, if it is.
    pub fn active_problem(&self) -> Option<String> {
        let tab = self.active_tab()?;
        tab.first_problem(&self.state).map(|(_, message)| message)
    }

    pub fn can_next(&self) -> bool {
        self.check_next().is_ok()
    }

    pub fn can_back(&self) -> bool {
        self.check_back().is_ok()
    }

    pub fn can_submit(&self) -> bool {
        self.check_submit().is_ok()
    }

    pub fn can_jump_to(&self, tab: &str) -> bool {
        self.check_jump(tab).is_ok()
    }

    // --- Transitions ---------------------------------------------------------------------------

    /// Apply a single intent. This is the only way state changes.
    pub fn dispatch(&mut self, intent: Intent) -> Result<Transition, Blocked> {
        if self.phase != Phase::Editing {
            return Err(Blocked::Finished);
        }
        trace!(?intent, active = self.active, "wizard intent");
        match intent {
            Intent::Next => {
                self.check_next()?;
                Ok(self.move_to(self.active + 1))
            }
            Intent::Back => {
                self.check_back()?;
                Ok(self.move_to(self.active - 1))
            }
            Intent::JumpTo(tab) => {
                let target = self.check_jump(&tab)?;
                Ok(self.move_to(target))
            }
            Intent::Set { tab, field, value } => self.set_value(&tab, &field, value),
            Intent::Submit => {
                self.check_submit()?;
                let result = FormResult::from_state(&self.schema, &self.state);
                if let Some(callback) = self.on_submit.as_mut() {
                    callback(&result);
                }
                self.phase = Phase::Submitted;
                debug!(tabs = result.tab_ids().count(), "wizard submitted");
                Ok(Transition::Submitted(result))
            }
            Intent::Cancel => {
                self.state.clear();
                self.phase = Phase::Cancelled;
                debug!("wizard cancelled");
                Ok(Transition::Cancelled)
            }
        }
    }

    pub fn next(&mut self) -> Result<Transition, Blocked> {
        self.dispatch(Intent::Next)
    }

    pub fn back(&mut self) -> Result<Transition, Blocked> {
        self.dispatch(Intent::Back)
    }

    pub fn jump_to(&mut self, tab: &str) -> Result<Transition, Blocked> {
        self.dispatch(Intent::JumpTo(tab.to_string()))
    }

    pub fn set(
        &mut self,
        tab: &str,
        field: &str,
        value: impl Into<FieldValue>,
    ) -> Result<Transition, Blocked> {
        self.dispatch(Intent::set(tab, field, value))
    }

    pub fn submit(&mut self) -> Result<FormResult, Blocked> {
        match self.dispatch(Intent::Submit)? {
            Transition::Submitted(result) => Ok(result),
            _ => Err(Blocked::NotLastTab),
        }
    }

    pub fn cancel(&mut self) -> Result<Transition, Blocked> {
        self.dispatch(Intent::Cancel)
    }

    /// Swap in a schema rebuilt with fresh option lists.
    ///
    /// Entered values are kept; the active tab is found again by id. Has no
    /// effect once the wizard is closed.
    pub fn refresh_schema(&mut self, schema: FormSchema) {
        if self.phase != Phase::Editing {
            trace!("schema refresh ignored, wizard closed");
            return;
        }
        let active_id = self.active_tab().map(|tab| tab.id.clone());
        self.schema = schema;
        self.visible = visible_tabs(&self.schema, &self.state);
        let by_id = active_id.and_then(|id| {
            self.visible
                .iter()
                .position(|&idx| self.schema.tabs[idx].id == id)
        });
        let last = self.visible.len().saturating_sub(1);
        self.active = by_id.unwrap_or_else(|| self.active.min(last));
        debug!(tabs = self.visible.len(), "wizard schema refreshed");
    }

    // --- Internals -----------------------------------------------------------------------------

    fn incomplete(&self) -> Option<Blocked> {
        let tab = self.active_tab()?;
        tab.first_problem(&self.state)
            .map(|(_, message)| Blocked::Incomplete {
                tab: tab.id.clone(),
                message,
            })
    }

    fn check_next(&self) -> Result<(), Blocked> {
        if self.phase != Phase::Editing {
            return Err(Blocked::Finished);
        }
        if self.is_last() {
            return Err(Blocked::LastTab);
        }
        match self.incomplete() {
            Some(blocked) => Err(blocked),
            None => Ok(()),
        }
    }

    fn check_back(&self) -> Result<(), Blocked> {
        if self.phase != Phase::Editing {
            return Err(Blocked::Finished);
        }
        if self.is_first() {
            return Err(Blocked::FirstTab);
        }
        Ok(())
    }

    fn check_submit(&self) -> Result<(), Blocked> {
        if self.phase != Phase::Editing {
            return Err(Blocked::Finished);
        }
        if !self.is_last() {
            return Err(Blocked::NotLastTab);
        }
        match self.incomplete() {
            Some(blocked) => Err(blocked),
            None => Ok(()),
        }
    }

    /// Returns the target position on success.
    fn check_jump(&self, tab: &str) -> Result<usize, Blocked> {
        if self.phase != Phase::Editing {
            return Err(Blocked::Finished);
        }
        let canonical = self
            .schema
            .position(tab)
            .ok_or_else(|| Blocked::UnknownTab(tab.to_string()))?;
        let target = self
            .visible
            .iter()
            .position(|&idx| idx == canonical)
            .ok_or_else(|| Blocked::HiddenTab(tab.to_string()))?;
        if target <= self.active {
            return Ok(target);
        }
        match self.incomplete() {
            Some(blocked) => Err(blocked),
            None => Ok(target),
        }
    }

    fn move_to(&mut self, to: usize) -> Transition {
        let from = self.active;
        self.active = to;
        debug!(from, to, "wizard moved");
        Transition::Moved { from, to }
    }

    fn set_value(
        &mut self,
        tab: &str,
        field: &str,
        value: FieldValue,
    ) -> Result<Transition, Blocked> {
        if self.schema.field(tab, field).is_none() {
            return Err(Blocked::UnknownField {
                tab: tab.to_string(),
                field: field.to_string(),
            });
        }
        self.state.set(tab, field, value);

        let visible = visible_tabs(&self.schema, &self.state);
        let visibility_changed = visible != self.visible;
        if visibility_changed {
            let active = clamp_active(&self.visible, &visible, self.active);
            debug!(
                before = self.visible.len(),
                after = visible.len(),
                active,
                "visible tabs changed"
            );
            self.visible = visible;
            self.active = active;
        }
        Ok(Transition::Updated { visibility_changed })
    }
}

impl fmt::Debug for Wizard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wizard")
            .field("tabs", &self.schema.tabs.len())
            .field("visible", &self.visible)
            .field("active", &self.active)
            .field("phase", &self.phase)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Condition;
    use crate::field::{FieldKind, FormField};
    use std::sync::{Arc, Mutex};

    fn schema() -> FormSchema {
        FormSchema::new(vec![
            FormTab::new("id", "Id", "New")
                .field(FormField::new("id", "ID", FieldKind::Text).required())
                .field(
                    FormField::new("type", "Type", FieldKind::Select)
                        .required()
                        .options(["a", "b"]),
                ),
            FormTab::new("extra", "Extra", "Extra")
                .when(Condition::equals("id", "type", "b"))
                .field(FormField::new("size", "Size", FieldKind::Int).required()),
            FormTab::new("last", "Last", "Last")
                .field(FormField::new("flag", "Flag", FieldKind::Bool)),
        ])
    }

    #[test]
    fn next_requires_complete_tab() {
        let mut wizard = Wizard::new(schema());
        assert!(matches!(wizard.next(), Err(Blocked::Incomplete { .. })));

        wizard.set("id", "id", "thing").unwrap();
        assert!(!wizard.can_next());
        wizard.set("id", "type", "a").unwrap();
        assert!(wizard.can_next());
        assert_eq!(wizard.next(), Ok(Transition::Moved { from: 0, to: 1 }));
        assert_eq!(wizard.active_tab().map(|t| t.id.as_str()), Some("last"));
    }

    #[test]
    fn filling_required_fields_never_disables_moving_on() {
        let mut wizard = Wizard::new(schema());
        let mut seen = vec![wizard.can_next()];
        wizard.set("id", "id", "thing").unwrap();
        seen.push(wizard.can_next());
        wizard.set("id", "type", "a").unwrap();
        seen.push(wizard.can_next());
        wizard.set("last", "flag", true).unwrap();
        seen.push(wizard.can_next());
        assert_eq!(seen, vec![false, false, true, true]);

        let single = FormSchema::new(vec![FormTab::new("only", "Only", "Only")
            .field(FormField::new("id", "ID", FieldKind::Text).required())
            .field(FormField::new("size", "Size", FieldKind::Int).required())
            .field(FormField::new("note", "Note", FieldKind::Text))]);
        let mut wizard = Wizard::new(single);
        let mut seen = vec![wizard.can_submit()];
        for (field, value) in [("id", "x"), ("size", "3"), ("note", "spare")] {
            wizard.set("only", field, value).unwrap();
            seen.push(wizard.can_submit());
        }
        assert_eq!(seen, vec![false, false, true, true]);
    }

    #[test]
    fn back_is_blocked_on_first_tab() {
        let mut wizard = Wizard::new(schema());
        assert_eq!(wizard.back(), Err(Blocked::FirstTab));
        assert!(!wizard.can_back());
    }

    #[test]
    fn jump_backwards_always_forward_only_when_complete() {
        let mut wizard = Wizard::new(schema());
        assert!(matches!(wizard.jump_to("last"), Err(Blocked::Incomplete { .. })));
        assert_eq!(wizard.jump_to("extra"), Err(Blocked::HiddenTab("extra".into())));
        assert_eq!(wizard.jump_to("nope"), Err(Blocked::UnknownTab("nope".into())));

        wizard.set("id", "id", "x").unwrap();
        wizard.set("id", "type", "b").unwrap();
        wizard.next().unwrap();
        // on "extra", size missing: forward jump blocked, backward allowed
        assert!(!wizard.can_jump_to("last"));
        assert!(wizard.can_jump_to("id"));
        assert_eq!(wizard.jump_to("id"), Ok(Transition::Moved { from: 1, to: 0 }));
    }

    #[test]
    fn hiding_the_active_tab_clamps_to_previous() {
        let mut wizard = Wizard::new(schema());
        wizard.set("id", "id", "x").unwrap();
        wizard.set("id", "type", "b").unwrap();
        wizard.next().unwrap();
        assert_eq!(wizard.active_tab().map(|t| t.id.as_str()), Some("extra"));

        let changed = wizard.set("id", "type", "a").unwrap();
        assert_eq!(changed, Transition::Updated { visibility_changed: true });
        assert_eq!(wizard.active_tab().map(|t| t.id.as_str()), Some("id"));
        assert_eq!(wizard.visible_count(), 2);
    }

    #[test]
    fn submit_only_from_last_tab_and_calls_back() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut wizard = Wizard::new(schema()).on_submit(move |result| {
            sink.lock().unwrap().push(result.string("id", "id"));
        });

        wizard.set("id", "id", "x").unwrap();
        wizard.set("id", "type", "a").unwrap();
        assert_eq!(wizard.submit(), Err(Blocked::NotLastTab));
        wizard.next().unwrap();

        let result = wizard.submit().unwrap();
        assert_eq!(result.text("id", "type"), Some("a"));
        assert_eq!(wizard.phase(), Phase::Submitted);
        assert_eq!(seen.lock().unwrap().as_slice(), &[Some("x".to_string())]);
        assert_eq!(wizard.next(), Err(Blocked::Finished));
    }

    #[test]
    fn cancel_discards_state() {
        let mut wizard = Wizard::new(schema());
        wizard.set("id", "id", "x").unwrap();
        assert_eq!(wizard.cancel(), Ok(Transition::Cancelled));
        assert!(wizard.state().is_empty());
        assert_eq!(wizard.set("id", "id", "y"), Err(Blocked::Finished));
    }

    #[test]
    fn unknown_fields_are_refused() {
        let mut wizard = Wizard::new(schema());
        assert!(matches!(wizard.set("id", "colour", "red"), Err(Blocked::UnknownField { .. })));
    }

    #[test]
    fn refresh_keeps_values_and_active_tab() {
        let mut wizard = Wizard::new(schema());
        wizard.set("id", "id", "x").unwrap();
        wizard.set("id", "type", "a").unwrap();
        wizard.next().unwrap();

        let mut fresh = schema();
        fresh.tabs[0].fields[1].options.push("c".into());
        wizard.refresh_schema(fresh);

        assert_eq!(wizard.state().text("id", "id"), Some("x"));
        assert_eq!(wizard.active_tab().map(|t| t.id.as_str()), Some("last"));
        assert_eq!(wizard.schema().field("id", "type").map(|f| f.options.len()), Some(3));
    }
}
