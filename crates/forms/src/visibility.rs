//! Conditional tab evaluation.
//!
//! `visible_tabs` maps the current `FormState` onto the subsequence of the
//! schema's tabs that apply. Indices always refer to `FormSchema::tabs`, are
//! strictly increasing and never repeat.

use crate::schema::FormSchema;
use crate::state::FormState;

/// Canonical indices of the tabs currently visible, in schema order.
pub fn visible_tabs(schema: &FormSchema, state: &FormState) -> Vec<usize> {
    schema
        .tabs
        .iter()
        .enumerate()
        .filter(|(_, tab)| tab.is_visible(state))
        .map(|(idx, _)| idx)
        .collect()
}

/// Re-clamp the active position after visibility changed.
///
/// `previous` and `current` hold canonical tab indices (see `visible_tabs`),
/// `active` is a position into `previous`. Returns a position into `current`:
/// - the same tab, if it is still visible
/// - otherwise the nearest preceding tab that is still visible
/// - otherwise the first visible tab
pub fn clamp_active(previous: &[usize], current: &[usize], active: usize) -> usize {
    if current.is_empty() {
        return 0;
    }
    let Some(&active_tab) = previous.get(active) else {
        return active.min(current.len() - 1);
    };
    if let Some(pos) = current.iter().position(|&idx| idx == active_tab) {
        return pos;
    }
    current
        .iter()
        .rposition(|&idx| idx < active_tab)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Condition;
    use crate::schema::FormTab;

    fn schema() -> FormSchema {
        FormSchema::new(vec![
            FormTab::new("id", "Id", "Id"),
            FormTab::new("tool", "Tool", "Tool").when(Condition::equals("id", "type", "sword")),
            FormTab::new("elytra", "Elytra", "Elytra")
                .when(Condition::equals("id", "type", "elytra")),
            FormTab::new("components", "Components", "Components"),
            FormTab::new("food", "Food", "Food").when(Condition::flag("components", "food")),
            FormTab::new("pack", "Pack", "Pack"),
        ])
    }

    #[test]
    fn unconditional_tabs_are_always_visible() {
        let schema = schema();
        assert_eq!(visible_tabs(&schema, &FormState::new()), vec![0, 3, 5]);

        let mut state = FormState::new();
        state.set("id", "type", "elytra");
        state.set("components", "food", true);
        let visible = visible_tabs(&schema, &state);
        assert_eq!(visible, vec![0, 2, 3, 4, 5]);
        assert!(visible.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn clamp_keeps_tab_if_still_visible() {
        // on "components" (pos 2 in [0, 2, 3, 5]) while elytra disappears
        assert_eq!(clamp_active(&[0, 2, 3, 5], &[0, 3, 5], 2), 1);
    }

    #[test]
    fn clamp_falls_back_to_preceding_tab() {
        // on "elytra" (pos 1) when the type changes back
        assert_eq!(clamp_active(&[0, 2, 3, 5], &[0, 3, 5], 1), 0);
        // on "food" when the flag is cleared
        assert_eq!(clamp_active(&[0, 3, 4, 5], &[0, 3, 5], 2), 1);
    }

    #[test]
    fn clamp_falls_back_to_first_tab() {
        assert_eq!(clamp_active(&[1, 2], &[3, 4], 0), 0);
        assert_eq!(clamp_active(&[1, 2], &[], 1), 0);
    }
}
