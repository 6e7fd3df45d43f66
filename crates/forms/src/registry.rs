//! Per-kind presentation and input handling.
//!
//! Everything the editor needs to know about a `FieldKind` lives here:
//! how a value is shown, how Left/Right change it, how a committed line of
//! text is turned into a `FieldValue`, and how a field is laid out as
//! ratatui `Line`s. The functions are pure; the editor owns focus and the
//! line editor buffer.

use ratatui::{
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
};

use crate::catalog::is_language;
use crate::field::{FieldKind, FormField};
use crate::schema::FormSchema;
use crate::value::{FieldValue, LocalizedNames};

/// Format a field's current value for display.
pub fn display_value(field: &FormField, value: Option<&FieldValue>) -> String {
    match (&field.kind, value) {
        (FieldKind::Bool, v) => {
            if v.and_then(FieldValue::as_flag).unwrap_or(false) {
                "[x]".into()
            } else {
                "[ ]".into()
            }
        }
        (FieldKind::LocalizedName, Some(FieldValue::Names(names))) => names_summary(names),
        (_, Some(FieldValue::Text(text))) => text.clone(),
        _ => String::new(),
    }
}

/// `en_us=Ruby, de_de=Rubin`
pub fn names_summary(names: &LocalizedNames) -> String {
    names
        .iter()
        .map(|(lang, name)| format!("{lang}={name}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Left/Right on a select field. Starts at the first (or last) option when
/// nothing valid is selected yet; `None` when the field has no options.
pub fn cycle_option(field: &FormField, current: Option<&str>, forward: bool) -> Option<String> {
    let options = &field.options;
    if options.is_empty() {
        return None;
    }
    let len = options.len();
    let next = match current.and_then(|c| options.iter().position(|o| o == c)) {
        Some(idx) if forward => (idx + 1) % len,
        Some(idx) => (idx + len - 1) % len,
        None if forward => 0,
        None => len - 1,
    };
    Some(options[next].clone())
}

/// Left/Right/Space on a boolean field.
pub fn toggle(current: Option<&FieldValue>) -> FieldValue {
    FieldValue::Flag(!current.and_then(FieldValue::as_flag).unwrap_or(false))
}

/// Turn a committed line of text into a value for `field`.
///
/// Numeric fields keep the raw text (coercion happens when the record is
/// assembled); only closed selects reject values outside their options.
pub fn parse_input(field: &FormField, raw: &str) -> Result<FieldValue, String> {
    let text = raw.trim();
    match &field.kind {
        FieldKind::Select if !text.is_empty() && !field.options.iter().any(|o| o == text) => {
            Err(format!("{} must be one of: {}", field.label, field.options.join(", ")))
        }
        FieldKind::Bool => match text {
            "true" | "yes" | "1" => Ok(FieldValue::Flag(true)),
            "false" | "no" | "0" | "" => Ok(FieldValue::Flag(false)),
            other => Err(format!("'{other}' is not a yes/no value")),
        },
        FieldKind::LocalizedName => {
            let mut names = LocalizedNames::new();
            for entry in text.split(',').filter(|e| !e.trim().is_empty()) {
                let (lang, name) = parse_name_entry(entry)?;
                names.set(lang, name);
            }
            Ok(FieldValue::Names(names))
        }
        _ => Ok(FieldValue::text(text)),
    }
}

/// Parse one `lang=name` entry of a localized name field.
pub fn parse_name_entry(entry: &str) -> Result<(String, String), String> {
    let Some((lang, name)) = entry.split_once('=') else {
        return Err(format!("expected language=name, got '{}'", entry.trim()));
    };
    let lang = lang.trim().to_lowercase();
    if !is_language(&lang) {
        return Err(format!("unknown language code '{lang}'"));
    }
    Ok((lang, name.trim().to_string()))
}

/// Soft hint for numeric fields whose text will not coerce to a number.
pub fn numeric_hint(field: &FormField, value: Option<&FieldValue>) -> Option<String> {
    let text = value.and_then(FieldValue::as_text)?.trim();
    if text.is_empty() {
        return None;
    }
    let ok = match field.kind {
        FieldKind::Int => text.parse::<i64>().is_ok() || text.parse::<f64>().is_ok(),
        FieldKind::Float => text.parse::<f64>().is_ok(),
        _ => true,
    };
    (!ok).then(|| format!("'{text}' is not a number and will be stored as text"))
}

/// How a field should be drawn in this frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldView<'a> {
    pub focused: bool,
    /// Live contents of the line editor while this field is being edited.
    pub editing: Option<&'a str>,
    pub problem: Option<&'a str>,
}

/// Lay out one field as label/value line plus hint and error lines.
pub fn field_lines(
    field: &FormField,
    value: Option<&FieldValue>,
    view: FieldView<'_>,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    let marker = if field.required { "*" } else { "" };
    let label_style = if view.focused {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    let mut spans = vec![
        Span::styled(format!("{}{}:", field.label, marker), label_style),
        Span::raw(" "),
    ];

    let shown = match view.editing {
        Some(buffer) => buffer.to_string(),
        None => display_value(field, value),
    };
    let value_style = if view.focused {
        Style::default().fg(Color::Black).bg(Color::White)
    } else {
        Style::default().fg(Color::Cyan)
    };
    if shown.is_empty() && view.editing.is_none() {
        let placeholder = field.placeholder.clone().unwrap_or_default();
        spans.push(Span::styled(placeholder, Style::default().fg(Color::DarkGray)));
    } else {
        spans.push(Span::styled(shown, value_style));
    }
    let select = matches!(field.kind, FieldKind::Select | FieldKind::OpenSelect);
    if select && !field.options.is_empty() {
        spans.push(Span::styled(
            format!("  ({} options)", field.options.len()),
            Style::default().fg(Color::DarkGray),
        ));
    }
    lines.push(Line::from(spans));

    if let Some(hint) = numeric_hint(field, value) {
        lines.push(Line::from(Span::styled(hint, Style::default().fg(Color::Yellow))));
    }
    if let Some(problem) = view.problem {
        lines.push(Line::from(Span::styled(problem.to_string(), Style::default().fg(Color::Red))));
    }
    lines
}

/// Tab strip: one label per visible tab, active tab highlighted, tabs the
/// user cannot jump to dimmed.
pub fn tab_header(
    schema: &FormSchema,
    visible: &[usize],
    active: usize,
    reachable: impl Fn(usize) -> bool,
) -> Line<'static> {
    let mut spans = Vec::new();
    for (pos, &idx) in visible.iter().enumerate() {
        let Some(tab) = schema.tabs.get(idx) else {
            continue;
        };
        if pos > 0 {
            spans.push(Span::raw(" | ").fg(Color::DarkGray));
        }
        let label = format!("{} {}", pos + 1, tab.tab_label);
        let style = if pos == active {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else if reachable(pos) {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(label, style));
    }
    Line::from(spans)
}
