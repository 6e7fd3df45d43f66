//! Interactive wizard session.
//!
//! `EditorApp` owns one `Wizard` plus the UI-only state around it: which
//! field has focus, the line editor buffer and the status line. Key handling
//! and drawing are plain methods so they can be driven without a terminal;
//! `run` adds the crossterm event stream and the sound list channel.

use color_eyre::Result;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use engine_config::authoring_form;
use forms::registry::{self, FieldView};
use forms::texture::{self, FileLister};
use forms::{
    Blocked, EntityKind, FieldKind, FieldValue, FormField, FormResult, OptionLists, Phase,
    Transition, Wizard,
};
use futures::StreamExt;
use ratatui::{
    layout::{Constraint, Layout},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tokio::sync::mpsc;
use tracing::{debug, info};
use tui_input::{backend::crossterm::EventHandler, Input, InputRequest};

use crate::tui::Tui;

const MAX_SUGGESTIONS: usize = 6;

/// How a wizard session ended.
#[derive(Debug)]
pub enum Outcome {
    Submitted(FormResult),
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Error(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditMode {
    /// Replace the whole value of the focused field.
    Replace,
    /// Add one `lang=name` entry to a localized name field.
    AddName,
}

struct LineEdit {
    input: Input,
    mode: EditMode,
}

enum Step {
    Input(Option<std::io::Result<Event>>),
    Sounds(Option<Vec<String>>),
}

pub struct EditorApp {
    kind: EntityKind,
    wizard: Wizard,
    options: OptionLists,
    focus: usize,
    edit: Option<LineEdit>,
    suggestions: Vec<String>,
    status: Option<Status>,
    show_problems: bool,
    submitted: Option<FormResult>,
    textures: Option<Box<dyn FileLister>>,
    sounds: Option<mpsc::Receiver<Vec<String>>>,
}

impl EditorApp {
    pub fn new(
        kind: EntityKind,
        options: OptionLists,
        textures: Option<Box<dyn FileLister>>,
        sounds: Option<mpsc::Receiver<Vec<String>>>,
    ) -> Self {
        let wizard = Wizard::new(authoring_form(kind, &options));
        Self {
            kind,
            wizard,
            options,
            focus: 0,
            edit: None,
            suggestions: Vec::new(),
            status: None,
            show_problems: false,
            submitted: None,
            textures,
            sounds,
        }
    }

    pub fn wizard(&self) -> &Wizard {
        &self.wizard
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn edit_buffer(&self) -> Option<&str> {
        self.edit.as_ref().map(|edit| edit.input.value())
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn options(&self) -> &OptionLists {
        &self.options
    }

    /// `Some` once the wizard was submitted or cancelled.
    pub fn outcome(&mut self) -> Option<Outcome> {
        match self.wizard.phase() {
            Phase::Editing => None,
            Phase::Cancelled => Some(Outcome::Cancelled),
            Phase::Submitted => self.submitted.take().map(Outcome::Submitted),
        }
    }

    /// Drive the session until it is submitted or cancelled.
    pub async fn run(&mut self, tui: &mut Tui) -> Result<Outcome> {
        let mut events = EventStream::new();
        loop {
            tui.terminal.draw(|frame| self.draw(frame))?;
            if let Some(outcome) = self.outcome() {
                return Ok(outcome);
            }

            let step = tokio::select! {
                event = events.next() => Step::Input(event),
                sounds = next_sounds(&mut self.sounds) => Step::Sounds(sounds),
            };
            match step {
                Step::Input(Some(Ok(Event::Key(key)))) => self.handle_key(key),
                Step::Input(Some(Ok(Event::Paste(text)))) => self.handle_paste(&text),
                Step::Input(Some(Ok(_))) => {}
                Step::Input(Some(Err(err))) => return Err(err.into()),
                Step::Input(None) => {
                    debug!("terminal event stream closed");
                    let result = self.wizard.cancel();
                    self.after(result);
                }
                Step::Sounds(Some(sounds)) => self.merge_sounds(sounds),
                Step::Sounds(None) => self.sounds = None,
            }
        }
    }

    /// Merge freshly loaded sound ids into the option lists and rebuild the
    /// schema. Entered values survive; a closed wizard ignores the update.
    pub fn merge_sounds(&mut self, sounds: Vec<String>) {
        self.sounds = None;
        if self.wizard.phase() != Phase::Editing {
            debug!("sound list arrived after the wizard closed");
            return;
        }
        let before = self.options.sounds.len();
        self.options.sounds.extend(sounds);
        self.options.sounds.sort();
        self.options.sounds.dedup();
        self.wizard.refresh_schema(authoring_form(self.kind, &self.options));
        self.clamp_focus();
        let added = self.options.sounds.len() - before;
        info!(added, "sound list merged");
        if self.status.is_none() {
            self.status = Some(Status::Info(format!("{added} sounds available")));
        }
    }

    // --- Input -------------------------------------------------------------------------------

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if self.edit.is_some() {
            self.handle_edit_key(key);
        } else {
            self.handle_nav_key(key);
        }
    }

    pub fn handle_paste(&mut self, text: &str) {
        if let Some(edit) = self.edit.as_mut() {
            for c in text.chars().filter(|c| !c.is_control()) {
                edit.input.handle(InputRequest::InsertChar(c));
            }
        }
    }

    fn handle_edit_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.stop_editing(),
            KeyCode::Enter => self.commit_edit(),
            KeyCode::Tab => self.complete_texture(),
            _ => {
                if let Some(edit) = self.edit.as_mut() {
                    edit.input.handle_event(&Event::Key(key));
                }
            }
        }
    }

    fn handle_nav_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('s') if ctrl => self.submit(),
            KeyCode::Char('c') if ctrl => {
                let result = self.wizard.cancel();
                self.after(result);
            }
            KeyCode::Esc => {
                let result = self.wizard.cancel();
                self.after(result);
            }
            KeyCode::Up => self.focus = self.focus.saturating_sub(1),
            KeyCode::Down => {
                if self.focus + 1 < self.field_count() {
                    self.focus += 1;
                }
            }
            KeyCode::Tab => {
                let result = self.wizard.next();
                self.after(result);
            }
            KeyCode::BackTab => {
                let result = self.wizard.back();
                self.after(result);
            }
            KeyCode::Enter => self.activate(),
            KeyCode::Left => self.cycle(false),
            KeyCode::Right | KeyCode::Char(' ') => self.cycle(true),
            KeyCode::Insert => self.begin_edit(EditMode::AddName),
            KeyCode::Delete => self.clear_focused(),
            KeyCode::Char(c @ '1'..='9') => self.jump(c as usize - '1' as usize),
            _ => {}
        }
    }

    fn focused(&self) -> Option<(String, FormField)> {
        let tab = self.wizard.active_tab()?;
        let field = tab.fields.get(self.focus)?;
        Some((tab.id.clone(), field.clone()))
    }

    fn field_count(&self) -> usize {
        self.wizard.active_tab().map_or(0, |tab| tab.fields.len())
    }

    fn clamp_focus(&mut self) {
        let count = self.field_count();
        if self.focus >= count {
            self.focus = count.saturating_sub(1);
        }
    }

    fn after(&mut self, result: Result<Transition, Blocked>) {
        match result {
            Ok(Transition::Moved { from, to }) => {
                debug!(from, to, "tab changed");
                self.focus = 0;
                self.show_problems = false;
                self.status = None;
            }
            Ok(Transition::Updated { visibility_changed }) => {
                if visibility_changed {
                    self.clamp_focus();
                }
            }
            Ok(_) => {}
            Err(blocked) => {
                debug!(%blocked, "intent blocked");
                self.show_problems = true;
                self.status = Some(Status::Error(blocked.to_string()));
            }
        }
    }

    fn submit(&mut self) {
        match self.wizard.submit() {
            Ok(result) => {
                info!(kind = %self.kind, "entry submitted");
                self.submitted = Some(result);
            }
            Err(blocked) => self.after(Err(blocked)),
        }
    }

    fn jump(&mut self, position: usize) {
        let Some(id) = self.wizard.visible_tabs().nth(position).map(|tab| tab.id.clone()) else {
            return;
        };
        let result = self.wizard.jump_to(&id);
        self.after(result);
    }

    fn activate(&mut self) {
        let Some((_, field)) = self.focused() else {
            return;
        };
        if field.kind == FieldKind::Bool {
            self.cycle(true);
        } else {
            self.begin_edit(EditMode::Replace);
        }
    }

    fn cycle(&mut self, forward: bool) {
        let Some((tab, field)) = self.focused() else {
            return;
        };
        let current = self.wizard.state().get(&tab, &field.name);
        let value = match field.kind {
            FieldKind::Bool => Some(registry::toggle(current)),
            FieldKind::Select | FieldKind::OpenSelect => {
                registry::cycle_option(&field, current.and_then(FieldValue::as_text), forward)
                    .map(FieldValue::Text)
            }
            _ => None,
        };
        if let Some(value) = value {
            let result = self.wizard.set(&tab, &field.name, value);
            self.after(result);
        }
    }

    fn clear_focused(&mut self) {
        let Some((tab, field)) = self.focused() else {
            return;
        };
        let value = match field.kind {
            FieldKind::LocalizedName => {
                let mut names = self.names_of(&tab, &field);
                names.pop();
                FieldValue::Names(names)
            }
            FieldKind::Bool => FieldValue::Flag(false),
            _ => FieldValue::text(""),
        };
        let result = self.wizard.set(&tab, &field.name, value);
        self.after(result);
    }

    fn names_of(&self, tab: &str, field: &FormField) -> forms::LocalizedNames {
        self.wizard
            .state()
            .get(tab, &field.name)
            .and_then(FieldValue::as_names)
            .cloned()
            .unwrap_or_default()
    }

    fn begin_edit(&mut self, mode: EditMode) {
        let Some((tab, field)) = self.focused() else {
            return;
        };
        if field.kind == FieldKind::Bool
            || (mode == EditMode::AddName && field.kind != FieldKind::LocalizedName)
        {
            return;
        }
        let value = match mode {
            EditMode::Replace => {
                registry::display_value(&field, self.wizard.state().get(&tab, &field.name))
            }
            EditMode::AddName => String::new(),
        };
        self.suggestions = match (&field.kind, &self.textures) {
            (FieldKind::Texture { folders }, Some(lister)) => {
                texture::suggestions(folders, lister.as_ref())
            }
            _ => Vec::new(),
        };
        self.status = None;
        self.edit = Some(LineEdit {
            input: Input::default().with_value(value),
            mode,
        });
    }

    fn stop_editing(&mut self) {
        self.edit = None;
        self.suggestions.clear();
    }

    fn commit_edit(&mut self) {
        let Some((tab, field)) = self.focused() else {
            self.stop_editing();
            return;
        };
        let Some(edit) = self.edit.as_ref() else {
            return;
        };
        let raw = edit.input.value();
        let parsed = match edit.mode {
            EditMode::Replace => registry::parse_input(&field, raw),
            EditMode::AddName => match registry::parse_name_entry(raw) {
                Ok((_, name)) if name.is_empty() => Err("the name must not be empty".to_string()),
                Ok((lang, name)) => {
                    let mut names = self.names_of(&tab, &field);
                    names.set(lang, name);
                    Ok(FieldValue::Names(names))
                }
                Err(message) => Err(message),
            },
        };
        match parsed {
            Ok(value) => {
                self.stop_editing();
                let result = self.wizard.set(&tab, &field.name, value);
                self.after(result);
            }
            Err(message) => self.status = Some(Status::Error(message)),
        }
    }

    fn complete_texture(&mut self) {
        let Some(edit) = self.edit.as_mut() else {
            return;
        };
        let current = edit.input.value();
        let matches = texture::complete(current, &self.suggestions);
        if let Some(prefix) = texture::common_prefix(&matches) {
            if prefix.len() > current.len() {
                edit.input = Input::default().with_value(prefix);
            }
        }
    }

    // --- Rendering ---------------------------------------------------------------------------

    pub fn draw(&self, frame: &mut Frame) {
        let [header, body, status, help] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        let reachable = |pos: usize| {
            self.wizard
                .visible_tabs()
                .nth(pos)
                .is_some_and(|tab| self.wizard.can_jump_to(&tab.id))
        };
        let tabs = registry::tab_header(
            self.wizard.schema(),
            self.wizard.visible_indices(),
            self.wizard.active_position(),
            reachable,
        );
        frame.render_widget(
            Paragraph::new(tabs).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" New {} ", self.kind)),
            ),
            header,
        );

        let mut lines: Vec<Line<'static>> = Vec::new();
        let mut focus_row = 0;
        let mut cursor = None;
        if let Some(tab) = self.wizard.active_tab() {
            lines.push(Line::from(tab.title.clone()).bold());
            lines.push(Line::default());
            let problem = self
                .show_problems
                .then(|| tab.first_problem(self.wizard.state()))
                .flatten();
            for (idx, field) in tab.fields.iter().enumerate() {
                let focused = idx == self.focus;
                let editing = self.edit.as_ref().filter(|_| focused);
                if focused {
                    focus_row = lines.len();
                    cursor = editing.map(|edit| {
                        (lines.len(), label_width(field) + edit.input.visual_cursor())
                    });
                }
                let message = problem
                    .as_ref()
                    .filter(|(blocking, _)| blocking.name == field.name)
                    .map(|(_, message)| message.as_str());
                let view = FieldView {
                    focused,
                    editing: editing.map(|edit| edit.input.value()),
                    problem: message,
                };
                let value = self.wizard.state().get(&tab.id, &field.name);
                lines.extend(registry::field_lines(field, value, view));
                if let Some(edit) = editing {
                    lines.extend(self.suggestion_lines(edit.input.value()));
                }
            }
        }

        let inner_height = usize::from(body.height.saturating_sub(2));
        let scroll = focus_row.saturating_sub(inner_height.saturating_sub(2));
        frame.render_widget(
            Paragraph::new(lines)
                .block(Block::default().borders(Borders::ALL))
                .scroll((scroll as u16, 0)),
            body,
        );
        if let Some((row, col)) = cursor {
            let row = row.saturating_sub(scroll);
            if row < inner_height {
                frame.set_cursor_position((body.x + 1 + col as u16, body.y + 1 + row as u16));
            }
        }

        frame.render_widget(Paragraph::new(self.status_line()), status);
        frame.render_widget(Paragraph::new(self.help_line()).fg(Color::DarkGray), help);
    }

    fn suggestion_lines(&self, prefix: &str) -> Vec<Line<'static>> {
        let folders = match self.focused() {
            Some((_, FormField { kind: FieldKind::Texture { folders }, .. })) => folders,
            _ => Vec::new(),
        };
        let matches = texture::complete(prefix, &self.suggestions);
        let mut lines: Vec<Line<'static>> = matches
            .iter()
            .take(MAX_SUGGESTIONS)
            .map(|candidate| {
                let shown = texture::display_name(&folders, candidate);
                Line::from(format!("    {shown}")).fg(Color::DarkGray)
            })
            .collect();
        if matches.len() > MAX_SUGGESTIONS {
            let more = matches.len() - MAX_SUGGESTIONS;
            lines.push(Line::from(format!("    … {more} more")).fg(Color::DarkGray));
        }
        lines
    }

    fn status_line(&self) -> Line<'static> {
        match &self.status {
            Some(Status::Error(message)) => {
                Line::from(Span::styled(message.clone(), Style::default().fg(Color::Red)))
            }
            Some(Status::Info(message)) => {
                Line::from(Span::styled(message.clone(), Style::default().fg(Color::Green)))
            }
            None if self.sounds.is_some() => {
                Line::from("loading sound list…").fg(Color::DarkGray)
            }
            None => Line::default(),
        }
    }

    fn help_line(&self) -> Line<'static> {
        let text = match &self.edit {
            Some(_) if !self.suggestions.is_empty() => "Enter save · Esc discard · Tab complete",
            Some(_) => "Enter save · Esc discard",
            None if self.wizard.is_last() => concat!(
                "↑↓ field · Enter edit · ←→ choose · Ins/Del name · ",
                "Shift+Tab back · Ctrl+S save · Esc cancel"
            ),
            None => concat!(
                "↑↓ field · Enter edit · ←→ choose · Ins/Del name · ",
                "Tab next · 1-9 jump · Esc cancel"
            ),
        };
        Line::from(text)
    }
}

fn label_width(field: &FormField) -> usize {
    field.label.chars().count() + usize::from(field.required) + 2
}

async fn next_sounds(rx: &mut Option<mpsc::Receiver<Vec<String>>>) -> Option<Vec<String>> {
    match rx {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}
