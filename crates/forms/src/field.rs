//! Form field kinds & metadata.
//!
//! This module defines the declarative pieces of a wizard tab:
//! - `FieldKind`: closed set of supported input kinds
//! - `FormField`: metadata + optional validator for a single field
//!
//! Responsibilities here are data-centric. Mutation lives in `state.rs` /
//! `wizard.rs`; rendering and input parsing live in `registry.rs`.
//!
//! Usage:
//! ```ignore
//! use forms::{FormField, FieldKind};
//!
//! let field = FormField::new("durability", "Durability", FieldKind::Int)
//!     .placeholder("432");
//! ```

use std::fmt;
use std::sync::Arc;

/// A single input kind supported by the wizard.
///
/// Notes:
/// - Text / Int / Float / Texture / OpenSelect are edited as a single line
/// - Int and Float keep the raw typed text; coercion happens when a record is assembled
/// - Select only accepts one of the field's `options`
/// - OpenSelect suggests `options` but accepts any text
/// - LocalizedName holds an ordered language → display name map
/// - Texture suggests paths found under `folders` (see `texture.rs`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Select,
    OpenSelect,
    Int,
    Float,
    Bool,
    LocalizedName,
    Texture { folders: Vec<String> },
}

impl FieldKind {
    pub fn texture<I, S>(folders: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldKind::Texture {
            folders: folders.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldKind::Int | FieldKind::Float)
    }

    /// Kinds that need a non-empty `options` list to be usable.
    pub fn requires_options(&self) -> bool {
        matches!(self, FieldKind::Select)
    }
}

pub type Validator = Arc<dyn Fn(&str) -> Result<(), String> + Send + Sync>;

/// Declarative description of a form field.
///
/// `validator` (optional):
///   Receives the current textual value and returns
///     Ok(())          -> value accepted
///     Err(message)    -> validation message (blocks navigation, shown inline)
#[derive(Clone)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    pub options: Vec<String>,
    pub placeholder: Option<String>,
    pub validator: Option<Validator>,
}

impl FormField {
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            required: false,
            options: Vec::new(),
            placeholder: None,
            validator: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn validator(
        mut self,
        f: impl Fn(&str) -> Result<(), String> + Send + Sync + 'static,
    ) -> Self {
        self.validator = Some(Arc::new(f));
        self
    }

    /// True if the field is edited through a single-line text editor.
    pub fn is_textual(&self) -> bool {
        matches!(
            self.kind,
            FieldKind::Text
                | FieldKind::OpenSelect
                | FieldKind::Int
                | FieldKind::Float
                | FieldKind::Texture { .. }
        )
    }

    /// Run the attached validator (if any) against a textual value.
    pub fn validate(&self, value: &str) -> Result<(), String> {
        match &self.validator {
            Some(check) => check(value),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormField")
            .field("name", &self.name)
            .field("label", &self.label)
            .field("kind", &self.kind)
            .field("required", &self.required)
            .field("options", &self.options.len())
            .field("validator", &self.validator.is_some())
            .finish()
    }
}
