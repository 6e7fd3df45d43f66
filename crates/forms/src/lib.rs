//! Declarative multi-step forms.
//!
//! A `FormSchema` describes the tabs of a wizard; a `Wizard` walks a user
//! through the visible ones and hands out a `FormResult` on submit. Nothing
//! in here touches the terminal or the file system.

pub mod catalog;
pub mod condition;
pub mod entity;
pub(crate) mod errors;
pub mod field;
pub mod registry;
pub mod result;
pub mod schema;
pub mod state;
pub mod texture;
pub mod value;
pub mod visibility;
pub mod wizard;

pub use condition::Condition;
pub use entity::{form_for, EntityKind, OptionLists};
pub use errors::{Blocked, SchemaError};
pub use field::{FieldKind, FormField, Validator};
pub use result::FormResult;
pub use schema::{FormSchema, FormTab};
pub use state::{FormState, TabValues};
pub use value::{FieldValue, LocalizedNames};
pub use wizard::{Intent, Phase, Transition, Wizard};
