//! Lost Engine `config.yml` model.
//!
//! - `document`: format-preserving YAML document with structural upsert/remove
//! - `records`: typed item, block, material and glyph records
//! - `key`: entry key derivation
//! - `patch`: wizard results → records → document

pub mod document;
pub(crate) mod errors;
pub mod key;
pub mod patch;
pub mod records;

pub use document::{ConfigDocument, Upsert};
pub use errors::{DocumentError, PatchError};
pub use key::{derive_key, KeyCase};
pub use patch::{apply, authoring_form, Patched};
pub use records::{texture_path, Numeric, Record};
