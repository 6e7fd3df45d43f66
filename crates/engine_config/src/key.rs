//! Entry key derivation.
//!
//! The user types a free-form id ("My Custom Item"); the document stores it
//! as a sanitized key (`my_custom_item`). Materials are keyed in upper case
//! (`MY_CUSTOM_MATERIAL`), everything else in lower case.

use forms::EntityKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCase {
    Lower,
    Upper,
}

impl KeyCase {
    pub fn for_kind(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Material => KeyCase::Upper,
            _ => KeyCase::Lower,
        }
    }
}

/// Trim, fold case, drop everything but ASCII letters of that case, digits,
/// underscores and whitespace, then collapse whitespace runs into `_`.
///
/// The result may be empty; callers decide whether that is an error.
/// Applying it to its own output is a no-op.
pub fn derive_key(raw: &str, case: KeyCase) -> String {
    let folded = match case {
        KeyCase::Lower => raw.trim().to_lowercase(),
        KeyCase::Upper => raw.trim().to_uppercase(),
    };
    let allowed = |c: char| match case {
        KeyCase::Lower => c.is_ascii_lowercase(),
        KeyCase::Upper => c.is_ascii_uppercase(),
    } || c.is_ascii_digit()
        || c == '_'
        || c.is_whitespace();

    let mut key = String::with_capacity(folded.len());
    let mut in_space = false;
    for c in folded.chars().filter(|&c| allowed(c)) {
        if c.is_whitespace() {
            if !in_space {
                key.push('_');
            }
            in_space = true;
        } else {
            key.push(c);
            in_space = false;
        }
    }
    key
}

/// Validator for the id field of a wizard: refuses ids that sanitize to nothing.
pub fn id_validator(case: KeyCase) -> impl Fn(&str) -> Result<(), String> + Send + Sync + 'static {
    move |raw| {
        if derive_key(raw, case).is_empty() {
            Err(format!("\"{}\" does not contain any usable character", raw.trim()))
        } else {
            Ok(())
        }
    }
}
