//! Typed values held by a `FormState`.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Ordered language → display name map (`en_us: "Iron Sword"`).
///
/// Entry order is the order the user added them in; it is kept when the map
/// is written into the configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalizedNames(Vec<(String, String)>);

impl LocalizedNames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, lang: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(l, _)| l == lang)
            .map(|(_, name)| name.as_str())
    }

    /// Insert or replace the name for `lang`, keeping the entry's position.
    pub fn set(&mut self, lang: impl Into<String>, name: impl Into<String>) {
        let lang = lang.into();
        let name = name.into();
        match self.0.iter_mut().find(|(l, _)| *l == lang) {
            Some(entry) => entry.1 = name,
            None => self.0.push((lang, name)),
        }
    }

    /// Rename a language key in place. Renaming to an empty key removes the entry.
    pub fn rename(&mut self, from: &str, to: &str) {
        if to.is_empty() {
            self.remove(from);
            return;
        }
        if let Some(entry) = self.0.iter_mut().find(|(l, _)| l == from) {
            entry.0 = to.to_string();
        }
    }

    pub fn remove(&mut self, lang: &str) -> Option<String> {
        let idx = self.0.iter().position(|(l, _)| l == lang)?;
        Some(self.0.remove(idx).1)
    }

    pub fn pop(&mut self) -> Option<(String, String)> {
        self.0.pop()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(l, n)| (l.as_str(), n.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LocalizedNames {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut names = LocalizedNames::new();
        for (lang, name) in iter {
            names.set(lang, name);
        }
        names
    }
}

impl Serialize for LocalizedNames {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (lang, name) in &self.0 {
            map.serialize_entry(lang, name)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for LocalizedNames {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct NamesVisitor;

        impl<'de> Visitor<'de> for NamesVisitor {
            type Value = LocalizedNames;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of language code to name")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut names = LocalizedNames::new();
                while let Some((lang, name)) = access.next_entry::<String, String>()? {
                    names.set(lang, name);
                }
                Ok(names)
            }
        }

        deserializer.deserialize_map(NamesVisitor)
    }
}

/// A single captured field value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
    Names(LocalizedNames),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FieldValue::Flag(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_names(&self) -> Option<&LocalizedNames> {
        match self {
            FieldValue::Names(n) => Some(n),
            _ => None,
        }
    }

    /// Presence rule used by required fields: anything but the empty string
    /// (or an empty name map). `false` and `"0"` are present.
    pub fn is_present(&self) -> bool {
        match self {
            FieldValue::Text(s) => !s.is_empty(),
            FieldValue::Flag(_) => true,
            FieldValue::Names(n) => !n.is_empty(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

impl From<LocalizedNames> for FieldValue {
    fn from(value: LocalizedNames) -> Self {
        FieldValue::Names(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presence_rules() {
        assert!(!FieldValue::text("").is_present());
        assert!(FieldValue::text("0").is_present());
        assert!(FieldValue::Flag(false).is_present());
        assert!(!FieldValue::Names(LocalizedNames::new()).is_present());
    }

    #[test]
    fn names_keep_insertion_order_and_rename_in_place() {
        let mut names: LocalizedNames = [("en_us", "Sword"), ("de_de", "Schwert")]
            .into_iter()
            .collect();
        names.set("fr_fr", "Épée");
        names.rename("de_de", "de_at");
        let langs: Vec<&str> = names.iter().map(|(l, _)| l).collect();
        assert_eq!(langs, vec!["en_us", "de_at", "fr_fr"]);

        names.rename("fr_fr", "");
        assert_eq!(names.len(), 2);
        assert_eq!(names.get("de_at"), Some("Schwert"));
    }
}
