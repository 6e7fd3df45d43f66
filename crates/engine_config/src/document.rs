//! Format-preserving configuration document.
//!
//! Edits go through the lossless syntax tree of `yaml-edit`: only the entry
//! being inserted, replaced or removed changes, everything else (comments,
//! blank lines, quoting, key order of unrelated sections, a leading BOM or
//! `%YAML` directive) is written back byte for byte.
//!
//! The tree is not `Send`, so the document keeps its text and opens a fresh
//! tree for every structural operation. A `serde_yaml` view of the same text
//! backs typed reads, and every edit is parsed again and compared with the
//! expected value before it is committed.

use std::fmt;
use std::str::FromStr;

use forms::catalog::BASE_MATERIALS;
use forms::{EntityKind, OptionLists};
use serde_yaml::Value;
use tracing::{debug, trace};
use yaml_edit::{Mapping as Entries, ScalarValue, Sequence, YamlFile, YamlNode};

use crate::errors::DocumentError;
use crate::records::Record;

/// What `upsert` did with the entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Inserted,
    Replaced,
}

#[derive(Debug, Clone)]
pub struct ConfigDocument {
    text: String,
    value: Value,
}

impl ConfigDocument {
    /// Parse a document. The root must be a block mapping (or empty).
    pub fn parse(text: &str) -> Result<Self, DocumentError> {
        let value = parse_value(text)?;
        if !matches!(value, Value::Mapping(_) | Value::Null) {
            return Err(DocumentError::Layout("the root is not a mapping".into()));
        }
        let file = open(text)?;
        let sections = file
            .document()
            .and_then(|doc| doc.as_mapping())
            .map_or(0, |root| root.len());
        debug!(sections, bytes = text.len(), "config document parsed");
        Ok(Self {
            text: text.to_string(),
            value,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    /// Parsed view of the whole document.
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn sections(&self) -> Vec<String> {
        self.root()
            .map(|root| root.keys().filter_map(|key| key_text(&key)).collect())
            .unwrap_or_default()
    }

    /// Entry keys of a section, in document order. Empty if the section is
    /// missing or not a mapping.
    pub fn keys(&self, section: &str) -> Vec<String> {
        self.root()
            .and_then(|root| root.get_mapping(section))
            .map(|entries| entries.keys().filter_map(|key| key_text(&key)).collect())
            .unwrap_or_default()
    }

    pub fn get(&self, section: &str, key: &str) -> Option<&Value> {
        self.value.get(section)?.as_mapping()?.get(key)
    }

    pub fn contains(&self, section: &str, key: &str) -> bool {
        self.get(section, key).is_some()
    }

    /// Read an entry back as a typed record.
    pub fn record(&self, kind: EntityKind, key: &str) -> Result<Option<Record>, DocumentError> {
        match self.get(kind.section(), key) {
            Some(value) => Ok(Some(Record::from_value(kind, value.clone())?)),
            None => Ok(None),
        }
    }

    /// Option lists derived from the document itself: known item ids and
    /// materials (built-in base materials first). Sounds come from elsewhere.
    pub fn option_lists(&self) -> OptionLists {
        let mut materials: Vec<String> = BASE_MATERIALS.iter().map(|m| m.to_string()).collect();
        for key in self.keys(EntityKind::Material.section()) {
            if !materials.contains(&key) {
                materials.push(key);
            }
        }
        OptionLists {
            materials,
            items: self.keys(EntityKind::Item.section()),
            sounds: Vec::new(),
        }
    }

    /// Insert `key` into `section`, or replace its value if it exists.
    ///
    /// A missing section is appended at the end of the document; a section
    /// that is not a block mapping (flow style, scalar, empty) is rewritten
    /// as one.
    pub fn upsert(
        &mut self,
        section: &str,
        key: &str,
        value: &Value,
    ) -> Result<Upsert, DocumentError> {
        let outcome = if self.contains(section, key) {
            Upsert::Replaced
        } else {
            Upsert::Inserted
        };

        let mut expected = self.value.as_mapping().cloned().unwrap_or_default();
        let mut entries = match expected.get(section) {
            Some(Value::Mapping(m)) => m.clone(),
            _ => serde_yaml::Mapping::new(),
        };
        entries.insert(Value::String(key.to_string()), value.clone());
        expected.insert(
            Value::String(section.to_string()),
            Value::Mapping(entries.clone()),
        );

        let file = open(&self.text)?;
        let doc = file.ensure_document();
        let block = doc
            .as_mapping()
            .and_then(|root| root.get_mapping(section))
            .filter(|existing| !existing.is_flow_style());
        match block {
            Some(existing) => Node::from_value(value)?.set_in(&existing, key),
            None => {
                trace!(section, "section is missing or not a block mapping, writing it whole");
                let node = Node::from_value(&Value::Mapping(entries))?;
                let written = match &node {
                    Node::Mapping(m) => doc.set(section, m),
                    Node::Sequence(s) => doc.set(section, s),
                    Node::Scalar(s) => doc.set(section, s),
                };
                if !written {
                    return Err(DocumentError::Layout("the root is not a mapping".into()));
                }
            }
        }

        let text = match_line_endings(&self.text, file.to_string());
        self.commit(text, Value::Mapping(expected), section, key)?;
        debug!(section, key, ?outcome, "entry upserted");
        Ok(outcome)
    }

    /// Remove one entry. Returns `false` if there was nothing to remove.
    pub fn remove(&mut self, section: &str, key: &str) -> Result<bool, DocumentError> {
        if !self.contains(section, key) {
            return Ok(false);
        }
        let mut expected = self.value.as_mapping().cloned().unwrap_or_default();
        if let Some(Value::Mapping(entries)) = expected.get_mut(section) {
            entries.shift_remove(key);
        }

        let file = open(&self.text)?;
        let entries = file
            .document()
            .and_then(|doc| doc.as_mapping())
            .and_then(|root| root.get_mapping(section))
            .ok_or_else(|| {
                DocumentError::Layout(format!("section {section} could not be located"))
            })?;
        if entries.remove(key).is_none() {
            return Err(DocumentError::Layout(format!(
                "entry {section}.{key} could not be located"
            )));
        }

        let text = match_line_endings(&self.text, file.to_string());
        self.commit(text, Value::Mapping(expected), section, key)?;
        debug!(section, key, "entry removed");
        Ok(true)
    }

    fn root(&self) -> Option<Entries> {
        let file = YamlFile::from_str(&self.text).ok()?;
        file.document()?.as_mapping()
    }

    fn commit(
        &mut self,
        text: String,
        expected: Value,
        section: &str,
        key: &str,
    ) -> Result<(), DocumentError> {
        let rejected = |reason: String| DocumentError::Rejected {
            section: section.to_string(),
            key: key.to_string(),
            reason,
        };
        let value = parse_value(&text).map_err(|err| rejected(err.to_string()))?;
        if value != expected {
            return Err(rejected(
                "the edited text does not parse to the expected value".into(),
            ));
        }
        self.text = text;
        self.value = value;
        Ok(())
    }
}

impl fmt::Display for ConfigDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Open the syntax tree and check that it has the one shape we edit: a
/// single document whose root is a block mapping, or nothing at all.
fn open(text: &str) -> Result<YamlFile, DocumentError> {
    let file = YamlFile::from_str(text)?;
    let mut documents = file.documents();
    let first = documents.next();
    if documents.next().is_some() {
        return Err(DocumentError::Layout(
            "multiple documents are not supported".into(),
        ));
    }
    if let Some(root) = first.and_then(|doc| doc.as_mapping()) {
        if root.is_flow_style() {
            return Err(DocumentError::Layout(
                "flow-style root mappings are not supported".into(),
            ));
        }
    }
    Ok(file)
}

/// Documents holding nothing but comments, directives and markers parse as
/// null.
fn parse_value(text: &str) -> Result<Value, serde_yaml::Error> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let blank = text.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#') || line.starts_with('%') || line == "---"
    });
    if blank {
        return Ok(Value::Null);
    }
    serde_yaml::from_str(text)
}

/// Plain text of a key node, with quotes and escapes resolved.
fn key_text(key: &YamlNode) -> Option<String> {
    key.as_scalar().map(|scalar| scalar.as_string())
}

/// New lines come out of the tree as `\n`; a CRLF document keeps CRLF.
fn match_line_endings(original: &str, edited: String) -> String {
    let crlf = original.contains("\r\n") && !original.replace("\r\n", "").contains('\n');
    if !crlf {
        return edited;
    }
    let mut out = String::with_capacity(edited.len() + edited.len() / 16);
    let mut previous = None;
    for c in edited.chars() {
        if c == '\n' && previous != Some('\r') {
            out.push('\r');
        }
        out.push(c);
        previous = Some(c);
    }
    out
}

const GRAFT: &str = "graft";

/// A value ready to be grafted into the tree.
///
/// Collections are rendered by `serde_yaml` and parsed into a detached
/// tree; `Mapping::set` re-indents them under their new key.
enum Node {
    Mapping(Entries),
    Sequence(Sequence),
    Scalar(ScalarValue),
}

impl Node {
    fn from_value(value: &Value) -> Result<Self, DocumentError> {
        let scalar = match value {
            Value::Mapping(_) | Value::Sequence(_) => return Self::collection(value),
            Value::Tagged(tagged) => return Self::from_value(&tagged.value),
            Value::Null => ScalarValue::null(),
            Value::Bool(b) => ScalarValue::from(*b),
            Value::String(s) => ScalarValue::string(s.as_str()),
            Value::Number(n) => match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => ScalarValue::from(i),
                (None, Some(f)) if n.is_f64() => ScalarValue::from(f),
                _ => ScalarValue::parse(n.to_string()),
            },
        };
        Ok(Node::Scalar(scalar))
    }

    /// The value is rendered under a placeholder key so the detached node
    /// sits at a known column; `set` shifts it from there to its target.
    fn collection(value: &Value) -> Result<Self, DocumentError> {
        let mut wrapper = serde_yaml::Mapping::new();
        wrapper.insert(Value::String(GRAFT.into()), value.clone());
        let rendered = serde_yaml::to_string(&wrapper)?;
        let file = YamlFile::from_str(&rendered)?;
        let node = file
            .document()
            .and_then(|doc| doc.as_mapping())
            .and_then(|root| root.get(GRAFT))
            .ok_or_else(|| DocumentError::Layout("rendered value could not be read back".into()))?;
        if let Some(mapping) = node.as_mapping() {
            return Ok(Node::Mapping(mapping.clone()));
        }
        node.as_sequence()
            .map(|sequence| Node::Sequence(sequence.clone()))
            .ok_or_else(|| DocumentError::Layout("rendered value is not a collection".into()))
    }

    fn set_in(&self, target: &Entries, key: &str) {
        match self {
            Node::Mapping(m) => target.set(key, m),
            Node::Sequence(s) => target.set(key, s),
            Node::Scalar(s) => target.set(key, s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn crlf_documents_keep_crlf() {
        assert_eq!(
            match_line_endings("a: 1\r\n", "a: 1\r\nb: 2\n".into()),
            "a: 1\r\nb: 2\r\n"
        );
        assert_eq!(match_line_endings("a: 1\n", "a: 1\nb: 2\n".into()), "a: 1\nb: 2\n");
        // mixed endings are left as they are
        assert_eq!(
            match_line_endings("a: 1\r\nc: 3\n", "a: 1\r\nc: 3\nb: 2\n".into()),
            "a: 1\r\nc: 3\nb: 2\n"
        );
    }

    #[test]
    fn blank_documents_parse_as_null() {
        assert_eq!(parse_value("").unwrap(), Value::Null);
        assert_eq!(parse_value("\u{feff}# nothing yet\n").unwrap(), Value::Null);
        assert_eq!(parse_value("%YAML 1.2\n---\n").unwrap(), Value::Null);
    }

    #[test]
    fn keys_are_read_without_quotes() {
        let doc = ConfigDocument::parse("items:\n  'ruby': {}\n  \"it's\": {}\n").unwrap();
        assert_eq!(doc.keys("items"), vec!["ruby", "it's"]);
    }
}
