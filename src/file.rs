//! In-memory representation of a unit configuration file.
//!
//! A [`File`] is an ordered sequence of [`Section`]s; a [`Section`] is an
//! ordered sequence of [`Key`]s plus an optional comment. Order is load
//! bearing: repeated sections and repeated keys are valid, meaningful, and
//! must survive a decode/encode round trip unchanged.
//!
//! The module also provides the opt-in extension containers a typed record
//! can embed to round-trip data its declared fields do not cover:
//! [`SectionList`] for unmatched sections, [`KeyList`] for unmatched keys, and
//! [`KeyComments`] for comments on fields without a dedicated comment slot.
//!
//! ## Examples
//!
//! ```rust
//! use unitfile::file::{File, Key, Section};
//!
//! let file = File {
//!     sections: vec![Section {
//!         name: "Network".to_string(),
//!         comment: String::new(),
//!         keys: vec![Key::new("Address", "10.0.0.1/8")],
//!     }],
//! };
//! assert_eq!(file.sections_by_name("Network").len(), 1);
//! assert!(file.sections_by_name("Route").is_empty());
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Root of the tree: all sections of a configuration file, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    pub sections: Vec<Section>,
}

impl File {
    /// Returns all sections with the given name, preserving their order.
    #[must_use]
    pub fn sections_by_name(&self, name: &str) -> Vec<&Section> {
        self.sections
            .iter()
            .filter(|section| section.name == name)
            .collect()
    }
}

/// A named block of directives delimited by a `[Name]` header line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    /// Comment lines preceding the header, `\n`-separated, markers stripped.
    pub comment: String,
    pub keys: Vec<Key>,
}

impl Section {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Section {
            name: name.into(),
            comment: String::new(),
            keys: Vec::new(),
        }
    }

    /// Returns all keys with the given name, preserving their order.
    #[must_use]
    pub fn keys_by_name(&self, name: &str) -> Vec<&Key> {
        self.keys.iter().filter(|key| key.name == name).collect()
    }
}

/// A single `name=value` directive. The value may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Key {
    pub name: String,
    pub value: String,
    /// Comment lines preceding the directive, `\n`-separated, markers stripped.
    pub comment: String,
}

impl Key {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Key {
            name: name.into(),
            value: value.into(),
            comment: String::new(),
        }
    }
}

/// Extension container for sections not claimed by any declared field.
///
/// A file-level record that exposes this container through
/// [`UnitFile::unknown_sections`](crate::schema::UnitFile::unknown_sections)
/// keeps unmatched sections on unmarshal and appends them after all
/// structured sections on marshal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionList(Vec<Section>);

impl SectionList {
    pub fn push(&mut self, section: Section) {
        self.0.push(section);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Section> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Section>> for SectionList {
    fn from(sections: Vec<Section>) -> Self {
        SectionList(sections)
    }
}

impl<'a> IntoIterator for &'a SectionList {
    type Item = &'a Section;
    type IntoIter = std::slice::Iter<'a, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Extension container for keys not claimed by any declared field of a
/// section record. The section-scope counterpart of [`SectionList`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyList(Vec<Key>);

impl KeyList {
    pub fn push(&mut self, key: Key) {
        self.0.push(key);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Key> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Key>> for KeyList {
    fn from(keys: Vec<Key>) -> Self {
        KeyList(keys)
    }
}

impl<'a> IntoIterator for &'a KeyList {
    type Item = &'a Key;
    type IntoIter = std::slice::Iter<'a, Key>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Comment side table for fields without their own comment slot, keyed by
/// resolved key name. Backed by an insertion-ordered map so iteration stays
/// deterministic.
///
/// # Examples
///
/// ```rust
/// use unitfile::file::KeyComments;
///
/// let mut comments = KeyComments::default();
/// comments.insert("Name", "matched by driver");
/// assert_eq!(comments.get("Name"), Some("matched by driver"));
/// comments.remove("Name");
/// assert_eq!(comments.get("Name"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyComments {
    comments: IndexMap<String, String>,
}

impl KeyComments {
    /// Returns the comment registered for the given key name.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.comments.get(key).map(String::as_str)
    }

    /// Registers a comment for the given key name, replacing any previous one.
    pub fn insert(&mut self, key: impl Into<String>, comment: impl Into<String>) {
        self.comments.insert(key.into(), comment.into());
    }

    /// Removes the comment registered for the given key name.
    pub fn remove(&mut self, key: &str) {
        self.comments.shift_remove(key);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_preserve_order_and_duplicates() {
        let section = Section {
            name: "Network".to_string(),
            comment: String::new(),
            keys: vec![
                Key::new("Address", "10.0.0.1/8"),
                Key::new("Gateway", "10.0.0.254"),
                Key::new("Address", "10.0.0.2/8"),
            ],
        };
        let addresses = section.keys_by_name("Address");
        assert_eq!(addresses.len(), 2);
        assert_eq!(addresses[0].value, "10.0.0.1/8");
        assert_eq!(addresses[1].value, "10.0.0.2/8");
    }

    #[test]
    fn tree_model_serializes_with_serde() {
        let file = File {
            sections: vec![Section {
                name: "Match".to_string(),
                comment: "match block".to_string(),
                keys: vec![Key::new("Name", "eth0")],
            }],
        };
        let json = serde_json::to_string(&file).unwrap();
        let back: File = serde_json::from_str(&json).unwrap();
        assert_eq!(file, back);
    }

    #[test]
    fn key_comments_replace_on_insert() {
        let mut comments = KeyComments::default();
        comments.insert("Gateway", "first");
        comments.insert("Gateway", "second");
        assert_eq!(comments.get("Gateway"), Some("second"));
    }
}
