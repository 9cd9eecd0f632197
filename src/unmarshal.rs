//! Tree → typed record unmarshalling.
//!
//! For every field in a record's descriptor table, all sections (or keys)
//! matching the resolved field name are collected from the decoded tree, in
//! tree order. Scalar fields follow last-occurrence-wins; list fields
//! accumulate across all matching keys, where an empty assignment resets
//! everything gathered so far, comments included. Sections and keys no field
//! claims land in the record's extension containers when it exposes them, and
//! are dropped otherwise.

use std::collections::HashSet;

use crate::file::{File, Section};
use crate::schema::{parse_bool, KeyBinding, UnitFile, UnitSection};

/// Builds a file-level record from a decoded [`File`] tree.
pub fn from_file<T: UnitFile>(file: &File) -> T {
    let mut record = T::default();
    let fields = T::section_fields();
    for field in &fields {
        let matches = file.sections_by_name(&field.config.name);
        field.unmarshal_from(&mut record, &matches);
    }

    let known: HashSet<&str> = fields.iter().map(|f| f.config.name.as_str()).collect();
    for section in &file.sections {
        if known.contains(section.name.as_str()) {
            continue;
        }
        let Some(list) = record.unknown_sections_mut() else {
            break;
        };
        list.push(section.clone());
    }
    record
}

/// Builds a section-level record from one decoded [`Section`].
pub(crate) fn record_from_section<S: UnitSection>(section: &Section) -> S {
    let mut record = S::default();
    let fields = S::key_fields();
    for field in &fields {
        let keys = section.keys_by_name(&field.config.name);
        let Some(last) = keys.last() else {
            continue;
        };

        let mut comment = String::new();
        match &field.binding {
            KeyBinding::Text { set, .. } => {
                set(&mut record, last.value.clone());
                comment = last.comment.clone();
            }

            KeyBinding::OptionalText { set, .. } => {
                if last.value.is_empty() && field.config.omit_empty {
                    continue;
                }
                set(&mut record, Some(last.value.clone()));
            }

            KeyBinding::Flag { set, .. } => {
                if last.value.is_empty() && field.config.omit_empty {
                    continue;
                }
                // An unrecognized literal leaves the field unset.
                let Some(value) = parse_bool(&last.value) else {
                    continue;
                };
                set(&mut record, Some(value));
            }

            KeyBinding::List { set, .. } => {
                let mut values = Vec::new();
                for key in &keys {
                    if key.value.is_empty() {
                        // A key with no value resets all previously read
                        // values, and their comments no longer apply.
                        values.clear();
                        comment.clear();
                        continue;
                    }
                    if field.config.ws_list {
                        values.extend(key.value.split_whitespace().map(str::to_string));
                    } else {
                        values.push(key.value.clone());
                    }
                    if !key.comment.is_empty() {
                        if !comment.is_empty() {
                            comment.push('\n');
                        }
                        comment.push_str(&key.comment);
                    }
                }
                set(&mut record, values);
            }
        }

        if comment.is_empty() {
            continue;
        }
        if let Some(comments) = record.key_comments_mut() {
            comments.insert(field.config.name.clone(), comment);
        }
    }

    let known: HashSet<&str> = fields.iter().map(|f| f.config.name.as_str()).collect();
    for key in &section.keys {
        if known.contains(key.name.as_str()) {
            continue;
        }
        let Some(list) = record.unknown_keys_mut() else {
            break;
        };
        list.push(key.clone());
    }

    record.set_comment(section.comment.clone());
    record
}
