//! Typed record → tree marshalling.
//!
//! Walks a record's descriptor tables in declaration order and builds a
//! [`File`] tree from them. Structured fields always come first; whatever the
//! record carries in its extension containers is appended after them, even if
//! it was interleaved in the file the record was originally read from. The
//! resulting tree renders through [`crate::ser::encode`].

use crate::file::{File, Key, Section};
use crate::schema::{render_bool, KeyBinding, UnitFile, UnitSection};

/// Builds the [`File`] tree for a file-level record.
pub fn to_file<T: UnitFile>(record: &T) -> File {
    let mut file = File::default();
    for field in T::section_fields() {
        field.marshal_into(record, &mut file.sections);
    }
    // Extension sections go strictly after all structured sections.
    if let Some(extra) = record.unknown_sections() {
        file.sections.extend(extra.iter().cloned());
    }
    file
}

/// Builds one named [`Section`] from a section-level record.
pub(crate) fn section_from_record<S: UnitSection>(name: &str, record: &S) -> Section {
    let mut section = Section::new(name);
    if let Some(comment) = record.comment() {
        section.comment = comment.to_string();
    }

    for field in S::key_fields() {
        let name = &field.config.name;
        let comment = field_comment(record, name);
        match &field.binding {
            KeyBinding::Text { get, .. } => {
                let value = get(record);
                if value.is_empty() && field.config.omit_empty {
                    continue;
                }
                section.keys.push(Key {
                    name: name.clone(),
                    value: value.to_string(),
                    comment,
                });
            }

            KeyBinding::OptionalText { get, .. } => {
                let value = get(record);
                if value.is_none() && field.config.omit_empty {
                    continue;
                }
                section.keys.push(Key {
                    name: name.clone(),
                    value: value.unwrap_or("").to_string(),
                    comment,
                });
            }

            KeyBinding::Flag { get, .. } => {
                let value = get(record);
                if value.is_none() && field.config.omit_empty {
                    continue;
                }
                section.keys.push(Key {
                    name: name.clone(),
                    value: value.map(render_bool).unwrap_or("").to_string(),
                    comment,
                });
            }

            KeyBinding::List { get, .. } if field.config.ws_list => {
                let value = get(record).join(" ");
                if value.is_empty() {
                    continue;
                }
                section.keys.push(Key {
                    name: name.clone(),
                    value,
                    comment,
                });
            }

            KeyBinding::List { get, .. } => {
                let mut comment = Some(comment);
                for value in get(record) {
                    if value.is_empty() {
                        continue;
                    }
                    section.keys.push(Key {
                        name: name.clone(),
                        value: value.clone(),
                        // Only the first emitted key carries the comment.
                        comment: comment.take().unwrap_or_default(),
                    });
                }
            }
        }
    }

    // Extension keys go strictly after all structured keys.
    if let Some(extra) = record.unknown_keys() {
        section.keys.extend(extra.iter().cloned());
    }
    section
}

fn field_comment<S: UnitSection>(record: &S, name: &str) -> String {
    record
        .key_comments()
        .and_then(|comments| comments.get(name))
        .unwrap_or_default()
        .to_string()
}
