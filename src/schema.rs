//! Field descriptors and record traits driving the generic mapper.
//!
//! The original idea behind this format is a declarative mapping between
//! `name=value` directives and the fields of plain application records. Here
//! that mapping is expressed as compile-time descriptor tables instead of
//! runtime reflection: a record type implements [`UnitSection`] (for one
//! section) or [`UnitFile`] (for a whole file) and returns an ordered list of
//! [`KeyField`]/[`SectionField`] descriptors, one per mapped field. Table
//! order is the canonical field order used by the marshaller.
//!
//! Each descriptor resolves its directive name and modifiers from a tag with
//! the syntax `name[,omitempty][,wslist]` via [`FieldConfig::resolve`]; an
//! empty name falls back to the record field's own name.
//!
//! Round-tripping of data the record does not declare is opt-in: the traits
//! carry capability hooks (`unknown_sections`, `unknown_keys`,
//! `key_comments`, `comment`/`set_comment`) that default to "not supported".
//! A record opts in by embedding the matching container from [`crate::file`]
//! and overriding the hook to expose it.
//!
//! ## Examples
//!
//! ```rust
//! use unitfile::schema::{KeyField, UnitSection};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Match {
//!     name: String,
//!     mac_addresses: Vec<String>,
//! }
//!
//! impl UnitSection for Match {
//!     fn key_fields() -> Vec<KeyField<Self>> {
//!         vec![
//!             KeyField::text("Name", "", |s: &Self| s.name.as_str(), |s, v| s.name = v),
//!             KeyField::list(
//!                 "MACAddress",
//!                 "MACAddress,wslist",
//!                 |s: &Self| s.mac_addresses.as_slice(),
//!                 |s, v| s.mac_addresses = v,
//!             ),
//!         ]
//!     }
//! }
//! ```

use crate::file::{KeyComments, KeyList, Section, SectionList};
use crate::marshal;
use crate::unmarshal;

/// Resolved mapping configuration for one record field.
///
/// # Examples
///
/// ```rust
/// use unitfile::schema::FieldConfig;
///
/// let config = FieldConfig::resolve("MACAddresses", "MACAddress,omitempty,wslist");
/// assert_eq!(config.name, "MACAddress");
/// assert!(config.omit_empty);
/// assert!(config.ws_list);
///
/// // An empty name keeps the field's own name.
/// let config = FieldConfig::resolve("Destination", ",omitempty");
/// assert_eq!(config.name, "Destination");
/// assert!(config.omit_empty);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldConfig {
    /// Directive (or section) name this field maps to.
    pub name: String,
    /// Absent or empty values are not emitted and do not count as present.
    pub omit_empty: bool,
    /// List fields collapse into one key with space-separated tokens.
    pub ws_list: bool,
}

impl FieldConfig {
    /// Resolves a field tag of the form `name[,omitempty][,wslist]`.
    ///
    /// An empty tag, or a tag with an empty name part, defaults the resolved
    /// name to `field_name`. Unrecognized modifiers are ignored.
    #[must_use]
    pub fn resolve(field_name: &str, tag: &str) -> Self {
        let mut config = FieldConfig {
            name: field_name.to_string(),
            omit_empty: false,
            ws_list: false,
        };
        if tag.is_empty() {
            return config;
        }

        let mut parts = tag.split(',');
        if let Some(name) = parts.next() {
            if !name.is_empty() {
                config.name = name.to_string();
            }
        }
        for modifier in parts {
            match modifier {
                "omitempty" => config.omit_empty = true,
                "wslist" => config.ws_list = true,
                _ => {}
            }
        }
        config
    }
}

/// Parses the boolean literal vocabulary of unit files.
///
/// `1`, `yes`, `true` and `on` are true; `0`, `no`, `false` and `off` are
/// false. Anything else is not a boolean and yields `None`.
///
/// # Examples
///
/// ```rust
/// use unitfile::schema::parse_bool;
///
/// assert_eq!(parse_bool("yes"), Some(true));
/// assert_eq!(parse_bool("off"), Some(false));
/// assert_eq!(parse_bool("maybe"), None);
/// ```
#[must_use]
pub fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "yes" | "true" | "on" => Some(true),
        "0" | "no" | "false" | "off" => Some(false),
        _ => None,
    }
}

/// Renders a boolean in the vocabulary used when writing files.
///
/// # Examples
///
/// ```rust
/// use unitfile::schema::render_bool;
///
/// assert_eq!(render_bool(true), "yes");
/// assert_eq!(render_bool(false), "no");
/// ```
#[must_use]
pub fn render_bool(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

/// A record mapping one section's directives onto typed fields.
///
/// `key_fields` returns the descriptor table; everything else is an optional
/// capability with a "not supported" default.
pub trait UnitSection: Default + Sized + 'static {
    /// Ordered descriptor table, one entry per mapped field.
    fn key_fields() -> Vec<KeyField<Self>>;

    /// Comment slot holding the section's own comment block.
    fn comment(&self) -> Option<&str> {
        None
    }

    /// Stores the decoded section comment. No-op unless the record has a
    /// comment slot.
    fn set_comment(&mut self, _comment: String) {}

    /// Comment side table for fields without their own comment slot.
    fn key_comments(&self) -> Option<&KeyComments> {
        None
    }

    fn key_comments_mut(&mut self) -> Option<&mut KeyComments> {
        None
    }

    /// Container receiving keys no declared field claims.
    fn unknown_keys(&self) -> Option<&KeyList> {
        None
    }

    fn unknown_keys_mut(&mut self) -> Option<&mut KeyList> {
        None
    }
}

/// A record mapping a whole file's sections onto typed fields.
pub trait UnitFile: Default + Sized + 'static {
    /// Ordered descriptor table, one entry per mapped field.
    fn section_fields() -> Vec<SectionField<Self>>;

    /// Container receiving sections no declared field claims.
    fn unknown_sections(&self) -> Option<&SectionList> {
        None
    }

    fn unknown_sections_mut(&mut self) -> Option<&mut SectionList> {
        None
    }
}

/// Descriptor for one key-shaped field of a section record.
pub struct KeyField<T> {
    pub config: FieldConfig,
    pub(crate) binding: KeyBinding<T>,
}

/// Typed accessors for the supported key field shapes.
pub(crate) enum KeyBinding<T> {
    /// `String`: always present; last occurrence wins on input.
    Text {
        get: fn(&T) -> &str,
        set: fn(&mut T, String),
    },
    /// `Option<String>`: presence tracked; unset renders empty unless
    /// `omitempty`.
    OptionalText {
        get: fn(&T) -> Option<&str>,
        set: fn(&mut T, Option<String>),
    },
    /// `Option<bool>`: rendered as `yes`/`no`; unparsable input literals are
    /// skipped silently.
    Flag {
        get: fn(&T) -> Option<bool>,
        set: fn(&mut T, Option<bool>),
    },
    /// `Vec<String>`: repeatable directive, one key per element or a single
    /// whitespace-joined key depending on `wslist`.
    List {
        get: fn(&T) -> &[String],
        set: fn(&mut T, Vec<String>),
    },
}

impl<T> KeyField<T> {
    /// A plain string field.
    pub fn text(field_name: &str, tag: &str, get: fn(&T) -> &str, set: fn(&mut T, String)) -> Self {
        KeyField {
            config: FieldConfig::resolve(field_name, tag),
            binding: KeyBinding::Text { get, set },
        }
    }

    /// An optional string field.
    pub fn optional_text(
        field_name: &str,
        tag: &str,
        get: fn(&T) -> Option<&str>,
        set: fn(&mut T, Option<String>),
    ) -> Self {
        KeyField {
            config: FieldConfig::resolve(field_name, tag),
            binding: KeyBinding::OptionalText { get, set },
        }
    }

    /// An optional boolean field.
    pub fn flag(
        field_name: &str,
        tag: &str,
        get: fn(&T) -> Option<bool>,
        set: fn(&mut T, Option<bool>),
    ) -> Self {
        KeyField {
            config: FieldConfig::resolve(field_name, tag),
            binding: KeyBinding::Flag { get, set },
        }
    }

    /// A repeatable string-list field. The `wslist` tag modifier selects the
    /// whitespace-joined single-key policy over one key per element.
    pub fn list(
        field_name: &str,
        tag: &str,
        get: fn(&T) -> &[String],
        set: fn(&mut T, Vec<String>),
    ) -> Self {
        KeyField {
            config: FieldConfig::resolve(field_name, tag),
            binding: KeyBinding::List { get, set },
        }
    }
}

/// Descriptor for one section-shaped field of a file record.
///
/// The nested section type is erased behind boxed accessors so that one file
/// record can mix structurally different section records in a single table.
pub struct SectionField<T: 'static> {
    pub config: FieldConfig,
    binding: SectionBinding<T>,
}

enum SectionBinding<T: 'static> {
    /// Always-present nested record: exactly one section on output, the first
    /// matching section on input.
    Single {
        write: Box<dyn Fn(&T, &str) -> Section>,
        read: Box<dyn Fn(&mut T, &Section)>,
    },
    /// `Option`-wrapped nested record: skipped entirely when unset.
    Optional {
        write: Box<dyn Fn(&T, &str) -> Option<Section>>,
        read: Box<dyn Fn(&mut T, &Section)>,
    },
    /// `Vec` of nested records: one section per element, every matching
    /// section on input.
    Repeated {
        write: Box<dyn Fn(&T, &str) -> Vec<Section>>,
        read: Box<dyn Fn(&mut T, &Section)>,
    },
}

impl<T: 'static> SectionField<T> {
    /// An always-present nested section record.
    pub fn single<S: UnitSection>(
        field_name: &str,
        tag: &str,
        get: fn(&T) -> &S,
        set: fn(&mut T, S),
    ) -> Self {
        SectionField {
            config: FieldConfig::resolve(field_name, tag),
            binding: SectionBinding::Single {
                write: Box::new(move |record, name| {
                    marshal::section_from_record(name, get(record))
                }),
                read: Box::new(move |record, section| {
                    set(record, unmarshal::record_from_section(section));
                }),
            },
        }
    }

    /// An optional nested section record.
    pub fn optional<S: UnitSection>(
        field_name: &str,
        tag: &str,
        get: fn(&T) -> Option<&S>,
        set: fn(&mut T, S),
    ) -> Self {
        SectionField {
            config: FieldConfig::resolve(field_name, tag),
            binding: SectionBinding::Optional {
                write: Box::new(move |record, name| {
                    get(record).map(|nested| marshal::section_from_record(name, nested))
                }),
                read: Box::new(move |record, section| {
                    set(record, unmarshal::record_from_section(section));
                }),
            },
        }
    }

    /// A repeatable nested section record.
    pub fn repeated<S: UnitSection>(
        field_name: &str,
        tag: &str,
        get: fn(&T) -> &[S],
        push: fn(&mut T, S),
    ) -> Self {
        SectionField {
            config: FieldConfig::resolve(field_name, tag),
            binding: SectionBinding::Repeated {
                write: Box::new(move |record, name| {
                    get(record)
                        .iter()
                        .map(|nested| marshal::section_from_record(name, nested))
                        .collect()
                }),
                read: Box::new(move |record, section| {
                    push(record, unmarshal::record_from_section(section));
                }),
            },
        }
    }

    /// Appends this field's sections, in field order, to `out`.
    pub(crate) fn marshal_into(&self, record: &T, out: &mut Vec<Section>) {
        match &self.binding {
            SectionBinding::Single { write, .. } => out.push(write(record, &self.config.name)),
            SectionBinding::Optional { write, .. } => {
                if let Some(section) = write(record, &self.config.name) {
                    out.push(section);
                }
            }
            SectionBinding::Repeated { write, .. } => {
                out.extend(write(record, &self.config.name));
            }
        }
    }

    /// Applies the matching sections of a decoded file to this field.
    pub(crate) fn unmarshal_from(&self, record: &mut T, matches: &[&Section]) {
        match &self.binding {
            SectionBinding::Single { read, .. } | SectionBinding::Optional { read, .. } => {
                if let Some(first) = matches.first() {
                    read(record, first);
                }
            }
            SectionBinding::Repeated { read, .. } => {
                for section in matches {
                    read(record, section);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_defaults_to_field_name() {
        let config = FieldConfig::resolve("Gateway", "");
        assert_eq!(
            config,
            FieldConfig {
                name: "Gateway".to_string(),
                omit_empty: false,
                ws_list: false,
            }
        );
    }

    #[test]
    fn resolve_name_override() {
        let config = FieldConfig::resolve("Routes", "Route");
        assert_eq!(config.name, "Route");
        assert!(!config.omit_empty);
        assert!(!config.ws_list);
    }

    #[test]
    fn resolve_modifiers_without_name() {
        let config = FieldConfig::resolve("Source", ",omitempty");
        assert_eq!(config.name, "Source");
        assert!(config.omit_empty);
    }

    #[test]
    fn resolve_ignores_unknown_modifiers() {
        let config = FieldConfig::resolve("Source", "Src,frobnicate,wslist");
        assert_eq!(config.name, "Src");
        assert!(!config.omit_empty);
        assert!(config.ws_list);
    }

    #[test]
    fn boolean_vocabulary() {
        for literal in ["1", "yes", "true", "on"] {
            assert_eq!(parse_bool(literal), Some(true), "literal {literal:?}");
        }
        for literal in ["0", "no", "false", "off"] {
            assert_eq!(parse_bool(literal), Some(false), "literal {literal:?}");
        }
        assert_eq!(parse_bool(""), None);
        assert_eq!(parse_bool("Yes"), None);
    }
}
