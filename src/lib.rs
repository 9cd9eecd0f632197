//! # unitfile
//!
//! A lossless codec for systemd-style unit configuration files (networkd
//! `.network`/`.netdev`/`.link` files, service units, and anything else in
//! the same dialect) plus a schema-driven mapper between the parsed tree and
//! plain Rust records.
//!
//! ## What "lossless" means here
//!
//! Tools that rewrite configuration files must not destroy what the original
//! author wrote. This crate preserves:
//!
//! - **Comment placement**: `#`/`;` comment blocks stay attached to the
//!   section or directive they precede
//! - **Order**: sections and directives keep their source order end to end,
//!   including repeated sections and repeated directives
//! - **Unknown content**: sections and keys a schema does not declare can be
//!   round-tripped through opt-in extension containers
//!
//! Values spanning multiple physical lines via trailing-backslash
//! continuation are folded on decode, and values containing `=` are kept
//! verbatim (`Environment=FOO=bar` parses as key `Environment`, value
//! `FOO=bar`).
//!
//! ## Working with the tree
//!
//! ```rust
//! use unitfile::{decode, encode};
//!
//! let input = b"# uplink\n[Match]\nName=eth0\n";
//! let file = decode(input).unwrap();
//! assert_eq!(file.sections[0].comment, "uplink");
//! assert_eq!(file.sections[0].keys[0].value, "eth0");
//!
//! // The encoder reproduces the canonical layout.
//! assert_eq!(encode(&file).as_bytes(), input);
//! ```
//!
//! ## Working with typed records
//!
//! Records describe their mapping with ordered field descriptor tables; the
//! tag syntax `name[,omitempty][,wslist]` controls naming, optionality, and
//! list policy per field:
//!
//! ```rust
//! use unitfile::schema::{KeyField, SectionField, UnitFile, UnitSection};
//! use unitfile::{from_str, to_string};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct NetworkConfig {
//!     matches: MatchSection,
//!     network: NetworkSection,
//! }
//!
//! impl UnitFile for NetworkConfig {
//!     fn section_fields() -> Vec<SectionField<Self>> {
//!         vec![
//!             SectionField::single("Match", "", |c: &Self| &c.matches, |c, s| c.matches = s),
//!             SectionField::single("Network", "", |c: &Self| &c.network, |c, s| c.network = s),
//!         ]
//!     }
//! }
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct MatchSection {
//!     name: String,
//! }
//!
//! impl UnitSection for MatchSection {
//!     fn key_fields() -> Vec<KeyField<Self>> {
//!         vec![KeyField::text(
//!             "Name",
//!             "",
//!             |s: &Self| s.name.as_str(),
//!             |s, v| s.name = v,
//!         )]
//!     }
//! }
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct NetworkSection {
//!     addresses: Vec<String>,
//!     dhcp: Option<bool>,
//! }
//!
//! impl UnitSection for NetworkSection {
//!     fn key_fields() -> Vec<KeyField<Self>> {
//!         vec![
//!             KeyField::list(
//!                 "Address",
//!                 "",
//!                 |s: &Self| s.addresses.as_slice(),
//!                 |s, v| s.addresses = v,
//!             ),
//!             KeyField::flag("DHCP", ",omitempty", |s: &Self| s.dhcp, |s, v| s.dhcp = v),
//!         ]
//!     }
//! }
//!
//! let input = "[Match]\nName=eth0\n\n[Network]\nAddress=10.0.0.1/8\nDHCP=yes\n";
//! let config: NetworkConfig = from_str(input)?;
//! assert_eq!(config.matches.name, "eth0");
//! assert_eq!(config.network.addresses, vec!["10.0.0.1/8".to_string()]);
//! assert_eq!(config.network.dhcp, Some(true));
//!
//! assert_eq!(to_string(&config), input);
//! # Ok::<(), unitfile::Error>(())
//! ```
//!
//! ## Known quirks, kept for compatibility
//!
//! - Closing a key replaces **every** backslash in its value with a space,
//!   not only the continuation markers. Values with literal backslashes are
//!   not representable.
//! - A boolean directive with an unrecognized literal is skipped without a
//!   diagnostic; the target field is simply left unset.
//!
//! ## Non-goals
//!
//! Semantic validation of values (address syntax, device names, ...),
//! schema completeness checks, and streaming decode of larger-than-memory
//! inputs are out of scope. Decode is one pass over an in-memory buffer.

pub mod de;
pub mod error;
pub mod file;
pub mod scan;
pub mod schema;
pub mod ser;

mod marshal;
mod unmarshal;

pub use de::{decode, Decoder};
pub use error::{Error, Result};
pub use file::{File, Key, KeyComments, KeyList, Section, SectionList};
pub use marshal::to_file;
pub use scan::{Position, Scanner, Token, TokenKind};
pub use schema::{FieldConfig, KeyField, SectionField, UnitFile, UnitSection};
pub use ser::encode;
pub use unmarshal::from_file;

use std::io;

/// Parses unit configuration text and maps it onto a typed record.
///
/// Unknown sections and keys are retained when the record exposes the
/// matching extension containers, and dropped silently otherwise.
///
/// # Errors
///
/// Returns an error when the input is not syntactically valid; see
/// [`decode`]. Mapping itself cannot fail: directives that do not fit the
/// schema are extension data, not errors.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T: UnitFile>(s: &str) -> Result<T> {
    let file = Decoder::new(s).decode()?;
    Ok(from_file(&file))
}

/// Parses unit configuration bytes and maps them onto a typed record.
///
/// # Errors
///
/// Returns an error when the input is not valid UTF-8 or not syntactically
/// valid.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T: UnitFile>(data: &[u8]) -> Result<T> {
    let file = decode(data)?;
    Ok(from_file(&file))
}

/// Renders a typed record as unit configuration text.
///
/// Structured fields render in descriptor-table order; extension sections and
/// keys are appended after them. Rendering is deterministic and infallible.
#[must_use]
pub fn to_string<T: UnitFile>(record: &T) -> String {
    encode(&to_file(record))
}

/// Renders a typed record into an [`io::Write`] sink.
///
/// # Errors
///
/// Returns [`Error::Io`] when the sink rejects the write.
pub fn to_writer<W, T>(mut writer: W, record: &T) -> Result<()>
where
    W: io::Write,
    T: UnitFile,
{
    writer
        .write_all(to_string(record).as_bytes())
        .map_err(|e| Error::Io(e.to_string()))
}

/// Encodes a [`File`] tree into an [`io::Write`] sink.
///
/// # Errors
///
/// Returns [`Error::Io`] when the sink rejects the write.
pub fn encode_to_writer<W: io::Write>(mut writer: W, file: &File) -> Result<()> {
    writer
        .write_all(encode(file).as_bytes())
        .map_err(|e| Error::Io(e.to_string()))
}
