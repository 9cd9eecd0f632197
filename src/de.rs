//! Decoding of unit configuration text into the tree model.
//!
//! The [`Decoder`] drives the scanner and owns all stateful parsing logic:
//! the active section, the key currently accumulating its value, and the
//! pending comment block. It is a straight state machine over the token
//! stream with a single one-token lookahead (to confirm that a bare text run
//! at key position is followed by `=`).
//!
//! Continuation lines are handled here: a value ending in `\` keeps the key
//! open across the following line break, and comment lines encountered inside
//! a continuation are still collected. The open key is addressed by index, so
//! it keeps accumulating even when a section header interrupts the
//! continuation. When a key closes, every backslash in
//! its accumulated value is replaced by a single space. That substitution is
//! global, not limited to the continuation markers, so values that contain
//! literal backslashes are not representable.

use crate::error::{Error, Result};
use crate::file::{File, Key, Section};
use crate::scan::{Scanner, Token, TokenKind};

/// Decodes a complete configuration file into a [`File`] tree.
///
/// # Examples
///
/// ```rust
/// use unitfile::decode;
///
/// let file = decode(b"[Match]\nName=eth0\n").unwrap();
/// assert_eq!(file.sections[0].name, "Match");
/// assert_eq!(file.sections[0].keys[0].value, "eth0");
/// ```
///
/// # Errors
///
/// Returns an error with the source position on malformed section headers,
/// directives outside any section, or a key name not followed by `=`.
pub fn decode(data: &[u8]) -> Result<File> {
    let input = std::str::from_utf8(data).map_err(|e| Error::InvalidUtf8(e.to_string()))?;
    Decoder::new(input).decode()
}

/// State of an in-progress decode operation.
pub struct Decoder<'a> {
    scanner: Scanner<'a>,
    file: File,
    /// Comment lines belonging to the next section or the next/current key.
    comment: String,
    /// Section and key index of the key currently accumulating its value.
    /// Kept as indices so a continuation stays attached to its key even
    /// when a new section header opens before the value closes.
    active_key: Option<(usize, usize)>,
}

impl<'a> Decoder<'a> {
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Decoder {
            scanner: Scanner::new(input),
            file: File::default(),
            comment: String::new(),
            active_key: None,
        }
    }

    /// Runs the decode to completion, consuming the decoder.
    pub fn decode(mut self) -> Result<File> {
        loop {
            let token = self.scanner.scan();
            match token.kind {
                TokenKind::Comment => self.push_comment(&token.literal),

                TokenKind::Assign => {
                    // A second or later `=` inside a value is literal text.
                    if let Some(key) = self.active_key_mut() {
                        key.value.push('=');
                    }
                }

                TokenKind::Eof => {
                    self.close_key();
                    break;
                }

                TokenKind::Newline => {
                    // A trailing `\` keeps the key open for the next line.
                    if self.active_key.is_some() && !self.value_continues() {
                        self.close_key();
                    }
                }

                TokenKind::Text => self.push_text(token)?,

                TokenKind::Section => self.push_section(token)?,

                TokenKind::Illegal => {}
            }
        }
        Ok(self.file)
    }

    fn active_key_mut(&mut self) -> Option<&mut Key> {
        let (section, key) = self.active_key?;
        self.file.sections[section].keys.get_mut(key)
    }

    fn value_continues(&self) -> bool {
        self.active_key
            .map(|(section, key)| self.file.sections[section].keys[key].value.ends_with('\\'))
            .unwrap_or(false)
    }

    fn push_comment(&mut self, literal: &str) {
        if !self.comment.is_empty() {
            self.comment.push('\n');
        }
        // Strip the `#` or `;` marker, both are single-byte.
        self.comment.push_str(literal[1..].trim());
    }

    fn push_section(&mut self, token: Token) -> Result<()> {
        if !token.literal.starts_with('[') {
            return Err(Error::SectionMissingOpen {
                position: token.pos,
                literal: token.literal,
            });
        }
        if !token.literal.ends_with(']') {
            return Err(Error::SectionMissingClose {
                position: token.pos,
                literal: token.literal,
            });
        }

        self.file.sections.push(Section {
            name: token.literal[1..token.literal.len() - 1].to_string(),
            comment: std::mem::take(&mut self.comment),
            keys: Vec::new(),
        });
        Ok(())
    }

    fn push_text(&mut self, token: Token) -> Result<()> {
        if let Some(key) = self.active_key_mut() {
            key.value.push_str(token.literal.trim());
            return Ok(());
        }

        if self.file.sections.is_empty() {
            return Err(Error::KeyOutsideSection {
                position: token.pos,
                literal: token.literal,
            });
        }

        // Candidate key name: commit only if the next token is `=`.
        let next = self.scanner.scan();
        if next.kind != TokenKind::Assign {
            return Err(Error::KeyWithoutAssign {
                position: next.pos,
                kind: next.kind,
                literal: next.literal,
            });
        }

        let section = self.file.sections.len() - 1;
        let keys = &mut self.file.sections[section].keys;
        keys.push(Key::new(token.literal.trim(), ""));
        self.active_key = Some((section, keys.len() - 1));
        Ok(())
    }

    fn close_key(&mut self) {
        if self.active_key.is_none() {
            return;
        }
        let comment = std::mem::take(&mut self.comment);
        if let Some(key) = self.active_key_mut() {
            key.comment = comment;
            key.value = key.value.replace('\\', " ");
        }
        self.active_key = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::Position;

    #[test]
    fn comments_all_over_the_place() {
        let input = "# network comment\n\
                     [Network]\n\
                     # start desc\n\
                     Description= test1 \\\n\
                     \t# in the middle\n\
                     \ttest2 \\\n\
                     \ttest3\n\
                     # address 1\n\
                     Address=10.1.10.9/24\n\
                     Address=\n\
                     Gateway=10.1.10.1\n\
                     # address 2\n\
                     \t; something else\n\
                     Address=10.1.10.11/24\n";

        let expected = File {
            sections: vec![Section {
                comment: "network comment".to_string(),
                name: "Network".to_string(),
                keys: vec![
                    Key {
                        comment: "start desc\nin the middle".to_string(),
                        name: "Description".to_string(),
                        value: "test1  test2  test3".to_string(),
                    },
                    Key {
                        comment: "address 1".to_string(),
                        name: "Address".to_string(),
                        value: "10.1.10.9/24".to_string(),
                    },
                    Key::new("Address", ""),
                    Key::new("Gateway", "10.1.10.1"),
                    Key {
                        comment: "address 2\nsomething else".to_string(),
                        name: "Address".to_string(),
                        value: "10.1.10.11/24".to_string(),
                    },
                ],
            }],
        };

        assert_eq!(decode(input.as_bytes()).unwrap(), expected);
    }

    #[test]
    fn multiple_sections() {
        let input = "# route1000\n\
                     # also important\n\
                     [Route]\n\
                     Gateway=192.168.0.11\n\
                     Destination=10.0.0.0/8\n\
                     \n\
                     # route2000\n\
                     # this is very important!\n\
                     [Route]\n\
                     Gateway=192.168.0.12\n\
                     Destination=20.0.0.0/8";

        let expected = File {
            sections: vec![
                Section {
                    comment: "route1000\nalso important".to_string(),
                    name: "Route".to_string(),
                    keys: vec![
                        Key::new("Gateway", "192.168.0.11"),
                        Key::new("Destination", "10.0.0.0/8"),
                    ],
                },
                Section {
                    comment: "route2000\nthis is very important!".to_string(),
                    name: "Route".to_string(),
                    keys: vec![
                        Key::new("Gateway", "192.168.0.12"),
                        Key::new("Destination", "20.0.0.0/8"),
                    ],
                },
            ],
        };

        assert_eq!(decode(input.as_bytes()).unwrap(), expected);
    }

    #[test]
    fn nested_assign_is_kept_verbatim() {
        let input = "[Service]\n\
                     Environment=ETCD_CA_FILE=/path/to/CA.pem\n\
                     Environment=ETCD_CERT_FILE=/path/to/server.crt\n\
                     Environment=ETCD_KEY_FILE=/path/to/server.key";

        let expected = File {
            sections: vec![Section {
                name: "Service".to_string(),
                comment: String::new(),
                keys: vec![
                    Key::new("Environment", "ETCD_CA_FILE=/path/to/CA.pem"),
                    Key::new("Environment", "ETCD_CERT_FILE=/path/to/server.crt"),
                    Key::new("Environment", "ETCD_KEY_FILE=/path/to/server.key"),
                ],
            }],
        };

        assert_eq!(decode(input.as_bytes()).unwrap(), expected);
    }

    #[test]
    fn key_outside_section_is_an_error() {
        let err = decode(b"Name=eth0\n").unwrap_err();
        assert_eq!(
            err,
            Error::KeyOutsideSection {
                position: Position { line: 1, column: 1 },
                literal: "Name".to_string(),
            }
        );
    }

    #[test]
    fn key_without_assign_is_an_error() {
        let err = decode(b"[Match]\nName\n").unwrap_err();
        assert_eq!(
            err,
            Error::KeyWithoutAssign {
                position: Position { line: 2, column: 5 },
                kind: TokenKind::Newline,
                literal: "\n".to_string(),
            }
        );
    }

    #[test]
    fn unterminated_section_is_an_error() {
        let err = decode(b"[Match\n").unwrap_err();
        assert_eq!(
            err,
            Error::SectionMissingClose {
                position: Position { line: 1, column: 1 },
                literal: "[Match".to_string(),
            }
        );
    }

    #[test]
    fn continuation_crosses_a_section_header() {
        // A value ending in `\` stays open across the next header; the new
        // section starts empty and later keys land in it.
        let input = "[A]\n\
                     Key=val \\\n\
                     [B]\n\
                     more\n\
                     Other=x\n";

        let expected = File {
            sections: vec![
                Section {
                    name: "A".to_string(),
                    comment: String::new(),
                    keys: vec![Key::new("Key", "val  more")],
                },
                Section {
                    name: "B".to_string(),
                    comment: String::new(),
                    keys: vec![Key::new("Other", "x")],
                },
            ],
        };

        assert_eq!(decode(input.as_bytes()).unwrap(), expected);
    }

    #[test]
    fn empty_input_decodes_to_empty_file() {
        assert_eq!(decode(b"").unwrap(), File::default());
    }

    #[test]
    fn value_backslashes_become_spaces() {
        let file = decode(b"[S]\nExec=C:\\path\\bin\n").unwrap();
        assert_eq!(file.sections[0].keys[0].value, "C: path bin");
    }
}
