//! Lexical scanning of unit configuration text.
//!
//! The [`Scanner`] turns raw text into a flat stream of [`Token`]s in a single
//! forward pass. It has no knowledge of sections or keys beyond line-level
//! classification: a line whose first non-blank character is `#` or `;` is a
//! comment, a line starting with `[` is a section header, and everything else
//! is split into text runs at every `=` and line break. Trimming, comment
//! marker stripping and continuation handling are left to the decoder.
//!
//! ## Examples
//!
//! ```rust
//! use unitfile::scan::{Scanner, TokenKind};
//!
//! let mut scanner = Scanner::new("[Match]\nName=eth0\n");
//! assert_eq!(scanner.scan().kind, TokenKind::Section);
//! assert_eq!(scanner.scan().kind, TokenKind::Newline);
//! assert_eq!(scanner.scan().kind, TokenKind::Text);
//! assert_eq!(scanner.scan().kind, TokenKind::Assign);
//! ```

use std::fmt;

/// Lexical token kinds of a unit configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Reserved for malformed input; the current scanner never produces it.
    Illegal,
    /// End of input. Emitted once the input is exhausted.
    Eof,
    /// A full comment line, marker included.
    Comment,
    /// A section header line, brackets included.
    Section,
    /// A run of text between `=`, line break, or line start/end.
    Text,
    /// A line break.
    Newline,
    /// A single `=`.
    Assign,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenKind::Illegal => "ILLEGAL",
            TokenKind::Eof => "EOF",
            TokenKind::Comment => "COMMENT",
            TokenKind::Section => "SECTION",
            TokenKind::Text => "STRING",
            TokenKind::Newline => "NEWLINE",
            TokenKind::Assign => "=",
        };
        f.write_str(s)
    }
}

/// A source position, 1-based. The zero value is invalid.
///
/// # Examples
///
/// ```rust
/// use unitfile::scan::Position;
///
/// assert_eq!(Position { line: 3, column: 7 }.to_string(), "3:7");
/// assert_eq!(Position { line: 3, column: 0 }.to_string(), "3");
/// assert_eq!(Position::default().to_string(), "-");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    /// Reports whether the position refers to an actual source location.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.line > 0
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid() {
            return f.write_str("-");
        }
        if self.column == 0 {
            return write!(f, "{}", self.line);
        }
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A single token: where it starts, what it is, and its raw literal text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub pos: Position,
    pub kind: TokenKind,
    pub literal: String,
}

/// Single-pass scanner over unit configuration text.
///
/// Tokens are produced lazily, one per [`Scanner::scan`] call; after the input
/// is exhausted every further call yields [`TokenKind::Eof`].
pub struct Scanner<'a> {
    input: &'a str,
    offset: usize,
    line: usize,
    column: usize,
    // Comment and section classification only applies at line start.
    at_line_start: bool,
}

impl<'a> Scanner<'a> {
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Scanner {
            input,
            offset: 0,
            line: 1,
            column: 1,
            at_line_start: true,
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.offset..].chars().next()
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.offset += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn position(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
        }
    }

    /// Skips blanks within the current line. Line breaks are tokens of their
    /// own and are never skipped.
    fn skip_blanks(&mut self) {
        while let Some(ch) = self.peek_char() {
            if ch == ' ' || ch == '\t' || ch == '\r' {
                self.next_char();
            } else {
                break;
            }
        }
    }

    /// Consumes the rest of the current line, excluding the line break.
    fn take_line(&mut self) -> String {
        let mut literal = String::new();
        while let Some(ch) = self.peek_char() {
            if ch == '\n' {
                break;
            }
            literal.push(ch);
            self.next_char();
        }
        literal
    }

    /// Returns the next token of the input.
    pub fn scan(&mut self) -> Token {
        self.skip_blanks();
        let pos = self.position();

        let Some(ch) = self.peek_char() else {
            return Token {
                pos,
                kind: TokenKind::Eof,
                literal: String::new(),
            };
        };

        if ch == '\n' {
            self.next_char();
            self.at_line_start = true;
            return Token {
                pos,
                kind: TokenKind::Newline,
                literal: "\n".to_string(),
            };
        }

        if self.at_line_start {
            self.at_line_start = false;
            if ch == '#' || ch == ';' {
                return Token {
                    pos,
                    kind: TokenKind::Comment,
                    literal: self.take_line(),
                };
            }
            if ch == '[' {
                return Token {
                    pos,
                    kind: TokenKind::Section,
                    literal: self.take_line().trim_end().to_string(),
                };
            }
        }

        if ch == '=' {
            self.next_char();
            return Token {
                pos,
                kind: TokenKind::Assign,
                literal: "=".to_string(),
            };
        }

        let mut literal = String::new();
        while let Some(ch) = self.peek_char() {
            if ch == '=' || ch == '\n' {
                break;
            }
            literal.push(ch);
            self.next_char();
        }
        Token {
            pos,
            kind: TokenKind::Text,
            literal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(input: &str) -> Vec<(TokenKind, String)> {
        let mut scanner = Scanner::new(input);
        let mut out = Vec::new();
        loop {
            let token = scanner.scan();
            let done = token.kind == TokenKind::Eof;
            out.push((token.kind, token.literal));
            if done {
                break;
            }
        }
        out
    }

    #[test]
    fn scans_sections_keys_and_comments() {
        let tokens = collect("# hello\n[Network]\nAddress=10.0.0.1/8\n");
        assert_eq!(
            tokens,
            vec![
                (TokenKind::Comment, "# hello".to_string()),
                (TokenKind::Newline, "\n".to_string()),
                (TokenKind::Section, "[Network]".to_string()),
                (TokenKind::Newline, "\n".to_string()),
                (TokenKind::Text, "Address".to_string()),
                (TokenKind::Assign, "=".to_string()),
                (TokenKind::Text, "10.0.0.1/8".to_string()),
                (TokenKind::Newline, "\n".to_string()),
                (TokenKind::Eof, String::new()),
            ]
        );
    }

    #[test]
    fn splits_values_at_every_assign() {
        let tokens = collect("[S]\nEnvironment=A=1\n");
        let kinds: Vec<TokenKind> = tokens.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Section,
                TokenKind::Newline,
                TokenKind::Text,
                TokenKind::Assign,
                TokenKind::Text,
                TokenKind::Assign,
                TokenKind::Text,
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn comment_only_recognized_at_line_start() {
        let tokens = collect("[S]\nA=x # not a comment\n");
        assert!(tokens
            .iter()
            .any(|(k, lit)| *k == TokenKind::Text && lit == "x # not a comment"));
        assert_eq!(
            tokens
                .iter()
                .filter(|(k, _)| *k == TokenKind::Comment)
                .count(),
            0
        );
    }

    #[test]
    fn semicolon_comments_and_indentation() {
        let tokens = collect("\t; note\n");
        assert_eq!(tokens[0], (TokenKind::Comment, "; note".to_string()));
    }

    #[test]
    fn section_literal_keeps_brackets_trims_trailing_blanks() {
        let tokens = collect("  [Route]  \n");
        assert_eq!(tokens[0], (TokenKind::Section, "[Route]".to_string()));
    }

    #[test]
    fn positions_are_one_based() {
        let mut scanner = Scanner::new("[S]\nKey=value");
        let section = scanner.scan();
        assert_eq!(section.pos, Position { line: 1, column: 1 });
        scanner.scan(); // newline
        let key = scanner.scan();
        assert_eq!(key.pos, Position { line: 2, column: 1 });
        let assign = scanner.scan();
        assert_eq!(assign.pos, Position { line: 2, column: 4 });
        let value = scanner.scan();
        assert_eq!(value.pos, Position { line: 2, column: 5 });
    }

    #[test]
    fn eof_is_sticky() {
        let mut scanner = Scanner::new("");
        assert_eq!(scanner.scan().kind, TokenKind::Eof);
        assert_eq!(scanner.scan().kind, TokenKind::Eof);
    }
}
