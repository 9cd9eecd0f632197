//! Deterministic encoding of the tree model back to text.
//!
//! Encoding is a pure traversal of the [`File`] tree with a fixed layout:
//! sections in tree order separated by exactly one blank line, comment blocks
//! rendered as `# ` lines directly above their section header or key, and one
//! `name=value` line per key. Decoding the output of [`encode`] yields the
//! original tree back, as long as the tree only contains representable
//! content (no backslashes or line breaks inside values, trimmed names).

use crate::file::{File, Key, Section};

/// Encodes a [`File`] tree into configuration text.
///
/// # Examples
///
/// ```rust
/// use unitfile::file::{File, Key, Section};
/// use unitfile::encode;
///
/// let file = File {
///     sections: vec![Section {
///         name: "Match".to_string(),
///         comment: "match block".to_string(),
///         keys: vec![Key::new("Name", "eth0")],
///     }],
/// };
/// assert_eq!(encode(&file), "# match block\n[Match]\nName=eth0\n");
/// ```
#[must_use]
pub fn encode(file: &File) -> String {
    let mut out = String::new();
    for (i, section) in file.sections.iter().enumerate() {
        if i != 0 {
            out.push('\n');
        }
        write_section(&mut out, section);
    }
    out
}

fn write_section(out: &mut String, section: &Section) {
    write_comment(out, &section.comment);
    out.push('[');
    out.push_str(&section.name);
    out.push_str("]\n");
    for (i, key) in section.keys.iter().enumerate() {
        // A commented key gets set apart by a blank line, except at the top
        // of its section.
        if i != 0 && !key.comment.is_empty() {
            out.push('\n');
        }
        write_key(out, key);
    }
}

fn write_key(out: &mut String, key: &Key) {
    write_comment(out, &key.comment);
    out.push_str(&key.name);
    out.push('=');
    out.push_str(&key.value);
    out.push('\n');
}

fn write_comment(out: &mut String, comment: &str) {
    if comment.is_empty() {
        return;
    }
    for line in comment.split('\n') {
        out.push_str("# ");
        out.push_str(line);
        out.push('\n');
    }
}
