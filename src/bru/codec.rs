//! Escape codec for single-line key and value tokens.
//!
//! Dictionary keys and values live on one line, so characters that would
//! break the line shape (newlines) or terminate the key early (the colon)
//! are written as backslash escapes by the serializer and reversed here.
//!
//! Decoding is deliberately permissive: the grammar already constrains what
//! can appear in a token, so a malformed escape is kept as literal text and
//! logged rather than turned into a parse failure.
//!
//! Law: `decode_string(encode_value(s)) == s` and
//! `decode_string(encode_name(s)) == s` for every string `s`.

use tracing::warn;

/// Decodes backslash escapes in a raw matched token.
///
/// Recognized sequences: `\n`, `\r`, `\t`, `\:`, `\\`. Anything else after a
/// backslash (including a trailing lone backslash) passes through unchanged.
pub fn decode_string(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some(':') => out.push(':'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                warn!("unrecognized escape sequence \\{}, keeping literal text", other);
                out.push('\\');
                out.push(other);
            }
            None => {
                warn!("dangling backslash at end of token, keeping literal text");
                out.push('\\');
            }
        }
    }
    out
}

/// Escapes a value for emission on a single `key: value` line.
pub fn encode_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}

/// Escapes a name for emission as a dictionary key. Keys additionally cannot
/// contain a bare colon, which would terminate the key early.
pub fn encode_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ':' => out.push_str("\\:"),
            _ => out.push(c),
        }
    }
    out
}
