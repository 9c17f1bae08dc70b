//! Block grammar for bru environment files.
//!
//! An environment file is a sequence of three block kinds, in any order:
//!
//! - `vars { ... }` — the plain-variable dictionary, sharing the shape of a
//!   generic dictionary block
//! - `vars:secret [ ... ]` — a list of variable names only (secret values
//!   are never written to text), comma-and-newline separated, with the same
//!   anchoring rule as every other block: the list closes at a `]` that
//!   begins a line
//! - `color: <value>` — a trailing scalar line
//!
//! `vars:secret` is tried before `vars` for the same declaration-order
//! reason as everywhere else in the grammar: the shorter keyword is a prefix
//! of the longer one.

use crate::bru::scanning::{GrammarError, Scanner};

/// One matched environment block, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawEnvBlock {
    /// Pairs of a `vars` dictionary, raw.
    Vars(Vec<super::RawPair>),
    /// Raw names from a `vars:secret` list, enable markers still attached.
    SecretNames(Vec<String>),
    /// The raw value of a `color` scalar line.
    Color(String),
}

/// Matches a whole environment file into its ordered block sequence.
pub fn parse_environment_blocks(source: &str) -> Result<Vec<RawEnvBlock>, GrammarError> {
    let mut s = Scanner::new(source);
    let mut blocks = Vec::new();
    s.skip_whitespace();
    while !s.is_eof() {
        match env_block(&mut s) {
            Some(b) => {
                blocks.push(b);
                s.skip_whitespace();
            }
            None => return Err(s.error()),
        }
    }
    Ok(blocks)
}

fn env_block(s: &mut Scanner) -> Option<RawEnvBlock> {
    if let Some(names) = secret_list(s) {
        return Some(RawEnvBlock::SecretNames(names));
    }
    if let Some(pairs) = super::keyword_dictionary(s, "vars") {
        return Some(RawEnvBlock::Vars(pairs));
    }
    if let Some(value) = color_line(s) {
        return Some(RawEnvBlock::Color(value));
    }
    None
}

/// `"vars:secret" st* "[" namelist? listend` with `listend = nl "]"`.
fn secret_list(s: &mut Scanner) -> Option<Vec<String>> {
    let m = s.mark();
    if !s.eat_literal("vars:secret") {
        s.reset(m);
        return None;
    }
    s.skip_inline_spaces();
    if !s.eat_literal("[") {
        s.reset(m);
        return None;
    }
    let names = name_list(s).unwrap_or_default();
    if !s.eat_anchored_close(']', "\"]\" at the start of a line") {
        s.reset(m);
        return None;
    }
    Some(names)
}

/// One or more comma-separated names; blank lines and a trailing comma are
/// tolerated, and no repetition may swallow the newline anchoring the close.
fn name_list(s: &mut Scanner) -> Option<Vec<String>> {
    let m = s.mark();
    loop {
        let it = s.mark();
        if !s.at_anchored_close(']') && s.eat_newline() {
            continue;
        }
        s.reset(it);
        break;
    }
    s.skip_inline_spaces();
    let first = match secret_name(s) {
        Some(name) => name,
        None => {
            s.reset(m);
            return None;
        }
    };
    let mut names = vec![first];
    loop {
        let it = s.mark();
        if s.at_anchored_close(']') {
            break;
        }
        skip_spaces_and_newlines(s);
        if !s.eat_literal(",") {
            s.reset(it);
            break;
        }
        skip_spaces_and_newlines(s);
        if s.at_anchored_close(']') {
            break;
        }
        match secret_name(s) {
            Some(name) => names.push(name),
            None => {
                s.reset(it);
                break;
            }
        }
    }
    loop {
        let it = s.mark();
        if s.at_anchored_close(']') {
            break;
        }
        match s.peek() {
            Some(' ') | Some('\t') | Some('\r') | Some('\n') => {
                s.bump();
            }
            _ => {
                s.reset(it);
                break;
            }
        }
    }
    Some(names)
}

fn skip_spaces_and_newlines(s: &mut Scanner) {
    while matches!(s.peek(), Some(' ') | Some('\t') | Some('\r') | Some('\n')) {
        s.bump();
    }
}

fn secret_name(s: &mut Scanner) -> Option<String> {
    let start = s.pos();
    while let Some(c) = s.peek() {
        if c == ' ' || c == '\t' || c == ',' || s.at_newline() {
            break;
        }
        s.bump();
    }
    if s.pos() == start {
        s.fail("a variable name");
        return None;
    }
    Some(s.source()[start..s.pos()].to_string())
}

/// `"color" st* ":" st* value` — the value runs to the end of the line and
/// may be empty.
fn color_line(s: &mut Scanner) -> Option<String> {
    let m = s.mark();
    if !s.eat_literal("color") {
        s.reset(m);
        return None;
    }
    s.skip_inline_spaces();
    if !s.eat_literal(":") {
        s.reset(m);
        return None;
    }
    s.skip_inline_spaces();
    let start = s.pos();
    while !s.is_eof() && !s.at_newline() {
        s.bump();
    }
    Some(s.source()[start..s.pos()].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bru::parsing::RawPair;

    fn raw(key: &str, value: &str) -> RawPair {
        RawPair {
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn test_vars_dictionary() {
        let blocks = parse_environment_blocks("vars {\n  base_url: http://localhost\n}").unwrap();
        assert_eq!(
            blocks,
            vec![RawEnvBlock::Vars(vec![raw("base_url", "http://localhost")])]
        );
    }

    #[test]
    fn test_empty_vars_dictionary() {
        let blocks = parse_environment_blocks("vars {\n}\n").unwrap();
        assert_eq!(blocks, vec![RawEnvBlock::Vars(vec![])]);
    }

    #[test]
    fn test_secret_list() {
        let blocks = parse_environment_blocks("vars:secret [\n  api_key,\n  ~old_key\n]").unwrap();
        assert_eq!(
            blocks,
            vec![RawEnvBlock::SecretNames(vec![
                "api_key".to_string(),
                "~old_key".to_string(),
            ])]
        );
    }

    #[test]
    fn test_secret_list_tolerates_trailing_comma() {
        let blocks = parse_environment_blocks("vars:secret [\n  api_key,\n]").unwrap();
        assert_eq!(blocks, vec![RawEnvBlock::SecretNames(vec!["api_key".to_string()])]);
    }

    #[test]
    fn test_empty_secret_list() {
        let blocks = parse_environment_blocks("vars:secret [\n]").unwrap();
        assert_eq!(blocks, vec![RawEnvBlock::SecretNames(vec![])]);
    }

    #[test]
    fn test_color_scalar() {
        let blocks = parse_environment_blocks("color: blue\n").unwrap();
        assert_eq!(blocks, vec![RawEnvBlock::Color("blue".to_string())]);
    }

    #[test]
    fn test_color_value_may_be_empty() {
        let blocks = parse_environment_blocks("color: \n").unwrap();
        assert_eq!(blocks, vec![RawEnvBlock::Color(String::new())]);
    }

    #[test]
    fn test_full_environment_file() {
        let source = "vars {\n  host: localhost\n  ~port: 8080\n}\nvars:secret [\n  token\n]\ncolor: blue\n";
        let blocks = parse_environment_blocks(source).unwrap();
        assert_eq!(
            blocks,
            vec![
                RawEnvBlock::Vars(vec![raw("host", "localhost"), raw("~port", "8080")]),
                RawEnvBlock::SecretNames(vec!["token".to_string()]),
                RawEnvBlock::Color("blue".to_string()),
            ]
        );
    }

    #[test]
    fn test_close_bracket_must_start_a_line() {
        assert!(parse_environment_blocks("vars:secret [ token ]").is_err());
    }

    #[test]
    fn test_unconsumed_input_is_an_error() {
        assert!(parse_environment_blocks("vars {\n}\nnope").is_err());
    }
}
