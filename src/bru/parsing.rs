//! Block grammar for bru request files.
//!
//! A request file is zero or more blocks in any order. Two block shapes
//! exist, and every rule here mirrors one of them:
//!
//! - Dictionary blocks: `<keyword> "{" <pairlist> "}"`, where a pair is a
//!   `key : value` line. Keys stop at inline whitespace, a colon or a line
//!   terminator; values run to the end of the line.
//! - Text blocks: `<keyword> "{" <payload> "}"`, where the payload is an
//!   opaque character run terminated only by a `}` that starts a new line.
//!
//! The assert block uses a parallel pair grammar whose keys admit inline
//! whitespace (assertion keys are expressions like `res.body contains`), so
//! it is kept as an independent rule rather than a flag on the generic one.
//!
//! Alternatives are tried in declaration order; order matters for correct
//! disambiguation (HTTP verbs before `headers`, since `head` is a prefix of
//! it; `body:graphql` before `body:graphql:vars`; the form-body dictionaries
//! before the bare `body` shorthand). Repetition is greedy and possessive: a
//! failed iteration rolls back only that iteration, never a completed one.
//!
//! This stage applies no semantics. It produces [`RawBlock`]s holding raw
//! key/value text and raw text payloads; decoding, trimming, marker
//! stripping and outdenting happen in [building](crate::bru::building).

pub mod environment;

use crate::bru::scanning::{GrammarError, Scanner};

/// One raw `key : value` line, exactly as matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPair {
    pub key: String,
    pub value: String,
}

/// One matched block occurrence, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawBlock {
    Meta(Vec<RawPair>),
    Http { method: &'static str, pairs: Vec<RawPair> },
    Query(Vec<RawPair>),
    Headers(Vec<RawPair>),
    AuthAwsV4(Vec<RawPair>),
    AuthBasic(Vec<RawPair>),
    AuthBearer(Vec<RawPair>),
    AuthDigest(Vec<RawPair>),
    BodyJson(String),
    BodyText(String),
    BodyXml(String),
    BodySparql(String),
    BodyGraphql(String),
    BodyGraphqlVars(String),
    BodyFormUrlEncoded(Vec<RawPair>),
    BodyMultipartForm(Vec<RawPair>),
    /// The bare `body` shorthand: a JSON body that also tags the HTTP block.
    BodySugar(String),
    VarsPreRequest(Vec<RawPair>),
    VarsPostResponse(Vec<RawPair>),
    Assert(Vec<RawPair>),
    ScriptPreRequest(String),
    ScriptPostResponse(String),
    Tests(String),
    Docs(String),
}

const HTTP_METHODS: [&str; 9] = [
    "get", "post", "put", "delete", "patch", "options", "head", "connect", "trace",
];

/// Matches a whole request file into its ordered block sequence.
///
/// Whitespace (including newlines) is skipped around and between blocks. If
/// the input cannot be consumed entirely, the furthest failure is reported
/// and no blocks are returned.
pub fn parse_blocks(source: &str) -> Result<Vec<RawBlock>, GrammarError> {
    let mut s = Scanner::new(source);
    let mut blocks = Vec::new();
    s.skip_whitespace();
    while !s.is_eof() {
        match block(&mut s) {
            Some(b) => {
                blocks.push(b);
                s.skip_whitespace();
            }
            None => return Err(s.error()),
        }
    }
    Ok(blocks)
}

fn block(s: &mut Scanner) -> Option<RawBlock> {
    if let Some(pairs) = keyword_dictionary(s, "meta") {
        return Some(RawBlock::Meta(pairs));
    }
    for method in HTTP_METHODS {
        if let Some(pairs) = keyword_dictionary(s, method) {
            return Some(RawBlock::Http { method, pairs });
        }
    }
    if let Some(pairs) = keyword_dictionary(s, "query") {
        return Some(RawBlock::Query(pairs));
    }
    if let Some(pairs) = keyword_dictionary(s, "headers") {
        return Some(RawBlock::Headers(pairs));
    }
    if let Some(pairs) = keyword_dictionary(s, "auth:awsv4") {
        return Some(RawBlock::AuthAwsV4(pairs));
    }
    if let Some(pairs) = keyword_dictionary(s, "auth:basic") {
        return Some(RawBlock::AuthBasic(pairs));
    }
    if let Some(pairs) = keyword_dictionary(s, "auth:bearer") {
        return Some(RawBlock::AuthBearer(pairs));
    }
    if let Some(pairs) = keyword_dictionary(s, "auth:digest") {
        return Some(RawBlock::AuthDigest(pairs));
    }
    if let Some(text) = keyword_text_block(s, "body:json") {
        return Some(RawBlock::BodyJson(text));
    }
    if let Some(text) = keyword_text_block(s, "body:text") {
        return Some(RawBlock::BodyText(text));
    }
    if let Some(text) = keyword_text_block(s, "body:xml") {
        return Some(RawBlock::BodyXml(text));
    }
    if let Some(text) = keyword_text_block(s, "body:sparql") {
        return Some(RawBlock::BodySparql(text));
    }
    if let Some(text) = keyword_text_block(s, "body:graphql") {
        return Some(RawBlock::BodyGraphql(text));
    }
    if let Some(text) = keyword_text_block(s, "body:graphql:vars") {
        return Some(RawBlock::BodyGraphqlVars(text));
    }
    if let Some(pairs) = keyword_dictionary(s, "body:form-urlencoded") {
        return Some(RawBlock::BodyFormUrlEncoded(pairs));
    }
    if let Some(pairs) = keyword_dictionary(s, "body:multipart-form") {
        return Some(RawBlock::BodyMultipartForm(pairs));
    }
    if let Some(text) = keyword_text_block(s, "body") {
        return Some(RawBlock::BodySugar(text));
    }
    if let Some(pairs) = keyword_dictionary(s, "vars:pre-request") {
        return Some(RawBlock::VarsPreRequest(pairs));
    }
    if let Some(pairs) = keyword_dictionary(s, "vars:post-response") {
        return Some(RawBlock::VarsPostResponse(pairs));
    }
    if let Some(pairs) = keyword_assert_dictionary(s, "assert") {
        return Some(RawBlock::Assert(pairs));
    }
    if let Some(text) = keyword_text_block(s, "script:pre-request") {
        return Some(RawBlock::ScriptPreRequest(text));
    }
    if let Some(text) = keyword_text_block(s, "script:post-response") {
        return Some(RawBlock::ScriptPostResponse(text));
    }
    if let Some(text) = keyword_text_block(s, "tests") {
        return Some(RawBlock::Tests(text));
    }
    if let Some(text) = keyword_text_block(s, "docs") {
        return Some(RawBlock::Docs(text));
    }
    None
}

fn keyword_dictionary(s: &mut Scanner, keyword: &'static str) -> Option<Vec<RawPair>> {
    let m = s.mark();
    if !s.eat_literal(keyword) {
        s.reset(m);
        return None;
    }
    match dictionary(s, pair) {
        Some(pairs) => Some(pairs),
        None => {
            s.reset(m);
            None
        }
    }
}

fn keyword_assert_dictionary(s: &mut Scanner, keyword: &'static str) -> Option<Vec<RawPair>> {
    let m = s.mark();
    if !s.eat_literal(keyword) {
        s.reset(m);
        return None;
    }
    match dictionary(s, assert_pair) {
        Some(pairs) => Some(pairs),
        None => {
            s.reset(m);
            None
        }
    }
}

/// `st* "{" pairlist? tagend` — the pair rule is the only difference between
/// the generic and the assertion dictionary.
fn dictionary(s: &mut Scanner, pair_rule: fn(&mut Scanner) -> Option<RawPair>) -> Option<Vec<RawPair>> {
    let m = s.mark();
    s.skip_inline_spaces();
    if !s.eat_literal("{") {
        s.reset(m);
        return None;
    }
    let pairs = pair_list(s, pair_rule).unwrap_or_default();
    if !s.eat_anchored_close('}', "\"}\" at the start of a line") {
        s.reset(m);
        return None;
    }
    Some(pairs)
}

/// `optionalnl* pair (~tagend stnl* pair)* (~tagend space)*`
///
/// Blank and space-only lines between pairs are permitted; the guards keep
/// every repetition from swallowing the newline that anchors the close.
fn pair_list(s: &mut Scanner, pair_rule: fn(&mut Scanner) -> Option<RawPair>) -> Option<Vec<RawPair>> {
    let m = s.mark();
    loop {
        let it = s.mark();
        if !s.at_anchored_close('}') && s.eat_newline() {
            continue;
        }
        s.reset(it);
        break;
    }
    let first = match pair_rule(s) {
        Some(p) => p,
        None => {
            s.reset(m);
            return None;
        }
    };
    let mut pairs = vec![first];
    loop {
        let it = s.mark();
        if s.at_anchored_close('}') {
            break;
        }
        skip_spaces_and_newlines(s);
        match pair_rule(s) {
            Some(p) => pairs.push(p),
            None => {
                s.reset(it);
                break;
            }
        }
    }
    loop {
        let it = s.mark();
        if s.at_anchored_close('}') {
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
    Some(pairs)
}

fn skip_spaces_and_newlines(s: &mut Scanner) {
    while matches!(s.peek(), Some(' ') | Some('\t') | Some('\r') | Some('\n')) {
        s.bump();
    }
}

/// `st* key st* ":" st* value` — the value runs to the end of the line.
fn pair(s: &mut Scanner) -> Option<RawPair> {
    let m = s.mark();
    s.skip_inline_spaces();
    let key = consume_key(s);
    s.skip_inline_spaces();
    if !s.eat_literal(":") {
        s.reset(m);
        return None;
    }
    s.skip_inline_spaces();
    let value = consume_value(s);
    Some(RawPair { key, value })
}

/// Assertion pairs differ from generic pairs only in the key rule: assert
/// keys stop at a colon or line terminator, nothing else.
fn assert_pair(s: &mut Scanner) -> Option<RawPair> {
    let m = s.mark();
    s.skip_inline_spaces();
    let key = consume_assert_key(s);
    if !s.eat_literal(":") {
        s.reset(m);
        return None;
    }
    s.skip_inline_spaces();
    let value = consume_value(s);
    Some(RawPair { key, value })
}

fn consume_key(s: &mut Scanner) -> String {
    let start = s.pos();
    while let Some(c) = s.peek() {
        if s.at_newline() {
            break;
        }
        // A backslash pair is one key unit, so escaped colons survive the
        // key scan and reach the codec intact
        if c == '\\' && eat_escape_pair(s) {
            continue;
        }
        if c == ' ' || c == '\t' || c == ':' {
            break;
        }
        s.bump();
    }
    s.source()[start..s.pos()].to_string()
}

fn consume_assert_key(s: &mut Scanner) -> String {
    let start = s.pos();
    while let Some(c) = s.peek() {
        if s.at_newline() {
            break;
        }
        if c == '\\' && eat_escape_pair(s) {
            continue;
        }
        if c == ':' {
            break;
        }
        s.bump();
    }
    s.source()[start..s.pos()].to_string()
}

/// Consumes a backslash plus the following character, unless the backslash
/// sits at the end of the line (then it is an ordinary key character).
fn eat_escape_pair(s: &mut Scanner) -> bool {
    let m = s.mark();
    s.bump();
    if s.is_eof() || s.at_newline() {
        s.reset(m);
        return false;
    }
    s.bump();
    true
}

fn consume_value(s: &mut Scanner) -> String {
    let start = s.pos();
    while !s.is_eof() && !s.at_newline() {
        s.bump();
    }
    s.source()[start..s.pos()].to_string()
}

/// `<keyword> st* "{" nl* textblock tagend` — the payload is captured
/// verbatim (outdenting happens in the building stage). The payload may
/// contain any characters, including braces; only a `}` that begins a line
/// terminates the block.
fn keyword_text_block(s: &mut Scanner, keyword: &'static str) -> Option<String> {
    let m = s.mark();
    if !s.eat_literal(keyword) {
        s.reset(m);
        return None;
    }
    s.skip_inline_spaces();
    if !s.eat_literal("{") {
        s.reset(m);
        return None;
    }
    loop {
        let it = s.mark();
        if !s.eat_newline() {
            s.reset(it);
            break;
        }
    }
    let start = s.pos();
    consume_text_line(s);
    loop {
        let it = s.mark();
        if s.at_anchored_close('}') {
            break;
        }
        if !s.eat_newline() {
            s.reset(it);
            break;
        }
        consume_text_line(s);
    }
    let content = s.source()[start..s.pos()].to_string();
    if !s.eat_anchored_close('}', "\"}\" at the start of a line") {
        s.reset(m);
        return None;
    }
    Some(content)
}

fn consume_text_line(s: &mut Scanner) {
    while !s.is_eof() && !s.at_newline() {
        s.bump();
    }
}
