//! Semantic actions: raw matched blocks to typed block fragments.
//!
//! Everything the grammar deliberately left raw is resolved here:
//!
//! - keys and values receive their single trim pass
//! - enable-flag dictionaries are escape-decoded and de-marked (`~`)
//! - vars additionally honor the local marker (`@`), after the tilde
//! - auth blocks extract their fixed field set by name, defaulting missing
//!   fields to the empty string
//! - meta receives its `seq`/`type` defaults, once per occurrence
//! - text payloads are outdented
//!
//! The meta and http dictionaries map to objects with later-key-override
//! semantics and keep their raw (undecoded) strings; only the enable-flag
//! pair mappings go through the codec.

use crate::bru::ast::{
    AuthFragment, AwsV4Auth, BasicAuth, BearerAuth, BlockFragment, BodyFragment, DictionaryPair,
    DigestAuth, Environment, EnvVariable, HttpFragment, Meta, Pair, ScriptFragment, VarPair,
    VarsFragment,
};
use crate::bru::codec::decode_string;
use crate::bru::indentation::outdent_string;
use crate::bru::parsing::environment::RawEnvBlock;
use crate::bru::parsing::{RawBlock, RawPair};

/// Maps the ordered raw blocks to ordered fragments. The bare `body`
/// shorthand expands to two fragments: the JSON body and the body-mode tag
/// on the HTTP block.
pub fn build_fragments(blocks: Vec<RawBlock>) -> Vec<BlockFragment> {
    let mut fragments = Vec::with_capacity(blocks.len());
    for block in blocks {
        match block {
            RawBlock::Meta(pairs) => fragments.push(BlockFragment::Meta(build_meta(pairs))),
            RawBlock::Http { method, pairs } => fragments.push(BlockFragment::Http(HttpFragment {
                method: Some(method.to_string()),
                pairs: map_pair_object(pairs),
            })),
            RawBlock::Query(pairs) => {
                fragments.push(BlockFragment::Query(map_dictionary_pairs(pairs)))
            }
            RawBlock::Headers(pairs) => {
                fragments.push(BlockFragment::Headers(map_dictionary_pairs(pairs)))
            }
            RawBlock::AuthAwsV4(pairs) => {
                let fields = map_plain_pairs(pairs);
                fragments.push(BlockFragment::Auth(AuthFragment::AwsV4(AwsV4Auth {
                    access_key_id: field(&fields, "accessKeyId"),
                    secret_access_key: field(&fields, "secretAccessKey"),
                    session_token: field(&fields, "sessionToken"),
                    service: field(&fields, "service"),
                    region: field(&fields, "region"),
                    profile_name: field(&fields, "profileName"),
                })));
            }
            RawBlock::AuthBasic(pairs) => {
                let fields = map_plain_pairs(pairs);
                fragments.push(BlockFragment::Auth(AuthFragment::Basic(BasicAuth {
                    username: field(&fields, "username"),
                    password: field(&fields, "password"),
                })));
            }
            RawBlock::AuthBearer(pairs) => {
                let fields = map_plain_pairs(pairs);
                fragments.push(BlockFragment::Auth(AuthFragment::Bearer(BearerAuth {
                    token: field(&fields, "token"),
                })));
            }
            RawBlock::AuthDigest(pairs) => {
                let fields = map_plain_pairs(pairs);
                fragments.push(BlockFragment::Auth(AuthFragment::Digest(DigestAuth {
                    username: field(&fields, "username"),
                    password: field(&fields, "password"),
                })));
            }
            RawBlock::BodyJson(text) => {
                fragments.push(BlockFragment::Body(BodyFragment::Json(outdent_string(&text))))
            }
            RawBlock::BodyText(text) => {
                fragments.push(BlockFragment::Body(BodyFragment::Text(outdent_string(&text))))
            }
            RawBlock::BodyXml(text) => {
                fragments.push(BlockFragment::Body(BodyFragment::Xml(outdent_string(&text))))
            }
            RawBlock::BodySparql(text) => fragments.push(BlockFragment::Body(BodyFragment::Sparql(
                outdent_string(&text),
            ))),
            RawBlock::BodyGraphql(text) => fragments.push(BlockFragment::Body(
                BodyFragment::GraphqlQuery(outdent_string(&text)),
            )),
            RawBlock::BodyGraphqlVars(text) => fragments.push(BlockFragment::Body(
                BodyFragment::GraphqlVariables(outdent_string(&text)),
            )),
            RawBlock::BodyFormUrlEncoded(pairs) => fragments.push(BlockFragment::Body(
                BodyFragment::FormUrlEncoded(map_dictionary_pairs(pairs)),
            )),
            RawBlock::BodyMultipartForm(pairs) => fragments.push(BlockFragment::Body(
                BodyFragment::MultipartForm(map_dictionary_pairs(pairs)),
            )),
            RawBlock::BodySugar(text) => {
                fragments.push(BlockFragment::Http(HttpFragment {
                    method: None,
                    pairs: vec![Pair {
                        name: "body".to_string(),
                        value: "json".to_string(),
                    }],
                }));
                fragments.push(BlockFragment::Body(BodyFragment::Json(outdent_string(&text))));
            }
            RawBlock::VarsPreRequest(pairs) => fragments.push(BlockFragment::Vars(
                VarsFragment::PreRequest(map_var_pairs(pairs)),
            )),
            RawBlock::VarsPostResponse(pairs) => fragments.push(BlockFragment::Vars(
                VarsFragment::PostResponse(map_var_pairs(pairs)),
            )),
            RawBlock::Assert(pairs) => {
                fragments.push(BlockFragment::Assertions(map_dictionary_pairs(pairs)))
            }
            RawBlock::ScriptPreRequest(text) => fragments.push(BlockFragment::Script(
                ScriptFragment::PreRequest(outdent_string(&text)),
            )),
            RawBlock::ScriptPostResponse(text) => fragments.push(BlockFragment::Script(
                ScriptFragment::PostResponse(outdent_string(&text)),
            )),
            RawBlock::Tests(text) => fragments.push(BlockFragment::Tests(outdent_string(&text))),
            RawBlock::Docs(text) => fragments.push(BlockFragment::Docs(outdent_string(&text))),
        }
    }
    fragments
}

/// Folds raw environment blocks into an [`Environment`]. Variable lists
/// concatenate in source order; the color scalar takes the latest write.
pub fn build_environment(blocks: Vec<RawEnvBlock>) -> Environment {
    let mut env = Environment::default();
    for block in blocks {
        match block {
            RawEnvBlock::Vars(pairs) => {
                env.variables
                    .extend(map_dictionary_pairs(pairs).into_iter().map(|pair| EnvVariable {
                        name: pair.name,
                        value: pair.value,
                        enabled: pair.enabled,
                        secret: false,
                    }));
            }
            RawEnvBlock::SecretNames(names) => {
                env.variables.extend(names.into_iter().map(|raw| {
                    let (name, enabled) = strip_enable_marker(decode_string(raw.trim()));
                    EnvVariable {
                        name,
                        value: String::new(),
                        enabled,
                        secret: true,
                    }
                }));
            }
            RawEnvBlock::Color(value) => {
                env.color = Some(decode_string(value.trim()));
            }
        }
    }
    env
}

/// The enable-flag pair mapping: decode, trim, strip the `~` marker.
pub fn map_dictionary_pairs(pairs: Vec<RawPair>) -> Vec<DictionaryPair> {
    pairs
        .into_iter()
        .map(|pair| {
            let (name, enabled) = strip_enable_marker(decode_string(pair.key.trim()));
            DictionaryPair {
                name,
                value: decode_string(pair.value.trim()),
                enabled,
            }
        })
        .collect()
}

/// Vars pairs: the local marker is read from the already de-tilded name.
fn map_var_pairs(pairs: Vec<RawPair>) -> Vec<VarPair> {
    map_dictionary_pairs(pairs)
        .into_iter()
        .map(|pair| {
            let (name, local) = match pair.name.strip_prefix('@') {
                Some(rest) => (rest.to_string(), true),
                None => (pair.name, false),
            };
            VarPair {
                name,
                value: pair.value,
                enabled: pair.enabled,
                local,
            }
        })
        .collect()
}

/// Auth pairs: decoded and trimmed, but positional — no enable marker.
fn map_plain_pairs(pairs: Vec<RawPair>) -> Vec<Pair> {
    pairs
        .into_iter()
        .map(|pair| Pair {
            name: decode_string(pair.key.trim()),
            value: decode_string(pair.value.trim()),
        })
        .collect()
}

/// The meta/http object mapping: raw trimmed strings, later keys override
/// earlier ones, first-occurrence order is kept.
fn map_pair_object(pairs: Vec<RawPair>) -> Vec<Pair> {
    let mut out: Vec<Pair> = Vec::new();
    for pair in pairs {
        let name = pair.key.trim().to_string();
        let value = pair.value.trim().to_string();
        match out.iter_mut().find(|existing| existing.name == name) {
            Some(existing) => existing.value = value,
            None => out.push(Pair { name, value }),
        }
    }
    out
}

fn field(pairs: &[Pair], name: &str) -> String {
    pairs
        .iter()
        .find(|pair| pair.name == name)
        .map(|pair| pair.value.clone())
        .unwrap_or_default()
}

fn strip_enable_marker(name: String) -> (String, bool) {
    match name.strip_prefix('~') {
        Some(rest) => (rest.to_string(), false),
        None => (name, true),
    }
}

fn build_meta(pairs: Vec<RawPair>) -> Meta {
    let mut meta = Meta {
        name: None,
        kind: String::new(),
        seq: 0,
        extras: Vec::new(),
    };
    let mut raw_seq: Option<String> = None;
    for pair in map_pair_object(pairs) {
        match pair.name.as_str() {
            "name" => meta.name = Some(pair.value),
            "type" => meta.kind = pair.value,
            "seq" => raw_seq = Some(pair.value),
            _ => meta.extras.push(pair),
        }
    }
    meta.seq = raw_seq.and_then(|raw| raw.parse::<u64>().ok()).unwrap_or(1);
    if meta.kind.is_empty() {
        meta.kind = "http".to_string();
    }
    meta
}
