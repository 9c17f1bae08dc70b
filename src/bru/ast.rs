//! Typed document model for bru files.
//!
//! A request document is a mapping from block category to a block-specific
//! value; the categories are closed, so the document is a struct rather than
//! a free-form map. Optional and empty fields are skipped during serde
//! serialization, which keeps the JSON shape of a sparse document sparse (an
//! empty file serializes as `{}`).
//!
//! [`BlockFragment`] is the intermediate currency between the semantic
//! actions and the merger: one fragment per block occurrence in the source,
//! consumed immediately by [merging](crate::bru::merging). It is a closed sum
//! so the merge is an exhaustive match instead of a structural deep-merge.

use serde::{Deserialize, Serialize};

/// One `key: value` line of an enable-flag dictionary block.
///
/// `enabled` is derived from a leading `~` on the decoded key; the stored
/// name never contains the marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DictionaryPair {
    pub name: String,
    pub value: String,
    pub enabled: bool,
}

impl Default for DictionaryPair {
    fn default() -> Self {
        Self {
            name: String::new(),
            value: String::new(),
            enabled: true,
        }
    }
}

/// A variable line inside `vars:pre-request` / `vars:post-response`.
///
/// `local` is derived from a leading `@` on the (already de-tilded) name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VarPair {
    pub name: String,
    pub value: String,
    pub enabled: bool,
    pub local: bool,
}

impl Default for VarPair {
    fn default() -> Self {
        Self {
            name: String::new(),
            value: String::new(),
            enabled: true,
            local: false,
        }
    }
}

/// A plain name/value pair with no enable semantics (meta and http extras).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Pair {
    pub name: String,
    pub value: String,
}

/// The `meta` block. `seq` and `type` receive defaults whenever a meta block
/// is built, so merged documents always carry both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Meta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub seq: u64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extras: Vec<Pair>,
}

impl Default for Meta {
    fn default() -> Self {
        Self {
            name: None,
            kind: "http".to_string(),
            seq: 1,
            extras: Vec::new(),
        }
    }
}

/// The accumulated HTTP block: the verb, the request line pairs, and the
/// body/auth mode tags. A bare `body` block contributes only the body tag,
/// so every field is optional and merges key-wise.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Http {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extras: Vec<Pair>,
}

/// AWS Signature V4 credentials. All fields default to the empty string when
/// absent from the block.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AwsV4Auth {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: String,
    pub service: String,
    pub region: String,
    pub profile_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicAuth {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BearerAuth {
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DigestAuth {
    pub username: String,
    pub password: String,
}

/// Auth variants are positional: a block either appears with its full fixed
/// field set (missing fields as empty strings) or not at all.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Auth {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub awsv4: Option<AwsV4Auth>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub basic: Option<BasicAuth>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bearer: Option<BearerAuth>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<DigestAuth>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphqlBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<String>,
}

/// Body payloads. Text variants are outdented text blocks; the form variants
/// are enable-flag dictionaries.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Body {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xml: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sparql: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graphql: Option<GraphqlBody>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub form_url_encoded: Vec<DictionaryPair>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub multipart_form: Vec<DictionaryPair>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Vars {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub req: Vec<VarPair>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub res: Vec<VarPair>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Script {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub req: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub res: Option<String>,
}

/// A parsed request document.
///
/// The document owns all nested data; nothing is shared across parse calls
/// and nothing is retained by the engine between calls.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http: Option<Http>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub query: Vec<DictionaryPair>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<DictionaryPair>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth: Option<Auth>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Body>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vars: Option<Vars>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub assertions: Vec<DictionaryPair>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<Script>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tests: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docs: Option<String>,
}

/// A variable of an environment document. Secret variables carry their name
/// only; their value is never serialized back to text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvVariable {
    pub name: String,
    pub value: String,
    pub enabled: bool,
    pub secret: bool,
}

impl Default for EnvVariable {
    fn default() -> Self {
        Self {
            name: String::new(),
            value: String::new(),
            enabled: true,
            secret: false,
        }
    }
}

/// A parsed environment document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Environment {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub variables: Vec<EnvVariable>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Partial HTTP data contributed by one block occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HttpFragment {
    pub method: Option<String>,
    pub pairs: Vec<Pair>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthFragment {
    AwsV4(AwsV4Auth),
    Basic(BasicAuth),
    Bearer(BearerAuth),
    Digest(DigestAuth),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyFragment {
    Json(String),
    Text(String),
    Xml(String),
    Sparql(String),
    GraphqlQuery(String),
    GraphqlVariables(String),
    FormUrlEncoded(Vec<DictionaryPair>),
    MultipartForm(Vec<DictionaryPair>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VarsFragment {
    PreRequest(Vec<VarPair>),
    PostResponse(Vec<VarPair>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptFragment {
    PreRequest(String),
    PostResponse(String),
}

/// One block occurrence, shaped for the merger. Ephemeral: produced by the
/// semantic actions and folded into a [`Document`] immediately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockFragment {
    Meta(Meta),
    Http(HttpFragment),
    Query(Vec<DictionaryPair>),
    Headers(Vec<DictionaryPair>),
    Auth(AuthFragment),
    Body(BodyFragment),
    Vars(VarsFragment),
    Assertions(Vec<DictionaryPair>),
    Script(ScriptFragment),
    Tests(String),
    Docs(String),
}
