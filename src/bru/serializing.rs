//! Canonical text emission for documents.
//!
//! The inverse direction of the engine. Two primitives cover every block
//! kind: dictionary-block emission (one `  key: value` line per pair, `~`
//! prefix for disabled pairs, `@` prefix for local vars) and text-block
//! emission (payload indented two spaces, close brace on its own line).
//!
//! Names and values of the escape-decoded mappings run through the codec's
//! encode step, so values containing newlines, colons in names, and
//! backslashes survive a serialize/parse round trip. The meta and http
//! objects are not decoded at parse time and are therefore emitted raw.
//!
//! Output ordering is fixed regardless of input: for environments — plain
//! vars, secret vars, color; for requests — meta, method block, query,
//! headers, auth variants, body variants, vars, assert, scripts, tests,
//! docs, with one blank line between blocks. Serialization has no error
//! conditions; a shape the grammar cannot represent (an empty text block)
//! is simply omitted.

use crate::bru::ast::{Auth, Body, Document, Environment, Http, Meta, Script, Vars};
use crate::bru::codec::{encode_name, encode_value};
use crate::bru::indentation::indent_string;

/// Serializes an environment document.
///
/// Secret variables are a one-way redaction: only their (possibly
/// tilde-prefixed) names are written, into a separate `vars:secret` list.
/// An environment with zero variables still emits an empty `vars` block so
/// the file keeps its expected structure.
pub fn serialize_environment(env: &Environment) -> String {
    let vars: Vec<String> = env
        .variables
        .iter()
        .filter(|variable| !variable.secret)
        .map(|variable| {
            format!(
                "  {}{}: {}",
                enable_prefix(variable.enabled),
                encode_name(&variable.name),
                encode_value(&variable.value)
            )
        })
        .collect();

    let secret_vars: Vec<String> = env
        .variables
        .iter()
        .filter(|variable| variable.secret)
        .map(|variable| {
            format!(
                "  {}{}",
                enable_prefix(variable.enabled),
                encode_name(&variable.name)
            )
        })
        .collect();

    let mut output = String::new();

    if env.variables.is_empty() {
        output.push_str("vars {\n}\n");
    }

    if !vars.is_empty() {
        output.push_str("vars {\n");
        output.push_str(&vars.join("\n"));
        output.push_str("\n}\n");
    }

    if !secret_vars.is_empty() {
        output.push_str("vars:secret [\n");
        output.push_str(&secret_vars.join(",\n"));
        output.push_str("\n]\n");
    }

    if let Some(color) = &env.color {
        output.push_str("color: ");
        output.push_str(&encode_value(color));
        output.push('\n');
    }

    output
}

/// Serializes a request document in the fixed canonical block order.
pub fn serialize_request(doc: &Document) -> String {
    let mut blocks: Vec<String> = Vec::new();

    if let Some(meta) = &doc.meta {
        blocks.push(meta_block(meta));
    }
    if let Some(http) = &doc.http {
        if let Some(block) = method_block(http) {
            blocks.push(block);
        }
    }
    if !doc.query.is_empty() {
        blocks.push(flagged_dictionary_block("query", &doc.query));
    }
    if !doc.headers.is_empty() {
        blocks.push(flagged_dictionary_block("headers", &doc.headers));
    }
    if let Some(auth) = &doc.auth {
        blocks.extend(auth_blocks(auth));
    }
    if let Some(body) = &doc.body {
        blocks.extend(body_blocks(body));
    }
    if let Some(vars) = &doc.vars {
        blocks.extend(vars_blocks(vars));
    }
    if !doc.assertions.is_empty() {
        blocks.push(flagged_dictionary_block("assert", &doc.assertions));
    }
    if let Some(script) = &doc.script {
        blocks.extend(script_blocks(script));
    }
    if let Some(tests) = &doc.tests {
        if let Some(block) = text_block("tests", tests) {
            blocks.push(block);
        }
    }
    if let Some(docs) = &doc.docs {
        if let Some(block) = text_block("docs", docs) {
            blocks.push(block);
        }
    }

    blocks.join("\n")
}

fn enable_prefix(enabled: bool) -> &'static str {
    if enabled {
        ""
    } else {
        "~"
    }
}

fn local_prefix(local: bool) -> &'static str {
    if local {
        "@"
    } else {
        ""
    }
}

fn dictionary_block(keyword: &str, lines: &[String]) -> String {
    let mut out = String::new();
    out.push_str(keyword);
    out.push_str(" {\n");
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
    out.push_str("}\n");
    out
}

fn flagged_dictionary_block(keyword: &str, pairs: &[crate::bru::ast::DictionaryPair]) -> String {
    let lines: Vec<String> = pairs
        .iter()
        .map(|pair| {
            format!(
                "  {}{}: {}",
                enable_prefix(pair.enabled),
                encode_name(&pair.name),
                encode_value(&pair.value)
            )
        })
        .collect();
    dictionary_block(keyword, &lines)
}

/// Text blocks cannot represent empty payloads; `None` means "omit".
fn text_block(keyword: &str, content: &str) -> Option<String> {
    if content.is_empty() {
        return None;
    }
    let mut out = String::new();
    out.push_str(keyword);
    out.push_str(" {\n");
    out.push_str(&indent_string(content));
    out.push_str("\n}\n");
    Some(out)
}

fn meta_block(meta: &Meta) -> String {
    let mut lines = Vec::new();
    if let Some(name) = &meta.name {
        lines.push(format!("  name: {}", name));
    }
    lines.push(format!("  type: {}", meta.kind));
    lines.push(format!("  seq: {}", meta.seq));
    for pair in &meta.extras {
        lines.push(format!("  {}: {}", pair.name, pair.value));
    }
    dictionary_block("meta", &lines)
}

fn method_block(http: &Http) -> Option<String> {
    let method = http.method.as_deref()?;
    debug_assert!(!method.is_empty(), "http method must not be empty");
    let mut lines = Vec::new();
    if let Some(url) = &http.url {
        lines.push(format!("  url: {}", url));
    }
    if let Some(body) = &http.body {
        lines.push(format!("  body: {}", body));
    }
    if let Some(auth) = &http.auth {
        lines.push(format!("  auth: {}", auth));
    }
    for pair in &http.extras {
        lines.push(format!("  {}: {}", pair.name, pair.value));
    }
    Some(dictionary_block(method, &lines))
}

fn auth_blocks(auth: &Auth) -> Vec<String> {
    let mut blocks = Vec::new();
    if let Some(awsv4) = &auth.awsv4 {
        blocks.push(dictionary_block(
            "auth:awsv4",
            &[
                format!("  accessKeyId: {}", encode_value(&awsv4.access_key_id)),
                format!("  secretAccessKey: {}", encode_value(&awsv4.secret_access_key)),
                format!("  sessionToken: {}", encode_value(&awsv4.session_token)),
                format!("  service: {}", encode_value(&awsv4.service)),
                format!("  region: {}", encode_value(&awsv4.region)),
                format!("  profileName: {}", encode_value(&awsv4.profile_name)),
            ],
        ));
    }
    if let Some(basic) = &auth.basic {
        blocks.push(dictionary_block(
            "auth:basic",
            &[
                format!("  username: {}", encode_value(&basic.username)),
                format!("  password: {}", encode_value(&basic.password)),
            ],
        ));
    }
    if let Some(bearer) = &auth.bearer {
        blocks.push(dictionary_block(
            "auth:bearer",
            &[format!("  token: {}", encode_value(&bearer.token))],
        ));
    }
    if let Some(digest) = &auth.digest {
        blocks.push(dictionary_block(
            "auth:digest",
            &[
                format!("  username: {}", encode_value(&digest.username)),
                format!("  password: {}", encode_value(&digest.password)),
            ],
        ));
    }
    blocks
}

fn body_blocks(body: &Body) -> Vec<String> {
    let mut blocks = Vec::new();
    if let Some(json) = &body.json {
        blocks.extend(text_block("body:json", json));
    }
    if let Some(text) = &body.text {
        blocks.extend(text_block("body:text", text));
    }
    if let Some(xml) = &body.xml {
        blocks.extend(text_block("body:xml", xml));
    }
    if let Some(sparql) = &body.sparql {
        blocks.extend(text_block("body:sparql", sparql));
    }
    if let Some(graphql) = &body.graphql {
        if let Some(query) = &graphql.query {
            blocks.extend(text_block("body:graphql", query));
        }
        if let Some(variables) = &graphql.variables {
            blocks.extend(text_block("body:graphql:vars", variables));
        }
    }
    if !body.form_url_encoded.is_empty() {
        blocks.push(flagged_dictionary_block(
            "body:form-urlencoded",
            &body.form_url_encoded,
        ));
    }
    if !body.multipart_form.is_empty() {
        blocks.push(flagged_dictionary_block(
            "body:multipart-form",
            &body.multipart_form,
        ));
    }
    blocks
}

fn vars_blocks(vars: &Vars) -> Vec<String> {
    let mut blocks = Vec::new();
    for (keyword, pairs) in [("vars:pre-request", &vars.req), ("vars:post-response", &vars.res)] {
        if pairs.is_empty() {
            continue;
        }
        let lines: Vec<String> = pairs
            .iter()
            .map(|pair| {
                format!(
                    "  {}{}{}: {}",
                    enable_prefix(pair.enabled),
                    local_prefix(pair.local),
                    encode_name(&pair.name),
                    encode_value(&pair.value)
                )
            })
            .collect();
        blocks.push(dictionary_block(keyword, &lines));
    }
    blocks
}

fn script_blocks(script: &Script) -> Vec<String> {
    let mut blocks = Vec::new();
    if let Some(req) = &script.req {
        blocks.extend(text_block("script:pre-request", req));
    }
    if let Some(res) = &script.res {
        blocks.extend(text_block("script:post-response", res));
    }
    blocks
}
