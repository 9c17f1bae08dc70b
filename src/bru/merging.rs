//! Folds ordered block fragments into one document.
//!
//! Merge semantics: sequence-valued categories concatenate in fragment
//! order, scalar paths take the latest write, and partial HTTP fragments
//! merge key-wise into the accumulated block. The match is exhaustive over
//! the fragment sum, so adding a block category without deciding its merge
//! behavior fails to compile.

use crate::bru::ast::{
    AuthFragment, BlockFragment, BodyFragment, Document, Http, HttpFragment, Meta, Pair,
    ScriptFragment, VarsFragment,
};

/// Folds fragments in order; an empty sequence yields the empty document.
pub fn merge_fragments(fragments: Vec<BlockFragment>) -> Document {
    let mut doc = Document::default();
    for fragment in fragments {
        merge_fragment(&mut doc, fragment);
    }
    doc
}

fn merge_fragment(doc: &mut Document, fragment: BlockFragment) {
    match fragment {
        BlockFragment::Meta(meta) => merge_meta(doc, meta),
        BlockFragment::Http(http) => merge_http(doc, http),
        BlockFragment::Query(pairs) => doc.query.extend(pairs),
        BlockFragment::Headers(pairs) => doc.headers.extend(pairs),
        BlockFragment::Auth(auth) => {
            let target = doc.auth.get_or_insert_with(Default::default);
            match auth {
                AuthFragment::AwsV4(a) => target.awsv4 = Some(a),
                AuthFragment::Basic(a) => target.basic = Some(a),
                AuthFragment::Bearer(a) => target.bearer = Some(a),
                AuthFragment::Digest(a) => target.digest = Some(a),
            }
        }
        BlockFragment::Body(body) => {
            let target = doc.body.get_or_insert_with(Default::default);
            match body {
                BodyFragment::Json(text) => target.json = Some(text),
                BodyFragment::Text(text) => target.text = Some(text),
                BodyFragment::Xml(text) => target.xml = Some(text),
                BodyFragment::Sparql(text) => target.sparql = Some(text),
                BodyFragment::GraphqlQuery(text) => {
                    target.graphql.get_or_insert_with(Default::default).query = Some(text)
                }
                BodyFragment::GraphqlVariables(text) => {
                    target.graphql.get_or_insert_with(Default::default).variables = Some(text)
                }
                BodyFragment::FormUrlEncoded(pairs) => target.form_url_encoded.extend(pairs),
                BodyFragment::MultipartForm(pairs) => target.multipart_form.extend(pairs),
            }
        }
        BlockFragment::Vars(vars) => {
            let target = doc.vars.get_or_insert_with(Default::default);
            match vars {
                VarsFragment::PreRequest(pairs) => target.req.extend(pairs),
                VarsFragment::PostResponse(pairs) => target.res.extend(pairs),
            }
        }
        BlockFragment::Assertions(pairs) => doc.assertions.extend(pairs),
        BlockFragment::Script(script) => {
            let target = doc.script.get_or_insert_with(Default::default);
            match script {
                ScriptFragment::PreRequest(text) => target.req = Some(text),
                ScriptFragment::PostResponse(text) => target.res = Some(text),
            }
        }
        BlockFragment::Tests(text) => doc.tests = Some(text),
        BlockFragment::Docs(text) => doc.docs = Some(text),
    }
}

/// A later meta block overrides field-wise. `seq` and `type` always carry
/// their per-occurrence defaults, so they always overwrite; `name` only
/// overwrites when the later block actually had one.
fn merge_meta(doc: &mut Document, meta: Meta) {
    match &mut doc.meta {
        None => doc.meta = Some(meta),
        Some(existing) => {
            if meta.name.is_some() {
                existing.name = meta.name;
            }
            existing.kind = meta.kind;
            existing.seq = meta.seq;
            for pair in meta.extras {
                override_or_push(&mut existing.extras, pair);
            }
        }
    }
}

fn merge_http(doc: &mut Document, fragment: HttpFragment) {
    let http = doc.http.get_or_insert_with(Http::default);
    if fragment.method.is_some() {
        http.method = fragment.method;
    }
    for pair in fragment.pairs {
        match pair.name.as_str() {
            "url" => http.url = Some(pair.value),
            "body" => http.body = Some(pair.value),
            "auth" => http.auth = Some(pair.value),
            _ => override_or_push(&mut http.extras, pair),
        }
    }
}

fn override_or_push(pairs: &mut Vec<Pair>, pair: Pair) {
    match pairs.iter_mut().find(|existing| existing.name == pair.name) {
        Some(existing) => existing.value = pair.value,
        None => pairs.push(pair),
    }
}
