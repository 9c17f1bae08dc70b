//! End-to-end tests for request file parsing and serialization.

use bru_parser::bru::testing::{mk_pair, mk_var};
use bru_parser::{parse_request, serialize_request, Document, GraphqlBody, Http, Meta};
use rstest::rstest;

#[test]
fn test_basic_get_scenario() {
    let source = "meta {\n  name: Ping\n}\nget {\n  url: https://api.example.com/ping\n}\n";
    let doc = parse_request(source).unwrap();
    assert_eq!(
        doc.meta,
        Some(Meta {
            name: Some("Ping".to_string()),
            kind: "http".to_string(),
            seq: 1,
            extras: Vec::new(),
        })
    );
    assert_eq!(
        doc.http,
        Some(Http {
            method: Some("get".to_string()),
            url: Some("https://api.example.com/ping".to_string()),
            ..Http::default()
        })
    );
    let json = serde_json::to_value(&doc).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "meta": { "name": "Ping", "seq": 1, "type": "http" },
            "http": { "method": "get", "url": "https://api.example.com/ping" }
        })
    );
}

#[test]
fn test_disabled_header_scenario() {
    let doc = parse_request("headers {\n  ~X-Debug: true\n}").unwrap();
    assert_eq!(doc.headers, vec![mk_pair("X-Debug", "true", false)]);
}

#[test]
fn test_meta_defaults_scenario() {
    let doc = parse_request("meta {\n  name: Test\n}").unwrap();
    let meta = doc.meta.unwrap();
    assert_eq!(meta.name.as_deref(), Some("Test"));
    assert_eq!(meta.seq, 1);
    assert_eq!(meta.kind, "http");
}

#[test]
fn test_merge_concatenation_scenario() {
    let doc = parse_request("headers {\n  a: 1\n}\nheaders {\n  b: 2\n}").unwrap();
    assert_eq!(
        doc.headers,
        vec![mk_pair("a", "1", true), mk_pair("b", "2", true)]
    );
}

#[test]
fn test_json_body_with_embedded_braces_scenario() {
    let doc = parse_request("body:json {\n  {\"a\": 1}\n}").unwrap();
    assert_eq!(doc.body.unwrap().json.as_deref(), Some("{\"a\": 1}"));
}

#[rstest]
#[case("get")]
#[case("post")]
#[case("put")]
#[case("delete")]
#[case("patch")]
#[case("options")]
#[case("head")]
#[case("connect")]
#[case("trace")]
fn test_every_http_verb_parses(#[case] verb: &str) {
    let source = format!("{} {{\n  url: https://x\n}}", verb);
    let doc = parse_request(&source).unwrap();
    let http = doc.http.unwrap();
    assert_eq!(http.method.as_deref(), Some(verb));
    assert_eq!(http.url.as_deref(), Some("https://x"));
}

#[test]
fn test_kitchen_sink_document() {
    let source = concat!(
        "meta {\n  name: Create User\n  type: http\n  seq: 3\n}\n",
        "\n",
        "post {\n  url: {{base_url}}/users\n  body: json\n  auth: basic\n}\n",
        "\n",
        "query {\n  verbose: true\n}\n",
        "\n",
        "headers {\n  content-type: application/json\n  ~X-Debug: 1\n}\n",
        "\n",
        "auth:basic {\n  username: admin\n  password: s3cret\n}\n",
        "\n",
        "body:json {\n  {\n    \"login\": \"jnash\"\n  }\n}\n",
        "\n",
        "vars:pre-request {\n  @attempt: 1\n}\n",
        "\n",
        "vars:post-response {\n  user_id: res.body.id\n}\n",
        "\n",
        "assert {\n  res.status: eq 200\n}\n",
        "\n",
        "script:pre-request {\n  req.setTimeout(5000);\n}\n",
        "\n",
        "script:post-response {\n  console.log(res.status);\n}\n",
        "\n",
        "tests {\n  test(\"created\", () => {\n    expect(res.status).to.equal(201);\n  });\n}\n",
        "\n",
        "docs {\n  Creates a user.\n}\n",
    );
    let doc = parse_request(source).unwrap();

    let meta = doc.meta.as_ref().unwrap();
    assert_eq!(meta.name.as_deref(), Some("Create User"));
    assert_eq!(meta.seq, 3);

    let http = doc.http.as_ref().unwrap();
    assert_eq!(http.method.as_deref(), Some("post"));
    assert_eq!(http.url.as_deref(), Some("{{base_url}}/users"));
    assert_eq!(http.body.as_deref(), Some("json"));
    assert_eq!(http.auth.as_deref(), Some("basic"));

    assert_eq!(doc.query, vec![mk_pair("verbose", "true", true)]);
    assert_eq!(
        doc.headers,
        vec![
            mk_pair("content-type", "application/json", true),
            mk_pair("X-Debug", "1", false),
        ]
    );

    let auth = doc.auth.as_ref().unwrap();
    assert_eq!(auth.basic.as_ref().unwrap().username, "admin");

    assert_eq!(
        doc.body.as_ref().unwrap().json.as_deref(),
        Some("{\n  \"login\": \"jnash\"\n}")
    );

    let vars = doc.vars.as_ref().unwrap();
    assert_eq!(vars.req, vec![mk_var("attempt", "1", true, true)]);
    assert_eq!(vars.res, vec![mk_var("user_id", "res.body.id", true, false)]);

    assert_eq!(doc.assertions, vec![mk_pair("res.status", "eq 200", true)]);

    let script = doc.script.as_ref().unwrap();
    assert_eq!(script.req.as_deref(), Some("req.setTimeout(5000);"));
    assert_eq!(script.res.as_deref(), Some("console.log(res.status);"));

    assert_eq!(
        doc.tests.as_deref(),
        Some("test(\"created\", () => {\n  expect(res.status).to.equal(201);\n});")
    );
    assert_eq!(doc.docs.as_deref(), Some("Creates a user."));

    // The document survives a serialize/parse round trip exactly
    assert_eq!(parse_request(&serialize_request(&doc)).unwrap(), doc);
}

#[test]
fn test_graphql_request_roundtrip() {
    let mut doc = Document::default();
    doc.http = Some(Http {
        method: Some("post".to_string()),
        url: Some("https://api/graphql".to_string()),
        ..Http::default()
    });
    doc.body = Some(bru_parser::Body {
        graphql: Some(GraphqlBody {
            query: Some("query {\n  user(id: 1) {\n    name\n  }\n}".to_string()),
            variables: Some("{\"id\": 1}".to_string()),
        }),
        ..bru_parser::Body::default()
    });
    assert_eq!(parse_request(&serialize_request(&doc)).unwrap(), doc);
}

#[rstest]
#[case::single_line_dictionary("meta { name: x }")]
#[case::indented_close_brace("meta {\n  name: x\n  }")]
#[case::missing_close("get {\n  url: x\n")]
#[case::unknown_block("nonsense {\n}")]
#[case::trailing_garbage("meta {\n  name: x\n}\n!!!")]
fn test_grammar_errors(#[case] source: &str) {
    let err = parse_request(source).unwrap_err();
    let message = err.to_string();
    assert!(message.starts_with("Line "), "message was: {}", message);
}

#[test]
fn test_error_carries_position_of_offending_line() {
    let err = parse_request("meta {\n  name: x\n}\n\nbroken").unwrap_err();
    assert_eq!(err.line, 5);
    assert_eq!(err.column, 1);
}

#[test]
fn test_crlf_round_trip() {
    let source = "meta {\r\n  name: Ping\r\n}\r\n\r\nget {\r\n  url: https://x\r\n}\r\n";
    let doc = parse_request(source).unwrap();
    assert_eq!(doc.http.as_ref().unwrap().url.as_deref(), Some("https://x"));
    assert_eq!(parse_request(&serialize_request(&doc)).unwrap(), doc);
}

#[test]
fn test_header_value_with_newline_escape_roundtrip() {
    let mut doc = Document::default();
    doc.headers = vec![mk_pair("X-Note", "line one\nline two", true)];
    let text = serialize_request(&doc);
    assert!(text.contains("line one\\nline two"));
    assert_eq!(parse_request(&text).unwrap(), doc);
}

#[test]
fn test_header_name_with_colon_escape_roundtrip() {
    let mut doc = Document::default();
    doc.headers = vec![mk_pair("x:y", "v", true)];
    let text = serialize_request(&doc);
    assert!(text.contains("x\\:y"));
    assert_eq!(parse_request(&text).unwrap(), doc);
}

#[test]
fn test_assert_key_with_spaces_roundtrip() {
    let mut doc = Document::default();
    doc.assertions = vec![mk_pair("res.body contains", "hello", true)];
    assert_eq!(parse_request(&serialize_request(&doc)).unwrap(), doc);
}

#[test]
fn test_bare_body_sugar_reserializes_canonically() {
    let doc = parse_request("get {\n  url: https://x\n}\n\nbody {\n  {\"a\": 1}\n}").unwrap();
    assert_eq!(doc.http.as_ref().unwrap().body.as_deref(), Some("json"));
    assert_eq!(doc.body.as_ref().unwrap().json.as_deref(), Some("{\"a\": 1}"));
    // Canonical output spells the block body:json; the http tag keeps the
    // shorthand's meaning
    let text = serialize_request(&doc);
    assert!(text.contains("body:json {"));
    assert_eq!(parse_request(&text).unwrap(), doc);
}
