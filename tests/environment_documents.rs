//! End-to-end tests for environment file parsing and serialization.

use bru_parser::bru::testing::mk_env_var;
use bru_parser::{parse_environment, serialize_environment, Environment};

#[test]
fn test_env_serialization_scenario() {
    let env = Environment {
        variables: vec![mk_env_var("base_url", "http://localhost", true, false)],
        color: Some("blue".to_string()),
    };
    assert_eq!(
        serialize_environment(&env),
        "vars {\n  base_url: http://localhost\n}\ncolor: blue\n"
    );
}

#[test]
fn test_env_parse_basic() {
    let env = parse_environment("vars {\n  base_url: http://localhost\n  ~port: 8080\n}\n").unwrap();
    assert_eq!(
        env.variables,
        vec![
            mk_env_var("base_url", "http://localhost", true, false),
            mk_env_var("port", "8080", false, false),
        ]
    );
    assert_eq!(env.color, None);
}

#[test]
fn test_env_secret_names_parse_without_values() {
    let env = parse_environment("vars:secret [\n  api_key,\n  ~old_key\n]\n").unwrap();
    assert_eq!(
        env.variables,
        vec![
            mk_env_var("api_key", "", true, true),
            mk_env_var("old_key", "", false, true),
        ]
    );
}

#[test]
fn test_env_roundtrip_preserves_all_covered_fields() {
    let env = Environment {
        variables: vec![
            mk_env_var("host", "localhost", true, false),
            mk_env_var("port", "8080", false, false),
            mk_env_var("token", "", true, true),
            mk_env_var("legacy_token", "", false, true),
        ],
        color: Some("blue".to_string()),
    };
    assert_eq!(parse_environment(&serialize_environment(&env)).unwrap(), env);
}

#[test]
fn test_env_secret_values_never_reach_the_text() {
    let env = Environment {
        variables: vec![mk_env_var("token", "hunter2", true, true)],
        color: None,
    };
    let text = serialize_environment(&env);
    assert!(!text.contains("hunter2"));
    // The reparsed variable keeps its identity, with the value redacted
    let reparsed = parse_environment(&text).unwrap();
    assert_eq!(reparsed.variables, vec![mk_env_var("token", "", true, true)]);
}

#[test]
fn test_env_empty_variables_roundtrip() {
    let env = Environment::default();
    let text = serialize_environment(&env);
    assert_eq!(text, "vars {\n}\n");
    assert_eq!(parse_environment(&text).unwrap(), env);
}

#[test]
fn test_env_empty_color_roundtrip() {
    let env = Environment {
        variables: Vec::new(),
        color: Some(String::new()),
    };
    assert_eq!(parse_environment(&serialize_environment(&env)).unwrap(), env);
}

#[test]
fn test_env_value_with_newline_roundtrip() {
    let env = Environment {
        variables: vec![mk_env_var("pem", "-----BEGIN-----\nabc\n-----END-----", true, false)],
        color: None,
    };
    let text = serialize_environment(&env);
    assert!(text.contains("\\n"));
    assert_eq!(parse_environment(&text).unwrap(), env);
}

#[test]
fn test_env_grammar_error() {
    let err = parse_environment("vars {\n  a: 1\n} trailing [").unwrap_err();
    assert!(err.to_string().starts_with("Line "));
}
