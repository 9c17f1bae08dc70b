//! Factory helpers shared by the unit and integration test suites.
//!
//! Tests assert on typed documents; these constructors keep the expected
//! values short enough to read at a glance.

use crate::bru::ast::{DictionaryPair, EnvVariable, VarPair};

pub fn mk_pair(name: &str, value: &str, enabled: bool) -> DictionaryPair {
    DictionaryPair {
        name: name.to_string(),
        value: value.to_string(),
        enabled,
    }
}

pub fn mk_var(name: &str, value: &str, enabled: bool, local: bool) -> VarPair {
    VarPair {
        name: name.to_string(),
        value: value.to_string(),
        enabled,
        local,
    }
}

pub fn mk_env_var(name: &str, value: &str, enabled: bool, secret: bool) -> EnvVariable {
    EnvVariable {
        name: name.to_string(),
        value: value.to_string(),
        enabled,
        secret,
    }
}
