//! Parse pipelines: scanning, building and merging wired end to end.
//!
//! Both entry points are pure functions over their input text: no I/O, no
//! state kept between calls, safe to invoke concurrently. Neither knows the
//! identity of the file the text came from; callers attach that context to
//! the returned [`GrammarError`] when reporting.

use crate::bru::ast::{Document, Environment};
use crate::bru::building::{build_environment, build_fragments};
use crate::bru::merging::merge_fragments;
use crate::bru::parsing;
use crate::bru::scanning::GrammarError;

/// Parses a request file into a [`Document`].
pub fn parse_request(source: &str) -> Result<Document, GrammarError> {
    let blocks = parsing::parse_blocks(source)?;
    Ok(merge_fragments(build_fragments(blocks)))
}

/// Parses an environment file into an [`Environment`].
pub fn parse_environment(source: &str) -> Result<Environment, GrammarError> {
    let blocks = parsing::environment::parse_environment_blocks(source)?;
    Ok(build_environment(blocks))
}
