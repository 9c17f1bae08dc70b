//! # bru-parser
//!
//! A parser and serializer for the bru format.
//!
//! Bru files describe HTTP requests and environments as a sequence of named,
//! braced blocks. Two block shapes exist: dictionary blocks holding
//! `key: value` lines, and text blocks holding an opaque multi-line payload
//! that may itself contain braces (JSON bodies, scripts). The close marker of
//! every block is anchored to the start of a line, which is what lets text
//! payloads carry `{` and `}` freely.
//!
//! The crate exposes two document families:
//!
//! - request documents: `parse_request` / `serialize_request`
//! - environment documents: `parse_environment` / `serialize_environment`
//!
//! Parsing never produces a partial document; a file that does not match the
//! grammar yields a [`GrammarError`] with the furthest position reached.
//!
//! For testing guidelines and the factory helpers shared by the test suites,
//! see the [testing module](bru::testing).

pub mod bru;

pub use bru::ast::{
    Auth, AwsV4Auth, BasicAuth, BearerAuth, Body, DictionaryPair, DigestAuth, Document,
    EnvVariable, Environment, GraphqlBody, Http, Meta, Pair, Script, VarPair, Vars,
};
pub use bru::pipeline::{parse_environment, parse_request};
pub use bru::scanning::GrammarError;
pub use bru::serializing::{serialize_environment, serialize_request};
