//! Main module for the bru engine.
//!
//! The engine is a pipeline of small, pure stages:
//!
//! 1. scanning: character-level primitives with PEG semantics (possessive
//!    repetition, ordered choice with backtracking, anchored-close lookahead)
//! 2. parsing: the block grammars (request files and environment files),
//!    producing raw matched blocks with no semantics applied
//! 3. building: semantic actions mapping raw blocks to typed block fragments
//!    (escape decoding, marker stripping, defaults, outdenting)
//! 4. merging: folding the ordered fragments into one document
//!
//! Serialization is the independent inverse direction and shares only the
//! codec and indentation helpers with the parse pipeline.

pub mod ast;
pub mod building;
pub mod codec;
pub mod indentation;
pub mod merging;
pub mod parsing;
pub mod pipeline;
pub mod scanning;
pub mod serializing;
pub mod testing;
