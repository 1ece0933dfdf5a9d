//! Error types for every stage of a Corel run.
//!
//! Decoding and building are fatal for the whole run. Execution errors are
//! caught per top-level statement by the interpreter.

use std::path::PathBuf;

use serde_json::Value;
use thiserror::Error;

/// The raw input could not be turned into a JSON value.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("failed to read document from {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read document from stdin")]
    Stdin(#[source] std::io::Error),

    #[error("document is not well-formed JSON")]
    Syntax(#[from] serde_json::Error),
}

/// A decoded value does not have the shape of a Corel program.
///
/// Every variant carries the offending raw value as compact JSON.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("document root must be an array of entries, got: {raw}")]
    NotASequence { raw: String },

    #[error("invalid node type: {raw}")]
    UnknownNodeType { raw: String },

    #[error("node type declares more than one action ({}): {raw}", .keys.join(", "))]
    AmbiguousNodeType { keys: Vec<String>, raw: String },

    #[error("{kind} payload must be an object: {raw}")]
    PayloadNotAnObject { kind: &'static str, raw: String },

    #[error("missing field '{field}' in {kind} node: {raw}")]
    MissingField {
        kind: &'static str,
        field: &'static str,
        raw: String,
    },

    #[error("field '{field}' in {kind} node must be {expected}: {raw}")]
    WrongFieldType {
        kind: &'static str,
        field: &'static str,
        expected: &'static str,
        raw: String,
    },

    #[error("invalid or missing 'children' in LOOP node: {raw}")]
    MissingLoopChildren { raw: String },

    #[error("LOOP repeat count must not be negative ({count}): {raw}")]
    NegativeRepeatCount { count: i64, raw: String },

    #[error("entry-level 'children' must be an array: {raw}")]
    InvalidChildren { raw: String },
}

impl BuildError {
    /// Render a raw value the way errors quote it.
    pub(crate) fn raw(value: &Value) -> String {
        value.to_string()
    }
}

/// Anything that stops a document from becoming a forest.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Build(#[from] BuildError),
}

/// Failure while executing a node.
#[derive(Debug, Error)]
pub enum ExecError {
    /// The effector refused or failed to perform an action.
    #[error("{action} failed: {source:#}")]
    Effector {
        action: &'static str,
        #[source]
        source: anyhow::Error,
    },
}
