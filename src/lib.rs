#![forbid(unsafe_code)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! Corel — load JSON-encoded automation macros and run them by walking a typed tree.
//!
//! A Corel program is a list of statements (waits, pointer moves, button presses,
//! clicks, key presses) plus one control-flow construct, a bounded `LOOP`.
//! The crate is organized into:
//! - `ast`: the typed program tree, its builder and its printer.
//! - `config`: document decoding/loading, document models and JSON Schema, run options.
//! - `executor`: the effector boundary and the tree-walking interpreter.
//! - `sources`: where document bytes come from (file, stdin).
//! - `error`: error types for decoding, building and execution.
//!
//! Use `corel::prelude::*` to bring commonly used items into scope quickly.

/// Public module: typed program tree (builder, printer).
pub mod ast;
/// Public module: document loading, models and run options.
pub mod config;
/// Public module: error taxonomy.
pub mod error;
/// Public module: execution engine (effectors and interpreter).
pub mod executor;
/// Public module: document sources (file, stdin).
pub mod sources;

/// Crate-level constants for consumers that want to inspect package metadata at runtime.
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the crate version (e.g., "0.1.0").
#[inline]
pub const fn version() -> &'static str {
    PKG_VERSION
}

/// Parse a level name (trace|debug|info|warn|error), case-insensitively.
pub fn parse_level(name: &str) -> Option<tracing::Level> {
    use tracing::Level;

    match name.to_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" | "warning" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

/// Initialize tracing (logging) with a reasonable default.
/// - Uses `level` if given and valid.
/// - Otherwise honors the `RUST_LOG` environment variable if set.
/// - Falls back to `info` level.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init_tracing(level: Option<&str>) {
    use tracing_subscriber::fmt;

    let level = level
        .and_then(parse_level)
        .or_else(|| std::env::var("RUST_LOG").ok().as_deref().and_then(parse_level))
        .unwrap_or(tracing::Level::INFO);

    // Ignore the error if the global subscriber was already set.
    let _ = fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();
}

/// A convenient set of exports for most consumers.
///
/// Bring this into scope with:
/// `use corel::prelude::*;`
pub mod prelude {
    // Common result/error handling
    pub use anyhow::{Context, Error, Result, anyhow, bail, ensure};

    // Tracing macros
    pub use tracing::{debug, error, info, instrument, trace, warn};

    pub use crate as corel;
    pub use crate::ast::{Action, ActionKind, AstNode, Forest, build_forest, render_forest};
    pub use crate::config::{RunOptions, load_forest_from_path, load_forest_from_str};
    pub use crate::error::{BuildError, DecodeError, ExecError, LoadError};
    pub use crate::executor::{Effector, Interpreter, ReportingEffector, RunReport};

    // Frequently used internal modules
    pub use crate::{ast, config, executor, sources};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("DEBUG"), Some(tracing::Level::DEBUG));
        assert_eq!(parse_level("warning"), Some(tracing::Level::WARN));
        assert_eq!(parse_level("loud"), None);
    }

    #[test]
    fn test_version_matches_manifest() {
        assert_eq!(version(), env!("CARGO_PKG_VERSION"));
    }
}
