//! Document and run configuration for Corel.
//!
//! This module wires together the document models and the decoding/loading
//! helpers. Import from here for a convenient, stable API.
//!
//! Example:
//! use corel::config::load_forest_from_path;
//!
//! let forest = load_forest_from_path("ast.json")?;

pub mod loader;
pub mod models;

// Re-export document models
pub use models::{
    Document, Entry, LabelPayload, LoopPayload, MovePayload, NodeTypeValue, RunOptions,
    WaitPayload,
};

// Re-export loader utilities
pub use loader::{
    decode_reader, decode_slice, decode_str, forest_to_document, forest_to_json_pretty,
    generate_schema, load_forest_from_path, load_forest_from_reader, load_forest_from_source,
    load_forest_from_str, write_schema_to_writer,
};
