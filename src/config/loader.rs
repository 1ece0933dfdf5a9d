use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use schemars::{Schema, schema_for};
use serde_json::Value;
use tracing::debug;

use super::models::Document;
use crate::ast::{self, AstNode, Forest};
use crate::error::{DecodeError, LoadError};
use crate::sources::{DocumentSource, FileSource};

/// Decode a JSON document from bytes.
pub fn decode_slice(bytes: &[u8]) -> Result<Value, DecodeError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Decode a JSON document from a string slice.
pub fn decode_str(s: &str) -> Result<Value, DecodeError> {
    Ok(serde_json::from_str(s)?)
}

/// Decode a JSON document from any reader.
pub fn decode_reader<R: Read>(reader: R) -> Result<Value, DecodeError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Decode and build a forest from a string slice.
pub fn load_forest_from_str(s: &str) -> Result<Forest, LoadError> {
    let value = decode_str(s)?;
    Ok(ast::build_forest(&value)?)
}

/// Decode and build a forest from any reader.
pub fn load_forest_from_reader<R: Read>(reader: R) -> Result<Forest, LoadError> {
    let value = decode_reader(reader)?;
    Ok(ast::build_forest(&value)?)
}

/// Read, decode and build a forest from a file path.
pub fn load_forest_from_path<P: AsRef<Path>>(path: P) -> Result<Forest, LoadError> {
    load_forest_from_source(&FileSource::new(path))
}

/// Read, decode and build a forest from any source.
///
/// The raw document, its pretty-printed form and the rendered tree are
/// logged at debug level.
pub fn load_forest_from_source(source: &dyn DocumentSource) -> Result<Forest, LoadError> {
    let bytes = source.read()?;
    debug!(
        target: "corel::loader",
        raw = %String::from_utf8_lossy(&bytes),
        "Raw document"
    );
    let value = decode_slice(&bytes)?;
    debug!(
        target: "corel::loader",
        location = %source.location(),
        document = %pretty(&value),
        "Decoded document"
    );
    let forest = ast::build_forest(&value)?;
    debug!(
        target: "corel::loader",
        location = %source.location(),
        roots = forest.len(),
        "Loaded program"
    );
    debug!(
        target: "corel::loader",
        ast = %ast::render_forest(&forest),
        "Built program tree"
    );
    Ok(forest)
}

/// Convert a built forest back into the canonical document shape.
pub fn forest_to_document(forest: &[AstNode]) -> Document {
    forest.iter().map(AstNode::to_entry).collect()
}

/// Serialize a built forest as canonical, pretty-printed JSON.
pub fn forest_to_json_pretty(forest: &[AstNode]) -> Result<String> {
    serde_json::to_string_pretty(&forest_to_document(forest))
        .context("Failed to serialize forest into JSON")
}

/// Generate the JSON Schema for the document format.
pub fn generate_schema() -> Schema {
    schema_for!(Document)
}

/// Write the JSON Schema for the document format to any writer (pretty-printed).
pub fn write_schema_to_writer<W: Write>(mut writer: W) -> Result<()> {
    let schema = generate_schema();
    let json = serde_json::to_string_pretty(&schema).context("Failed to serialize schema")?;
    writer
        .write_all(json.as_bytes())
        .context("Failed to write schema to writer")?;
    Ok(())
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
