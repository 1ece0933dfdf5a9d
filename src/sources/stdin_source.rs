//! Standard input document source.
//!
//! Reads until EOF, so the whole document must be piped in before anything
//! is decoded, e.g. `corel -f - < program.json`.

use std::io::{self, Read};

use tracing::debug;

use super::DocumentSource;
use crate::error::DecodeError;

/// Source that reads a document from standard input.
#[derive(Debug, Clone, Default)]
pub struct StdinSource;

impl StdinSource {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentSource for StdinSource {
    fn name(&self) -> &'static str {
        "stdin"
    }

    fn location(&self) -> String {
        "<stdin>".to_string()
    }

    fn read(&self) -> Result<Vec<u8>, DecodeError> {
        let mut bytes = Vec::new();
        io::stdin()
            .lock()
            .read_to_end(&mut bytes)
            .map_err(DecodeError::Stdin)?;
        debug!(target: "corel::sources", bytes = bytes.len(), "Read document from stdin");
        Ok(bytes)
    }
}
