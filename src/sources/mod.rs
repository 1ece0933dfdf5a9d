/*!
Document sources.

A source yields the raw bytes of one Corel document, read fully into memory
before anything is decoded. Concrete implementations live in their own files:

- `file.rs`         -> `FileSource`  (read a document from a path)
- `stdin_source.rs` -> `StdinSource` (read a document from standard input)

Use `source_for_path` to pick one from a CLI argument (`-` selects stdin).
*/

use std::path::Path;

use tracing::debug;

use crate::error::DecodeError;

pub mod file;
pub mod stdin_source;

pub use file::FileSource;
pub use stdin_source::StdinSource;

/// Trait implemented by all document sources.
pub trait DocumentSource {
    /// Static human-readable identifier (used in logs).
    fn name(&self) -> &'static str;

    /// Where the bytes come from, for diagnostics (e.g. the file path).
    fn location(&self) -> String;

    /// Read the whole document.
    fn read(&self) -> Result<Vec<u8>, DecodeError>;
}

/// Select a source for a CLI path argument. `-` reads standard input.
pub fn source_for_path(path: &Path) -> Box<dyn DocumentSource> {
    let source: Box<dyn DocumentSource> = if path == Path::new("-") {
        Box::new(StdinSource::new())
    } else {
        Box::new(FileSource::new(path))
    };
    debug!(
        target: "corel::sources",
        source = source.name(),
        location = %source.location(),
        "Selected document source"
    );
    source
}
