//! File I/O primitives with consistent error handling.

use crate::error::{Error, Result};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Read raw bytes, for callers that decode text themselves.
pub fn read_bytes(path: &Path, operation: &str) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| Error::internal_io(e.to_string(), Some(operation.to_string())))
}

/// Write content to file atomically (unique temp file in the same
/// directory, then rename).
///
/// Readers see either the old content or the new content, never a partial
/// write. Existing files next to `path` are never reused as the temp file,
/// and the temp file is removed on any failure.
pub fn write_file_atomic(path: &Path, content: &str, operation: &str) -> Result<()> {
    let parent = match path.parent() {
        Some(dir) if dir.as_os_str().is_empty() => Path::new("."),
        Some(dir) => dir,
        None => {
            return Err(Error::internal_io(
                format!("Invalid path: {}", path.display()),
                Some(operation.to_string()),
            ))
        }
    };

    let mut tmp = NamedTempFile::new_in(parent).map_err(|e| {
        Error::internal_io(e.to_string(), Some(format!("{} (create temp)", operation)))
    })?;

    tmp.write_all(content.as_bytes()).map_err(|e| {
        Error::internal_io(e.to_string(), Some(format!("{} (write temp)", operation)))
    })?;

    tmp.persist(path).map_err(|e| {
        Error::internal_io(
            e.error.to_string(),
            Some(format!("{} (rename)", operation)),
        )
    })?;

    Ok(())
}
