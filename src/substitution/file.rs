//! File-backed substitution values.

use crate::error::{ParalixError, Result};
use std::path::Path;

/// The placeholder key named by an input file: its base name.
pub(super) fn key_from_path(path: &Path) -> Result<String> {
    match path.file_name() {
        Some(name) => Ok(name.to_string_lossy().into_owned()),
        None => Err(ParalixError::io(
            "use input file",
            path,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name"),
        )),
    }
}

/// One value per line, in file order.
///
/// A trailing newline does not produce an extra value; empty lines in the
/// middle of the file do. `\r\n` endings are accepted.
pub(super) fn read_values(path: &Path) -> Result<Vec<String>> {
    let content =
        std::fs::read_to_string(path).map_err(|e| ParalixError::io("read input file", path, e))?;

    Ok(content.lines().map(str::to_string).collect())
}
