//! Filesystem helpers for the report destination.
//!
//! The report is written with a temp-file-then-rename sequence so a reader of
//! the output path never sees a half-written report:
//!
//! 1. write to `.{filename}.tmp` in the same directory
//! 2. fsync the temp file
//! 3. rename it over the target
//!
//! On crash a `.{filename}.tmp` may remain next to the target.

use crate::error::{ParalixError, Result};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Create (or truncate) the output file so an unwritable destination is
/// detected before any unit runs.
pub fn create_output_file(path: &Path) -> Result<()> {
    ensure_parent(path)?;
    OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .map_err(|e| ParalixError::io("create output file", path, e))?;
    Ok(())
}

/// Atomically write bytes to `path`.
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    ensure_parent(path)?;

    let temp_path = temp_path_for(path)?;
    write_and_sync(&temp_path, content)?;

    if let Err(e) = replace(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(ParalixError::io("replace output file", path, e));
    }

    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)
            .map_err(|e| ParalixError::io("create parent directory", parent, e))?;
    }
    Ok(())
}

fn temp_path_for(target: &Path) -> Result<PathBuf> {
    let filename = target.file_name().ok_or_else(|| {
        ParalixError::io(
            "write output file",
            target,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name"),
        )
    })?;

    let mut temp_name = std::ffi::OsString::from(".");
    temp_name.push(filename);
    temp_name.push(".tmp");
    Ok(target.with_file_name(temp_name))
}

fn write_and_sync(path: &Path, content: &[u8]) -> Result<()> {
    let result = File::create(path).and_then(|mut file| {
        file.write_all(content)?;
        file.sync_all()
    });

    result.map_err(|e| {
        let _ = fs::remove_file(path);
        ParalixError::io("write temporary file", path, e)
    })
}

#[cfg(unix)]
fn replace(source: &Path, target: &Path) -> std::io::Result<()> {
    fs::rename(source, target)?;

    // Persist the directory entry as well.
    if let Some(parent) = target.parent()
        && let Ok(dir) = File::open(parent)
    {
        let _ = dir.sync_all();
    }
    Ok(())
}

#[cfg(not(unix))]
fn replace(source: &Path, target: &Path) -> std::io::Result<()> {
    match fs::rename(source, target) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            fs::remove_file(target)?;
            fs::rename(source, target)
        }
        Err(e) => Err(e),
    }
}
