//! Scratch-directory sink: one file per label.

use super::OutputSink;
use crate::error::{ParalixError, Result};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Subdirectory of the scratch root that a run owns.
pub const RUN_DIR_NAME: &str = "paralix-run";

/// Longest file name produced by [`scratch_file_name`], in bytes.
///
/// Common filesystems cap a path component at 255 bytes.
pub const MAX_FILE_NAME: usize = 200;

/// Stores each label's output as a file under `<root>/paralix-run`.
///
/// Only the run subdirectory is owned by the sink: [`OutputSink::reset`]
/// deletes and recreates it, [`OutputSink::cleanup`] deletes it. The root and
/// anything else inside it are never removed.
#[derive(Debug, Clone)]
pub struct ScratchDirSink {
    dir: PathBuf,
}

impl ScratchDirSink {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            dir: root.as_ref().join(RUN_DIR_NAME),
        }
    }

    /// File that holds the output for `label`.
    pub fn path_for(&self, label: &str) -> PathBuf {
        self.dir.join(scratch_file_name(label))
    }
}

/// Encode a label as a single path component of at most [`MAX_FILE_NAME`] bytes.
///
/// `%`, `/`, `\` and NUL are percent-escaped; the empty label and the
/// special names `.` and `..` are escaped as a whole. An encoding that is too
/// long keeps a prefix and ends in `%~` plus a hash of the full label, a
/// sequence no escaped name contains.
pub fn scratch_file_name(label: &str) -> String {
    let name = escape(label);
    if name.len() <= MAX_FILE_NAME {
        return name;
    }

    let mut hasher = DefaultHasher::new();
    label.hash(&mut hasher);
    let suffix = format!("%~{:016x}", hasher.finish());

    let mut cut = MAX_FILE_NAME - suffix.len();
    while !name.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}{}", &name[..cut], suffix)
}

fn escape(label: &str) -> String {
    match label {
        "" => return "%".to_string(),
        "." => return "%2E".to_string(),
        ".." => return "%2E%2E".to_string(),
        _ => {}
    }

    let mut name = String::with_capacity(label.len());
    for ch in label.chars() {
        match ch {
            '%' => name.push_str("%25"),
            '/' => name.push_str("%2F"),
            '\\' => name.push_str("%5C"),
            '\0' => name.push_str("%00"),
            _ => name.push(ch),
        }
    }
    name
}

impl OutputSink for ScratchDirSink {
    async fn reset(&self) -> Result<()> {
        match fs::remove_dir_all(&self.dir).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(ParalixError::io("clear scratch directory", &self.dir, e)),
        }

        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| ParalixError::io("create scratch directory", &self.dir, e))
    }

    async fn store(&self, label: &str, output: &[u8]) -> Result<()> {
        let path = self.path_for(label);
        fs::write(&path, output)
            .await
            .map_err(|e| ParalixError::io("write scratch file", &path, e))
    }

    async fn load(&self, label: &str) -> Result<Vec<u8>> {
        let path = self.path_for(label);
        fs::read(&path)
            .await
            .map_err(|e| ParalixError::io("read scratch file", &path, e))
    }

    async fn cleanup(&self) -> Result<()> {
        match fs::remove_dir_all(&self.dir).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ParalixError::io("remove scratch directory", &self.dir, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_scratch_file_name_plain() {
        assert_eq!(scratch_file_name("customers-01"), "customers-01");
        assert_eq!(scratch_file_name("with space"), "with space");
    }

    #[test]
    fn test_scratch_file_name_escapes_separators() {
        assert_eq!(scratch_file_name("a/b"), "a%2Fb");
        assert_eq!(scratch_file_name("a\\b"), "a%5Cb");
        assert_eq!(scratch_file_name("100%"), "100%25");
    }

    #[test]
    fn test_scratch_file_name_special_names() {
        assert_eq!(scratch_file_name(""), "%");
        assert_eq!(scratch_file_name("."), "%2E");
        assert_eq!(scratch_file_name(".."), "%2E%2E");
        assert_eq!(scratch_file_name(".hidden"), ".hidden");
    }

    #[test]
    fn test_scratch_file_name_is_injective_on_escapes() {
        assert_ne!(scratch_file_name("a/b"), scratch_file_name("a%2Fb"));
    }

    #[test]
    fn test_scratch_file_name_bounds_long_labels() {
        let long = "x".repeat(300);
        let name = scratch_file_name(&long);

        assert!(name.len() <= MAX_FILE_NAME);
        assert!(name.starts_with("xxxx"));
        assert!(name.contains("%~"));
        assert_eq!(name, scratch_file_name(&long));

        let other = format!("{}y", "x".repeat(299));
        assert_ne!(name, scratch_file_name(&other));
    }

    #[test]
    fn test_scratch_file_name_bounds_multibyte_labels() {
        let name = scratch_file_name(&"é".repeat(200));
        assert!(name.len() <= MAX_FILE_NAME);
        assert!(name.starts_with('é'));
    }

    #[test]
    fn test_scratch_file_name_keeps_names_at_the_limit() {
        let exact = "a".repeat(MAX_FILE_NAME);
        assert_eq!(scratch_file_name(&exact), exact);
    }

    #[tokio::test]
    async fn test_long_label_round_trip() {
        let temp = TempDir::new().unwrap();
        let sink = ScratchDirSink::new(temp.path());
        sink.reset().await.unwrap();

        let long = "x".repeat(300);
        sink.store(&long, b"long\n").await.unwrap();
        sink.store("a", b"short\n").await.unwrap();

        assert_eq!(sink.load(&long).await.unwrap(), b"long\n");
        assert_eq!(sink.load("a").await.unwrap(), b"short\n");
    }

    #[tokio::test]
    async fn test_reset_creates_empty_run_dir() {
        let temp = TempDir::new().unwrap();
        let run_dir = temp.path().join(RUN_DIR_NAME);
        std::fs::create_dir_all(&run_dir).unwrap();
        std::fs::write(run_dir.join("stale"), "old run").unwrap();

        let sink = ScratchDirSink::new(temp.path());
        sink.reset().await.unwrap();

        assert!(run_dir.is_dir());
        assert_eq!(std::fs::read_dir(&run_dir).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_root_contents_survive_reset_and_cleanup() {
        let temp = TempDir::new().unwrap();
        let work = temp.path().join("work");
        std::fs::create_dir_all(&work).unwrap();
        std::fs::write(work.join("thesis.txt"), "years of effort").unwrap();

        let sink = ScratchDirSink::new(&work);
        sink.reset().await.unwrap();
        sink.store("A", b"A\n").await.unwrap();
        sink.cleanup().await.unwrap();

        assert!(work.is_dir());
        assert_eq!(
            std::fs::read_to_string(work.join("thesis.txt")).unwrap(),
            "years of effort"
        );
        assert!(!work.join(RUN_DIR_NAME).exists());
    }

    #[tokio::test]
    async fn test_store_load_round_trip_for_awkward_labels() {
        let temp = TempDir::new().unwrap();
        let sink = ScratchDirSink::new(temp.path().join("scratch"));
        sink.reset().await.unwrap();

        sink.store("../escape", b"one").await.unwrap();
        sink.store("", b"two").await.unwrap();

        assert_eq!(sink.load("../escape").await.unwrap(), b"one");
        assert_eq!(sink.load("").await.unwrap(), b"two");
        assert!(!temp.path().join("scratch").join("escape").exists());
    }

    #[tokio::test]
    async fn test_cleanup_removes_dir_and_tolerates_absence() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("scratch");
        let sink = ScratchDirSink::new(&root);
        sink.reset().await.unwrap();
        sink.store("A", b"A\n").await.unwrap();

        sink.cleanup().await.unwrap();
        assert!(!root.join(RUN_DIR_NAME).exists());
        assert!(root.is_dir());

        sink.cleanup().await.unwrap();
    }

    #[tokio::test]
    async fn test_store_without_reset_fails_with_io() {
        let temp = TempDir::new().unwrap();
        let sink = ScratchDirSink::new(temp.path().join("never-created"));

        let err = sink.store("A", b"A").await.unwrap_err();
        assert!(matches!(err, ParalixError::Io { .. }));
    }
}
