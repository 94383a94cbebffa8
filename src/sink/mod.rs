//! Per-unit output storage.
//!
//! Every execution unit hands its captured output to an [`OutputSink`] under
//! the unit's label, and the report is later assembled by loading each label
//! back. Storing the same label twice keeps the last write.

mod memory;
mod scratch;

use crate::error::Result;

pub use memory::MemorySink;
pub use scratch::{MAX_FILE_NAME, RUN_DIR_NAME, ScratchDirSink, scratch_file_name};

/// Storage for captured unit output, keyed by label.
///
/// Units store concurrently; implementations partition storage by label so
/// distinct labels never contend.
pub trait OutputSink: Send + Sync {
    /// Discard everything stored by a previous run and make the sink ready.
    fn reset(&self) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Store `output` under `label`, replacing any earlier content.
    fn store(
        &self,
        label: &str,
        output: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Load the content stored under `label`.
    fn load(&self, label: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;

    /// Release the storage once the report has been written.
    fn cleanup(&self) -> impl std::future::Future<Output = Result<()>> + Send;
}
