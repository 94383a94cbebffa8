//! In-memory sink for tests and embedders.

use super::OutputSink;
use crate::error::{ParalixError, Result};
use std::collections::BTreeMap;
use std::sync::Mutex;

/// In-memory sink; nothing touches the filesystem.
#[derive(Debug, Default)]
pub struct MemorySink {
    outputs: Mutex<BTreeMap<String, Vec<u8>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Labels currently stored, in byte order.
    pub fn labels(&self) -> Vec<String> {
        self.lock().keys().cloned().collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, Vec<u8>>> {
        // Inserts are whole-value, so a poisoned map is still consistent.
        self.outputs
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
    }
}

impl OutputSink for MemorySink {
    async fn reset(&self) -> Result<()> {
        self.lock().clear();
        Ok(())
    }

    async fn store(&self, label: &str, output: &[u8]) -> Result<()> {
        self.lock().insert(label.to_string(), output.to_vec());
        Ok(())
    }

    async fn load(&self, label: &str) -> Result<Vec<u8>> {
        self.lock().get(label).cloned().ok_or_else(|| ParalixError::Io {
            context: format!("no output stored for '{}'", label),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        })
    }

    async fn cleanup(&self) -> Result<()> {
        self.lock().clear();
        Ok(())
    }
}
