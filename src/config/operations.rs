//! Config loading and validation.

use super::DEFAULT_CONFIG_FILE;
use super::model::Config;
use crate::error::{ParalixError, Result};
use crate::executor::Shell;
use std::path::Path;
use tracing::debug;

impl Config {
    /// Load config from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            ParalixError::Config(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Resolve the effective config.
    ///
    /// An explicit path must exist. Without one, `paralix.yaml` in the working
    /// directory is used when present, otherwise the defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            debug!(path = %path.display(), "loading config");
            return Self::load(path);
        }

        let implicit = Path::new(DEFAULT_CONFIG_FILE);
        if implicit.is_file() {
            debug!(path = %implicit.display(), "loading config");
            Self::load(implicit)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| ParalixError::Config(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| ParalixError::Config(format!("failed to serialize config to YAML: {}", e)))
    }

    /// Validation rules:
    /// - `scratch_dir` must be non-empty
    /// - `shell` must parse into at least one word
    pub fn validate(&self) -> Result<()> {
        if self.scratch_dir.as_os_str().is_empty() {
            return Err(ParalixError::Config(
                "scratch_dir must not be empty".to_string(),
            ));
        }

        self.shell()?;
        Ok(())
    }

    /// The parsed shell prefix.
    pub fn shell(&self) -> Result<Shell> {
        Shell::parse(&self.shell)
    }
}
