//! Configuration for paralix.
//!
//! Settings come from an optional `paralix.yaml`. Unknown fields are ignored
//! and every field has a default, so an empty file is a valid config.

mod model;
mod operations;
pub mod types;


pub use model::Config;
pub use types::ReportOrder;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "paralix.yaml";
