//! Paralix: run one shell command template over many values in parallel.
//!
//! A template such as `curl -s https://<HOST>/health` names one placeholder.
//! Values for it come from an inline list (`HOST={a,b,c}`) or from a file
//! named after the placeholder, one value per line. Every value runs as its
//! own shell process, concurrently, and the captured output of all of them is
//! merged into a single report ordered by value.
//!
//! The pipeline is [`placeholder::extract`] -> [`substitution::resolve`] ->
//! [`executor::execute_all`] -> [`report::aggregate`], sequenced by
//! [`orchestrator::Orchestrator`].

pub mod config;
pub mod error;
pub mod executor;
pub mod exit_codes;
pub mod fs;
pub mod logging;
pub mod orchestrator;
pub mod placeholder;
pub mod report;
pub mod sink;
pub mod substitution;

pub use error::{ParalixError, Result};
pub use orchestrator::{Orchestrator, RunRequest, RunState, RunSummary};
