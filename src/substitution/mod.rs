//! Substitution sources and their validation against a command template.
//!
//! A run varies exactly one placeholder. Its values come either from an inline
//! spec (`-p KEY={V1,V2}`) or from a file whose base name is the key and whose
//! lines are the values. [`resolve`] checks the source against the template's
//! placeholders and returns the key with its ordered values.

mod file;
mod inline;


use crate::error::{ParalixError, Result};
use crate::placeholder::{self, PlaceholderSet};
use std::path::{Path, PathBuf};

/// Where the values for the varying placeholder came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubstitutionSource {
    /// `-p KEY={V1,V2,...}`; values in comma order, trimmed.
    Inline { key: String, values: Vec<String> },
    /// `-f path`; key is the file's base name, values are its lines in order.
    FileBacked {
        key: String,
        path: PathBuf,
        values: Vec<String>,
    },
}

impl SubstitutionSource {
    pub fn key(&self) -> &str {
        match self {
            SubstitutionSource::Inline { key, .. } => key,
            SubstitutionSource::FileBacked { key, .. } => key,
        }
    }

    pub fn values(&self) -> &[String] {
        match self {
            SubstitutionSource::Inline { values, .. } => values,
            SubstitutionSource::FileBacked { values, .. } => values,
        }
    }
}

/// Validate the supplied source against `template` and load its values.
///
/// Checks run in a fixed order and each failure is distinct:
///
/// 1. exactly one of `inline_spec` / `file_path` ([`ParalixError::ConflictingInput`])
/// 2. the inline spec has a `KEY=` part ([`ParalixError::MalformedPlaceholder`])
/// 3. the key occurs in the template ([`ParalixError::UnmatchedPlaceholder`])
/// 4. every template placeholder is supplied ([`ParalixError::MissingSubstitution`])
/// 5. inline values sit between `{` and `}` ([`ParalixError::DelimiterFormat`]),
///    file values are readable ([`ParalixError::Io`])
///
/// No process is launched by this function.
pub fn resolve(
    template: &str,
    inline_spec: Option<&str>,
    file_path: Option<&Path>,
) -> Result<SubstitutionSource> {
    let placeholders = placeholder::extract(template);

    match (inline_spec, file_path) {
        (Some(_), Some(_)) => Err(ParalixError::ConflictingInput(
            "you can't use both --placeholder [-p] and --inputfile [-f]".to_string(),
        )),
        (None, None) => Err(ParalixError::ConflictingInput(
            "one of --placeholder [-p] or --inputfile [-f] is required".to_string(),
        )),
        (Some(spec), None) => resolve_inline(&placeholders, spec),
        (None, Some(path)) => resolve_file(&placeholders, path),
    }
}

fn resolve_inline(placeholders: &PlaceholderSet, spec: &str) -> Result<SubstitutionSource> {
    let key = inline::parse_key(spec)?;

    if !placeholders.contains(&key) {
        return Err(ParalixError::UnmatchedPlaceholder(key));
    }

    let mut supplied = inline::supplied_keys(spec);
    if !supplied.contains(&key) {
        supplied.insert(0, key.clone());
    }
    ensure_all_supplied(placeholders, &supplied)?;

    let values = inline::parse_values(spec)?;
    Ok(SubstitutionSource::Inline { key, values })
}

fn resolve_file(placeholders: &PlaceholderSet, path: &Path) -> Result<SubstitutionSource> {
    let key = file::key_from_path(path)?;

    if !placeholders.contains(&key) {
        return Err(ParalixError::UnmatchedPlaceholder(key));
    }

    ensure_all_supplied(placeholders, std::slice::from_ref(&key))?;

    let values = file::read_values(path)?;
    Ok(SubstitutionSource::FileBacked {
        key,
        path: path.to_path_buf(),
        values,
    })
}

fn ensure_all_supplied(placeholders: &PlaceholderSet, supplied: &[String]) -> Result<()> {
    match placeholders
        .iter()
        .find(|name| !supplied.iter().any(|k| k == name))
    {
        Some(missing) => Err(ParalixError::MissingSubstitution(missing.to_string())),
        None => Ok(()),
    }
}
