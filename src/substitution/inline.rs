//! Parsing of inline `KEY={V1,V2,...}` arguments.

use crate::error::{ParalixError, Result};

/// Key of an inline argument: the trimmed text before the first `=`.
pub(super) fn parse_key(spec: &str) -> Result<String> {
    let (key, _) = spec
        .split_once('=')
        .ok_or_else(|| ParalixError::MalformedPlaceholder(format!("no '=' in '{}'", spec)))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(ParalixError::MalformedPlaceholder(format!(
            "empty key in '{}'",
            spec
        )));
    }

    Ok(key.to_string())
}

/// Every key named in the inline argument.
///
/// The argument is split on whitespace and each field holding an `=` contributes
/// the text before it, so `A={1,2} B={3}` supplies `A` and `B`. Only the first
/// key's values are ever substituted.
pub(super) fn supplied_keys(spec: &str) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    for field in spec.split_whitespace() {
        if let Some((key, _)) = field.split_once('=')
            && !key.is_empty()
            && !keys.iter().any(|k| k == key)
        {
            keys.push(key.to_string());
        }
    }
    keys
}

/// Values between the first `{` and the first `}`, split on `,` and trimmed.
///
/// `{}` yields a single empty value.
pub(super) fn parse_values(spec: &str) -> Result<Vec<String>> {
    let (open, close) = match (spec.find('{'), spec.find('}')) {
        (Some(open), Some(close)) if open < close => (open, close),
        _ => return Err(ParalixError::DelimiterFormat(spec.to_string())),
    };

    Ok(spec[open + 1..close]
        .split(',')
        .map(|v| v.trim().to_string())
        .collect())
}
