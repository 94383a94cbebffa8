//! Placeholder extraction from command templates.
//!
//! A placeholder is a `<NAME>` token: a `<`, one or more characters that are
//! neither `<` nor `>`, and a closing `>`. Extraction never fails; a template
//! without tokens yields an empty set.

use regex::Regex;
use std::sync::LazyLock;

static PLACEHOLDER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<([^<>]+)>").expect("placeholder pattern is a valid regex")
});

/// Distinct placeholder names in first-occurrence order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceholderSet {
    names: Vec<String>,
}

impl PlaceholderSet {
    /// Whether `name` appears in the template.
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    fn insert(&mut self, name: &str) {
        if !self.contains(name) {
            self.names.push(name.to_string());
        }
    }
}

/// Scan `template` for `<NAME>` tokens.
///
/// # Examples
///
/// ```ignore
/// let set = extract("cp <SRC> /backup/<SRC>.<EXT>");
/// assert_eq!(set.names(), ["SRC", "EXT"]);
/// ```
pub fn extract(template: &str) -> PlaceholderSet {
    let mut set = PlaceholderSet::default();
    for caps in PLACEHOLDER_PATTERN.captures_iter(template) {
        if let Some(name) = caps.get(1) {
            set.insert(name.as_str());
        }
    }
    set
}

/// The literal token for `key` as it appears in a template.
pub fn token(key: &str) -> String {
    format!("<{}>", key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_single() {
        let set = extract("echo <NAME>");
        assert_eq!(set.names(), ["NAME"]);
    }

    #[test]
    fn test_extract_none() {
        let set = extract("ls -la | wc -l");
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn test_extract_preserves_first_occurrence_order() {
        let set = extract("cp <SRC> /backup/<DEST>/<SRC>.<EXT>");
        assert_eq!(set.names(), ["SRC", "DEST", "EXT"]);
    }

    #[test]
    fn test_extract_collapses_duplicates() {
        let set = extract("<A> <A> <A>");
        assert_eq!(set.len(), 1);
        assert!(set.contains("A"));
    }

    #[test]
    fn test_extract_ignores_empty_brackets() {
        let set = extract("echo <> <X>");
        assert_eq!(set.names(), ["X"]);
    }

    #[test]
    fn test_extract_nested_brackets_take_innermost() {
        let set = extract("echo <<X>>");
        assert_eq!(set.names(), ["X"]);
    }

    #[test]
    fn test_extract_allows_spaces_and_symbols() {
        let set = extract("curl https://<host name>/<path-1.json>");
        assert_eq!(set.names(), ["host name", "path-1.json"]);
    }

    #[test]
    fn test_token_format() {
        assert_eq!(token("NAME"), "<NAME>");
        let set = extract(&token("customers"));
        assert!(set.contains("customers"));
    }
}
