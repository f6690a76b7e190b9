//! Ignore and extension predicates used by the walker.

use crate::config::IgnorePattern;
use std::path::Path;

/// True when `name` matches any of `patterns`, checked in order.
pub fn should_ignore(name: &str, patterns: &[IgnorePattern]) -> bool {
    patterns.iter().any(|pattern| pattern.matches(name))
}

/// Extension of `name` including the leading dot, or an empty string.
///
/// Dotfiles such as `.env` have no extension.
pub fn extension_of(name: &str) -> String {
    Path::new(name)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

/// Case-sensitive check of the file's extension against the allow-list.
pub fn is_eligible_extension(name: &str, extensions: &[String]) -> bool {
    let ext = extension_of(name);
    !ext.is_empty() && extensions.iter().any(|allowed| *allowed == ext)
}
