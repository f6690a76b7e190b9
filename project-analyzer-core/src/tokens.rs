//! Rough token accounting: how large a prompt is versus the raw project.

use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::warn;

use crate::contract::AnalysisError;

/// Extensions counted towards the raw project size, compared lower-cased.
pub const TEXT_FILE_EXTENSIONS: &[&str] = &[
    "js", "jsx", "ts", "tsx", "py", "java", "c", "cpp", "h", "cs", "php", "rb", "go", "html",
    "css", "json", "md", "txt", "xml", "sql", "yaml", "yml",
];

const CHARS_PER_TOKEN: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenSavings {
    pub token_count: usize,
    pub full_token_count: usize,
    /// Negative when the prompt is larger than the project itself.
    pub tokens_saved: i64,
    /// One decimal place; 0 when the project has no text.
    pub savings_percent: f64,
}

pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(CHARS_PER_TOKEN)
}

/// Sum of the character length of every text file under `dir`.
///
/// Directories named in `ignore` are skipped. Files that are not valid UTF-8
/// count by their byte size.
pub fn count_total_project_size(dir: &Path, ignore: &[&str]) -> usize {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(error = %AnalysisError::read(dir, e), "Skipping directory while sizing project");
            return 0;
        }
    };

    let mut total = 0;
    for entry in entries.flatten() {
        let name = entry.file_name().to_string_lossy().into_owned();
        if ignore.contains(&name.as_str()) {
            continue;
        }
        let path = entry.path();
        let Ok(metadata) = fs::metadata(&path) else {
            continue;
        };
        if metadata.is_dir() {
            total += count_total_project_size(&path, ignore);
        } else if metadata.is_file() && is_text_file(&path) {
            total += match fs::read_to_string(&path) {
                Ok(content) => content.chars().count(),
                Err(_) => metadata.len() as usize,
            };
        }
    }
    total
}

fn is_text_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| TEXT_FILE_EXTENSIONS.contains(&ext.as_str()))
}

/// Compare a prompt's token estimate with the estimate for the whole project.
pub fn calculate_token_savings(prompt: &str, project_root: &Path, ignore: &[&str]) -> TokenSavings {
    let full_size = count_total_project_size(project_root, ignore);
    savings_from_sizes(estimate_tokens(prompt), full_size.div_ceil(CHARS_PER_TOKEN))
}

fn savings_from_sizes(token_count: usize, full_token_count: usize) -> TokenSavings {
    let tokens_saved = full_token_count as i64 - token_count as i64;
    let savings_percent = if full_token_count > 0 {
        (tokens_saved as f64 / full_token_count as f64 * 1000.0).round() / 10.0
    } else {
        0.0
    };
    TokenSavings {
        token_count,
        full_token_count,
        tokens_saved,
        savings_percent,
    }
}
