//! Content sampling and pattern-based structural counting.
//!
//! Nothing here parses code. Each line is tested against a small table of
//! regexes ([`StructurePatterns`]), one per category, and a line may count in
//! several categories.

use crate::config::AnalysisConfig;
use crate::contract::{AnalysisError, FileAnalysis, FileDescriptor};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Per-category line matchers.
#[derive(Debug, Clone)]
pub struct StructurePatterns {
    pub function: Regex,
    pub class: Regex,
    pub import: Regex,
    pub comment: Regex,
}

impl Default for StructurePatterns {
    fn default() -> Self {
        Self {
            function: Regex::new(r"function\s+\w+\s*\(").unwrap(),
            class: Regex::new(r"class\s+\w+").unwrap(),
            import: Regex::new(r"import\s+|require\(").unwrap(),
            comment: Regex::new(r"//|/\*|#|--").unwrap(),
        }
    }
}

static DEFAULT_PATTERNS: Lazy<StructurePatterns> = Lazy::new(StructurePatterns::default);

impl StructurePatterns {
    /// Count structure in `content`, filling the counters and line lists of
    /// `analysis`.
    pub fn apply(&self, content: &str, analysis: &mut FileAnalysis) {
        for line in content.split('\n') {
            if self.function.is_match(line) {
                analysis.function_count += 1;
                analysis.functions.push(line.trim().to_string());
            }
            if self.class.is_match(line) {
                analysis.class_count += 1;
                analysis.classes.push(line.trim().to_string());
            }
            if self.import.is_match(line) {
                analysis.import_count += 1;
            }
            if self.comment.is_match(line) {
                analysis.comments.push(line.trim().to_string());
            }
        }
    }
}

/// Analyse one file with the default pattern table.
pub fn analyze_file(
    file: &FileDescriptor,
    config: &AnalysisConfig,
    root: &Path,
) -> Result<FileAnalysis, AnalysisError> {
    analyze_file_with(file, config, root, &DEFAULT_PATTERNS)
}

/// Analyse one file with a caller-supplied pattern table.
///
/// The content is always read in full; structure-only mode only drops the
/// sample from the result.
pub fn analyze_file_with(
    file: &FileDescriptor,
    config: &AnalysisConfig,
    root: &Path,
    patterns: &StructurePatterns,
) -> Result<FileAnalysis, AnalysisError> {
    let path = root.join(&file.relative_path);
    let content = fs::read_to_string(&path).map_err(|e| AnalysisError::read(&path, e))?;
    Ok(analyze_content(&file.relative_path, &content, config, patterns))
}

/// Build a [`FileAnalysis`] from in-memory content.
pub fn analyze_content(
    path: &str,
    content: &str,
    config: &AnalysisConfig,
    patterns: &StructurePatterns,
) -> FileAnalysis {
    let line_count = content.split('\n').count();
    let sample = if config.include_structure_only {
        None
    } else {
        Some(sample_lines(content, config.max_lines_per_file))
    };

    let mut analysis = FileAnalysis {
        path: path.to_string(),
        line_count,
        sample,
        ..FileAnalysis::default()
    };
    patterns.apply(content, &mut analysis);

    debug!(
        path,
        lines = analysis.line_count,
        functions = analysis.function_count,
        classes = analysis.class_count,
        imports = analysis.import_count,
        "Analysed file"
    );
    analysis
}

/// First `max_lines` lines of `content`, joined back with `\n`.
pub fn sample_lines(content: &str, max_lines: usize) -> String {
    content
        .split('\n')
        .take(max_lines)
        .collect::<Vec<_>>()
        .join("\n")
}
