use regex::Regex;
use tracing::{debug, info};

/// A single ignore rule, matched against an entry's base name.
#[derive(Debug, Clone)]
pub enum IgnorePattern {
    /// The name must equal this string exactly.
    Exact(String),
    /// The name must match this expression anywhere.
    Regex(Regex),
}

impl IgnorePattern {
    pub fn matches(&self, name: &str) -> bool {
        match self {
            IgnorePattern::Exact(exact) => exact == name,
            IgnorePattern::Regex(re) => re.is_match(name),
        }
    }
}

impl From<&str> for IgnorePattern {
    fn from(name: &str) -> Self {
        IgnorePattern::Exact(name.to_string())
    }
}

impl From<Regex> for IgnorePattern {
    fn from(re: Regex) -> Self {
        IgnorePattern::Regex(re)
    }
}

pub const DEFAULT_MAX_FILES_TO_ANALYZE: usize = 15;
pub const DEFAULT_MAX_LINES_PER_FILE: usize = 50;
pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &["node_modules", ".git", "dist", "build"];
pub const DEFAULT_FILE_EXTENSIONS: &[&str] = &[
    ".js", ".jsx", ".ts", ".tsx", ".py", ".java", ".c", ".cpp", ".h", ".cs", ".php", ".rb",
    ".go", ".rs", ".html", ".css",
];
pub const DEFAULT_PRIORITY_FILES: &[&str] =
    &["package.json", "README.md", "main.js", "index.js", "app.js"];

/// Options recognised by the analysis pipeline and the prompt formatters.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub max_files_to_analyze: usize,
    pub max_lines_per_file: usize,
    /// Checked in order; the first matching pattern wins.
    pub ignore_patterns: Vec<IgnorePattern>,
    pub file_extensions: Vec<String>,
    pub priority_files: Vec<String>,
    pub include_structure_only: bool,
    /// List directories in the Claude prompt.
    pub include_structure: bool,
    /// List dependencies in the Claude prompt.
    pub include_dependencies: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_files_to_analyze: DEFAULT_MAX_FILES_TO_ANALYZE,
            max_lines_per_file: DEFAULT_MAX_LINES_PER_FILE,
            ignore_patterns: DEFAULT_IGNORE_PATTERNS
                .iter()
                .map(|p| IgnorePattern::from(*p))
                .collect(),
            file_extensions: DEFAULT_FILE_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            priority_files: DEFAULT_PRIORITY_FILES.iter().map(|f| f.to_string()).collect(),
            include_structure_only: false,
            include_structure: false,
            include_dependencies: false,
        }
    }
}

impl AnalysisConfig {
    pub fn trace_loaded(&self) {
        info!(
            max_files = self.max_files_to_analyze,
            max_lines = self.max_lines_per_file,
            ignore_count = self.ignore_patterns.len(),
            extension_count = self.file_extensions.len(),
            structure_only = self.include_structure_only,
            "Loaded AnalysisConfig"
        );
        debug!(?self, "AnalysisConfig loaded (full debug)");
    }
}
