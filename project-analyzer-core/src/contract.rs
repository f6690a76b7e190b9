//! # contract: data model and seams of the analysis pipeline
//!
//! This module holds the plain data types produced by the pipeline
//! ([`FileDescriptor`], [`FileAnalysis`], [`ProjectInfo`]), the error taxonomy
//! ([`AnalysisError`]), and the [`Completer`] trait used by the CLI to send a
//! formatted prompt to an LLM provider.
//!
//! ## Lifecycle
//! - [`FileDescriptor`]s are created by the walker, one per eligible file.
//! - [`FileAnalysis`] entries are derived from descriptors by the sampler.
//! - [`ProjectInfo`] is assembled once by [`crate::analyze::analyze_project`]
//!   and then only read by formatters.
//!
//! ## Mocking & Testing
//! - [`Completer`] is annotated for `mockall`, so consumers can generate
//!   deterministic mocks for CLI tests.

use async_trait::async_trait;
use indexmap::IndexMap;
use mockall::automock;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Dependency name to version requirement, in manifest declaration order.
pub type DependencyMap = IndexMap<String, String>;

/// One eligible file found during traversal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileDescriptor {
    /// Path relative to the analysed root, `/`-separated.
    pub relative_path: String,
    pub size_bytes: u64,
    /// Extension including the leading dot (e.g. `.rs`), empty if none.
    pub extension: String,
    pub importance_score: u32,
}

/// Coarse functional classification of a visited directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DirectoryRole {
    BackendApi,
    FrontendUi,
    Configuration,
    Testing,
    SupportingInfrastructure,
}

impl fmt::Display for DirectoryRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DirectoryRole::BackendApi => "Backend API",
            DirectoryRole::FrontendUi => "Frontend UI",
            DirectoryRole::Configuration => "Configuration",
            DirectoryRole::Testing => "Testing",
            DirectoryRole::SupportingInfrastructure => "Supporting Infrastructure",
        };
        f.write_str(label)
    }
}

/// Primary language inferred from the project's marker files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Language {
    #[serde(rename = "JavaScript/TypeScript")]
    JavaScriptTypeScript,
    Python,
    Ruby,
    Rust,
    #[serde(rename = "C/C++")]
    CCpp,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Language::JavaScriptTypeScript => "JavaScript/TypeScript",
            Language::Python => "Python",
            Language::Ruby => "Ruby",
            Language::Rust => "Rust",
            Language::CCpp => "C/C++",
        };
        f.write_str(label)
    }
}

/// Structural facts and an optional content sample for one analysed file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileAnalysis {
    pub path: String,
    pub line_count: usize,
    pub function_count: usize,
    pub class_count: usize,
    pub import_count: usize,
    pub functions: Vec<String>,
    pub classes: Vec<String>,
    pub comments: Vec<String>,
    /// `None` when structure-only mode was requested.
    pub sample: Option<String>,
}

/// The aggregate report handed, read-only, to a prompt formatter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectInfo {
    pub name: String,
    pub description: Option<String>,
    pub language: Option<Language>,
    /// Total eligible files, not just the analysed subset.
    pub file_count: usize,
    pub directory_count: usize,
    pub directories: Vec<String>,
    pub key_files: Vec<String>,
    pub dependencies: Option<DependencyMap>,
    pub dev_dependencies: Option<DependencyMap>,
    pub readme: Option<String>,
    pub file_analysis: Vec<FileAnalysis>,
    /// Absolute directory path to role, one entry per visited directory.
    pub directory_roles: BTreeMap<PathBuf, DirectoryRole>,
}

/// Errors raised by the analysis pipeline.
///
/// `Configuration` and `ManifestParse` abort an analysis. `Read` is
/// recovered where it happens: the item is skipped and a warning is logged.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Invalid directory path: {path}: {reason}")]
    Configuration { path: PathBuf, reason: String },

    #[error("Failed to parse manifest {path}: {source}")]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Error reading {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AnalysisError {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AnalysisError::Read {
            path: path.into(),
            source,
        }
    }
}

/// Error type for the completion step.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("Missing API key: set {0}")]
    MissingApiKey(&'static str),

    #[error("Request to {provider} failed: {source}")]
    Transport {
        provider: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Invalid response from {provider}: {message}")]
    InvalidResponse { provider: String, message: String },
}

/// Trait for sending a formatted prompt to an LLM and returning its completion.
///
/// Implementors return `Ok(None)` when the provider answered with a non-success
/// status, and `Err` when the request could not be made or the body was not
/// understood.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait Completer: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<Option<String>, CompletionError>;
}
