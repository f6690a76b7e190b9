//! Depth-first traversal of the project tree.
//!
//! The walker follows the order in which the filesystem lists entries; it does
//! not sort. Runs over an unchanged tree are reproducible only as far as that
//! listing order is stable.
//!
//! Each visited directory (the root included) receives one [`DirectoryRole`].
//! The role map lives in the returned [`WalkOutcome`], so nothing is carried
//! between calls.

use crate::config::AnalysisConfig;
use crate::contract::{AnalysisError, DirectoryRole, FileDescriptor};
use crate::filter::{extension_of, is_eligible_extension, should_ignore};
use crate::score::score;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Everything collected by one call to [`walk`].
#[derive(Debug, Default)]
pub struct WalkOutcome {
    /// Eligible files, in traversal order.
    pub files: Vec<FileDescriptor>,
    /// Absolute directory path to role.
    pub roles: BTreeMap<PathBuf, DirectoryRole>,
    /// Number of directories visited, the root included.
    pub directory_count: usize,
}

/// Classify a directory by its base name. The first matching rule wins.
pub fn classify_directory(name: &str) -> DirectoryRole {
    let name = name.to_lowercase();
    if name == "api" || name == "routes" {
        DirectoryRole::BackendApi
    } else if name.starts_with("ui") || name.starts_with("client") {
        DirectoryRole::FrontendUi
    } else if name.starts_with("config") || name == "env" || name == ".env" {
        DirectoryRole::Configuration
    } else if name.contains("test") {
        DirectoryRole::Testing
    } else {
        DirectoryRole::SupportingInfrastructure
    }
}

/// Walk `root` and return scored descriptors for every eligible file.
///
/// Unlistable directories and entries that cannot be stat'd are logged and
/// skipped; the walk itself does not fail.
pub fn walk(root: &Path, config: &AnalysisConfig) -> WalkOutcome {
    info!(path = %root.display(), "Walking project tree");
    let mut outcome = WalkOutcome::default();

    fn visit_dir(dir: &Path, relative: &str, config: &AnalysisConfig, out: &mut WalkOutcome) {
        let absolute = fs::canonicalize(dir).unwrap_or_else(|_| dir.to_path_buf());
        // Named from the resolved path so `.` and `..` classify like the real directory.
        let dir_name = absolute
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        out.roles
            .entry(absolute)
            .or_insert_with(|| classify_directory(&dir_name));
        out.directory_count += 1;

        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = %AnalysisError::read(dir, e), "Skipping unreadable directory");
                return;
            }
        };

        for entry_res in entries {
            let entry = match entry_res {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %AnalysisError::read(dir, e), "Skipping unreadable directory entry");
                    continue;
                }
            };
            let name = entry.file_name().to_string_lossy().into_owned();
            let path = entry.path();

            if should_ignore(&name, &config.ignore_patterns) {
                debug!(path = %path.display(), "Ignoring entry");
                continue;
            }

            let rel_path = if relative.is_empty() {
                name.clone()
            } else {
                format!("{relative}/{name}")
            };

            let is_symlink = entry.file_type().map(|t| t.is_symlink()).unwrap_or(false);
            let metadata = match fs::metadata(&path) {
                Ok(metadata) => metadata,
                Err(e) => {
                    warn!(error = %AnalysisError::read(&path, e), "Skipping entry that cannot be stat'd");
                    continue;
                }
            };

            if metadata.is_dir() {
                if is_symlink {
                    debug!(path = %path.display(), "Not following symlinked directory");
                    continue;
                }
                visit_dir(&path, &rel_path, config, out);
            } else if metadata.is_file() && is_eligible_extension(&name, &config.file_extensions) {
                let importance_score = score(&name, &rel_path, config);
                debug!(path = %rel_path, score = importance_score, "Found eligible file");
                out.files.push(FileDescriptor {
                    relative_path: rel_path,
                    size_bytes: metadata.len(),
                    extension: extension_of(&name),
                    importance_score,
                });
            }
        }
    }

    visit_dir(root, "", config, &mut outcome);

    info!(
        files = outcome.files.len(),
        directories = outcome.directory_count,
        "Completed project walk"
    );
    outcome
}
