//! Top-level analysis: metadata, walk, rank, truncate, sample.
//!
//! [`analyze_project`] is the single entrypoint. It builds one [`ProjectInfo`]
//! per call and shares no state between calls.
//!
//! # Errors
//! A missing or non-directory root and a malformed manifest fail the call.
//! Files that cannot be read while sampling are logged and left out, and the
//! returned report is still complete.

use crate::config::AnalysisConfig;
use crate::contract::{AnalysisError, FileDescriptor, ProjectInfo};
use crate::metadata::extract_basic_info;
use crate::sample::analyze_file;
use crate::walk::walk;
use std::path::Path;
use tracing::{info, warn};

const MAX_KEY_FILES: usize = 5;
const MAX_DIRECTORIES: usize = 10;

pub fn analyze_project(root: &Path, config: &AnalysisConfig) -> Result<ProjectInfo, AnalysisError> {
    if !root.is_dir() {
        let reason = if root.exists() {
            "not a directory"
        } else {
            "does not exist"
        };
        return Err(AnalysisError::Configuration {
            path: root.to_path_buf(),
            reason: reason.to_string(),
        });
    }
    info!(path = %root.display(), "Starting project analysis");

    let basic = extract_basic_info(root)?;
    let dir_name = root
        .canonicalize()
        .ok()
        .as_deref()
        .unwrap_or(root)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut project = ProjectInfo {
        name: basic.name.unwrap_or(dir_name),
        description: basic.description,
        language: basic.language,
        dependencies: basic.dependencies,
        dev_dependencies: basic.dev_dependencies,
        readme: basic.readme,
        ..ProjectInfo::default()
    };

    let outcome = walk(root, config);
    if outcome.files.is_empty() {
        info!("No eligible files found");
        return Ok(project);
    }

    let mut files = outcome.files;
    // Stable: equal scores keep traversal order.
    files.sort_by(|a, b| b.importance_score.cmp(&a.importance_score));

    project.file_count = files.len();
    project.directory_count = outcome.directory_count;
    project.directory_roles = outcome.roles;
    project.key_files = files
        .iter()
        .take(MAX_KEY_FILES)
        .map(|f| f.relative_path.clone())
        .collect();
    project.directories = parent_directories(&files, MAX_DIRECTORIES);

    let selected = &files[..files.len().min(config.max_files_to_analyze)];
    project.file_analysis = selected
        .iter()
        .filter_map(|file| match analyze_file(file, config, root) {
            Ok(analysis) => Some(analysis),
            Err(e) => {
                warn!(error = %e, "Skipping file that could not be analysed");
                None
            }
        })
        .collect();

    info!(
        name = %project.name,
        files = project.file_count,
        analysed = project.file_analysis.len(),
        "Project analysis complete"
    );
    Ok(project)
}

/// Distinct parent directories in order of first appearance, `.` for the root.
fn parent_directories(files: &[FileDescriptor], limit: usize) -> Vec<String> {
    let mut dirs: Vec<String> = Vec::new();
    for file in files {
        let parent = match file.relative_path.rsplit_once('/') {
            Some((parent, _)) => parent.to_string(),
            None => ".".to_string(),
        };
        if !dirs.contains(&parent) {
            dirs.push(parent);
            if dirs.len() == limit {
                break;
            }
        }
    }
    dirs
}
