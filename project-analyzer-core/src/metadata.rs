//! Project metadata from marker files at the root: language, manifest fields,
//! and the README's first paragraph.

use crate::contract::{AnalysisError, DependencyMap, Language};
use indexmap::IndexMap;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

const README_FILE: &str = "README.md";
const README_MAX_CHARS: usize = 500;

/// Marker files checked after `package.json`, in order.
const LANGUAGE_MARKERS: &[(&str, Language)] = &[
    ("pyproject.toml", Language::Python),
    ("Gemfile", Language::Ruby),
    ("Cargo.toml", Language::Rust),
    ("CMakeLists.txt", Language::CCpp),
];

/// What the extractor could learn before traversal starts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BasicInfo {
    pub language: Option<Language>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub dependencies: Option<DependencyMap>,
    pub dev_dependencies: Option<DependencyMap>,
    pub readme: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PackageManifest {
    name: Option<String>,
    description: Option<String>,
    #[serde(default)]
    dependencies: IndexMap<String, serde_json::Value>,
    #[serde(default, rename = "devDependencies")]
    dev_dependencies: IndexMap<String, serde_json::Value>,
}

fn into_dependency_map(raw: IndexMap<String, serde_json::Value>) -> DependencyMap {
    raw.into_iter()
        .map(|(name, version)| {
            let version = match version {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            (name, version)
        })
        .collect()
}

/// Detect the language and read the manifest and README under `root`.
///
/// A malformed `package.json` is fatal. An unreadable README is logged and
/// left out.
pub fn extract_basic_info(root: &Path) -> Result<BasicInfo, AnalysisError> {
    let mut info = BasicInfo::default();

    let package_json = root.join("package.json");
    if package_json.exists() {
        info.language = Some(Language::JavaScriptTypeScript);
        let content = fs::read_to_string(&package_json)
            .map_err(|e| AnalysisError::read(&package_json, e))?;
        let manifest: PackageManifest =
            serde_json::from_str(&content).map_err(|e| AnalysisError::ManifestParse {
                path: package_json.clone(),
                source: e,
            })?;
        info.name = manifest.name.filter(|n| !n.is_empty());
        info.description = manifest.description.filter(|d| !d.is_empty());
        info.dependencies = Some(into_dependency_map(manifest.dependencies));
        info.dev_dependencies = Some(into_dependency_map(manifest.dev_dependencies));
        debug!(
            name = ?info.name,
            dependencies = info.dependencies.as_ref().map_or(0, |d| d.len()),
            "Parsed package.json"
        );
    } else {
        info.language = LANGUAGE_MARKERS
            .iter()
            .find(|(marker, _)| root.join(marker).exists())
            .map(|(_, language)| *language);
    }

    let readme_path = root.join(README_FILE);
    if readme_path.exists() {
        match fs::read_to_string(&readme_path) {
            Ok(readme) => info.readme = Some(first_paragraph(&readme)),
            Err(e) => warn!(error = %AnalysisError::read(&readme_path, e), "Skipping README"),
        }
    }

    info!(language = ?info.language, has_readme = info.readme.is_some(), "Extracted basic project info");
    Ok(info)
}

/// Text before the first blank line, trimmed, cut to 500 characters with a
/// trailing `...` when longer. CRLF line endings are treated like LF.
pub fn first_paragraph(text: &str) -> String {
    let text = text.replace("\r\n", "\n");
    let para = text.split("\n\n").next().unwrap_or_default().trim();
    if para.chars().count() > README_MAX_CHARS {
        let cut: String = para.chars().take(README_MAX_CHARS).collect();
        format!("{cut}...")
    } else {
        para.to_string()
    }
}
