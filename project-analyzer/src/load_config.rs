/// `load_config` module: loads an optional YAML config file and adapts it into
/// the core [`AnalysisConfig`] and the provider client settings.
///
/// This is the only place where user-supplied YAML is parsed. The YAML-side
/// types below are loosely typed (strings, optional fields); the conversion
/// methods map them to the strongly-typed core structs.
///
/// # Accepted schema
/// ```yaml
/// analysis:
///   max_files_to_analyze: 20
///   max_lines_per_file: 40
///   ignore_patterns:
///     - node_modules
///     - regex: "^\\."
///   file_extensions: [".rs", ".toml"]
///   priority_files: ["main.rs"]
///   include_structure_only: false
/// provider:
///   kind: openrouter
///   model: openrouter/auto
///   base_url: https://openrouter.ai
///   max_tokens: 512
/// ```
/// Every key is optional. Secrets (API keys) are never read from this file.
///
/// # Errors
/// All errors use `anyhow::Error` with the config path in context and are
/// surfaced at the CLI boundary.
use anyhow::{Context, Result};
use project_analyzer_core::config::{AnalysisConfig, IgnorePattern};
use project_analyzer_core::prompt::Provider;
use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{error, info};

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    #[serde(default)]
    pub analysis: AnalysisSection,
    #[serde(default)]
    pub provider: ProviderSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisSection {
    pub max_files_to_analyze: Option<usize>,
    pub max_lines_per_file: Option<usize>,
    pub ignore_patterns: Option<Vec<IgnorePatternYaml>>,
    pub file_extensions: Option<Vec<String>>,
    pub priority_files: Option<Vec<String>>,
    pub include_structure_only: Option<bool>,
    pub include_structure: Option<bool>,
    pub include_dependencies: Option<bool>,
}

/// An ignore entry is either a bare name or `{ regex: "<expr>" }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IgnorePatternYaml {
    Exact(String),
    Regex { regex: String },
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderSection {
    pub kind: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub max_tokens: Option<u32>,
}

impl CliConfig {
    /// Defaults overlaid with every key present in the `analysis` section.
    pub fn analysis_config(&self) -> Result<AnalysisConfig> {
        let section = &self.analysis;
        let mut config = AnalysisConfig::default();

        if let Some(n) = section.max_files_to_analyze {
            config.max_files_to_analyze = n;
        }
        if let Some(n) = section.max_lines_per_file {
            config.max_lines_per_file = n;
        }
        if let Some(patterns) = &section.ignore_patterns {
            config.ignore_patterns = patterns
                .iter()
                .map(IgnorePatternYaml::compile)
                .collect::<Result<Vec<_>>>()?;
        }
        if let Some(exts) = &section.file_extensions {
            config.file_extensions = exts.clone();
        }
        if let Some(files) = &section.priority_files {
            config.priority_files = files.clone();
        }
        if let Some(flag) = section.include_structure_only {
            config.include_structure_only = flag;
        }
        if let Some(flag) = section.include_structure {
            config.include_structure = flag;
        }
        if let Some(flag) = section.include_dependencies {
            config.include_dependencies = flag;
        }
        Ok(config)
    }

    /// The provider named in the `provider.kind` key, if any.
    pub fn provider_kind(&self) -> Result<Option<Provider>> {
        self.provider
            .kind
            .as_deref()
            .map(|kind| kind.parse::<Provider>())
            .transpose()
            .map_err(|e| {
                error!(error = %e, "Unsupported provider.kind in config");
                anyhow::Error::new(e)
            })
    }
}

impl IgnorePatternYaml {
    fn compile(&self) -> Result<IgnorePattern> {
        match self {
            IgnorePatternYaml::Exact(name) => Ok(IgnorePattern::Exact(name.clone())),
            IgnorePatternYaml::Regex { regex } => Regex::new(regex)
                .map(IgnorePattern::Regex)
                .with_context(|| format!("Invalid ignore regex {regex:?}")),
        }
    }
}

/// Loads a static YAML config file (no secrets).
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<CliConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => content,
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!(
                "Failed to read config file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    // An empty file deserialises to YAML null; treat it as "all defaults".
    if config_content.trim().is_empty() {
        return Ok(CliConfig::default());
    }

    match serde_yaml::from_str::<CliConfig>(&config_content) {
        Ok(conf) => {
            info!(config_path = ?path_ref, "Parsed config YAML successfully");
            Ok(conf)
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            Err(anyhow::anyhow!("Failed to parse config YAML: {e}"))
        }
    }
}
