///
/// This module implements the CLI interface for project-analyzer: command
/// parsing, config merging, and the user-visible invocations.
///
/// All analysis logic (data model, traversal, formatting) lives in the
/// [`project-analyzer-core`] crate. This module is CLI glue only.
///
/// ## How To Use
/// - For command-line users: run the `project-analyzer` binary with `--help`.
/// - For programmatic/integration use: call [`run`] with a constructed [`Cli`].
///
/// ## Precedence
/// Built-in defaults, then the YAML file given with `--config`, then flags.
///
/// [`project-analyzer-core`]: ../../project-analyzer-core/
use crate::complete::{ClientSettings, LLMClient};
use crate::load_config::{load_config, CliConfig};
use crate::output::{print_token_report, save_to_file, token_report};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use project_analyzer_core::analyze::analyze_project;
use project_analyzer_core::config::AnalysisConfig;
use project_analyzer_core::contract::{Completer, ProjectInfo};
use project_analyzer_core::prompt::Provider;
use std::fs;
use std::path::{Path, PathBuf};

/// CLI for project-analyzer: generate minimal project prompts for LLMs.
#[derive(Parser, Debug)]
#[clap(
    name = "project-analyzer",
    version,
    about = "Analyse a project directory and generate a minimal prompt describing it for an LLM"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyse a project and print (or save) the provider prompt
    Prompt {
        #[clap(flatten)]
        args: AnalyzeArgs,
        /// Print the analysis report as JSON instead of a prompt
        #[clap(long)]
        json: bool,
    },
    /// Analyse a project and send the prompt to the provider's API
    Send {
        #[clap(flatten)]
        args: AnalyzeArgs,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct AnalyzeArgs {
    /// Project directory to analyse
    pub project_path: PathBuf,
    /// Path to a YAML config file
    #[clap(long)]
    pub config: Option<PathBuf>,
    /// Write output to FILE instead of stdout
    #[clap(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,
    /// Only include structure info, no code samples
    #[clap(short = 's', long)]
    pub structure_only: bool,
    /// Maximum number of files to analyse (default: 15)
    #[clap(short = 'f', long, value_name = "N")]
    pub max_files: Option<usize>,
    /// Maximum lines per file to include (default: 50)
    #[clap(short = 'l', long, value_name = "N")]
    pub max_lines: Option<usize>,
    /// Prompt format and API to target: claude, gemini, openrouter, litellm
    #[clap(short = 'p', long)]
    pub provider: Option<Provider>,
    /// List directories in the prompt (claude)
    #[clap(long)]
    pub include_structure: bool,
    /// List dependencies in the prompt (claude)
    #[clap(long)]
    pub include_dependencies: bool,
}

/// Everything needed after merging defaults, config file, and flags.
#[derive(Debug)]
pub struct Prepared {
    pub config: AnalysisConfig,
    pub provider: Provider,
    pub settings: ClientSettings,
    pub project: ProjectInfo,
}

impl Prepared {
    pub fn prompt(&self) -> String {
        self.provider.format_prompt(&self.project, &self.config)
    }
}

/// Merge config sources and run the analysis.
pub fn prepare(args: &AnalyzeArgs) -> Result<Prepared> {
    let file_config = match &args.config {
        Some(path) => load_config(path)?,
        None => CliConfig::default(),
    };

    let mut config = file_config.analysis_config()?;
    if let Some(n) = args.max_files {
        config.max_files_to_analyze = n;
    }
    if let Some(n) = args.max_lines {
        config.max_lines_per_file = n;
    }
    config.include_structure_only |= args.structure_only;
    config.include_structure |= args.include_structure;
    config.include_dependencies |= args.include_dependencies;
    config.trace_loaded();

    let provider = match args.provider {
        Some(p) => p,
        None => file_config.provider_kind()?.unwrap_or_default(),
    };
    let settings = ClientSettings {
        model: file_config.provider.model.clone(),
        base_url: file_config.provider.base_url.clone(),
        max_tokens: file_config.provider.max_tokens,
    };

    let project = analyze_project(&args.project_path, &config)
        .with_context(|| format!("Analysis of {} failed", args.project_path.display()))?;

    Ok(Prepared {
        config,
        provider,
        settings,
        project,
    })
}

/// Send `prompt` through `client`; a missing completion is an error.
pub async fn send_prompt<C: Completer>(client: &C, prompt: &str) -> Result<String> {
    match client.complete(prompt).await? {
        Some(text) => Ok(text),
        None => anyhow::bail!("Provider returned no completion (non-success status)"),
    }
}

/// Send `prompt` and print the completion, or write it to `output`.
pub async fn deliver_completion<C: Completer>(
    client: &C,
    prompt: &str,
    output: Option<&Path>,
) -> Result<()> {
    let completion = send_prompt(client, prompt).await?;
    emit(&completion, output)
}

fn emit(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            println!("{content}");
            Ok(())
        }
    }
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Prompt { args, json } => {
            tracing::info!(command = "prompt", path = %args.project_path.display(), "Analysing project");
            let prepared = prepare(&args)?;

            if json {
                let report = serde_json::to_string_pretty(&prepared.project)?;
                return emit(&report, args.output.as_deref());
            }

            let prompt = prepared.prompt();
            match &args.output {
                Some(path) => {
                    save_to_file(&prompt, path, &args.project_path)?;
                }
                None => {
                    println!("{prompt}");
                    println!();
                    print_token_report(&token_report(&prompt, &args.project_path));
                }
            }
            tracing::info!(command = "prompt", provider = %prepared.provider, "Prompt generated");
            Ok(())
        }
        Commands::Send { args } => {
            tracing::info!(command = "send", path = %args.project_path.display(), "Analysing project");
            let prepared = prepare(&args)?;
            let prompt = prepared.prompt();
            let client = LLMClient::new_from_env(prepared.provider, prepared.settings.clone())?;
            deliver_completion(&client, &prompt, args.output.as_deref()).await?;
            tracing::info!(command = "send", provider = %prepared.provider, "Completion received");
            Ok(())
        }
    }
}
