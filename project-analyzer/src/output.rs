//! Writing prompts to disk and reporting token estimates.

use anyhow::{Context, Result};
use project_analyzer_core::config::DEFAULT_IGNORE_PATTERNS;
use project_analyzer_core::tokens::{calculate_token_savings, TokenSavings};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Token estimate for `content` against the raw size of `project_path`.
pub fn token_report(content: &str, project_path: &Path) -> TokenSavings {
    calculate_token_savings(content, project_path, DEFAULT_IGNORE_PATTERNS)
}

pub fn print_token_report(savings: &TokenSavings) {
    println!("Estimated tokens: ~{}", savings.token_count);
    println!(
        "Estimated tokens saved: ~{} ({:.1}%)",
        savings.tokens_saved, savings.savings_percent
    );
}

/// Write `content` to `file_path`, report the token estimate, and append it to
/// the file as an HTML comment. Returns the absolute path written.
pub fn save_to_file(content: &str, file_path: &Path, project_path: &Path) -> Result<PathBuf> {
    fs::write(file_path, content)
        .with_context(|| format!("Failed to write prompt to {}", file_path.display()))?;
    let full_path = fs::canonicalize(file_path).unwrap_or_else(|_| file_path.to_path_buf());
    println!("Prompt saved to: {}", full_path.display());

    let savings = token_report(content, project_path);
    print_token_report(&savings);

    let mut file = OpenOptions::new()
        .append(true)
        .open(&full_path)
        .with_context(|| format!("Failed to reopen {}", full_path.display()))?;
    write!(
        file,
        "\n\n<!-- Token estimate: {} (saved ~{} tokens, {:.1}%) -->",
        savings.token_count, savings.tokens_saved, savings.savings_percent
    )
    .with_context(|| format!("Failed to append token estimate to {}", full_path.display()))?;

    info!(path = %full_path.display(), tokens = savings.token_count, "Saved prompt");
    Ok(full_path)
}
