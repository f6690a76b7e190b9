//! Provider-specific prompt rendering over a finished [`ProjectInfo`].
//!
//! The provider set is closed: add a variant to [`Provider`] and a formatter
//! module to support a new one.

mod claude;
mod gemini;
mod litellm;
mod openrouter;

use crate::config::AnalysisConfig;
use crate::contract::ProjectInfo;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    Claude,
    Gemini,
    OpenRouter,
    LiteLLM,
}

impl Provider {
    pub const ALL: [Provider; 4] = [
        Provider::Claude,
        Provider::Gemini,
        Provider::OpenRouter,
        Provider::LiteLLM,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Provider::Claude => "claude",
            Provider::Gemini => "gemini",
            Provider::OpenRouter => "openrouter",
            Provider::LiteLLM => "litellm",
        }
    }

    /// Render the project as this provider's prompt.
    pub fn format_prompt(&self, project: &ProjectInfo, config: &AnalysisConfig) -> String {
        match self {
            Provider::Claude => claude::format_prompt(project, config),
            Provider::Gemini => gemini::format_prompt(project, config),
            Provider::OpenRouter => openrouter::format_prompt(project, config),
            Provider::LiteLLM => litellm::format_prompt(project, config),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown provider '{0}' (expected one of: claude, gemini, openrouter, litellm)")]
pub struct UnknownProvider(pub String);

impl FromStr for Provider {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        Provider::ALL
            .into_iter()
            .find(|p| p.name() == lowered)
            .ok_or_else(|| UnknownProvider(s.to_string()))
    }
}

/// `1 function`, `2 functions`, `0 function` (singular below two).
fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count > 1 {
        format!("{count} {plural}")
    } else {
        format!("{count} {singular}")
    }
}
