#![doc = "Completion client for the CLI: sends a formatted prompt to the selected provider's HTTP API."]
//
//! # Completion Client (CLI <-> Core)
//!
//! This module implements [`project_analyzer_core::contract::Completer`] with
//! reqwest for each [`Provider`]. The core crate never talks to the network;
//! the CLI constructs an [`LLMClient`] and hands it to [`crate::cli::send_prompt`].
//!
//! ## Client Usage
//!
//! - Construct [`LLMClient`] with [`LLMClient::new_from_env`]; the API key is
//!   read from the provider's environment variable. The binary loads `.env`
//!   at startup; library callers load it themselves if they want one.
//! - A non-success HTTP status yields `Ok(None)`; transport failures and
//!   unexpected bodies are errors.

use async_trait::async_trait;
use project_analyzer_core::contract::{Completer, CompletionError};
use project_analyzer_core::prompt::Provider;
use serde_json::{json, Value};
use std::env;

const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Optional overrides from the `provider` section of the YAML config.
#[derive(Debug, Clone, Default)]
pub struct ClientSettings {
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub max_tokens: Option<u32>,
}

/// Environment variable holding the provider's API key.
pub fn api_key_var(provider: Provider) -> &'static str {
    match provider {
        Provider::Claude => "CLAUDE_API_KEY",
        Provider::Gemini => "GEMINI_API_KEY",
        Provider::OpenRouter => "OPENROUTER_API_KEY",
        Provider::LiteLLM => "LITELLM_API_KEY",
    }
}

fn default_base_url(provider: Provider) -> String {
    match provider {
        Provider::Claude => "https://api.anthropic.com".to_string(),
        Provider::Gemini => "https://generativelanguage.googleapis.com".to_string(),
        Provider::OpenRouter => "https://openrouter.ai".to_string(),
        Provider::LiteLLM => {
            env::var("LITELLM_BASE_URL").unwrap_or_else(|_| "http://localhost:4000".to_string())
        }
    }
}

fn default_model(provider: Provider) -> &'static str {
    match provider {
        Provider::Claude => "claude-3-5-sonnet-latest",
        Provider::Gemini => "gemini-1.5-flash",
        Provider::OpenRouter => "openrouter/auto",
        Provider::LiteLLM => "gpt-3.5-turbo",
    }
}

pub struct LLMClient {
    provider: Provider,
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
    http: reqwest::Client,
}

impl LLMClient {
    pub fn new(provider: Provider, api_key: String, settings: ClientSettings) -> Self {
        let base_url = settings
            .base_url
            .unwrap_or_else(|| default_base_url(provider))
            .trim_end_matches('/')
            .to_string();
        Self {
            provider,
            api_key,
            base_url,
            model: settings
                .model
                .unwrap_or_else(|| default_model(provider).to_string()),
            max_tokens: settings.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            http: reqwest::Client::new(),
        }
    }

    pub fn new_from_env(
        provider: Provider,
        settings: ClientSettings,
    ) -> Result<Self, CompletionError> {
        let var = api_key_var(provider);
        match env::var(var) {
            Ok(api_key) if !api_key.is_empty() => {
                tracing::info!(provider = %provider, "Initialized LLMClient from environment");
                Ok(Self::new(provider, api_key, settings))
            }
            _ => {
                tracing::error!(provider = %provider, var, "API key missing in environment");
                Err(CompletionError::MissingApiKey(var))
            }
        }
    }

    pub fn endpoint(&self) -> String {
        match self.provider {
            Provider::Claude => format!("{}/v1/messages", self.base_url),
            Provider::Gemini => format!(
                "{}/v1beta/models/{}:generateContent?key={}",
                self.base_url, self.model, self.api_key
            ),
            Provider::OpenRouter => format!("{}/api/v1/chat/completions", self.base_url),
            Provider::LiteLLM => format!("{}/chat/completions", self.base_url),
        }
    }

    pub fn request_body(&self, prompt: &str) -> Value {
        match self.provider {
            Provider::Claude => json!({
                "model": self.model,
                "max_tokens": self.max_tokens,
                "messages": [{ "role": "user", "content": prompt }],
            }),
            Provider::Gemini => json!({
                "contents": [{ "parts": [{ "text": prompt }] }],
                "generationConfig": { "maxOutputTokens": self.max_tokens },
            }),
            Provider::OpenRouter => json!({
                "model": self.model,
                "max_tokens": self.max_tokens,
                "messages": [{ "role": "user", "content": prompt }],
            }),
            Provider::LiteLLM => {
                // The LiteLLM formatter already renders `{"messages": [...]}`.
                let messages = serde_json::from_str::<Value>(prompt)
                    .ok()
                    .and_then(|v| v.get("messages").cloned())
                    .unwrap_or_else(|| json!([{ "role": "user", "content": prompt }]));
                json!({
                    "model": self.model,
                    "max_tokens": self.max_tokens,
                    "messages": messages,
                })
            }
        }
    }

    fn request(&self, prompt: &str) -> reqwest::RequestBuilder {
        let builder = self
            .http
            .post(self.endpoint())
            .header("content-type", "application/json")
            .json(&self.request_body(prompt));
        match self.provider {
            Provider::Claude => builder
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", ANTHROPIC_VERSION),
            Provider::Gemini => builder,
            Provider::OpenRouter | Provider::LiteLLM => builder.bearer_auth(&self.api_key),
        }
    }
}

/// Pull the completion text out of a provider's response body.
pub fn extract_completion(provider: Provider, body: &Value) -> Option<String> {
    let text = match provider {
        Provider::Claude => body["content"]
            .as_array()?
            .iter()
            .filter_map(|block| block["text"].as_str())
            .collect::<Vec<_>>()
            .join(""),
        Provider::Gemini => body["candidates"][0]["content"]["parts"]
            .as_array()?
            .iter()
            .filter_map(|part| part["text"].as_str())
            .collect::<Vec<_>>()
            .join(""),
        Provider::OpenRouter | Provider::LiteLLM => {
            body["choices"][0]["message"]["content"].as_str()?.to_string()
        }
    };
    Some(text)
}

#[async_trait]
impl Completer for LLMClient {
    async fn complete(&self, prompt: &str) -> Result<Option<String>, CompletionError> {
        tracing::info!(
            provider = %self.provider,
            model = %self.model,
            prompt_chars = prompt.len(),
            "Sending prompt to provider"
        );
        let response = self.request(prompt).send().await.map_err(|e| {
            tracing::error!(provider = %self.provider, error = ?e, "Request to provider failed");
            CompletionError::Transport {
                provider: self.provider.to_string(),
                source: Box::new(e),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::error!(
                provider = %self.provider,
                status = %status,
                "Provider returned error. Response body: {text}"
            );
            return Ok(None);
        }

        let body: Value = response.json().await.map_err(|e| CompletionError::InvalidResponse {
            provider: self.provider.to_string(),
            message: e.to_string(),
        })?;
        match extract_completion(self.provider, &body) {
            Some(text) => {
                tracing::info!(provider = %self.provider, chars = text.len(), "Received completion");
                Ok(Some(text))
            }
            None => Err(CompletionError::InvalidResponse {
                provider: self.provider.to_string(),
                message: "no completion text in response".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn client(provider: Provider) -> LLMClient {
        LLMClient::new(
            provider,
            "test-key".to_string(),
            ClientSettings {
                base_url: Some("http://localhost:9999/".to_string()),
                model: Some("test-model".to_string()),
                max_tokens: Some(64),
            },
        )
    }

    #[test]
    fn endpoints_per_provider() {
        assert_eq!(client(Provider::Claude).endpoint(), "http://localhost:9999/v1/messages");
        assert_eq!(
            client(Provider::Gemini).endpoint(),
            "http://localhost:9999/v1beta/models/test-model:generateContent?key=test-key"
        );
        assert_eq!(
            client(Provider::OpenRouter).endpoint(),
            "http://localhost:9999/api/v1/chat/completions"
        );
        assert_eq!(
            client(Provider::LiteLLM).endpoint(),
            "http://localhost:9999/chat/completions"
        );
    }

    #[test]
    fn claude_body_wraps_prompt_in_one_user_message() {
        let body = client(Provider::Claude).request_body("hello");
        assert_eq!(body["model"], "test-model");
        assert_eq!(body["max_tokens"], 64);
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "hello");
    }

    #[test]
    fn litellm_body_reuses_formatted_messages() {
        let prompt = r#"{"messages":[{"role":"system","content":"s"},{"role":"user","content":"u"}]}"#;
        let body = client(Provider::LiteLLM).request_body(prompt);
        assert_eq!(body["messages"].as_array().unwrap().len(), 2);
        assert_eq!(body["messages"][1]["content"], "u");

        let plain = client(Provider::LiteLLM).request_body("not json");
        assert_eq!(plain["messages"][0]["content"], "not json");
    }

    #[test]
    #[serial]
    fn new_from_env_requires_the_provider_key() {
        env::remove_var("GEMINI_API_KEY");
        let err = LLMClient::new_from_env(Provider::Gemini, ClientSettings::default())
            .err()
            .expect("missing key must fail");
        assert!(matches!(err, CompletionError::MissingApiKey("GEMINI_API_KEY")));

        env::set_var("GEMINI_API_KEY", "k");
        let client = LLMClient::new_from_env(Provider::Gemini, ClientSettings::default()).unwrap();
        assert!(client.endpoint().ends_with("gemini-1.5-flash:generateContent?key=k"));
        env::remove_var("GEMINI_API_KEY");
    }

    #[test]
    #[serial]
    fn litellm_base_url_comes_from_env() {
        env::set_var("LITELLM_BASE_URL", "http://proxy:8000/");
        let client = LLMClient::new(Provider::LiteLLM, "k".to_string(), ClientSettings::default());
        assert_eq!(client.endpoint(), "http://proxy:8000/chat/completions");
        env::remove_var("LITELLM_BASE_URL");
    }

    #[test]
    fn extracts_text_from_each_response_shape() {
        let claude = json!({ "content": [{ "type": "text", "text": "Hi" }, { "type": "text", "text": "!" }] });
        assert_eq!(extract_completion(Provider::Claude, &claude).as_deref(), Some("Hi!"));

        let gemini = json!({ "candidates": [{ "content": { "parts": [{ "text": "G" }] } }] });
        assert_eq!(extract_completion(Provider::Gemini, &gemini).as_deref(), Some("G"));

        let chat = json!({ "choices": [{ "message": { "role": "assistant", "content": "C" } }] });
        assert_eq!(extract_completion(Provider::OpenRouter, &chat).as_deref(), Some("C"));
        assert_eq!(extract_completion(Provider::LiteLLM, &chat).as_deref(), Some("C"));

        assert_eq!(extract_completion(Provider::Claude, &json!({ "error": "x" })), None);
    }
}
