use anyhow::Result;
use async_trait::async_trait;

use crate::config::Settings;
use crate::llm::gemini::GeminiClient;

/// A hosted text-generation backend.
///
/// The credential is passed per call because it belongs to the session, not
/// to the client.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Submit a fully rendered prompt and return the raw response text.
    async fn generate(&self, api_key: &str, prompt: &str) -> Result<String>;
}

/// Build an LLM provider from runtime settings.
pub fn build_provider(settings: &Settings) -> Result<Box<dyn LlmProvider>> {
    match settings.llm.provider.to_lowercase().as_str() {
        "gemini" => Ok(Box::new(GeminiClient::from_settings(&settings.llm)?)),
        other => anyhow::bail!(
            "Unsupported llm.provider '{}'. Supported providers: gemini",
            other
        ),
    }
}
