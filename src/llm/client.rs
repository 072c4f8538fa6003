use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::config::Settings;
use crate::llm::gemini::GeminiClient;

/// A single text-completion request: a system instruction plus one user message.
#[derive(Debug, Clone, Copy)]
pub struct CompletionRequest<'a> {
    pub system: &'a str,
    pub user: &'a str,
}

#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send the request and return the model's raw reply text.
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String>;

    /// Short provider name for logs.
    fn name(&self) -> &str;
}

/// Build an LLM provider from runtime settings.
pub fn build_provider(settings: &Settings) -> Result<Arc<dyn LlmProvider>> {
    match settings.llm.provider.to_lowercase().as_str() {
        "gemini" => Ok(Arc::new(GeminiClient::from_settings(settings)?)),
        other => anyhow::bail!(
            "Unsupported llm.provider '{}'. Supported providers: gemini",
            other
        ),
    }
}
