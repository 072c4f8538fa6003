use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::llm::client::{CompletionRequest, LlmProvider};

const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash-lite";
const API_KEY_HEADER: &str = "x-goog-api-key";

pub struct GeminiClient {
    http: Client,
    api_key: String,
    model: String,
    endpoint: String,
    temperature: f32,
}

impl GeminiClient {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let api_key = settings.llm.api_key.trim().to_string();
        if api_key.is_empty() {
            anyhow::bail!(
                "Gemini API key is missing. Set llm.api_key in config, RECAP_GEMINI_API_KEY or GEMINI_API_KEY."
            );
        }

        let model = if settings.llm.model.trim().is_empty() {
            DEFAULT_GEMINI_MODEL.to_string()
        } else {
            settings.llm.model.trim().to_string()
        };

        let endpoint = if settings.llm.endpoint.trim().is_empty() {
            DEFAULT_GEMINI_ENDPOINT.to_string()
        } else {
            settings
                .llm
                .endpoint
                .trim()
                .trim_end_matches('/')
                .to_string()
        };

        Ok(Self {
            http: Client::builder()
                .timeout(std::time::Duration::from_secs(settings.llm.timeout_secs))
                .build()
                .context("Failed to build Gemini HTTP client")?,
            api_key,
            model,
            endpoint,
            temperature: settings.llm.temperature,
        })
    }

    fn request_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }

    /// The key travels in a header so it never shows up in URLs or error chains.
    fn build_request(&self, body: &GeminiGenerateContentRequest) -> reqwest::RequestBuilder {
        self.http
            .post(self.request_url())
            .header(API_KEY_HEADER, self.api_key.as_str())
            .json(body)
    }

    fn request_body(&self, request: CompletionRequest<'_>) -> GeminiGenerateContentRequest {
        GeminiGenerateContentRequest {
            system_instruction: GeminiContent {
                parts: vec![GeminiPart {
                    text: request.system.to_string(),
                }],
            },
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: request.user.to_string(),
                }],
            }],
            generation_config: GeminiGenerationConfig {
                temperature: self.temperature,
                response_mime_type: "application/json",
            },
        }
    }
}

#[async_trait]
impl LlmProvider for GeminiClient {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String> {
        let body = self.request_body(request);

        tracing::debug!(model = %self.model, "Sending Gemini generateContent request");

        let response = self
            .build_request(&body)
            .send()
            .await
            .map_err(reqwest::Error::without_url)
            .context("Gemini request failed")?;

        let response = response
            .error_for_status()
            .map_err(reqwest::Error::without_url)
            .context("Gemini returned an error status")?;

        let payload: GeminiGenerateContentResponse = response
            .json()
            .await
            .map_err(reqwest::Error::without_url)
            .context("Failed to parse Gemini response")?;

        first_text(&payload).context("Gemini response did not contain any text")
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

/// First non-empty text part across all candidates.
fn first_text(payload: &GeminiGenerateContentResponse) -> Option<String> {
    payload
        .candidates
        .iter()
        .flat_map(|c| c.content.parts.iter())
        .filter_map(|p| p.text.as_deref())
        .map(str::trim)
        .find(|t| !t.is_empty())
        .map(str::to_string)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerateContentRequest {
    system_instruction: GeminiContent,
    contents: Vec<GeminiContent>,
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    temperature: f32,
    response_mime_type: &'static str,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GeminiGenerateContentResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiContentResponse,
}

#[derive(Debug, Deserialize)]
struct GeminiContentResponse {
    #[serde(default)]
    parts: Vec<GeminiPartResponse>,
}

#[derive(Debug, Deserialize)]
struct GeminiPartResponse {
    text: Option<String>,
}
