//! Google Gemini `generateContent` backend.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, error, info};

use dichbot_common::{AppError, AppResult, GeminiConfig};

use crate::services::translation::Translator;

/// Translator backed by the Gemini REST API.
///
/// The HTTP client is created on first use and dropped by [`Translator::close`].
pub struct GeminiTranslator {
    config: GeminiConfig,
    client: RwLock<Option<Client>>,
    name: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// `candidates[0].content.parts[0].text`, if present.
    fn into_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
    }
}

impl GeminiTranslator {
    /// Create a new Gemini translator. No connection is opened yet.
    #[must_use]
    pub fn new(config: GeminiConfig) -> Self {
        let name = format!("Google Gemini ({})", config.model);
        Self {
            config,
            client: RwLock::new(None),
            name,
        }
    }

    /// `generateContent` URL for the configured model, without the key.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Whether the HTTP client has been created and not yet closed.
    pub async fn is_open(&self) -> bool {
        self.client.read().await.is_some()
    }

    async fn client(&self) -> AppResult<Client> {
        let existing = self.client.read().await.clone();
        if let Some(client) = existing {
            return Ok(client);
        }

        let mut slot = self.client.write().await;
        if let Some(client) = slot.as_ref() {
            return Ok(client.clone());
        }

        let client = Client::builder()
            .timeout(self.config.timeout())
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {e}")))?;
        *slot = Some(client.clone());
        debug!(timeout_secs = self.config.timeout_secs, "Created Gemini HTTP client");

        Ok(client)
    }
}

#[async_trait]
impl Translator for GeminiTranslator {
    async fn generate(&self, prompt: &str) -> AppResult<String> {
        let client = self.client().await?;

        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                max_output_tokens: self.config.max_output_tokens,
            },
        };

        let response = client
            .post(self.endpoint())
            .query(&[("key", self.config.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::TranslatorUnavailable(format!(
                        "Gemini request timed out after {}s",
                        self.config.timeout_secs
                    ))
                } else {
                    // Strip the URL so the API key never reaches the logs.
                    AppError::TranslatorUnavailable(format!(
                        "Gemini request failed: {}",
                        e.without_url()
                    ))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Gemini API error");
            return Err(AppError::TranslatorUnavailable(format!(
                "Gemini API error: {status}"
            )));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|e| {
            AppError::TranslatorUnavailable(format!(
                "Failed to parse Gemini response: {}",
                e.without_url()
            ))
        })?;

        parsed.into_text().ok_or(AppError::EmptyResponse)
    }

    fn name(&self) -> &str {
        &self.name
    }

    async fn close(&self) {
        if self.client.write().await.take().is_some() {
            info!("Closed Gemini HTTP client");
        }
    }
}
