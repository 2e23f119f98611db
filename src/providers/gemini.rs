// Google Gemini API provider implementation
//
// One non-streaming generateContent call per chat message. Prior turns and the
// live message go out together as `contents`; safety blocks come back either
// as prompt feedback or as a candidate finish reason.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::types::{
    default_safety_settings, ConversationTurn, GenerationConfig, Role, SafetySetting,
};
use super::ChatModel;
use crate::config::constants::{DEFAULT_MODEL, GEMINI_BASE_URL};

/// Sent as a header; request URLs must never carry the key
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Finish reasons that mean the candidate text was withheld
const BLOCKED_FINISH_REASONS: &[&str] = &[
    "SAFETY",
    "RECITATION",
    "BLOCKLIST",
    "PROHIBITED_CONTENT",
    "SPII",
];

/// Google Gemini API provider
#[derive(Clone)]
pub struct GeminiProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    generation_config: GenerationConfig,
    safety_settings: Vec<SafetySetting>,
}

impl GeminiProvider {
    /// Create a new Gemini provider
    ///
    /// No request timeout is set; calls use the HTTP client's defaults.
    pub fn new(api_key: String) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key,
            model: DEFAULT_MODEL.to_string(),
            base_url: GEMINI_BASE_URL.to_string(),
            generation_config: GenerationConfig::default(),
            safety_settings: default_safety_settings(),
        })
    }

    /// Create with custom model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Point at a different API root (tests, proxies)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn generation_config(&self) -> &GenerationConfig {
        &self.generation_config
    }

    pub fn safety_settings(&self) -> &[SafetySetting] {
        &self.safety_settings
    }

    /// Convert history plus the live message to Gemini API format
    fn to_gemini_request<'a>(
        &'a self,
        history: &[ConversationTurn],
        message: &str,
    ) -> GeminiRequest<'a> {
        let contents = history
            .iter()
            .map(|turn| GeminiContent::new(turn.role, &turn.text))
            .chain(std::iter::once(GeminiContent::new(Role::User, message)))
            .collect();

        GeminiRequest {
            contents,
            generation_config: &self.generation_config,
            safety_settings: &self.safety_settings,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

/// Pull reply text out of a response, turning blocks into errors.
fn extract_reply(response: GeminiResponse) -> Result<String> {
    if let Some(reason) = response
        .prompt_feedback
        .and_then(|feedback| feedback.block_reason)
    {
        bail!("Gemini blocked the prompt due to {}", reason);
    }

    let candidate = response
        .candidates
        .into_iter()
        .next()
        .context("Gemini returned no candidates in response")?;

    if let Some(reason) = candidate.finish_reason.as_deref() {
        if BLOCKED_FINISH_REASONS.contains(&reason) {
            bail!("Text not available. Response was blocked due to {}", reason);
        }
    }

    let text: String = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        bail!("Gemini returned an empty response");
    }
    Ok(text)
}

#[async_trait]
impl ChatModel for GeminiProvider {
    async fn generate(&self, history: &[ConversationTurn], message: &str) -> Result<String> {
        let request = self.to_gemini_request(history, message);

        tracing::debug!(
            model = %self.model,
            turns = request.contents.len(),
            "Sending request to Gemini API"
        );

        let response = self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, &self.api_key)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .context("Failed to send request to Gemini API")?;

        let status = response.status();

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            bail!(
                "Gemini API request failed\n\nStatus: {}\nBody: {}",
                status,
                error_body
            );
        }

        let gemini_response: GeminiResponse = response
            .json()
            .await
            .context("Failed to parse Gemini API response")?;

        tracing::debug!("Received response: {:?}", gemini_response);

        extract_reply(gemini_response)
    }

    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

// Gemini API types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent>,
    generation_config: &'a GenerationConfig,
    safety_settings: &'a [SafetySetting],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    role: String, // "user" or "model"
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

impl GeminiContent {
    fn new(role: Role, text: &str) -> Self {
        Self {
            role: role.as_str().to_string(),
            parts: vec![GeminiPart {
                text: Some(text.to_string()),
            }],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    prompt_feedback: Option<GeminiPromptFeedback>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPromptFeedback {
    block_reason: Option<String>,
}
