//! Gemini implementation of the ChunkModel trait.
//!
//! A single `generateContent` call per chunk, configured for strict JSON
//! output. No retry: failures propagate to the orchestrator.
//!
//! # Example
//!
//! ```rust,ignore
//! use budget_extraction::{GeminiModel, ModelCredentials};
//!
//! let model = GeminiModel::new(ModelCredentials::new("AIza...", "gemini-2.5-flash"));
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error};

use crate::error::{ChunkError, ChunkResult};
use crate::pipeline::prompts::format_extract_prompt;
use crate::security::credentials::ModelCredentials;
use crate::traits::model::{ChunkModel, ChunkOutcome};
use crate::types::item::RawItem;
use crate::types::usage::ChunkUsage;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Output ceiling high enough for dense budget pages.
const MAX_OUTPUT_TOKENS: u32 = 65_536;

/// A hung call stalls the whole run, so the transport is bounded.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Gemini-backed chunk extractor.
#[derive(Clone)]
pub struct GeminiModel {
    client: Client,
    credentials: ModelCredentials,
    base_url: String,
    timeout: Duration,
}

impl GeminiModel {
    /// Create a client with the given credentials.
    pub fn new(credentials: ModelCredentials) -> Self {
        Self {
            client: Client::new(),
            credentials,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Create a client from an API key with the default model.
    pub fn from_api_key(api_key: impl Into<String>) -> Self {
        Self::new(ModelCredentials::new(api_key, DEFAULT_MODEL))
    }

    /// Set a custom base URL (proxies, test servers).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the per-call timeout (default: 120s).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get the model identifier.
    pub fn model(&self) -> &str {
        &self.credentials.model
    }

    /// Send one generateContent request and decode the envelope.
    async fn generate(&self, prompt: String, index: usize) -> ChunkResult<GenerateResponse> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        };

        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url, self.credentials.model
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", self.credentials.api_key())
            .json(&request)
            .send()
            .await
            .map_err(|e| ChunkError::Transport {
                index,
                source: Box::new(e),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ChunkError::Transport {
                index,
                source: format!("Gemini API error ({status}): {body}").into(),
            });
        }

        response
            .json::<GenerateResponse>()
            .await
            .map_err(|e| ChunkError::Transport {
                index,
                source: Box::new(e),
            })
    }
}

#[async_trait]
impl ChunkModel for GeminiModel {
    async fn extract_chunk(&self, chunk: &str, index: usize) -> ChunkResult<ChunkOutcome> {
        let prompt = format_extract_prompt(index, chunk);

        let reply = tokio::time::timeout(self.timeout, self.generate(prompt, index))
            .await
            .map_err(|_| ChunkError::Timeout {
                index,
                timeout: self.timeout,
            })??;

        let usage = reply.usage_metadata.map(|u| ChunkUsage {
            prompt_tokens: u.prompt_token_count,
            candidates_tokens: u.candidates_token_count,
            total_tokens: u.total_token_count,
        });

        let text: String = reply
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| {
                c.parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .concat()
            })
            .ok_or(ChunkError::EmptyResponse { index })?;

        let items = parse_items(&text, index)?;

        debug!(chunk = index + 1, items = items.len(), "chunk parsed");
        Ok(ChunkOutcome { items, usage })
    }
}

/// Parse the `{"items": [...]}` shape requested from the model.
///
/// Only invalid JSON is a parse failure. A reply that parses but carries
/// no `items` array (missing, null, or a non-object reply) means zero
/// items, not an error.
fn parse_items(text: &str, index: usize) -> ChunkResult<Vec<RawItem>> {
    let reply: Value =
        serde_json::from_str(text).map_err(|source| parse_failure(text, index, source))?;

    match reply.get("items") {
        Some(items @ Value::Array(_)) => serde_json::from_value(items.clone())
            .map_err(|source| parse_failure(text, index, source)),
        _ => Ok(Vec::new()),
    }
}

fn parse_failure(text: &str, index: usize, source: serde_json::Error) -> ChunkError {
    let preview: String = text.chars().take(500).collect();
    error!(
        chunk = index + 1,
        response_len = text.len(),
        preview = %preview,
        "failed to parse model reply"
    );
    ChunkError::Parse {
        index,
        response_len: text.len(),
        source,
    }
}

// Request/Response types

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(rename = "usageMetadata", default)]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Deserialize)]
struct UsageMetadata {
    #[serde(rename = "promptTokenCount", default)]
    prompt_token_count: u64,
    #[serde(rename = "candidatesTokenCount", default)]
    candidates_token_count: u64,
    #[serde(rename = "totalTokenCount", default)]
    total_token_count: u64,
}
