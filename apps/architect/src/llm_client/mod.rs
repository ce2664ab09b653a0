//! LLM Client — the single point of entry for all Gemini API calls.
//!
//! ARCHITECTURAL RULE: No other module may call the provider directly.
//! All LLM interactions MUST go through this module.
//!
//! The model is not hardcoded: it is picked per request from the provider's
//! catalog (see `model_selector`). No retries, no client timeout, no streaming.

use std::collections::HashSet;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::ApiKey;

pub mod model_selector;

pub use model_selector::{select_model, ModelSelection};

const API_VERSION: &str = "v1beta";
const GENERATE_CONTENT_METHOD: &str = "generateContent";
const LIST_PAGE_SIZE: u32 = 1000;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content{}", reason_suffix(.reason))]
    EmptyContent { reason: Option<String> },
}

impl LlmError {
    /// Transport failures, rate limits and provider-side errors may succeed on resubmission.
    pub fn is_retryable(&self) -> bool {
        match self {
            LlmError::Http(_) => true,
            LlmError::Api { status, .. } => *status == 429 || *status >= 500,
            LlmError::Parse(_) | LlmError::EmptyContent { .. } => false,
        }
    }

    /// The provider rejected the credential.
    pub fn is_auth(&self) -> bool {
        matches!(self, LlmError::Api { status: 401 | 403, .. })
            || matches!(self, LlmError::Api { status: 400, message } if message.contains("API key"))
    }
}

fn reason_suffix(reason: &Option<String>) -> String {
    reason.as_deref().map(|r| format!(" ({r})")).unwrap_or_default()
}

/// Lists the identifiers of models that support content generation.
#[async_trait]
pub trait ModelCatalog: Send + Sync {
    async fn generation_models(&self) -> Result<Vec<String>, LlmError>;
}

/// Generates text for a prompt with a given model identifier.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, LlmError>;
}

/// Text returned by the model plus the model that produced it.
#[derive(Debug, Clone)]
pub struct AiReply {
    pub text: String,
    pub selection: ModelSelection,
}

/// Resolves a model from the catalog and issues exactly one generation call.
/// Generation errors propagate unchanged.
pub async fn call_ai<L>(llm: &L, prompt: &str) -> Result<AiReply, LlmError>
where
    L: ModelCatalog + ContentGenerator,
{
    let selection = select_model(llm).await;
    debug!("Generating with model {} ({selection:?})", selection.model());

    let text = llm.generate(selection.model(), prompt).await?;
    Ok(AiReply { text, selection })
}

// ────────────────────────────────────────────────────────────────────────────
// Gemini wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListModelsResponse {
    #[serde(default)]
    models: Vec<ModelInfo>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelInfo {
    name: String,
    #[serde(default)]
    supported_generation_methods: Vec<String>,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

impl GenerateContentResponse {
    /// Concatenates the text parts of the first candidate.
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        (!text.is_empty()).then_some(text)
    }

    /// Why the response carries no text, when the provider says.
    fn empty_reason(&self) -> Option<String> {
        self.prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.clone())
            .map(|r| format!("prompt blocked: {r}"))
            .or_else(|| {
                self.candidates
                    .first()
                    .and_then(|c| c.finish_reason.clone())
                    .map(|r| format!("finish reason: {r}"))
            })
    }
}

#[derive(Debug, Deserialize)]
struct GoogleError {
    error: GoogleErrorBody,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// Gemini REST client bound to one credential.
/// Built per request; the underlying `reqwest::Client` pool is shared.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: ApiKey,
}

impl GeminiClient {
    pub fn new(client: Client, base_url: &str, api_key: ApiKey) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// Fetches every catalog page and keeps models supporting `generateContent`.
    /// Stops early if the provider hands back a page token it already sent.
    pub async fn list_models(&self) -> Result<Vec<String>, LlmError> {
        let url = format!("{}/{API_VERSION}/models", self.base_url);
        let mut names = Vec::new();
        let mut page_token: Option<String> = None;
        let mut seen_tokens = HashSet::new();

        loop {
            let mut request = self
                .client
                .get(&url)
                .header("x-goog-api-key", self.api_key.expose())
                .query(&[("pageSize", LIST_PAGE_SIZE.to_string())]);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token)]);
            }

            let body = check_status(request.send().await?).await?;
            let page: ListModelsResponse = serde_json::from_str(&body)?;

            names.extend(
                page.models
                    .into_iter()
                    .filter(|m| {
                        m.supported_generation_methods
                            .iter()
                            .any(|g| g == GENERATE_CONTENT_METHOD)
                    })
                    .map(|m| m.name),
            );

            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(token) if !seen_tokens.insert(token.clone()) => {
                    warn!("Model catalog repeated page token '{token}'; stopping pagination");
                    break;
                }
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        debug!("Model catalog lists {} generation models", names.len());
        Ok(names)
    }

    /// Makes one `generateContent` call, returning the full response object.
    pub async fn generate_content(
        &self,
        model: &str,
        prompt: &str,
    ) -> Result<GenerateContentResponse, LlmError> {
        let url = format!(
            "{}/{API_VERSION}/{}:{GENERATE_CONTENT_METHOD}",
            self.base_url,
            model_path(model)
        );
        let request_body = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", self.api_key.expose())
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let body = check_status(response).await?;
        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;

        if let Some(usage) = &parsed.usage_metadata {
            debug!(
                "LLM call succeeded: input_tokens={}, output_tokens={}",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }

        Ok(parsed)
    }
}

#[async_trait]
impl ModelCatalog for GeminiClient {
    async fn generation_models(&self) -> Result<Vec<String>, LlmError> {
        self.list_models().await
    }
}

#[async_trait]
impl ContentGenerator for GeminiClient {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, LlmError> {
        let response = self.generate_content(model, prompt).await?;
        response.text().ok_or_else(|| LlmError::EmptyContent {
            reason: response.empty_reason(),
        })
    }
}

/// Returns the body on success, or the provider's error message as `LlmError::Api`.
async fn check_status(response: reqwest::Response) -> Result<String, LlmError> {
    let status = response.status();
    let body = response.text().await?;

    if status.is_success() {
        return Ok(body);
    }

    warn!("Gemini API returned {status}");
    let message = serde_json::from_str::<GoogleError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);
    Err(LlmError::Api {
        status: status.as_u16(),
        message,
    })
}

/// Catalog names carry a `models/` prefix; bare names get one.
fn model_path(model: &str) -> String {
    if model.starts_with("models/") || model.starts_with("tunedModels/") {
        model.to_string()
    } else {
        format!("models/{model}")
    }
}
