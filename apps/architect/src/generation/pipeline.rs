//! Resume Tailoring — runs one request through every stage.
//!
//! Flow: validate → extract resume text → build prompt → select model and
//! generate → strip fences → return artifact.
//!
//! Each stage fails with its own error type so callers can tell user-input
//! problems from provider trouble. Nothing is persisted; a failure at any
//! stage ends the request.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::config::ApiKey;
use crate::extract::{extract_text, ExtractError, UploadedDocument};
use crate::generation::cleanup::{clean_response, CleanError};
use crate::generation::prompt_builder::build_prompt;
use crate::llm_client::{call_ai, ContentGenerator, LlmError, ModelCatalog, ModelSelection};
use crate::models::ProfileData;

/// Download name of the generated artifact.
pub const RESUME_FILENAME: &str = "resume.tex";

// ────────────────────────────────────────────────────────────────────────────
// Stages and errors
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Validating,
    Extracting,
    Prompting,
    CallingModel,
    Cleaning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredInput {
    JobDescription,
    ResumeFile,
    ApiKey,
}

impl fmt::Display for RequiredInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RequiredInput::JobDescription => "a job description",
            RequiredInput::ResumeFile => "a resume file",
            RequiredInput::ApiKey => "a Gemini API key",
        })
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Please provide {}.", join_inputs(.0))]
    MissingInputs(Vec<RequiredInput>),
}

fn join_inputs(inputs: &[RequiredInput]) -> String {
    let labels: Vec<String> = inputs.iter().map(ToString::to_string).collect();
    match labels.as_slice() {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {last}", init.join(", ")),
    }
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Extraction(#[from] ExtractError),

    #[error(transparent)]
    Generation(#[from] LlmError),

    #[error(transparent)]
    Cleaning(#[from] CleanError),
}

impl PipelineError {
    /// The stage that failed. Prompting cannot fail.
    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::Validation(_) => Stage::Validating,
            PipelineError::Extraction(_) => Stage::Extracting,
            PipelineError::Generation(_) => Stage::CallingModel,
            PipelineError::Cleaning(_) => Stage::Cleaning,
        }
    }

    /// Whether resubmitting the same input may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            PipelineError::Validation(_) | PipelineError::Extraction(_) => false,
            PipelineError::Generation(e) => e.is_retryable(),
            PipelineError::Cleaning(_) => true,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Request / result
// ────────────────────────────────────────────────────────────────────────────

/// Everything one submission carries, before validation.
#[derive(Debug, Clone, Default)]
pub struct TailorRequest {
    pub job_description: String,
    pub resume: Option<UploadedDocument>,
    pub profile: ProfileData,
    pub api_key: Option<ApiKey>,
}

/// A request whose preconditions hold.
#[derive(Debug, Clone)]
pub struct ValidatedRequest {
    pub job_description: String,
    pub resume: UploadedDocument,
    pub profile: ProfileData,
    pub api_key: ApiKey,
}

impl TailorRequest {
    /// Checks the three preconditions, reporting every missing input at once.
    ///
    /// A job description of only whitespace counts as missing. This is
    /// stricter than a plain emptiness check.
    pub fn validate(self) -> Result<ValidatedRequest, ValidationError> {
        let mut missing = Vec::new();

        if self.job_description.trim().is_empty() {
            missing.push(RequiredInput::JobDescription);
        }
        // Browsers send an unnamed, empty part when no file was chosen.
        let resume = self
            .resume
            .filter(|doc| !doc.filename.is_empty() || !doc.bytes.is_empty());
        if resume.is_none() {
            missing.push(RequiredInput::ResumeFile);
        }
        if self.api_key.is_none() {
            missing.push(RequiredInput::ApiKey);
        }

        match (resume, self.api_key) {
            (Some(resume), Some(api_key)) if missing.is_empty() => Ok(ValidatedRequest {
                job_description: self.job_description,
                resume,
                profile: self.profile,
                api_key,
            }),
            _ => Err(ValidationError::MissingInputs(missing)),
        }
    }
}

/// The generated artifact and how it was produced.
#[derive(Debug, Clone, Serialize)]
pub struct TailoredResume {
    pub request_id: Uuid,
    pub latex: String,
    pub filename: &'static str,
    pub model: String,
    pub model_selection: ModelSelection,
    /// Non-fatal notes: pages without text, fallback model in use.
    pub warnings: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Runs one tailoring request.
///
/// `connect` turns the request's credential into an LLM client; it is only
/// called once validation and extraction have succeeded.
pub async fn tailor_resume<L, F>(
    request: TailorRequest,
    connect: F,
) -> Result<TailoredResume, PipelineError>
where
    L: ModelCatalog + ContentGenerator,
    F: FnOnce(ApiKey) -> L,
{
    let request_id = Uuid::new_v4();
    run_stages(request_id, request, connect)
        .instrument(info_span!("tailor", %request_id))
        .await
}

async fn run_stages<L, F>(
    request_id: Uuid,
    request: TailorRequest,
    connect: F,
) -> Result<TailoredResume, PipelineError>
where
    L: ModelCatalog + ContentGenerator,
    F: FnOnce(ApiKey) -> L,
{
    let request = request.validate()?;
    let mut warnings = Vec::new();

    info!(stage = ?Stage::Extracting, "Extracting text from '{}'", request.resume.filename);
    let filename = request.resume.filename.clone();
    let extracted = extract_text(request.resume).await?;
    if !extracted.empty_pages.is_empty() {
        warnings.push(format!(
            "No text found on page(s) {} of '{filename}'",
            join_numbers(&extracted.empty_pages)
        ));
    }
    if extracted.text.trim().is_empty() {
        warnings.push(format!(
            "No text could be extracted from '{filename}'; the resume was built from the profile fields only"
        ));
    }

    let prompt = build_prompt(
        &request.job_description,
        &extracted.text,
        &request.profile,
    );
    info!(stage = ?Stage::Prompting, "Prompt built ({} chars)", prompt.len());

    info!(stage = ?Stage::CallingModel, "Calling model");
    let llm = connect(request.api_key);
    let reply = call_ai(&llm, &prompt).await?;
    info!("Model {} replied ({} chars)", reply.selection.model(), reply.text.len());
    if let ModelSelection::Fallback { model, reason } = &reply.selection {
        warnings.push(format!("Using fallback model {model}: {reason}"));
    }

    info!(stage = ?Stage::Cleaning, "Stripping code fences");
    let latex = clean_response(&reply.text)?;

    for warning in &warnings {
        warn!("{warning}");
    }
    info!("Resume generated ({} chars of LaTeX)", latex.len());

    Ok(TailoredResume {
        request_id,
        latex,
        filename: RESUME_FILENAME,
        model: reply.selection.model().to_string(),
        model_selection: reply.selection,
        warnings,
        generated_at: Utc::now(),
    })
}

fn join_numbers(numbers: &[usize]) -> String {
    numbers
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
