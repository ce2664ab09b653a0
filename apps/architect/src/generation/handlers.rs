//! Axum route handlers for the Tailoring API.

use axum::{
    extract::{Multipart, State},
    http::header,
    response::IntoResponse,
    Json,
};
use tracing::debug;

use crate::config::{ApiKey, Config};
use crate::errors::AppError;
use crate::extract::UploadedDocument;
use crate::generation::pipeline::{tailor_resume, TailorRequest, TailoredResume};
use crate::llm_client::GeminiClient;
use crate::state::AppState;

/// Reads the multipart form into a `TailorRequest`.
///
/// Field names: `job_description`, `resume` (file), `api_key` and the
/// `ProfileData` fields. Unknown fields are ignored. Without an `api_key`
/// field the service-level key from `config` is used, if any.
pub async fn read_tailor_form(
    mut multipart: Multipart,
    config: &Config,
) -> Result<TailorRequest, AppError> {
    let mut request = TailorRequest::default();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            "resume" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                request.resume = Some(UploadedDocument::new(filename, bytes));
            }
            "job_description" => request.job_description = field.text().await?,
            "api_key" => request.api_key = ApiKey::parse(&field.text().await?),
            other => {
                let value = field.text().await?;
                if !request.profile.set(other, value) {
                    debug!("Ignoring unknown form field '{other}'");
                }
            }
        }
    }

    if request.api_key.is_none() {
        request.api_key = config.gemini_api_key.clone();
    }

    Ok(request)
}

async fn run_tailoring(state: AppState, multipart: Multipart) -> Result<TailoredResume, AppError> {
    let request = read_tailor_form(multipart, &state.config).await?;
    let AppState { http, config } = state;

    let resume = tailor_resume(request, move |api_key| {
        GeminiClient::new(http, &config.gemini_base_url, api_key)
    })
    .await?;

    Ok(resume)
}

/// POST /api/v1/resumes/tailor
///
/// Multipart form in, `TailoredResume` JSON out.
pub async fn handle_tailor(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<TailoredResume>, AppError> {
    Ok(Json(run_tailoring(state, multipart).await?))
}

/// POST /api/v1/resumes/tailor/download
///
/// Same input; responds with the `.tex` file as an attachment.
pub async fn handle_tailor_download(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let resume = run_tailoring(state, multipart).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/x-tex; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", resume.filename),
            ),
        ],
        resume.latex,
    ))
}
