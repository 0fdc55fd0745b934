use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Multipart, Request, State},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use mime::Mime;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::Config;
use crate::errors::AppError;
use crate::jobs::proxy::{self, FetchJobsInput, UploadedResume};
use crate::models::jobs::JobResult;
use crate::models::resume::{NewResume, ResumeSummary};
use crate::state::AppState;

const RESUME_FIELD: &str = "resume";
const EMAIL_FIELD: &str = "email";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: &'static str,
    pub resume: ResumeSummary,
}

#[derive(Debug, Default, Deserialize)]
struct EmailBody {
    #[serde(default)]
    email: Option<String>,
}

/// Fields pulled from a `resume` + `email` multipart form.
#[derive(Debug, Default)]
struct ResumeForm {
    email: Option<String>,
    resume: Option<UploadedResume>,
}

/// Compares MIME essences case-insensitively, ignoring parameters such as
/// `; charset=binary`.
fn is_accepted_type(content_type: Option<&str>, accepted: &str) -> bool {
    let actual = content_type.and_then(|ct| ct.parse::<Mime>().ok());
    match (actual, accepted.parse::<Mime>()) {
        (Some(actual), Ok(accepted)) => actual
            .essence_str()
            .eq_ignore_ascii_case(accepted.essence_str()),
        _ => false,
    }
}

fn normalize_email(raw: Option<String>) -> Option<String> {
    raw.map(|e| e.trim().to_string()).filter(|e| !e.is_empty())
}

/// Reads the multipart form, enforcing the accepted content type and the
/// size limit on the resume file. Unknown fields are skipped.
async fn read_resume_form(
    mut multipart: Multipart,
    config: &Config,
) -> Result<ResumeForm, AppError> {
    let mut form = ResumeForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(e.body_text()))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some(RESUME_FIELD) => {
                if form.resume.is_some() {
                    return Err(AppError::InvalidInput(
                        "Only one resume file may be attached".to_string(),
                    ));
                }
                if !is_accepted_type(field.content_type(), &config.accepted_content_type) {
                    return Err(AppError::InvalidInput(format!(
                        "Only {} files are allowed",
                        config.accepted_content_type
                    )));
                }
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::InvalidInput(e.body_text()))?;
                if content.len() > config.max_upload_bytes {
                    return Err(AppError::InvalidInput(format!(
                        "Resume exceeds the {} byte limit",
                        config.max_upload_bytes
                    )));
                }
                form.resume = Some(UploadedResume { file_name, content });
            }
            Some(EMAIL_FIELD) => {
                let email = field
                    .text()
                    .await
                    .map_err(|e| AppError::InvalidInput(e.body_text()))?;
                form.email = normalize_email(Some(email));
            }
            _ => {}
        }
    }

    Ok(form)
}

/// Accepts multipart (optional file and/or email), url-encoded or JSON bodies.
#[async_trait]
impl FromRequest<AppState> for FetchJobsInput {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| AppError::InvalidInput(e.body_text()))?;
            let form = read_resume_form(multipart, &state.config).await?;
            return Ok(FetchJobsInput {
                email: form.email,
                resume: form.resume,
            });
        }

        let body = if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(body) = Form::<EmailBody>::from_request(req, state)
                .await
                .map_err(|e| AppError::InvalidInput(e.body_text()))?;
            body
        } else {
            let bytes = Bytes::from_request(req, state)
                .await
                .map_err(|e| AppError::InvalidInput(e.body_text()))?;
            if bytes.iter().all(u8::is_ascii_whitespace) {
                EmailBody::default()
            } else {
                serde_json::from_slice(&bytes)
                    .map_err(|e| AppError::InvalidInput(format!("Invalid JSON body: {e}")))?
            }
        };

        Ok(FetchJobsInput {
            email: normalize_email(body.email),
            resume: None,
        })
    }
}

/// POST /resume/upload
pub async fn handle_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let form = read_resume_form(multipart, &state.config).await?;
    let (Some(email), Some(resume)) = (form.email, form.resume) else {
        return Err(AppError::InvalidInput(
            "Email and resume required".to_string(),
        ));
    };

    info!(
        "Received resume upload for {} ({}, {} bytes)",
        email,
        resume.file_name,
        resume.content.len()
    );

    let record = state
        .store
        .put(NewResume {
            email,
            content: resume.content.to_vec(),
            content_type: state.config.accepted_content_type.clone(),
            original_name: resume.file_name,
        })
        .await?;

    Ok(Json(UploadResponse {
        message: "Resume uploaded successfully",
        resume: record.summary(),
    }))
}

/// POST /fetchJobs
pub async fn handle_fetch_jobs(
    State(state): State<AppState>,
    input: FetchJobsInput,
) -> Result<JobResult, AppError> {
    info!(
        "Received fetch jobs request (email: {}, file attached: {})",
        input.email.as_deref().unwrap_or("-"),
        input.resume.is_some()
    );
    proxy::fetch_jobs(state.store.as_ref(), &state.jobs, input).await
}
