use bytes::Bytes;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::jobs::client::JobsClient;
use crate::models::jobs::JobResult;
use crate::store::ResumeStore;

/// A resume file attached to the request itself.
#[derive(Debug, Clone)]
pub struct UploadedResume {
    pub file_name: String,
    pub content: Bytes,
}

/// Request-scoped input for one job fetch. The caller's identity travels
/// with the request; nothing is looked up from ambient session state.
#[derive(Debug, Clone, Default)]
pub struct FetchJobsInput {
    pub email: Option<String>,
    pub resume: Option<UploadedResume>,
}

/// Resolves the resume bytes to forward. First match wins:
/// a non-empty attached file, then the stored record for `email`.
pub async fn resolve_resume(
    store: &dyn ResumeStore,
    input: FetchJobsInput,
) -> Result<Vec<u8>, AppError> {
    if let Some(upload) = input.resume.filter(|r| !r.content.is_empty()) {
        debug!(
            "Using uploaded file {} ({} bytes)",
            upload.file_name,
            upload.content.len()
        );
        return Ok(upload.content.to_vec());
    }

    let email = input.email.ok_or(AppError::MissingInput)?;
    let record = store.get(&email).await?.ok_or(AppError::ResumeNotFound)?;
    if record.content.is_empty() {
        return Err(AppError::EmptyResume);
    }

    debug!(
        "Using stored resume for {} ({} bytes)",
        email,
        record.content.len()
    );
    Ok(record.content)
}

pub async fn fetch_jobs(
    store: &dyn ResumeStore,
    jobs: &JobsClient,
    input: FetchJobsInput,
) -> Result<JobResult, AppError> {
    let email = input.email.clone();
    let resume = resolve_resume(store, input).await?;
    let result = jobs.fetch_jobs(resume).await?;

    info!(
        "Fetched {} jobs for {}",
        result.job_count(),
        email.as_deref().unwrap_or("anonymous upload")
    );
    Ok(result)
}
