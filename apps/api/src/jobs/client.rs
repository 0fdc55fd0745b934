//! Client for the external job-matching service.
//!
//! Sends exactly one request per call: no retries, no caching. The resume is
//! always uploaded as field `file` named `resume.pdf`, whatever the user's
//! original filename was.
use reqwest::header::ACCEPT;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::models::jobs::JobResult;

pub const UPLOAD_FIELD: &str = "file";
pub const UPLOAD_FILE_NAME: &str = "resume.pdf";
pub const UPLOAD_CONTENT_TYPE: &str = "application/pdf";

#[derive(Clone)]
pub struct JobsClient {
    client: Client,
    endpoint: String,
    top_k: u32,
}

impl JobsClient {
    pub fn new(client: Client, endpoint: String, top_k: u32) -> Self {
        Self {
            client,
            endpoint,
            top_k,
        }
    }

    /// Uploads resume bytes and returns the job alerts exactly as received.
    pub async fn fetch_jobs(&self, resume: Vec<u8>) -> Result<JobResult, AppError> {
        let size = resume.len();
        let part = Part::bytes(resume)
            .file_name(UPLOAD_FILE_NAME)
            .mime_str(UPLOAD_CONTENT_TYPE)?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        debug!(
            "POST {} top_k={} ({} bytes as {})",
            self.endpoint, self.top_k, size, UPLOAD_FILE_NAME
        );

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("top_k", self.top_k)])
            .header(ACCEPT, "application/json")
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("Job service returned {}: {}", status, body);
            return Err(AppError::UpstreamError {
                status: status.as_u16(),
                body,
            });
        }

        let result = JobResult::parse(body)
            .map_err(|e| AppError::UpstreamMalformedResponse(e.to_string()))?;

        debug!(
            "Job service returned {} alerts, {} jobs",
            result.alert_count(),
            result.job_count()
        );
        Ok(result)
    }
}
