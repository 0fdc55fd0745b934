use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use crate::errors::AppError;

/// The single stored resume for an email. Replaced wholesale on every upload.
#[derive(Debug, Clone, FromRow)]
pub struct ResumeRecord {
    pub email: String,
    pub content: Vec<u8>,
    pub content_type: String,
    pub original_name: String,
    pub uploaded_at: DateTime<Utc>,
}

impl ResumeRecord {
    pub fn summary(&self) -> ResumeSummary {
        ResumeSummary {
            email: self.email.clone(),
            content_type: self.content_type.clone(),
            original_file_name: self.original_name.clone(),
            size: self.content.len(),
            uploaded_at: self.uploaded_at,
        }
    }
}

/// Input to `ResumeStore::put`.
#[derive(Debug, Clone)]
pub struct NewResume {
    pub email: String,
    pub content: Vec<u8>,
    pub content_type: String,
    pub original_name: String,
}

impl NewResume {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.email.trim().is_empty() {
            return Err(AppError::InvalidInput("Email must not be empty".to_string()));
        }
        if self.content.is_empty() {
            return Err(AppError::InvalidInput(
                "Resume content must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Record view returned to clients; never includes the file bytes.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeSummary {
    pub email: String,
    pub content_type: String,
    pub original_file_name: String,
    pub size: usize,
    pub uploaded_at: DateTime<Utc>,
}
