//! Resume Store — one resume per email, replaced wholesale on every upload.
//!
//! `AppState` holds an `Arc<dyn ResumeStore>`. Production uses
//! `PgResumeStore`; tests swap in `InMemoryResumeStore`.

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::resume::{NewResume, ResumeRecord};

#[cfg(test)]
pub mod memory;
pub mod postgres;

#[async_trait]
pub trait ResumeStore: Send + Sync {
    /// Atomically inserts or fully replaces the record for `resume.email`.
    /// Backends assume the input has already been validated.
    async fn upsert(&self, resume: NewResume) -> Result<ResumeRecord, AppError>;

    /// Exact-match lookup by email.
    async fn get(&self, email: &str) -> Result<Option<ResumeRecord>, AppError>;

    /// Validates and stores a resume. Rejects an empty email or empty content
    /// with `InvalidInput` before touching the backend.
    async fn put(&self, resume: NewResume) -> Result<ResumeRecord, AppError> {
        resume.validate()?;
        self.upsert(resume).await
    }
}
