use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

use crate::errors::AppError;
use crate::models::resume::{NewResume, ResumeRecord};
use crate::store::ResumeStore;

/// PostgreSQL-backed store. Same-email writes serialize on the primary key
/// through `ON CONFLICT`, so the last write wins and replaces every column.
#[derive(Clone)]
pub struct PgResumeStore {
    pool: PgPool,
}

impl PgResumeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResumeStore for PgResumeStore {
    async fn upsert(&self, resume: NewResume) -> Result<ResumeRecord, AppError> {
        let record: ResumeRecord = sqlx::query_as(
            r#"
            INSERT INTO resumes (email, content, content_type, original_name, uploaded_at)
            VALUES ($1, $2, $3, $4, now())
            ON CONFLICT (email) DO UPDATE SET
                content = EXCLUDED.content,
                content_type = EXCLUDED.content_type,
                original_name = EXCLUDED.original_name,
                uploaded_at = EXCLUDED.uploaded_at
            RETURNING email, content, content_type, original_name, uploaded_at
            "#,
        )
        .bind(&resume.email)
        .bind(&resume.content)
        .bind(&resume.content_type)
        .bind(&resume.original_name)
        .fetch_one(&self.pool)
        .await?;

        info!(
            "Stored resume for {} ({} bytes)",
            record.email,
            record.content.len()
        );
        Ok(record)
    }

    async fn get(&self, email: &str) -> Result<Option<ResumeRecord>, AppError> {
        let record = sqlx::query_as(
            "SELECT email, content, content_type, original_name, uploaded_at FROM resumes WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record)
    }
}
