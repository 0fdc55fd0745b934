use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::errors::AppError;
use crate::models::resume::{NewResume, ResumeRecord};
use crate::store::ResumeStore;

/// In-process store used by tests.
#[derive(Default)]
pub struct InMemoryResumeStore {
    records: RwLock<HashMap<String, ResumeRecord>>,
}

impl InMemoryResumeStore {
    /// Inserts a record as-is, bypassing validation. Lets tests plant rows
    /// that `put` would refuse, such as one with empty content.
    pub async fn insert_raw(&self, record: ResumeRecord) {
        self.records
            .write()
            .await
            .insert(record.email.clone(), record);
    }
}

#[async_trait]
impl ResumeStore for InMemoryResumeStore {
    async fn upsert(&self, resume: NewResume) -> Result<ResumeRecord, AppError> {
        let record = ResumeRecord {
            email: resume.email,
            content: resume.content,
            content_type: resume.content_type,
            original_name: resume.original_name,
            uploaded_at: Utc::now(),
        };
        self.records
            .write()
            .await
            .insert(record.email.clone(), record.clone());
        Ok(record)
    }

    async fn get(&self, email: &str) -> Result<Option<ResumeRecord>, AppError> {
        Ok(self.records.read().await.get(email).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn pdf(email: &str, content: &[u8], name: &str) -> NewResume {
        NewResume {
            email: email.to_string(),
            content: content.to_vec(),
            content_type: "application/pdf".to_string(),
            original_name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_second_put_replaces_whole_record() {
        let store = InMemoryResumeStore::default();
        let first = store.put(pdf("alice@x.com", b"one", "a.pdf")).await.unwrap();
        let second = store.put(pdf("alice@x.com", b"two", "b.pdf")).await.unwrap();

        let got = store.get("alice@x.com").await.unwrap().unwrap();
        assert_eq!(got.content, b"two");
        assert_eq!(got.original_name, "b.pdf");
        assert!(second.uploaded_at >= first.uploaded_at);
    }

    #[tokio::test]
    async fn test_get_unknown_email_is_none() {
        let store = InMemoryResumeStore::default();
        store.put(pdf("alice@x.com", b"one", "a.pdf")).await.unwrap();
        assert!(store.get("bob@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_lookup_is_exact_match() {
        let store = InMemoryResumeStore::default();
        store.put(pdf("alice@x.com", b"one", "a.pdf")).await.unwrap();
        assert!(store.get("Alice@x.com").await.unwrap().is_none());
        assert!(store.get("alice").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_rejects_empty_content_without_writing() {
        let store = InMemoryResumeStore::default();
        let err = store.put(pdf("alice@x.com", b"", "a.pdf")).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
        assert!(store.get("alice@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_rejects_empty_email() {
        let store = InMemoryResumeStore::default();
        let err = store.put(pdf("", b"one", "a.pdf")).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_concurrent_puts_leave_one_complete_record() {
        let store = Arc::new(InMemoryResumeStore::default());
        let mut handles = Vec::new();
        for i in 0..16u8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                let name = format!("v{i}.pdf");
                store
                    .put(pdf("alice@x.com", &[i; 4], &name))
                    .await
                    .unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let got = store.get("alice@x.com").await.unwrap().unwrap();
        let i = got.content[0];
        assert_eq!(got.content, vec![i; 4]);
        assert_eq!(got.original_name, format!("v{i}.pdf"));
    }
}
