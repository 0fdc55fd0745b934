use axum::{
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};
use serde::de::IgnoredAny;
use serde::Deserialize;

/// Response body of the job-matching service, kept as the exact bytes
/// received so the relay to the client is unmodified.
///
/// Expected shape: `{"alerts": [{"jobs": [{title, company, location, link,
/// salary?}, ...], ...}, ...], ...}`. Only the `alerts`/`jobs` nesting is
/// checked; posting fields are passed through whatever their values.
#[derive(Debug, Clone)]
pub struct JobResult {
    body: String,
    alert_count: usize,
    job_count: usize,
}

#[derive(Deserialize)]
struct Shape {
    alerts: Vec<AlertShape>,
}

#[derive(Deserialize)]
struct AlertShape {
    #[serde(default)]
    jobs: Option<Vec<IgnoredAny>>,
}

impl JobResult {
    /// Checks that `body` is JSON with an `alerts` array and keeps it verbatim.
    pub fn parse(body: String) -> Result<Self, serde_json::Error> {
        let shape: Shape = serde_json::from_str(&body)?;
        let job_count = shape
            .alerts
            .iter()
            .map(|a| a.jobs.as_ref().map_or(0, Vec::len))
            .sum();
        Ok(Self {
            alert_count: shape.alerts.len(),
            job_count,
            body,
        })
    }

    pub fn alert_count(&self) -> usize {
        self.alert_count
    }

    pub fn job_count(&self) -> usize {
        self.job_count
    }

    pub fn as_str(&self) -> &str {
        &self.body
    }
}

impl IntoResponse for JobResult {
    fn into_response(self) -> Response {
        ([(CONTENT_TYPE, "application/json")], self.body).into_response()
    }
}
