//! Auth proxy: forwards credentials to the authentication service and relays
//! its status and JSON body untouched. The proxy does not interpret `action`.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use reqwest::multipart::Form;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::state::AppState;

/// Credentials as sent by the browser. Every field is optional; whatever is
/// present is forwarded and the auth service decides what is valid.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    /// `signup`, `signin` or `forgot_password`.
    #[serde(default)]
    pub action: Option<String>,
}

#[derive(Clone)]
pub struct AuthClient {
    client: Client,
    endpoint: String,
}

impl AuthClient {
    pub fn new(client: Client, endpoint: String) -> Self {
        Self { client, endpoint }
    }

    /// Repackages the credentials as a multipart text form and returns the
    /// upstream status with its JSON body.
    pub async fn forward(&self, request: AuthRequest) -> Result<(u16, Value), AppError> {
        let fields = [
            ("email", request.email),
            ("password", request.password),
            ("action", request.action),
        ];
        let form = fields
            .into_iter()
            .filter_map(|(name, value)| value.map(|v| (name, v)))
            .fold(Form::new(), |form, (name, value)| form.text(name, value));

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::AuthUnavailable(e.to_string()))?;

        let status = response.status().as_u16();
        let body: Value = response
            .json()
            .await
            .map_err(|e| AppError::AuthUnavailable(e.to_string()))?;

        debug!("Auth service replied {status}");
        Ok((status, body))
    }
}

/// POST /auth
pub async fn handle_auth(
    State(state): State<AppState>,
    payload: Result<Json<AuthRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let Json(request) = payload.map_err(|e| AppError::InvalidInput(e.body_text()))?;
    info!(
        "Forwarding auth action '{}' for {}",
        request.action.as_deref().unwrap_or("-"),
        request.email.as_deref().unwrap_or("-")
    );

    let (status, body) = state.auth.forward(request).await?;
    let status = StatusCode::from_u16(status).map_err(|e| AppError::AuthUnavailable(e.to_string()))?;
    Ok((status, Json(body)))
}
