//! Reachability probe for the assistant endpoint.

use reqwest::header::CONTENT_TYPE;
use reqwest::Url;

use crate::config::AiConfig;
use crate::result::{AiError, ConnectivityReport};

/// Issues probe requests with a reusable HTTP client.
#[derive(Debug, Clone, Default)]
pub struct ConnectivityProbe {
    client: reqwest::Client,
}

impl ConnectivityProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Probe the endpoint stored in `config`.
    pub async fn check_config(&self, config: &AiConfig) -> Result<ConnectivityReport, AiError> {
        self.check(&config.endpoint, config.bearer_token()).await
    }

    /// `GET endpoint` with a JSON content type and, when `api_key` is
    /// non-empty, a bearer token.
    pub async fn check(
        &self,
        endpoint: &str,
        api_key: Option<&str>,
    ) -> Result<ConnectivityReport, AiError> {
        let url = Url::parse(endpoint.trim())
            .map_err(|e| AiError::InvalidInput(format!("{endpoint:?}: {e}")))?;

        let mut req = self.client.get(url).header(CONTENT_TYPE, "application/json");
        if let Some(token) = api_key.map(str::trim).filter(|k| !k.is_empty()) {
            req = req.bearer_auth(token);
        }

        let resp = req.send().await.map_err(|e| {
            tracing::warn!(endpoint, error = %e, "assistant endpoint unreachable");
            AiError::Transport(e.to_string())
        })?;

        let status = resp.status();
        tracing::info!(endpoint, status = status.as_u16(), "assistant endpoint answered");

        Ok(ConnectivityReport {
            ok: status.is_success(),
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
        })
    }
}

/// One-shot probe with a fresh client.
pub async fn check_connectivity(
    endpoint: &str,
    api_key: Option<&str>,
) -> Result<ConnectivityReport, AiError> {
    ConnectivityProbe::new().check(endpoint, api_key).await
}
