use serde::{Deserialize, Serialize};

/// Placeholder written into fresh state; operators replace it with their
/// own project endpoint.
pub const DEFAULT_ENDPOINT: &str =
    "https://<resource>.services.ai.azure.com/api/projects/<project>";

/// Assistant endpoint settings, persisted with the warehouse state.
///
/// Missing keys take their default, so a partially stored record keeps the
/// placeholder endpoint or empty key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AiConfig {
    pub endpoint: String,
    pub api_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: String::new(),
            prompt: None,
        }
    }
}

impl AiConfig {
    /// The key to send as a bearer token, if one is configured.
    pub fn bearer_token(&self) -> Option<&str> {
        Some(self.api_key.trim()).filter(|k| !k.is_empty())
    }
}
