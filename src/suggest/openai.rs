use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

use super::{SuggestError, Suggestion, SuggestionRequest, SuggestionService, prompt::render_prompt};
use crate::config::SuggestConfig;

/// Chat-completions client for any OpenAI-compatible endpoint.
pub struct OpenAiCompatibleService {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl OpenAiCompatibleService {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            model: model.into(),
            api_key,
        }
    }

    /// Builds a client from config, reading the key from `api_key_env`.
    pub fn from_config(cfg: &SuggestConfig) -> Result<Self, SuggestError> {
        let api_key = match cfg.api_key_env.as_deref() {
            Some(var) => Some(
                std::env::var(var).map_err(|_| SuggestError::MissingApiKey(var.to_string()))?,
            ),
            None => None,
        };
        Ok(Self::new(cfg.base_url.clone(), cfg.model.clone(), api_key))
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl SuggestionService for OpenAiCompatibleService {
    async fn suggest(&self, req: &SuggestionRequest) -> Result<Suggestion, SuggestError> {
        let body = json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": render_prompt(req) }],
        });

        let mut request = self.client.post(self.endpoint()).json(&body);
        if let Some(ref key) = self.api_key {
            request = request.bearer_auth(key);
        }

        let res = request.send().await?.error_for_status()?;
        let json: serde_json::Value = res.json().await?;
        let content = json["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| SuggestError::Response("no message content in response".to_string()))?;

        Ok(Suggestion {
            suggestion: content.trim().to_string(),
        })
    }
}
