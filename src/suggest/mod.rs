//! Regional land-standard suggestions from an external language model.

/// OpenAI-compatible chat-completions backend.
pub mod openai;
/// Prompt template.
pub mod prompt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Minimum trimmed length of a location.
pub const MIN_LOCATION_CHARS: usize = 2;

/// Area description and optional district.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionRequest {
    /// Free-text area, e.g. `"2.5 hectare"`.
    pub area: String,
    /// District or region name.
    pub location: Option<String>,
}

impl SuggestionRequest {
    /// Builds a request, rejecting locations shorter than
    /// [`MIN_LOCATION_CHARS`].
    pub fn new(area: impl Into<String>, location: impl Into<String>) -> Result<Self, SuggestError> {
        let location = location.into();
        if location.trim().chars().count() < MIN_LOCATION_CHARS {
            return Err(SuggestError::InvalidRequest(format!(
                "location must be at least {MIN_LOCATION_CHARS} characters"
            )));
        }
        Ok(Self {
            area: area.into(),
            location: Some(location),
        })
    }
}

/// Model answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Suggestion text (Gujarati).
    pub suggestion: String,
}

#[derive(Debug, thiserror::Error)]
pub enum SuggestError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("suggestion request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("malformed suggestion response: {0}")]
    Response(String),
    #[error("missing API key: set {0}")]
    MissingApiKey(String),
}

/// External suggestion collaborator. Implementations do not retry.
#[async_trait]
pub trait SuggestionService: Send + Sync {
    async fn suggest(&self, req: &SuggestionRequest) -> Result<Suggestion, SuggestError>;
}
