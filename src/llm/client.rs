use crate::llm::prompt::PromptContext;
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while talking to the text-generation backend
///
/// Every variant is recovered locally by the assistant: a failed enrichment
/// call degrades to a fixed fallback string and never reaches the caller.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("API request failed: {0}")]
    ApiError(String),

    #[error("Rate limit exceeded, retry after {0}s")]
    RateLimitExceeded(u64),

    #[error("Request timeout")]
    Timeout,

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Trait for backends that can phrase a commit message from a repository
/// summary
///
/// The engine treats this as an opaque `context × query → string` function.
/// The response never influences which commands are suggested or their risk
/// tier.
#[async_trait]
pub trait CommitMessageClient: Send + Sync {
    async fn generate_commit_message(
        &self,
        context: &PromptContext,
        raw_query: &str,
    ) -> Result<String, BackendError>;
}
