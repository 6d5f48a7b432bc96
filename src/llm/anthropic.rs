use crate::llm::client::{BackendError, CommitMessageClient};
use crate::llm::prompt::PromptContext;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use std::time::{Duration, Instant};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const DEFAULT_MODEL: &str = "claude-sonnet-4-5-20250929";
const MAX_RETRIES: u32 = 3;
const INITIAL_BACKOFF_MS: u64 = 1000;

// Rate limiting: 10 requests per minute
const RATE_LIMIT_REQUESTS: usize = 10;
const RATE_LIMIT_WINDOW: Duration = Duration::from_secs(60);

#[derive(Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<Message>,
}

#[derive(Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: String,
}

/// HTTP client for the commit-message backend
///
/// Only ever asked to phrase a commit message; nothing it returns affects
/// command selection or risk.
pub struct AnthropicClient {
    api_key: String,
    model: String,
    http_client: Client,
    // Rate limiting: track request timestamps
    request_times: Mutex<Vec<Instant>>,
}

impl AnthropicClient {
    pub fn new(api_key: String) -> Self {
        Self::with_model(api_key, DEFAULT_MODEL.to_string())
    }

    pub fn with_model(api_key: String, model: String) -> Self {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            api_key,
            model,
            http_client,
            request_times: Mutex::new(Vec::new()),
        }
    }

    /// Check and enforce client-side rate limiting
    fn check_rate_limit(&self) -> Result<(), BackendError> {
        let now = Instant::now();
        let mut times = self.request_times.lock().unwrap();

        // Remove requests older than the rate limit window
        times.retain(|&time| now.duration_since(time) < RATE_LIMIT_WINDOW);

        if times.len() >= RATE_LIMIT_REQUESTS {
            let oldest = times[0];
            let wait_time = RATE_LIMIT_WINDOW.saturating_sub(now.duration_since(oldest));
            return Err(BackendError::RateLimitExceeded(wait_time.as_secs()));
        }

        times.push(now);
        Ok(())
    }

    async fn call_api(&self, context: &str, query: &str) -> Result<String, BackendError> {
        let full_prompt = format!(
            "You are a git expert. Write a commit message for the changes described below.

Repository Context:
{}

User Query: {}

CRITICAL INSTRUCTIONS:
- Respond with ONLY the commit message itself
- Use conventional commit format where it fits (feat:, fix:, refactor:, docs:)
- Do NOT include explanations, reasoning, or commentary
- Do NOT use markdown code blocks or backticks
- Output format: exactly one line containing just the message
- Example good response: fix: handle empty porcelain output in status parser

Your response:",
            context, query
        );

        let request_body = AnthropicRequest {
            model: self.model.clone(),
            max_tokens: 256,
            messages: vec![Message {
                role: "user".to_string(),
                content: full_prompt,
            }],
        };

        let mut attempt = 0;
        let mut backoff_ms = INITIAL_BACKOFF_MS;

        loop {
            attempt += 1;

            let response = self
                .http_client
                .post(ANTHROPIC_API_URL)
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", "2023-06-01")
                .header("content-type", "application/json")
                .json(&request_body)
                .send()
                .await?;

            let status = response.status();

            if status.is_success() {
                let api_response: AnthropicResponse = response.json().await?;

                if let Some(content) = api_response.content.first() {
                    return Ok(content.text.clone());
                } else {
                    return Err(BackendError::InvalidResponse(
                        "No content in response".to_string(),
                    ));
                }
            } else if status.as_u16() == 429 {
                // Rate limit - check retry-after header
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(60);

                if attempt >= MAX_RETRIES {
                    return Err(BackendError::RateLimitExceeded(retry_after));
                }

                let wait_ms = retry_after.saturating_mul(1000).max(backoff_ms);
                eprintln!(
                    "Rate limited, retrying in {}ms (attempt {}/{})",
                    wait_ms, attempt, MAX_RETRIES
                );

                tokio::time::sleep(Duration::from_millis(wait_ms)).await;
                backoff_ms *= 2;
                continue;
            } else {
                let error_text = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                return Err(BackendError::ApiError(format!(
                    "API returned status {}: {}",
                    status, error_text
                )));
            }
        }
    }

    /// Clean up the model response to extract a single-line message
    fn clean_response(response: &str) -> String {
        let mut cleaned = response.trim();

        // Strip markdown code blocks (```text ... ``` or ``` ... ```)
        if cleaned.starts_with("```") {
            if let Some(first_newline) = cleaned.find('\n') {
                cleaned = &cleaned[first_newline + 1..];
            }
            if let Some(last_backticks) = cleaned.rfind("```") {
                cleaned = &cleaned[..last_backticks];
            }
            cleaned = cleaned.trim();
        }

        // Take only the first line (in case there's explanation after)
        if let Some(first_line) = cleaned.lines().next() {
            cleaned = first_line.trim();
        }

        cleaned.to_string()
    }
}

#[async_trait]
impl CommitMessageClient for AnthropicClient {
    async fn generate_commit_message(
        &self,
        context: &PromptContext,
        raw_query: &str,
    ) -> Result<String, BackendError> {
        self.check_rate_limit()?;

        let response = self.call_api(&context.summary, raw_query).await?;
        let message = Self::clean_response(&response);

        if message.is_empty() {
            return Err(BackendError::InvalidResponse(
                "Empty commit message".to_string(),
            ));
        }

        Ok(message)
    }
}
