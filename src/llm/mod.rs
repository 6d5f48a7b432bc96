pub mod anthropic;
pub mod client;
pub mod prompt;

pub use anthropic::AnthropicClient;
pub use client::{BackendError, CommitMessageClient};
pub use prompt::PromptContext;
