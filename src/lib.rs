pub mod assist;
pub mod config;
pub mod error;
pub mod git;
pub mod history;
pub mod llm;
pub mod safety;

// Re-export commonly used types for convenience
pub use assist::{Action, Assistant, AssistantResponse, GitCommand, Intent, IntentClassifier, RiskLevel};
pub use error::{AppError, AppResult, GitError, GitResult};
pub use git::{Inspector, RepositorySnapshot};
