pub mod assembler;
pub mod assistant;
pub mod command;
pub mod intent;
pub mod synthesizer;

pub use assembler::{AssistantResponse, assemble};
pub use assistant::{Assistant, FALLBACK_COMMIT_MESSAGE};
pub use command::{GitCommand, RiskLevel};
pub use intent::{Action, Intent, IntentClassifier};
pub use synthesizer::synthesize;
