use crate::assist::assembler::{self, AssistantResponse, MAX_MESSAGE_DISPLAY_LEN};
use crate::assist::intent::IntentClassifier;
use crate::assist::synthesizer::{self, needs_generated_message};
use crate::git::RepositorySnapshot;
use crate::llm::{CommitMessageClient, PromptContext};
use crate::safety;
use std::time::Duration;

/// Substituted when the enrichment backend fails, times out, or returns an
/// empty result
pub const FALLBACK_COMMIT_MESSAGE: &str = "Update files";

const DEFAULT_ENRICHMENT_TIMEOUT: Duration = Duration::from_secs(15);

/// Per-request pipeline: classify, enrich (commit fallback branch only),
/// synthesize, audit, assemble
///
/// Constructed once at process start and passed by reference into each
/// request; holds no per-request state. The backend is optional: without
/// one, generated commit messages are always the fallback literal.
pub struct Assistant {
    classifier: IntentClassifier,
    backend: Option<Box<dyn CommitMessageClient>>,
    enrichment_timeout: Duration,
}

impl Assistant {
    pub fn new(backend: Option<Box<dyn CommitMessageClient>>) -> Self {
        Self {
            classifier: IntentClassifier::new(),
            backend,
            enrichment_timeout: DEFAULT_ENRICHMENT_TIMEOUT,
        }
    }

    pub fn with_enrichment_timeout(mut self, timeout: Duration) -> Self {
        self.enrichment_timeout = timeout;
        self
    }

    pub fn classifier(&self) -> &IntentClassifier {
        &self.classifier
    }

    /// Answer one query against one snapshot
    ///
    /// Total: never fails for a normal query. The only observable "failure"
    /// is a low-confidence help response, which is itself a valid result.
    pub async fn respond(&self, query: &str, snapshot: &RepositorySnapshot) -> AssistantResponse {
        let intent = self.classifier.classify(query);

        // The single outbound call, bounded by the enrichment timeout.
        // Failure, timeout, and empty result are treated identically.
        let enrichment = if needs_generated_message(&intent, snapshot) {
            self.generate_message(snapshot, query).await
        } else {
            None
        };

        let commit_message = enrichment
            .as_deref()
            .unwrap_or(FALLBACK_COMMIT_MESSAGE)
            .to_string();

        let commands = synthesizer::synthesize(&intent, snapshot, query, &commit_message);
        let report = safety::audit(&commands, snapshot);

        assembler::assemble(&intent, snapshot, commands, report, enrichment.as_deref())
    }

    async fn generate_message(
        &self,
        snapshot: &RepositorySnapshot,
        raw_query: &str,
    ) -> Option<String> {
        let backend = self.backend.as_ref()?;
        let context = PromptContext::from_snapshot(snapshot);

        let result = tokio::time::timeout(
            self.enrichment_timeout,
            backend.generate_commit_message(&context, raw_query),
        )
        .await;

        match result {
            Ok(Ok(message)) if !message.trim().is_empty() => Some(assembler::truncate_message(
                message.trim(),
                MAX_MESSAGE_DISPLAY_LEN,
            )),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assist::command::RiskLevel;
    use crate::git::snapshot::{ChangeKind, FileEntry};
    use crate::llm::client::BackendError;
    use async_trait::async_trait;

    struct MockBackend {
        response: Result<String, ()>,
    }

    #[async_trait]
    impl CommitMessageClient for MockBackend {
        async fn generate_commit_message(
            &self,
            _context: &PromptContext,
            _raw_query: &str,
        ) -> Result<String, BackendError> {
            self.response
                .clone()
                .map_err(|_| BackendError::Timeout)
        }
    }

    fn dirty_snapshot() -> RepositorySnapshot {
        RepositorySnapshot {
            current_branch: Some("main".to_string()),
            unstaged_files: vec![FileEntry::new("a.txt", ChangeKind::Modified)],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_commit_uses_backend_message() {
        let assistant = Assistant::new(Some(Box::new(MockBackend {
            response: Ok("feat: add login flow".to_string()),
        })));

        let response = assistant.respond("commit my changes", &dirty_snapshot()).await;

        let commit = response.commands.last().unwrap();
        assert_eq!(commit.args, ["commit", "-m", "feat: add login flow"]);
    }

    #[tokio::test]
    async fn test_backend_failure_degrades_to_fallback() {
        let assistant = Assistant::new(Some(Box::new(MockBackend { response: Err(()) })));

        let response = assistant.respond("commit my changes", &dirty_snapshot()).await;

        let commit = response.commands.last().unwrap();
        assert_eq!(commit.args, ["commit", "-m", FALLBACK_COMMIT_MESSAGE]);
    }

    #[tokio::test]
    async fn test_backend_empty_result_degrades_to_fallback() {
        let assistant = Assistant::new(Some(Box::new(MockBackend {
            response: Ok("   ".to_string()),
        })));

        let response = assistant.respond("commit my changes", &dirty_snapshot()).await;

        let commit = response.commands.last().unwrap();
        assert_eq!(commit.args, ["commit", "-m", FALLBACK_COMMIT_MESSAGE]);
    }

    #[tokio::test]
    async fn test_no_backend_uses_fallback() {
        let assistant = Assistant::new(None);

        let response = assistant.respond("commit my changes", &dirty_snapshot()).await;

        let commit = response.commands.last().unwrap();
        assert_eq!(commit.args, ["commit", "-m", FALLBACK_COMMIT_MESSAGE]);
    }

    #[tokio::test]
    async fn test_long_generated_message_truncated() {
        let long_message = "x".repeat(120);
        let assistant = Assistant::new(Some(Box::new(MockBackend {
            response: Ok(long_message),
        })));

        let response = assistant.respond("commit my changes", &dirty_snapshot()).await;

        let commit = response.commands.last().unwrap();
        let message = &commit.args[2];
        assert!(message.ends_with("..."));
        assert_eq!(message.len(), MAX_MESSAGE_DISPLAY_LEN + 3);
    }

    #[tokio::test]
    async fn test_non_commit_query_never_calls_backend() {
        // A backend that panics if called proves the push path stays offline.
        struct PanicBackend;

        #[async_trait]
        impl CommitMessageClient for PanicBackend {
            async fn generate_commit_message(
                &self,
                _context: &PromptContext,
                _raw_query: &str,
            ) -> Result<String, BackendError> {
                panic!("backend must not be called for non-commit queries");
            }
        }

        let assistant = Assistant::new(Some(Box::new(PanicBackend)));
        let response = assistant.respond("push my work", &dirty_snapshot()).await;
        assert!(!response.commands.is_empty());
    }

    #[tokio::test]
    async fn test_undo_last_commit_pipeline() {
        let assistant = Assistant::new(None);

        let response = assistant
            .respond("undo my last commit", &RepositorySnapshot::default())
            .await;

        assert_eq!(response.commands.len(), 1);
        assert_eq!(response.commands[0].risk_level, RiskLevel::Destructive);
        assert!(response.commands[0].requires_confirmation);
        assert!(!response.warnings.is_empty());

        let alternatives = response.alternatives.expect("soft reset alternative");
        assert_eq!(alternatives.len(), 1);
        assert_eq!(alternatives[0].args, ["reset", "--soft", "HEAD~1"]);
    }

    #[tokio::test]
    async fn test_unmatched_query_yields_help_response() {
        let assistant = Assistant::new(None);

        let response = assistant
            .respond("make me a sandwich", &RepositorySnapshot::default())
            .await;

        assert!(response.interpretation.contains("help"));
        assert_eq!(response.commands.len(), 1);
        assert_eq!(response.commands[0].args, ["status"]);
    }
}
