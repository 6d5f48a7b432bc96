use crate::assist::command::GitCommand;
use crate::assist::intent::{Action, Intent};
use crate::git::RepositorySnapshot;
use crate::safety::AuditReport;
use serde::Serialize;

/// Enrichment strings at or below this length are dropped as noise
const MIN_ENRICHMENT_LEN: usize = 10;
/// Display limit for generated commit messages
pub const MAX_MESSAGE_DISPLAY_LEN: usize = 72;

/// The complete answer for one query
#[derive(Debug, Clone, Serialize)]
pub struct AssistantResponse {
    pub interpretation: String,
    pub commands: Vec<GitCommand>,
    pub explanation: String,
    pub warnings: Vec<String>,
    pub alternatives: Option<Vec<GitCommand>>,
    pub confidence: f32,
}

/// Combine classifier output, synthesized commands, and audit findings into
/// one response
///
/// Assembly only: no decision logic beyond dropping short enrichment text.
pub fn assemble(
    intent: &Intent,
    snapshot: &RepositorySnapshot,
    commands: Vec<GitCommand>,
    report: AuditReport,
    enrichment: Option<&str>,
) -> AssistantResponse {
    AssistantResponse {
        interpretation: format!(
            "I understand you want to {} {}",
            intent.action.as_str(),
            intent.target
        ),
        commands,
        explanation: build_explanation(intent.action, snapshot, enrichment),
        warnings: report.warnings,
        alternatives: report.alternatives,
        confidence: intent.confidence,
    }
}

fn build_explanation(
    action: Action,
    snapshot: &RepositorySnapshot,
    enrichment: Option<&str>,
) -> String {
    let base = match action {
        Action::Commit => format!(
            "I'll help you commit your changes. You have {} staged files and {} modified files.",
            snapshot.staged_files.len(),
            snapshot.unstaged_files.len()
        ),
        Action::Push => "I'll help you push your changes to the remote repository.".to_string(),
        Action::Pull => {
            "I'll help you pull the latest changes from the remote repository.".to_string()
        }
        Action::Branch => "I'll help you work with git branches.".to_string(),
        Action::Merge => "I'll help you merge branches safely.".to_string(),
        Action::Status => "I'll show you the current status of your repository.".to_string(),
        Action::Undo => "I'll help you undo changes safely.".to_string(),
        Action::Stash => "I'll help you stash your current work.".to_string(),
        Action::Help => {
            "I'm not sure what you'd like to do. Try asking about committing, pushing, \
             branching, or undoing changes."
                .to_string()
        }
    };

    match enrichment {
        Some(text) if text.len() > MIN_ENRICHMENT_LEN => format!("{} {}", base, text),
        _ => base,
    }
}

/// Truncate a generated message for display, appending an ellipsis marker
pub fn truncate_message(message: &str, max_len: usize) -> String {
    if message.chars().count() <= max_len {
        return message.to_string();
    }

    let truncated: String = message.chars().take(max_len).collect();
    format!("{}...", truncated.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assist::command::RiskLevel;
    use crate::assist::intent::MATCHED_CONFIDENCE;

    fn commit_intent() -> Intent {
        Intent {
            action: Action::Commit,
            target: "changes".to_string(),
            confidence: MATCHED_CONFIDENCE,
        }
    }

    #[test]
    fn test_interpretation_template() {
        let response = assemble(
            &commit_intent(),
            &RepositorySnapshot::default(),
            Vec::new(),
            AuditReport::default(),
            None,
        );

        assert_eq!(response.interpretation, "I understand you want to commit changes");
    }

    #[test]
    fn test_confidence_copied_verbatim() {
        let response = assemble(
            &commit_intent(),
            &RepositorySnapshot::default(),
            Vec::new(),
            AuditReport::default(),
            None,
        );

        assert_eq!(response.confidence, MATCHED_CONFIDENCE);
    }

    #[test]
    fn test_long_enrichment_appended() {
        let response = assemble(
            &commit_intent(),
            &RepositorySnapshot::default(),
            Vec::new(),
            AuditReport::default(),
            Some("These changes touch the parser and executor modules."),
        );

        assert!(response.explanation.contains("parser and executor"));
    }

    #[test]
    fn test_short_enrichment_dropped() {
        let response = assemble(
            &commit_intent(),
            &RepositorySnapshot::default(),
            Vec::new(),
            AuditReport::default(),
            Some("ok"),
        );

        assert!(!response.explanation.contains("ok."));
        assert!(response.explanation.starts_with("I'll help you commit"));
    }

    #[test]
    fn test_empty_enrichment_dropped() {
        let response = assemble(
            &commit_intent(),
            &RepositorySnapshot::default(),
            Vec::new(),
            AuditReport::default(),
            Some(""),
        );

        assert!(response.explanation.starts_with("I'll help you commit"));
    }

    #[test]
    fn test_warnings_and_alternatives_carried_over() {
        let report = AuditReport {
            warnings: vec!["careful".to_string()],
            alternatives: Some(vec![GitCommand::new(
                ["reset", "--soft", "HEAD~1"],
                "Safer option",
                RiskLevel::Moderate,
                true,
            )]),
        };

        let response = assemble(
            &commit_intent(),
            &RepositorySnapshot::default(),
            Vec::new(),
            report,
            None,
        );

        assert_eq!(response.warnings, vec!["careful".to_string()]);
        assert!(response.alternatives.is_some());
    }

    #[test]
    fn test_truncate_message_short_unchanged() {
        assert_eq!(truncate_message("fix bug", 72), "fix bug");
    }

    #[test]
    fn test_truncate_message_long() {
        let long = "a".repeat(100);
        let truncated = truncate_message(&long, MAX_MESSAGE_DISPLAY_LEN);

        assert_eq!(truncated.len(), MAX_MESSAGE_DISPLAY_LEN + 3);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn test_truncate_message_exact_boundary() {
        let exact = "b".repeat(MAX_MESSAGE_DISPLAY_LEN);
        assert_eq!(truncate_message(&exact, MAX_MESSAGE_DISPLAY_LEN), exact);
    }
}
