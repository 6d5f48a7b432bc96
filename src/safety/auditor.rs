use crate::assist::command::{GitCommand, RiskLevel};
use crate::git::RepositorySnapshot;
use serde::Serialize;

/// Warnings and safer alternatives derived from a synthesized command list
///
/// `warnings` is empty when nothing triggers, never absent. `alternatives`
/// is `None` when no destructive command with a known safer rewrite exists.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AuditReport {
    pub warnings: Vec<String>,
    pub alternatives: Option<Vec<GitCommand>>,
}

/// Post-process synthesized commands for risk
///
/// Rules are evaluated independently; all that apply are included. The only
/// destructive shape with a derived alternative is the hard reset of the
/// last commit; other destructive commands get a warning but no rewrite.
pub fn audit(commands: &[GitCommand], snapshot: &RepositorySnapshot) -> AuditReport {
    let mut warnings = Vec::new();
    let mut alternatives = Vec::new();

    if commands
        .iter()
        .any(|cmd| cmd.risk_level == RiskLevel::Destructive)
    {
        warnings.push(
            "This operation will permanently delete data. Make sure you have backups.".to_string(),
        );
    }

    if !snapshot.is_clean() && commands.iter().any(GitCommand::is_push) {
        warnings.push(
            "You have uncommitted changes. Consider committing them first.".to_string(),
        );
    }

    if snapshot.has_conflicts() {
        warnings.push(
            "You have unresolved merge conflicts. Resolve them before proceeding.".to_string(),
        );
    }

    for cmd in commands {
        if cmd.risk_level == RiskLevel::Destructive && cmd.is_hard_reset_of_last_commit() {
            alternatives.push(GitCommand::new(
                ["reset", "--soft", "HEAD~1"],
                "Safer option: Undo commit but keep changes",
                RiskLevel::Moderate,
                true,
            ));
        }
    }

    AuditReport {
        warnings,
        alternatives: if alternatives.is_empty() {
            None
        } else {
            Some(alternatives)
        },
    }
}
