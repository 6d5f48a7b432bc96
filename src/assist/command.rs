use serde::Serialize;

/// Risk tier governing whether user confirmation is mandatory
///
/// Totally ordered: Safe < Moderate < Destructive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Safe,
    Moderate,
    Destructive,
}

/// A concrete git invocation suggested to the caller
///
/// Never executed by the engine; the caller is responsible for confirmation
/// and for actually spawning git.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GitCommand {
    pub program: String,
    pub args: Vec<String>,
    pub description: String,
    pub risk_level: RiskLevel,
    pub requires_confirmation: bool,
    pub explanation: Option<String>,
}

impl GitCommand {
    /// Build a command, enforcing that destructive commands always require
    /// confirmation
    pub fn new<I, S>(
        args: I,
        description: impl Into<String>,
        risk_level: RiskLevel,
        requires_confirmation: bool,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: "git".to_string(),
            args: args.into_iter().map(Into::into).collect(),
            description: description.into(),
            risk_level,
            requires_confirmation: requires_confirmation || risk_level == RiskLevel::Destructive,
            explanation: None,
        }
    }

    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }

    /// Full command line for display, e.g. `git reset --soft HEAD~1`
    pub fn display(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }

    /// True for commands that touch a remote (push)
    pub fn is_push(&self) -> bool {
        self.args.first().is_some_and(|arg| arg == "push")
    }

    /// True for `reset --hard HEAD~1`, the one destructive shape the auditor
    /// knows a safer rewrite for
    pub fn is_hard_reset_of_last_commit(&self) -> bool {
        self.args.first().is_some_and(|arg| arg == "reset")
            && self.args.iter().any(|arg| arg == "--hard")
            && self.args.iter().any(|arg| arg == "HEAD~1")
    }
}
