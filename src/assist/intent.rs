use regex::{Regex, RegexBuilder};
use serde::Serialize;

/// Confidence carried by any matched action
pub const MATCHED_CONFIDENCE: f32 = 0.8;
/// Confidence carried by the help fallback
pub const FALLBACK_CONFIDENCE: f32 = 0.5;

/// Discrete action categories the classifier can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Commit,
    Push,
    Pull,
    Branch,
    Merge,
    Status,
    Undo,
    Stash,
    Help,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Commit => "commit",
            Action::Push => "push",
            Action::Pull => "pull",
            Action::Branch => "branch",
            Action::Merge => "merge",
            Action::Status => "status",
            Action::Undo => "undo",
            Action::Stash => "stash",
            Action::Help => "help",
        }
    }
}

/// The classified action plus extracted target and confidence
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Intent {
    pub action: Action,
    pub target: String,
    pub confidence: f32,
}

/// Maps free-text queries to intents
///
/// Dispatch is first-match-wins over an ordered list of (action, patterns):
/// categories are tried in declaration order and the first matching pattern
/// decides. Ties between categories are resolved purely by that order, by
/// design. Confidence is a fixed constant per branch, never a match-quality
/// score.
pub struct IntentClassifier {
    patterns: Vec<(Action, Vec<Regex>)>,
    branch_target: Regex,
    commit_target: Regex,
    merge_target: Regex,
}

impl IntentClassifier {
    pub fn new() -> Self {
        let table: &[(Action, &[&str])] = &[
            (
                Action::Commit,
                &[
                    r"\b(commit|save|record)\b.*\b(changes|files|work)\b",
                    r"\bcommit\b",
                    r"\bsave.*changes\b",
                ],
            ),
            (
                Action::Push,
                &[
                    r"\b(push|upload|send)\b.*\b(remote|origin|upstream)\b",
                    r"\bpush\b",
                    r"\bupload.*changes\b",
                ],
            ),
            (
                Action::Pull,
                &[
                    r"\b(pull|fetch|download|get|sync)\b.*\b(changes|updates|remote)\b",
                    r"\bpull\b",
                    r"\bget.*changes\b",
                ],
            ),
            (
                Action::Branch,
                &[
                    r"\b(create|make|new)\b.*\bbranch\b",
                    r"\b(switch|change|checkout)\b.*\bbranch\b",
                    r"\bbranch\b",
                ],
            ),
            (
                Action::Merge,
                &[r"\bmerge\b.*\bbranch\b", r"\bmerge\b", r"\bcombine.*branches\b"],
            ),
            (
                Action::Status,
                &[
                    r"\b(status|state|what.*changed)\b",
                    r"\bcheck.*status\b",
                    r"\bwhat.*files\b",
                ],
            ),
            (
                Action::Undo,
                &[r"\b(undo|revert|rollback|reset)\b", r"\bundo.*commit\b", r"\bgo.*back\b"],
            ),
            (
                Action::Stash,
                &[
                    r"\b(stash|save|store)\b.*\b(changes|work)\b",
                    r"\bstash\b",
                    r"\btemporary.*save\b",
                ],
            ),
        ];

        let patterns = table
            .iter()
            .map(|(action, raw)| {
                let compiled = raw
                    .iter()
                    .map(|pattern| {
                        RegexBuilder::new(pattern)
                            .case_insensitive(true)
                            .build()
                            .expect("invalid intent pattern")
                    })
                    .collect();
                (*action, compiled)
            })
            .collect();

        Self {
            patterns,
            branch_target: Regex::new(r"branch\s+([a-zA-Z0-9_/-]+)").expect("invalid pattern"),
            commit_target: Regex::new(r#"message\s+["']([^"']+)["']"#).expect("invalid pattern"),
            merge_target: Regex::new(r"merge\s+([a-zA-Z0-9_/-]+)").expect("invalid pattern"),
        }
    }

    /// Classify a free-text query into an intent
    ///
    /// Pure: identical input yields identical output. A query matching no
    /// pattern falls back to `Action::Help`, which is a valid result, not an
    /// error.
    pub fn classify(&self, query: &str) -> Intent {
        if query.trim().is_empty() {
            return Intent {
                action: Action::Help,
                target: "general".to_string(),
                confidence: FALLBACK_CONFIDENCE,
            };
        }

        for (action, patterns) in &self.patterns {
            for pattern in patterns {
                if pattern.is_match(query) {
                    return Intent {
                        action: *action,
                        target: self.extract_target(query, *action),
                        confidence: MATCHED_CONFIDENCE,
                    };
                }
            }
        }

        Intent {
            action: Action::Help,
            target: "general".to_string(),
            confidence: FALLBACK_CONFIDENCE,
        }
    }

    /// Action-specific target extraction with per-action defaults
    fn extract_target(&self, query: &str, action: Action) -> String {
        let query_lower = query.to_lowercase();

        match action {
            Action::Branch => self
                .branch_target
                .captures(&query_lower)
                .map(|c| c[1].to_string())
                .unwrap_or_else(|| "new branch".to_string()),
            Action::Commit => self
                .commit_target
                .captures(query)
                .map(|c| c[1].to_string())
                .unwrap_or_else(|| "changes".to_string()),
            Action::Merge => self
                .merge_target
                .captures(&query_lower)
                .map(|c| c[1].to_string())
                .unwrap_or_else(|| "branch".to_string()),
            _ => "repository".to_string(),
        }
    }
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}
