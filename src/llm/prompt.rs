use crate::git::RepositorySnapshot;

const MAX_FILES_LISTED: usize = 50;
const MAX_COMMITS_LISTED: usize = 3;
const TOKEN_BUDGET: usize = 2000;

/// Structured snapshot summary handed to the text-generation backend
#[derive(Debug, Clone)]
pub struct PromptContext {
    pub summary: String,
    pub estimated_tokens: usize,
}

impl PromptContext {
    /// Build a summary of the snapshot, truncated to the token budget
    pub fn from_snapshot(snapshot: &RepositorySnapshot) -> Self {
        let mut summary = String::new();

        match &snapshot.current_branch {
            Some(branch) => summary.push_str(&format!("Current branch: {}\n", branch)),
            None => summary.push_str("Detached HEAD state\n"),
        }

        if let Some(ab) = snapshot.ahead_behind {
            summary.push_str(&format!(
                "Upstream: ahead {}, behind {}\n",
                ab.ahead, ab.behind
            ));
        }

        if !snapshot.staged_files.is_empty() {
            summary.push_str("\nStaged files:\n");
            for file in snapshot.staged_files.iter().take(MAX_FILES_LISTED) {
                summary.push_str(&format!("  {:?}: {}\n", file.kind, file.path));
            }
        }

        if !snapshot.unstaged_files.is_empty() {
            summary.push_str("\nUnstaged files:\n");
            for file in snapshot.unstaged_files.iter().take(MAX_FILES_LISTED) {
                summary.push_str(&format!("  {:?}: {}\n", file.kind, file.path));
            }
        }

        if !snapshot.untracked_files.is_empty() {
            summary.push_str("\nUntracked files:\n");
            for path in snapshot.untracked_files.iter().take(MAX_FILES_LISTED) {
                summary.push_str(&format!("  {}\n", path));
            }
        }

        if !snapshot.recent_commits.is_empty() {
            summary.push_str("\nRecent commits:\n");
            for commit in snapshot.recent_commits.iter().take(MAX_COMMITS_LISTED) {
                summary.push_str(&format!("  {}\n", commit.message));
            }
        }

        let mut context = Self {
            estimated_tokens: Self::estimate_tokens(&summary),
            summary,
        };
        context.truncate_to_budget(TOKEN_BUDGET);
        context
    }

    /// Estimate tokens using the 4 characters ≈ 1 token heuristic
    pub fn estimate_tokens(text: &str) -> usize {
        text.len().div_ceil(4)
    }

    fn truncate_to_budget(&mut self, max_tokens: usize) {
        if self.estimated_tokens <= max_tokens {
            return;
        }

        let mut cut = max_tokens * 4;
        while !self.summary.is_char_boundary(cut) {
            cut -= 1;
        }
        self.summary.truncate(cut);
        self.summary.push_str("\n... [truncated]");
        self.estimated_tokens = Self::estimate_tokens(&self.summary);
    }
}
