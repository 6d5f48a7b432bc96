use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeSet;

/// How a tracked file differs from HEAD or the index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Added,
    Modified,
    Deleted,
    Renamed,
}

/// A single changed file in the working tree or index
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    pub path: String,
    pub kind: ChangeKind,
}

impl FileEntry {
    pub fn new(path: impl Into<String>, kind: ChangeKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

/// Commit counts relative to the branch's upstream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AheadBehind {
    pub ahead: usize,
    pub behind: usize,
}

/// A recent commit, most useful fields only
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitInfo {
    pub hash: String,
    pub message: String,
    pub author: String,
    pub timestamp: DateTime<Utc>,
}

/// Point-in-time, read-only description of repository state
///
/// Captured once per request by the inspector and discarded after the
/// response is assembled. `conflicted_files` and `ahead_behind` are `None`
/// whenever detection does not apply or fails; consumers treat absent as
/// "assume none".
#[derive(Debug, Clone, Default, Serialize)]
pub struct RepositorySnapshot {
    /// `None` means detached HEAD
    pub current_branch: Option<String>,
    pub staged_files: Vec<FileEntry>,
    pub unstaged_files: Vec<FileEntry>,
    pub untracked_files: BTreeSet<String>,
    /// Present only during an unresolved merge
    pub conflicted_files: Option<BTreeSet<String>>,
    pub ahead_behind: Option<AheadBehind>,
    /// Most recent first
    pub recent_commits: Vec<CommitInfo>,
}

impl RepositorySnapshot {
    /// No staged, unstaged, or untracked files
    pub fn is_clean(&self) -> bool {
        self.staged_files.is_empty()
            && self.unstaged_files.is_empty()
            && self.untracked_files.is_empty()
    }

    /// Check if in detached HEAD state
    pub fn is_detached(&self) -> bool {
        self.current_branch.is_none()
    }

    /// Any unresolved merge conflicts
    pub fn has_conflicts(&self) -> bool {
        self.conflicted_files
            .as_ref()
            .is_some_and(|files| !files.is_empty())
    }
}
