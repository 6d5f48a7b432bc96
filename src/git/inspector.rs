use crate::error::{GitError, GitResult};
use crate::git::executor::GitRunner;
use crate::git::parser;
use crate::git::snapshot::{AheadBehind, FileEntry, RepositorySnapshot};
use std::collections::BTreeSet;
use std::env;
use std::path::{Path, PathBuf};

const RECENT_COMMIT_LIMIT: usize = 10;

/// Reads the live state of a git working tree
///
/// Everything above this layer consumes the immutable snapshot; the engine
/// never touches the repository directly.
#[derive(Debug)]
pub struct Inspector {
    path: PathBuf,
    runner: GitRunner,
}

impl Inspector {
    /// Detect git repository from current working directory
    pub fn discover() -> GitResult<Self> {
        let current_dir = env::current_dir().map_err(GitError::IoError)?;
        Self::discover_from(&current_dir)
    }

    /// Detect git repository starting from a specific directory
    pub fn discover_from<P: AsRef<Path>>(start_path: P) -> GitResult<Self> {
        let mut current = start_path.as_ref().to_path_buf();

        loop {
            if current.join(".git").exists() {
                return Ok(Self::new(current));
            }

            if !current.pop() {
                return Err(GitError::NotARepository);
            }
        }
    }

    /// Create an Inspector for a known git directory
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let runner = GitRunner::new(&path);

        Self { path, runner }
    }

    /// Get the repository path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Capture a snapshot of the current repository state
    ///
    /// Ahead/behind and conflict detection degrade to `None` on any failure;
    /// the snapshot consumer treats absent as "assume none".
    pub fn snapshot(&self) -> GitResult<RepositorySnapshot> {
        let current_branch = self.current_branch();
        let status_entries = self.status()?;

        let mut staged = Vec::new();
        let mut unstaged = Vec::new();
        let mut untracked = BTreeSet::new();

        for entry in status_entries {
            if entry.untracked {
                untracked.insert(entry.path);
                continue;
            }
            if entry.staged {
                staged.push(FileEntry::new(entry.path.clone(), entry.kind));
            }
            if entry.unstaged {
                unstaged.push(FileEntry::new(entry.path, entry.kind));
            }
        }

        Ok(RepositorySnapshot {
            ahead_behind: current_branch
                .as_deref()
                .and_then(|branch| self.ahead_behind(branch)),
            conflicted_files: self.conflicted_files(),
            recent_commits: self.recent_commits(RECENT_COMMIT_LIMIT),
            current_branch,
            staged_files: staged,
            unstaged_files: unstaged,
            untracked_files: untracked,
        })
    }

    fn status(&self) -> GitResult<Vec<parser::StatusEntry>> {
        let output = self.runner.run(&["status", "--porcelain=v2"])?;
        parser::parse_status_porcelain_v2(&output.stdout)
    }

    /// Get the current branch name, None for detached HEAD
    fn current_branch(&self) -> Option<String> {
        match self.runner.run(&["branch", "--show-current"]) {
            Ok(output) => {
                let branch = output.stdout.trim();
                if branch.is_empty() {
                    None
                } else {
                    Some(branch.to_string())
                }
            }
            Err(_) => None,
        }
    }

    /// Commit counts against the configured upstream, None when there is no
    /// upstream or either lookup fails
    fn ahead_behind(&self, branch: &str) -> Option<AheadBehind> {
        let upstream_ref = format!("refs/heads/{}", branch);
        let output = self
            .runner
            .run(&["for-each-ref", "--format=%(upstream:short)", &upstream_ref])
            .ok()?;

        let upstream = output.stdout.trim().to_string();
        if upstream.is_empty() {
            return None;
        }

        let range = format!("{}...{}", branch, upstream);
        let output = self
            .runner
            .run(&["rev-list", "--left-right", "--count", &range])
            .ok()?;

        let parts: Vec<&str> = output.stdout.split_whitespace().collect();
        if parts.len() != 2 {
            return None;
        }

        Some(AheadBehind {
            ahead: parts[0].parse().ok()?,
            behind: parts[1].parse().ok()?,
        })
    }

    /// Conflicted paths, Some only while a merge is in progress
    fn conflicted_files(&self) -> Option<BTreeSet<String>> {
        if !self.path.join(".git/MERGE_HEAD").exists() {
            return None;
        }

        let output = self.runner.run(&["ls-files", "-u"]).ok()?;
        Some(parser::parse_conflicted_files(&output.stdout))
    }

    /// Recent commits, empty when the repo has no history
    fn recent_commits(&self, count: usize) -> Vec<crate::git::snapshot::CommitInfo> {
        let limit = format!("-n{}", count);
        match self.runner.run(&["log", &limit, "--format=%H%x00%s%x00%an%x00%at"]) {
            Ok(output) => parser::parse_log(&output.stdout).unwrap_or_default(),
            Err(_) => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::process::Command;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let repo_path = temp_dir.path().to_path_buf();

        Command::new("git")
            .args(["init"])
            .current_dir(&repo_path)
            .output()
            .unwrap();

        Command::new("git")
            .args(["config", "user.name", "Test User"])
            .current_dir(&repo_path)
            .output()
            .unwrap();

        Command::new("git")
            .args(["config", "user.email", "test@example.com"])
            .current_dir(&repo_path)
            .output()
            .unwrap();

        (temp_dir, repo_path)
    }

    #[test]
    fn test_discover_from_subdirectory() {
        let (_temp, repo_path) = create_test_repo();

        let sub_dir = repo_path.join("subdir");
        fs::create_dir(&sub_dir).unwrap();

        let inspector = Inspector::discover_from(&sub_dir).unwrap();
        assert_eq!(inspector.path(), repo_path.as_path());
    }

    #[test]
    fn test_discover_not_a_repo() {
        let temp_dir = TempDir::new().unwrap();
        let result = Inspector::discover_from(temp_dir.path());

        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), GitError::NotARepository));
    }

    #[test]
    fn test_empty_repo_snapshot() {
        let (_temp, repo_path) = create_test_repo();
        let inspector = Inspector::new(&repo_path);

        let snapshot = inspector.snapshot().unwrap();
        assert!(snapshot.current_branch.is_some());
        assert!(snapshot.is_clean());
        assert!(!snapshot.is_detached());
        assert_eq!(snapshot.recent_commits.len(), 0);
        assert!(snapshot.ahead_behind.is_none());
        assert!(snapshot.conflicted_files.is_none());
    }

    #[test]
    fn test_snapshot_with_untracked_file() {
        let (_temp, repo_path) = create_test_repo();
        let inspector = Inspector::new(&repo_path);

        fs::write(repo_path.join("test.txt"), "test content").unwrap();

        let snapshot = inspector.snapshot().unwrap();
        assert!(!snapshot.is_clean());
        assert_eq!(snapshot.untracked_files.len(), 1);
        assert!(snapshot.untracked_files.contains("test.txt"));
        assert!(snapshot.staged_files.is_empty());
    }

    #[test]
    fn test_snapshot_with_staged_file() {
        let (_temp, repo_path) = create_test_repo();
        let inspector = Inspector::new(&repo_path);

        fs::write(repo_path.join("staged.txt"), "staged content").unwrap();

        Command::new("git")
            .args(["add", "staged.txt"])
            .current_dir(&repo_path)
            .output()
            .unwrap();

        let snapshot = inspector.snapshot().unwrap();
        assert!(!snapshot.is_clean());
        assert_eq!(snapshot.staged_files.len(), 1);
        assert_eq!(snapshot.staged_files[0].path, "staged.txt");
    }
}
