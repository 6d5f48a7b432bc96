use crate::error::{GitError, GitResult};
use crate::git::snapshot::{ChangeKind, CommitInfo};
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;

/// A status line split into its staged/unstaged halves
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    pub path: String,
    pub kind: ChangeKind,
    pub staged: bool,
    pub unstaged: bool,
    pub untracked: bool,
}

/// Parse `git status --porcelain=v2` output
pub fn parse_status_porcelain_v2(output: &str) -> GitResult<Vec<StatusEntry>> {
    let mut entries = Vec::new();

    for line in output.lines() {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        match parts[0] {
            "1" => {
                // Ordinary entry: 1 <XY> <sub> <mH> <mI> <mW> <hH> <hI> <path>
                if parts.len() >= 9 {
                    let xy = parts[1];
                    let path = parts[8..].join(" ");
                    entries.push(tracked_entry(xy, path));
                }
            }
            "2" => {
                // Rename entry: 2 <XY> ... <path><tab><origPath>
                if parts.len() >= 10 {
                    let xy = parts[1];
                    let path = parts[9]
                        .split('\t')
                        .next()
                        .unwrap_or(parts[9])
                        .to_string();
                    let mut entry = tracked_entry(xy, path);
                    entry.kind = ChangeKind::Renamed;
                    entries.push(entry);
                }
            }
            "?" => {
                // Untracked file: ? <path>
                if parts.len() >= 2 {
                    let path = parts[1..].join(" ");
                    entries.push(StatusEntry {
                        path,
                        kind: ChangeKind::Added,
                        staged: false,
                        unstaged: false,
                        untracked: true,
                    });
                }
            }
            _ => {}
        }
    }

    Ok(entries)
}

fn tracked_entry(xy: &str, path: String) -> StatusEntry {
    let mut chars = xy.chars();
    let index_state = chars.next().unwrap_or('.');
    let worktree_state = chars.next().unwrap_or('.');

    // The worktree column wins for the change kind when both are set;
    // the index column describes what is already staged.
    let kind = match (index_state, worktree_state) {
        (_, 'M') | ('M', _) => ChangeKind::Modified,
        (_, 'D') | ('D', _) => ChangeKind::Deleted,
        ('A', _) | (_, 'A') => ChangeKind::Added,
        ('R', _) | (_, 'R') => ChangeKind::Renamed,
        _ => ChangeKind::Modified,
    };

    StatusEntry {
        path,
        kind,
        staged: index_state != '.',
        unstaged: worktree_state != '.',
        untracked: false,
    }
}

/// Parse git log output with format `%H%x00%s%x00%an%x00%at`
pub fn parse_log(output: &str) -> GitResult<Vec<CommitInfo>> {
    let mut commits = Vec::new();

    for line in output.lines() {
        if line.is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split('\0').collect();
        if parts.len() < 4 {
            return Err(GitError::ParseError(format!(
                "Malformed log line: {}",
                line
            )));
        }

        let epoch: i64 = parts[3].trim().parse().map_err(|_| {
            GitError::ParseError(format!("Invalid commit timestamp: {}", parts[3]))
        })?;
        let timestamp = DateTime::<Utc>::from_timestamp(epoch, 0)
            .ok_or_else(|| GitError::ParseError(format!("Timestamp out of range: {}", epoch)))?;

        commits.push(CommitInfo {
            hash: parts[0].to_string(),
            message: parts[1].to_string(),
            author: parts[2].to_string(),
            timestamp,
        });
    }

    Ok(commits)
}

/// Parse `git ls-files -u` output into the set of conflicted paths
pub fn parse_conflicted_files(output: &str) -> BTreeSet<String> {
    let mut paths = BTreeSet::new();

    for line in output.lines() {
        // Format: <mode> <object> <stage>\t<path>
        if let Some((_, path)) = line.split_once('\t') {
            if !path.is_empty() {
                paths.insert(path.to_string());
            }
        }
    }

    paths
}
