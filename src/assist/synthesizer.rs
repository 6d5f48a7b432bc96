use crate::assist::command::{GitCommand, RiskLevel};
use crate::assist::intent::{Action, Intent};
use crate::git::RepositorySnapshot;

/// Placeholder branch name when the user asked for a new branch without
/// naming it
const DEFAULT_BRANCH_NAME: &str = "feature/new-feature";

/// True when the commit rule would need a generated commit message
///
/// The orchestrator calls the enrichment backend before synthesis only when
/// this holds, so `synthesize` itself stays pure.
pub fn needs_generated_message(intent: &Intent, snapshot: &RepositorySnapshot) -> bool {
    intent.action == Action::Commit
        && intent.target == "changes"
        && (!snapshot.staged_files.is_empty() || !snapshot.unstaged_files.is_empty())
}

/// Produce the ordered command list for an intent
///
/// Pure over its inputs; `commit_message` is the already-resolved enrichment
/// string (the fallback literal when the backend failed). Ordering within
/// the output reflects execution order: prerequisite steps precede the
/// target action.
pub fn synthesize(
    intent: &Intent,
    snapshot: &RepositorySnapshot,
    raw_query: &str,
    commit_message: &str,
) -> Vec<GitCommand> {
    match intent.action {
        Action::Commit => commit_commands(snapshot, &intent.target, commit_message),
        Action::Push => push_commands(snapshot),
        Action::Pull => pull_commands(snapshot),
        Action::Branch => branch_commands(snapshot, &intent.target, raw_query),
        Action::Merge => merge_commands(snapshot, &intent.target),
        Action::Status => status_commands(),
        Action::Undo => undo_commands(raw_query),
        Action::Stash => stash_commands(snapshot),
        Action::Help => help_commands(),
    }
}

fn commit_commands(
    snapshot: &RepositorySnapshot,
    target: &str,
    commit_message: &str,
) -> Vec<GitCommand> {
    let mut commands = Vec::new();

    // Nothing staged yet: stage everything first
    if snapshot.staged_files.is_empty()
        && (!snapshot.unstaged_files.is_empty() || !snapshot.untracked_files.is_empty())
    {
        commands.push(
            GitCommand::new(
                ["add", "."],
                "Stage all changes for commit",
                RiskLevel::Safe,
                false,
            )
            .with_explanation("First, let's stage your changes"),
        );
    }

    if target != "changes" {
        // The user spelled out a commit message
        commands.push(GitCommand::new(
            ["commit", "-m", target],
            format!("Commit changes with message: {}", target),
            RiskLevel::Safe,
            false,
        ));
    } else if !snapshot.staged_files.is_empty() || !snapshot.unstaged_files.is_empty() {
        commands.push(GitCommand::new(
            ["commit", "-m", commit_message],
            format!("Commit with generated message: {}", commit_message),
            RiskLevel::Safe,
            false,
        ));
    }
    // No changes at all: no commit command

    commands
}

fn push_commands(snapshot: &RepositorySnapshot) -> Vec<GitCommand> {
    let ahead = snapshot.ahead_behind.map(|ab| ab.ahead).unwrap_or(0);

    if ahead > 0 {
        vec![
            GitCommand::new(["push"], "Push commits to remote repository", RiskLevel::Safe, false)
                .with_explanation(format!("Push {} commit(s) to remote", ahead)),
        ]
    } else {
        // No upstream (or nothing tracked yet): first push creates the branch
        // on the remote
        let branch = snapshot.current_branch.as_deref().unwrap_or("HEAD");
        vec![
            GitCommand::new(
                ["push", "-u", "origin", branch],
                "Push current branch to remote (first time)",
                RiskLevel::Moderate,
                true,
            )
            .with_explanation("This will create the branch on the remote repository"),
        ]
    }
}

fn pull_commands(snapshot: &RepositorySnapshot) -> Vec<GitCommand> {
    let mut commands = Vec::new();

    if !snapshot.is_clean() {
        commands.push(
            GitCommand::new(
                ["stash"],
                "Stash local changes before pulling",
                RiskLevel::Safe,
                true,
            )
            .with_explanation("Stash changes to avoid conflicts during pull"),
        );
    }

    commands.push(
        GitCommand::new(["pull"], "Pull latest changes from remote", RiskLevel::Moderate, false)
            .with_explanation("Fetch and merge changes from remote repository"),
    );

    commands
}

fn branch_commands(snapshot: &RepositorySnapshot, target: &str, raw_query: &str) -> Vec<GitCommand> {
    let query_lower = raw_query.to_lowercase();

    if query_lower.contains("create") || query_lower.contains("new") {
        let branch_name = if target == "new branch" {
            DEFAULT_BRANCH_NAME
        } else {
            target
        };
        vec![GitCommand::new(
            ["checkout", "-b", branch_name],
            format!("Create and switch to new branch: {}", branch_name),
            RiskLevel::Safe,
            false,
        )]
    } else if query_lower.contains("switch") || query_lower.contains("checkout") {
        // Switching with uncommitted changes risks losing work
        vec![
            GitCommand::new(
                ["checkout", target],
                format!("Switch to branch: {}", target),
                RiskLevel::Moderate,
                !snapshot.is_clean(),
            )
            .with_explanation("Switching branches with uncommitted changes may lose work"),
        ]
    } else {
        vec![GitCommand::new(
            ["branch", "-a"],
            "List all branches",
            RiskLevel::Safe,
            false,
        )]
    }
}

fn merge_commands(snapshot: &RepositorySnapshot, target: &str) -> Vec<GitCommand> {
    let mut commands = Vec::new();

    if !snapshot.is_clean() {
        commands.push(
            GitCommand::new(
                ["status"],
                "Check repository status before merge",
                RiskLevel::Safe,
                false,
            )
            .with_explanation("Clean working directory recommended before merge"),
        );
    }

    commands.push(
        GitCommand::new(
            ["merge", target],
            format!("Merge branch '{}' into current branch", target),
            RiskLevel::Moderate,
            true,
        )
        .with_explanation("This will combine changes from both branches"),
    );

    commands
}

fn status_commands() -> Vec<GitCommand> {
    vec![
        GitCommand::new(["status"], "Show repository status", RiskLevel::Safe, false)
            .with_explanation("Display current state of your repository"),
    ]
}

fn undo_commands(raw_query: &str) -> Vec<GitCommand> {
    let query_lower = raw_query.to_lowercase();

    if query_lower.contains("commit") {
        if query_lower.contains("keep") || query_lower.contains("save") {
            vec![
                GitCommand::new(
                    ["reset", "--soft", "HEAD~1"],
                    "Undo last commit but keep changes staged",
                    RiskLevel::Moderate,
                    true,
                )
                .with_explanation("This will undo the commit but preserve your changes"),
            ]
        } else {
            vec![
                GitCommand::new(
                    ["reset", "--hard", "HEAD~1"],
                    "Undo last commit and discard changes",
                    RiskLevel::Destructive,
                    true,
                )
                .with_explanation("This will permanently delete your changes!"),
            ]
        }
    } else {
        // Not clear what to undo: show recent history so the user can choose
        vec![GitCommand::new(
            ["log", "--oneline", "-5"],
            "Show recent commits to choose what to undo",
            RiskLevel::Safe,
            false,
        )]
    }
}

fn stash_commands(snapshot: &RepositorySnapshot) -> Vec<GitCommand> {
    if !snapshot.unstaged_files.is_empty() || !snapshot.untracked_files.is_empty() {
        vec![
            GitCommand::new(
                ["stash", "push", "-m", "Work in progress"],
                "Stash current changes",
                RiskLevel::Safe,
                false,
            )
            .with_explanation("Temporarily save your changes"),
        ]
    } else {
        vec![GitCommand::new(
            ["stash", "list"],
            "Show stashed changes",
            RiskLevel::Safe,
            false,
        )]
    }
}

fn help_commands() -> Vec<GitCommand> {
    vec![
        GitCommand::new(["status"], "Show repository status", RiskLevel::Safe, false)
            .with_explanation("Let's start by checking your repository status"),
    ]
}
