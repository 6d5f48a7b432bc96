pub mod executor;
pub mod inspector;
pub mod parser;
pub mod snapshot;

// Re-export commonly used types
pub use executor::{CommandOutput, GitRunner};
pub use inspector::Inspector;
pub use snapshot::{AheadBehind, ChangeKind, CommitInfo, FileEntry, RepositorySnapshot};
