//! Git operations module
//!
//! Provides:
//! - Committed and uncommitted change collection
//! - Per-file creation and last-edition years
//! - File content at a reference revision

pub mod changes;
pub mod history;
pub mod metadata;
pub mod vcs;

#[cfg(test)]
pub(crate) mod fake;

pub use changes::{
    branch_revision_symbol, collect_committed_changes, collect_uncommitted_changes, merge,
    FileChange,
};
pub use history::{resolve_history, FileHistory};
pub use metadata::{
    augment_with_metadata, get_vcs_changes, get_vcs_changes_with_clock, show_content_at_revision,
};
pub use vcs::{GitCli, Vcs};
