//! Year metadata and reference content for collected changes

use anyhow::Result;

use super::changes::{
    branch_revision_symbol, collect_committed_changes, collect_uncommitted_changes, merge,
    FileChange,
};
use super::history::resolve_history;
use super::vcs::Vcs;
use crate::clock::{Clock, SystemClock};

/// Content of `path` at `revision`, empty when it cannot be read
pub fn show_content_at_revision(vcs: &impl Vcs, path: &str, revision: &str) -> String {
    vcs.show_content_at_revision(path, revision)
        .unwrap_or_default()
}

/// Attach years to every change and, when `revision` is set, the content
/// each file had at that revision. A history failure aborts the whole batch.
pub fn augment_with_metadata(
    vcs: &impl Vcs,
    mut changes: Vec<FileChange>,
    revision: Option<&str>,
    clock: &impl Clock,
) -> Result<Vec<FileChange>> {
    let revision = revision.filter(|r| !r.is_empty());

    for change in changes.iter_mut() {
        let history = resolve_history(vcs, &change.path, clock)?;
        if let Some(revision) = revision {
            change.reference_content = show_content_at_revision(vcs, &change.path, revision);
        }
        change.creation_year = history.creation_year;
        change.last_edition_year = history.last_edition_year;
    }

    Ok(changes)
}

/// Files changed against `remote/branch`, committed or not, with their years
pub fn get_vcs_changes(
    vcs: &impl Vcs,
    remote: &str,
    branch: &str,
    needs_reference_content: bool,
) -> Result<Vec<FileChange>> {
    get_vcs_changes_with_clock(vcs, remote, branch, needs_reference_content, &SystemClock)
}

/// [`get_vcs_changes`] with an explicit clock
pub fn get_vcs_changes_with_clock(
    vcs: &impl Vcs,
    remote: &str,
    branch: &str,
    needs_reference_content: bool,
    clock: &impl Clock,
) -> Result<Vec<FileChange>> {
    let committed = collect_committed_changes(vcs, remote, branch)?;
    let uncommitted = collect_uncommitted_changes(vcs)?;
    let changes = merge(committed, uncommitted);

    let revision = needs_reference_content.then(|| branch_revision_symbol(remote, branch));
    augment_with_metadata(vcs, changes, revision.as_deref(), clock)
}
