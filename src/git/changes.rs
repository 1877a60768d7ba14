//! Collection of the files changed against a remote branch

use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::collections::HashSet;

use super::vcs::Vcs;

/// A file whose license header may need attention
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileChange {
    pub path: String,
    pub creation_year: i32,
    pub last_edition_year: i32,
    /// Content at the reference revision, empty when not requested or unavailable
    pub reference_content: String,
}

impl FileChange {
    /// A bare change carrying only its path
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }
}

/// `<remote>/<branch>`, the revision used for diffing and reference content
pub fn branch_revision_symbol(remote: &str, branch: &str) -> String {
    format!("{}/{}", remote, branch)
}

/// Files changed by commits on HEAD that are not on `remote/branch`
pub fn collect_committed_changes(vcs: &impl Vcs, remote: &str, branch: &str) -> Result<Vec<FileChange>> {
    let revisions = format!("{}..HEAD", branch_revision_symbol(remote, branch));
    let output = vcs
        .diff(&["--name-status", revisions.as_str()])
        .with_context(|| format!("Failed to diff {}", revisions))?;

    let mut changes = Vec::new();
    for line in output.lines() {
        if line.trim().is_empty() {
            continue;
        }
        if let Some(path) = parse_name_status_line(line)? {
            changes.push(FileChange::new(path));
        }
    }

    Ok(changes)
}

/// Files changed, staged or untracked in the working tree
pub fn collect_uncommitted_changes(vcs: &impl Vcs) -> Result<Vec<FileChange>> {
    let output = vcs
        .status(&["--porcelain"])
        .context("Failed to read working tree status")?;

    let mut changes = Vec::new();
    for line in output.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(path) = parse_porcelain_line(line)? {
            changes.push(FileChange::new(path));
        }
    }

    Ok(changes)
}

/// Path kept from a `--name-status` line, `None` for deletions
fn parse_name_status_line(line: &str) -> Result<Option<&str>> {
    let fields: Vec<&str> = line.split('\t').collect();
    let status = fields[0].trim();

    if status == "D" {
        return Ok(None);
    }

    let path = if status.starts_with('R') {
        match fields.get(2) {
            Some(new_path) => *new_path,
            None => bail!("Malformed rename in diff output: {:?}", line),
        }
    } else {
        // Copies list source and destination, the destination comes last
        match fields.last() {
            Some(path) if fields.len() >= 2 => *path,
            _ => bail!("Missing path in diff output: {:?}", line),
        }
    };

    Ok(Some(path.trim()))
}

/// Path kept from a trimmed `--porcelain` line, `None` when a `D` flag is set
fn parse_porcelain_line(line: &str) -> Result<Option<&str>> {
    let (flags, path) = match line.split_once(' ') {
        Some(parts) => parts,
        None => bail!("Missing path in status output: {:?}", line),
    };

    if flags.contains('D') {
        return Ok(None);
    }

    let path = path.trim();
    // Staged renames read `old -> new`
    if flags.contains('R') {
        if let Some((_, new_path)) = path.split_once(" -> ") {
            return Ok(Some(new_path.trim()));
        }
    }

    Ok(Some(path))
}

/// Union of both lists with each path kept once, in first-seen order
pub fn merge(changes: Vec<FileChange>, other: Vec<FileChange>) -> Vec<FileChange> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut merged = Vec::with_capacity(changes.len() + other.len());

    for change in changes.into_iter().chain(other) {
        if seen.insert(change.path.clone()) {
            merged.push(change);
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::fake::FakeVcs;

    fn paths(changes: &[FileChange]) -> Vec<&str> {
        changes.iter().map(|c| c.path.as_str()).collect()
    }

    #[test]
    fn test_committed_changes_query_range() {
        let vcs = FakeVcs::new();
        collect_committed_changes(&vcs, "upstream", "develop").unwrap();

        assert_eq!(
            vcs.calls.borrow().as_slice(),
            ["diff --name-status upstream/develop..HEAD"]
        );
    }

    #[test]
    fn test_committed_changes_status_policy() {
        let vcs = FakeVcs::new()
            .with_diff("D\tfoo.go\nR100\told.go\tnew.go\nM\tbar.go\nA\t baz.go \n\n");

        let changes = collect_committed_changes(&vcs, "origin", "main").unwrap();
        assert_eq!(paths(&changes), ["new.go", "bar.go", "baz.go"]);
        assert!(changes.iter().all(|c| c.creation_year == 0 && c.reference_content.is_empty()));
    }

    #[test]
    fn test_committed_changes_keep_duplicates() {
        let vcs = FakeVcs::new().with_diff("M\ta.txt\nR090\tb.txt\ta.txt\n");

        let changes = collect_committed_changes(&vcs, "origin", "main").unwrap();
        assert_eq!(paths(&changes), ["a.txt", "a.txt"]);
    }

    #[test]
    fn test_committed_changes_copy_keeps_destination() {
        let vcs = FakeVcs::new().with_diff("C075\tsrc/a.rs\tsrc/b.rs\n");

        let changes = collect_committed_changes(&vcs, "origin", "main").unwrap();
        assert_eq!(paths(&changes), ["src/b.rs"]);
    }

    #[test]
    fn test_committed_changes_malformed_rename() {
        let vcs = FakeVcs::new().with_diff("R100\told.go\n");
        assert!(collect_committed_changes(&vcs, "origin", "main").is_err());
    }

    #[test]
    fn test_committed_changes_query_failure() {
        let vcs = FakeVcs::new().failing_diff();
        assert!(collect_committed_changes(&vcs, "origin", "main").is_err());
    }

    #[test]
    fn test_uncommitted_changes() {
        let vcs = FakeVcs::new().with_status(" M foo.go\nD  gone.go\n?? c.txt\nAD staged.go\n");

        let changes = collect_uncommitted_changes(&vcs).unwrap();
        assert_eq!(paths(&changes), ["foo.go", "c.txt"]);
        assert_eq!(vcs.calls.borrow().as_slice(), ["status --porcelain"]);
    }

    #[test]
    fn test_uncommitted_changes_empty_output() {
        let vcs = FakeVcs::new().with_status("");
        assert!(collect_uncommitted_changes(&vcs).unwrap().is_empty());
    }

    #[test]
    fn test_uncommitted_rename_resolves_new_path() {
        let vcs = FakeVcs::new().with_status("R  old.go -> new.go\n");

        let changes = collect_uncommitted_changes(&vcs).unwrap();
        assert_eq!(paths(&changes), ["new.go"]);
    }

    #[test]
    fn test_uncommitted_changes_query_failure() {
        let vcs = FakeVcs::new().failing_status();
        assert!(collect_uncommitted_changes(&vcs).is_err());
    }

    #[test]
    fn test_merge_deduplicates_by_path() {
        let a = vec![FileChange::new("a"), FileChange::new("b"), FileChange::new("a")];
        let b = vec![FileChange::new("c"), FileChange::new("b"), FileChange::new("c")];

        let mut merged = paths(&merge(a, b)).into_iter().map(String::from).collect::<Vec<_>>();
        merged.sort();
        assert_eq!(merged, ["a", "b", "c"]);
    }

    #[test]
    fn test_merge_ignores_other_fields() {
        let mut augmented = FileChange::new("a");
        augmented.creation_year = 2019;

        let merged = merge(vec![augmented], vec![FileChange::new("a")]);
        assert_eq!(merged.len(), 1);
    }

    #[test]
    fn test_merge_empty_inputs() {
        assert!(merge(Vec::new(), Vec::new()).is_empty());
    }

    #[test]
    fn test_branch_revision_symbol() {
        assert_eq!(branch_revision_symbol("origin", "main"), "origin/main");
    }
}
