use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::git::FileChange;

/// Years as they appear in a header: `2019` or `2019-2021`
pub fn year_range(change: &FileChange) -> String {
    if change.creation_year == change.last_edition_year {
        change.creation_year.to_string()
    } else {
        format!("{}-{}", change.creation_year, change.last_edition_year)
    }
}

/// Changes ordered by path for display
pub fn sorted_by_path(changes: &[FileChange]) -> Vec<&FileChange> {
    let mut sorted: Vec<&FileChange> = changes.iter().collect();
    sorted.sort_by(|a, b| a.path.cmp(&b.path));
    sorted
}

/// Pretty JSON array of the changes, ordered by path
pub fn to_json(changes: &[FileChange]) -> Result<String> {
    serde_json::to_string_pretty(&sorted_by_path(changes)).context("Failed to serialize changes")
}

/// Write the JSON report to `output_path`
pub fn write_report(changes: &[FileChange], output_path: &Path) -> Result<()> {
    let json = to_json(changes)?;
    fs::write(output_path, json)
        .with_context(|| format!("Failed to write report: {}", output_path.display()))?;
    Ok(())
}
