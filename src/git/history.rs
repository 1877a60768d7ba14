//! Creation and last-edition years of a file

use anyhow::{Context, Result};

use super::vcs::Vcs;
use crate::clock::{year_of_timestamp, Clock};

/// Years derived from a file's commit log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHistory {
    pub creation_year: i32,
    pub last_edition_year: i32,
}

/// Resolve the years of `path` from its commit timestamps.
///
/// Both years fall back to the clock's current year. The oldest commit sets
/// the creation year; the newest sets the last-edition year only when there
/// are at least two commits, so a single-commit file keeps the current year
/// as its last-edition year.
pub fn resolve_history(vcs: &impl Vcs, path: &str, clock: &impl Clock) -> Result<FileHistory> {
    let output = vcs
        .log(&["--format=%at", "--", path])
        .with_context(|| format!("Failed to read history of {}", path))?;

    // The log ends with a newline, leaving one empty trailing entry
    let mut lines: Vec<&str> = output.split('\n').collect();
    if lines.last() == Some(&"") {
        lines.pop();
    }

    let default_year = clock.current_year();
    let mut history = FileHistory {
        creation_year: default_year,
        last_edition_year: default_year,
    };

    if let Some(oldest) = lines.last() {
        history.creation_year = parse_year(oldest, path)?;
    }
    if lines.len() > 1 {
        history.last_edition_year = parse_year(lines[0], path)?;
    }

    Ok(history)
}

fn parse_year(line: &str, path: &str) -> Result<i32> {
    let timestamp: i64 = line
        .trim()
        .parse()
        .with_context(|| format!("Invalid commit timestamp {:?} in history of {}", line, path))?;
    year_of_timestamp(timestamp)
}
