//! Version-control queries
//!
//! The rest of the crate only sees raw text coming back from four queries,
//! so tests can swap the real repository for canned output.

use anyhow::{bail, Context, Result};
use git2::Repository;
use std::path::{Path, PathBuf};
use std::process::Command;

/// The four queries the change pipeline needs from a version-control system
pub trait Vcs {
    /// Working-tree status, e.g. `["--porcelain"]`
    fn status(&self, args: &[&str]) -> Result<String>;

    /// Changes between revisions, e.g. `["--name-status", "origin/main..HEAD"]`
    fn diff(&self, args: &[&str]) -> Result<String>;

    /// Commit log, e.g. `["--format=%at", "--", "src/lib.rs"]`
    fn log(&self, args: &[&str]) -> Result<String>;

    /// Full content of `path` as it was at `revision`
    fn show_content_at_revision(&self, path: &str, revision: &str) -> Result<String>;
}

/// Git-backed [`Vcs`]: queries run the `git` binary in the working tree,
/// historical content is read through libgit2.
pub struct GitCli {
    repo: Repository,
    workdir: PathBuf,
}

impl GitCli {
    /// Open the repository containing `path`
    pub fn new(path: &Path) -> Result<Self> {
        let repo = Repository::discover(path)
            .with_context(|| format!("Failed to find git repository at {}", path.display()))?;

        let workdir = match repo.workdir() {
            Some(dir) => dir.to_path_buf(),
            None => bail!("Repository at {} has no working tree", path.display()),
        };

        Ok(Self { repo, workdir })
    }

    /// Root of the working tree
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn run(&self, subcommand: &str, args: &[&str]) -> Result<String> {
        let output = Command::new("git")
            .arg(subcommand)
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .with_context(|| format!("Failed to run git {}", subcommand))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "git {} {} exited with {}: {}",
                subcommand,
                args.join(" "),
                output.status,
                stderr.trim()
            );
        }

        String::from_utf8(output.stdout)
            .with_context(|| format!("git {} produced non-UTF-8 output", subcommand))
    }
}

impl Vcs for GitCli {
    fn status(&self, args: &[&str]) -> Result<String> {
        self.run("status", args)
    }

    fn diff(&self, args: &[&str]) -> Result<String> {
        self.run("diff", args)
    }

    fn log(&self, args: &[&str]) -> Result<String> {
        self.run("log", args)
    }

    fn show_content_at_revision(&self, path: &str, revision: &str) -> Result<String> {
        let revspec = format!("{}:{}", revision, path);
        let blob = self
            .repo
            .revparse_single(&revspec)
            .and_then(|object| object.peel_to_blob())
            .with_context(|| format!("Failed to resolve {}", revspec))?;

        if blob.is_binary() {
            bail!("{} is a binary file", revspec);
        }

        let content = std::str::from_utf8(blob.content())
            .with_context(|| format!("{} is not valid UTF-8", revspec))?;

        Ok(content.to_string())
    }
}
