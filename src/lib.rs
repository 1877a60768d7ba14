//! Headache - license header change detection
//!
//! A library for deciding which files need a license header review:
//! - Files changed on HEAD against a remote branch, plus uncommitted work
//! - Creation and last-edition years from each file's commit log
//! - Optional file content at the remote branch for header comparison

pub mod clock;
pub mod config;
pub mod git;
pub mod report;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use git::{get_vcs_changes, FileChange, FileHistory, GitCli, Vcs};
