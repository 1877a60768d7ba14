use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};

use headache::clock::SystemClock;
use headache::config::Config;
use headache::git::{self, FileChange, GitCli};
use headache::report;

const CONFIG_FILE: &str = "headache.toml";

#[derive(Parser)]
#[command(name = "headache")]
#[command(about = "Find files whose license headers need a review")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file (default: headache.toml at the repository root)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Repository to inspect
    #[arg(long, global = true, default_value = ".")]
    repo: PathBuf,

    /// Print progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List files changed against the remote branch with their years
    Changes {
        /// Remote holding the reference branch (overrides config)
        #[arg(long)]
        remote: Option<String>,

        /// Branch to compare HEAD against (overrides config)
        #[arg(long)]
        branch: Option<String>,

        /// Also fetch each file's content at remote/branch
        #[arg(long)]
        reference_content: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,

        /// Write a JSON report to this path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the creation and last-edition years of one file
    History {
        /// File path relative to the repository root
        path: String,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let vcs = GitCli::new(&cli.repo)?;
    let config_path = cli
        .config
        .unwrap_or_else(|| vcs.workdir().join(CONFIG_FILE));
    let config = Config::load_or_default(&config_path)
        .with_context(|| format!("Could not load {}", config_path.display()))?;

    match cli.command {
        Commands::Changes {
            remote,
            branch,
            reference_content,
            json,
            output,
        } => {
            let mut config = config;
            if let Some(remote) = remote {
                config.vcs.remote = remote;
            }
            if let Some(branch) = branch {
                config.vcs.branch = branch;
            }
            config.vcs.reference_content |= reference_content;
            config.validate()?;

            cmd_changes(&vcs, &config, cli.verbose, json, output.as_deref())
        }
        Commands::History { path } => cmd_history(&vcs, &path),
    }
}

fn cmd_changes(
    vcs: &GitCli,
    config: &Config,
    verbose: bool,
    json: bool,
    output: Option<&Path>,
) -> Result<()> {
    let settings = &config.vcs;
    let revision = git::branch_revision_symbol(&settings.remote, &settings.branch);

    if verbose {
        eprintln!(
            "{} Comparing HEAD and working tree with {}",
            "→".cyan(),
            revision.bold()
        );
    }

    let changes = git::get_vcs_changes(
        vcs,
        &settings.remote,
        &settings.branch,
        settings.reference_content,
    )?;

    if verbose {
        eprintln!("{} {} changed file(s)", "✓".green(), changes.len());
    }

    if let Some(output) = output {
        report::write_report(&changes, output)?;
        if verbose {
            eprintln!(
                "{} Report written: {}",
                "📄".cyan(),
                output.display().to_string().green()
            );
        }
    }

    if json {
        println!("{}", report::to_json(&changes)?);
    } else {
        print_changes(&changes, &revision, settings.reference_content);
    }

    Ok(())
}

fn print_changes(changes: &[FileChange], revision: &str, reference_content: bool) {
    if changes.is_empty() {
        println!("  {}", format!("No changes against {}", revision).dimmed());
        return;
    }

    for change in report::sorted_by_path(changes) {
        let years = report::year_range(change);
        if reference_content {
            let note = if change.reference_content.is_empty() {
                format!("not on {}", revision)
            } else {
                format!("{} line(s) on {}", change.reference_content.lines().count(), revision)
            };
            println!("  {} {} {}", format!("{:<9}", years).cyan(), change.path, note.dimmed());
        } else {
            println!("  {} {}", format!("{:<9}", years).cyan(), change.path);
        }
    }
}

fn cmd_history(vcs: &GitCli, path: &str) -> Result<()> {
    let history = git::resolve_history(vcs, path, &SystemClock)?;

    println!("{}", path.bold());
    println!("  {} {}", "created:".dimmed(), history.creation_year);
    println!("  {} {}", "last edited:".dimmed(), history.last_edition_year);

    Ok(())
}
