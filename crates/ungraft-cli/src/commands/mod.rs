//! Command-line interface definition.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use clap_complete::Shell;

pub mod completions;
pub mod ungraft;

/// Investigates all commits marked as grafted and removes those who
/// actually have their parents present.
#[derive(Debug, Parser)]
#[command(name = "git-ungraft", version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub args: UngraftArgs,
}

/// Options for the ungraft run.
#[derive(Debug, Args)]
pub struct UngraftArgs {
    /// Do not do anything, just show what would be done.
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Path to the repository.
    #[arg(short = 'C', long, value_name = "PATH", default_value = ".")]
    pub git_dir: PathBuf,

    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,

    /// Only print the ungrafted commits.
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: Shell,
    },
}
