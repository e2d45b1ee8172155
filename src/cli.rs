// src/cli.rs
//! CLI definitions for pkgsentry
//!
//! The actual command implementations are in the `commands` module.

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pkgsentry")]
#[command(author = "pkgsentry Contributors")]
#[command(version)]
#[command(
    about = "Explain resolver outcomes and decide trust questions for a package manager",
    long_about = None
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Flags shared by every subcommand
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Configuration file (default: $PKGSENTRY_CONFIG, then the user config dir)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Accept verification problems without asking where possible
    #[arg(long, global = true)]
    pub no_gpg_checks: bool,

    /// Never wait for an answer; use the default of every question
    #[arg(long, global = true)]
    pub non_interactive: bool,

    /// Show repository aliases instead of names
    #[arg(long, global = true)]
    pub show_alias: bool,

    /// Operate on a system installed below DIR
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Restrict the operation to a repository (repeatable)
    #[arg(long = "from-repo", global = true, value_name = "REPO")]
    pub from_repos: Vec<String>,

    /// More output (repeat for debug output)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only errors and important warnings
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Explain request outcomes read as JSON lines
    Feedback {
        /// Record file (default: stdin)
        file: Option<PathBuf>,
    },

    /// Decide trust events read as JSON lines
    Trust {
        /// Record file (default: stdin)
        file: Option<PathBuf>,
    },

    /// List known feedback and trust kinds
    Kinds,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "pkgsentry",
            "trust",
            "events.jsonl",
            "--no-gpg-checks",
            "--from-repo",
            "oss",
            "--from-repo",
            "update",
            "-vv",
        ])
        .unwrap();

        assert!(cli.global.no_gpg_checks);
        assert_eq!(cli.global.from_repos, vec!["oss", "update"]);
        assert_eq!(cli.global.verbose, 2);
        match cli.command {
            Commands::Trust { file } => assert_eq!(file, Some(PathBuf::from("events.jsonl"))),
            _ => panic!("expected trust command"),
        }
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["pkgsentry", "-q", "-v", "kinds"]).is_err());
    }
}
