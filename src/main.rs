// src/main.rs

use anyhow::Result;
use clap::{CommandFactory, Parser};
use std::io;
use std::process::ExitCode;

mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::Session;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Operator-facing text goes through the output sink; tracing is for
    // diagnostics only, so stay quiet unless asked.
    let default_filter = match cli.global.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();

    match cli.command {
        Commands::Feedback { file } => {
            let session = Session::from_args(&cli.global)?;
            commands::cmd_feedback(&session, file.as_deref())?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Trust { file } => {
            let session = Session::from_args(&cli.global)?;
            if commands::cmd_trust(&session, file.as_deref())? {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
        Commands::Kinds => {
            commands::cmd_kinds()?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "pkgsentry", &mut io::stdout());
            Ok(ExitCode::SUCCESS)
        }
    }
}
