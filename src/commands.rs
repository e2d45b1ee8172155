// src/commands.rs
//! Command handlers for the pkgsentry CLI

use anyhow::{Context, Result};
use pkgsentry::config::Config;
use pkgsentry::feedback::FeedbackKind;
use pkgsentry::output::{ConsoleOutput, OutputSink, Severity};
use pkgsentry::policy::Policy;
use pkgsentry::prompt::TerminalPrompt;
use pkgsentry::report::{self, OutcomeRecord};
use pkgsentry::trust::{TrustEngine, TrustKind};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use strum::IntoEnumIterator;
use tracing::{debug, info};

use crate::cli::GlobalArgs;

/// Everything a command needs to classify and decide
pub struct Session {
    pub policy: Policy,
    pub prompt: TerminalPrompt,
    pub out: ConsoleOutput,
}

impl Session {
    /// Combine the configuration file with the command-line flags
    pub fn from_args(global: &GlobalArgs) -> Result<Self> {
        let config = Config::discover(global.config.as_deref())?;

        let mut policy = config.apply_to(Policy::detect());
        if global.no_gpg_checks {
            policy = policy.with_no_gpg_checks(true);
        }
        if global.show_alias {
            policy = policy.with_show_alias(true);
        }
        if !global.from_repos.is_empty() {
            policy = policy.with_from_repos(global.from_repos.clone());
        }
        if let Some(ref root) = global.root {
            policy = policy.with_root(root);
        }

        let prompt = TerminalPrompt::detect()
            .non_interactive(global.non_interactive || config.prompts.non_interactive)
            .with_presets(config.prompt_presets()?);

        debug!("Effective policy: {:?}", policy);
        Ok(Self {
            policy,
            prompt,
            out: ConsoleOutput::from_flags(global.quiet, global.verbose),
        })
    }
}

/// Open a record stream; `None` or `-` means stdin
fn open_records(file: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match file {
        Some(path) if path != Path::new("-") => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open records: {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        _ => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

fn reads_stdin(file: Option<&Path>) -> bool {
    file.is_none_or(|path| path == Path::new("-"))
}

/// Explain every outcome record
///
/// Malformed records are reported with their line number and skipped.
pub fn cmd_feedback(session: &Session, file: Option<&Path>) -> Result<()> {
    let mut count = 0usize;
    for (number, line) in report::record_lines(open_records(file)?) {
        let line = line.context("Failed to read outcome records")?;
        let result = OutcomeRecord::parse(&line)
            .and_then(|record| record.report(&session.policy, &session.out));
        match result {
            Ok(()) => count += 1,
            Err(e) => report_bad_record(&session.out, number, &e),
        }
    }
    info!("Reported {} outcome(s)", count);
    Ok(())
}

/// Decide every trust record and print the verdicts
///
/// Returns whether every event was accepted. Malformed records count as
/// rejected.
pub fn cmd_trust(session: &Session, file: Option<&Path>) -> Result<bool> {
    // Records and answers cannot share stdin
    let prompt = session.prompt.clone().non_interactive(reads_stdin(file));
    let engine = TrustEngine::new(&session.policy, &prompt, &session.out);
    let mut stdout = io::stdout().lock();

    let mut all_accepted = true;
    for (number, line) in report::record_lines(open_records(file)?) {
        let line = line.context("Failed to read trust records")?;
        let accepted = match report::decide_trust_record(&line, &engine) {
            Ok(accepted) => accepted,
            Err(e) => {
                report_bad_record(&session.out, number, &e);
                false
            }
        };
        writeln!(stdout, "{}", if accepted { "accepted" } else { "rejected" })
            .context("Failed to write verdict")?;
        all_accepted &= accepted;
    }
    Ok(all_accepted)
}

/// List feedback kinds with severities and trust kinds with prompt ids
pub fn cmd_kinds() -> Result<()> {
    write_kinds(&mut io::stdout().lock()).context("Failed to write kinds")
}

fn write_kinds<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Feedback kinds:")?;
    for kind in FeedbackKind::iter() {
        writeln!(out, "  {:<32} {}", kind, kind.severity())?;
    }
    writeln!(out)?;
    writeln!(out, "Trust kinds:")?;
    for kind in TrustKind::iter() {
        writeln!(out, "  {:<32} {}", kind, kind.prompt_id())?;
    }
    Ok(())
}

fn report_bad_record(out: &dyn OutputSink, number: usize, err: &pkgsentry::Error) {
    out.emit(&format!("Line {}: {}", number, err), Severity::Error);
}
