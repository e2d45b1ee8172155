// src/report.rs

//! Event records read by the command-line front end
//!
//! Both record streams are JSON lines. Blank lines and lines starting with
//! `#` are skipped.
//!
//! ```text
//! {"kind": "already_installed", "request": "vim", "installed": {...}}
//! {"kind": "unknown_key", "file": "repomd.xml", "key_id": "DEADBEEF"}
//! ```

use crate::candidate::Candidate;
use crate::error::Result;
use crate::fault::report_internal_fault;
use crate::feedback::{self, FeedbackKind, RequestOutcome};
use crate::output::OutputSink;
use crate::policy::Policy;
use crate::request::{RequestedItem, ResKind};
use crate::trust::{TrustEngine, TrustEvent, TrustKind};
use serde::Deserialize;
use std::io::BufRead;
use tracing::debug;

/// Non-empty, non-comment lines of a record stream
///
/// Each line comes with its 1-based number in the stream, counting the
/// skipped lines too.
pub fn record_lines<R: BufRead>(
    reader: R,
) -> impl Iterator<Item = (usize, std::io::Result<String>)> {
    reader
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line))
        .filter(|(_, line)| match line {
            Ok(text) => {
                let text = text.trim();
                !text.is_empty() && !text.starts_with('#')
            }
            Err(_) => true,
        })
}

/// One request outcome as it arrives from the resolver
#[derive(Debug, Clone, Deserialize)]
pub struct OutcomeRecord {
    /// Feedback kind id, e.g. `already_installed`
    pub kind: String,
    /// The request exactly as the operator typed it
    pub request: String,
    /// Kind chosen apart from the typed text (`--type product foo`)
    #[serde(default)]
    pub request_kind: Option<ResKind>,
    /// Repository the request was restricted to
    #[serde(default)]
    pub repository: Option<String>,
    #[serde(default)]
    pub installed: Option<Candidate>,
    #[serde(default)]
    pub selected: Option<Candidate>,
    #[serde(default)]
    pub candidate: Option<Candidate>,
}

impl OutcomeRecord {
    pub fn parse(line: &str) -> Result<Self> {
        Ok(serde_json::from_str(line)?)
    }

    /// Classify and emit the outcome
    ///
    /// Unknown kinds and missing candidates go down the internal fault
    /// path. Only a malformed request string is returned as an error.
    pub fn report(&self, policy: &Policy, out: &dyn OutputSink) -> Result<()> {
        let kind = match FeedbackKind::from_id(&self.kind) {
            Ok(kind) => kind,
            Err(e) => {
                report_internal_fault(out, &e);
                return Ok(());
            }
        };

        let mut requested = match self.request_kind {
            Some(kind) => RequestedItem::with_kind(&self.request, kind)?,
            None => RequestedItem::parse(&self.request)?,
        };
        if let Some(ref alias) = self.repository {
            requested = requested.with_repository(alias.clone());
        }

        let mut outcome = RequestOutcome::new(kind, &requested);
        if let Some(ref installed) = self.installed {
            outcome = outcome.with_installed(installed);
        }
        if let Some(ref selected) = self.selected {
            outcome = outcome.with_selected(selected);
        }
        if let Some(ref candidate) = self.candidate {
            outcome = outcome.with_candidate(candidate);
        }

        debug!(kind = %kind, request = %self.request, "reporting outcome");
        feedback::report_outcome(&outcome, policy, out);
        Ok(())
    }
}

/// Decide one trust record
///
/// An unknown `kind` is an internal fault and resolves to reject. A known
/// kind with missing or malformed fields is returned as an error.
pub fn decide_trust_record(line: &str, engine: &TrustEngine<'_>) -> Result<bool> {
    let value: serde_json::Value = serde_json::from_str(line)?;
    let kind = value
        .get("kind")
        .and_then(|kind| kind.as_str())
        .unwrap_or_default();
    if let Err(e) = TrustKind::from_id(kind) {
        return Ok(engine.reject_fault(&e));
    }
    let event: TrustEvent = serde_json::from_value(value)?;
    Ok(engine.decide(&event))
}
