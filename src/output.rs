// src/output.rs

//! Operator-facing output
//!
//! The feedback and trust layers only decide *what* to say and at which
//! [`Severity`]; an [`OutputSink`] decides how it appears. Implementations:
//! - `ConsoleOutput`: stdout/stderr with a verbosity threshold
//! - `RecordingOutput`: keeps every message in memory (tests, JSON front ends)

use serde::Serialize;
use std::fmt;
use std::io::{self, Write};
use std::sync::Mutex;
use tracing::debug;

/// Verbosity threshold a message requires to be shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    /// Shown even when the operator asked for quiet output
    Quiet,
    #[default]
    Normal,
    /// Shown only with increased verbosity
    High,
    Debug,
}

/// Severity tag attached to every emitted message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "severity", content = "level", rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning(Verbosity),
    Info(Verbosity),
    Debug,
}

impl Severity {
    pub const INFO: Severity = Severity::Info(Verbosity::Normal);
    pub const WARNING: Severity = Severity::Warning(Verbosity::Normal);

    /// Minimum sink verbosity at which the message is shown
    pub fn threshold(&self) -> Verbosity {
        match self {
            Severity::Error => Verbosity::Quiet,
            Severity::Warning(level) | Severity::Info(level) => *level,
            Severity::Debug => Verbosity::Debug,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning(Verbosity::Normal) => write!(f, "warning"),
            Severity::Warning(level) => write!(f, "warning@{:?}", level),
            Severity::Info(Verbosity::Normal) => write!(f, "info"),
            Severity::Info(level) => write!(f, "info@{:?}", level),
            Severity::Debug => write!(f, "debug"),
        }
    }
}

/// Destination for rendered operator messages
pub trait OutputSink: Send + Sync {
    fn emit(&self, text: &str, severity: Severity);
}

/// Console sink writing to stdout (info) and stderr (errors, warnings)
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleOutput {
    verbosity: Verbosity,
}

impl ConsoleOutput {
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    /// Verbosity from `-q`/`-v` counts
    pub fn from_flags(quiet: bool, verbose: u8) -> Self {
        Self::new(match (quiet, verbose) {
            (true, _) => Verbosity::Quiet,
            (false, 0) => Verbosity::Normal,
            (false, 1) => Verbosity::High,
            (false, _) => Verbosity::Debug,
        })
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    /// Text as it would be printed, or None if filtered out
    pub fn format(&self, text: &str, severity: Severity) -> Option<String> {
        if severity.threshold() > self.verbosity {
            return None;
        }
        Some(match severity {
            Severity::Error => format!("Error: {}", text),
            Severity::Warning(_) => format!("Warning: {}", text),
            Severity::Info(_) | Severity::Debug => text.to_string(),
        })
    }
}

impl OutputSink for ConsoleOutput {
    fn emit(&self, text: &str, severity: Severity) {
        let Some(line) = self.format(text, severity) else {
            return;
        };
        let written = match severity {
            Severity::Error | Severity::Warning(_) => writeln!(io::stderr(), "{}", line),
            Severity::Info(_) | Severity::Debug => writeln!(io::stdout(), "{}", line),
        };
        if let Err(e) = written {
            debug!("Dropped operator message: {}", e);
        }
    }
}

/// One message captured by [`RecordingOutput`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Emitted {
    pub text: String,
    #[serde(flatten)]
    pub severity: Severity,
}

/// Sink that records messages instead of printing them
#[derive(Debug, Default)]
pub struct RecordingOutput {
    messages: Mutex<Vec<Emitted>>,
}

impl RecordingOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far
    pub fn messages(&self) -> Vec<Emitted> {
        self.messages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Take and clear the recorded messages
    pub fn drain(&self) -> Vec<Emitted> {
        std::mem::take(
            &mut *self
                .messages
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner()),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.messages().is_empty()
    }
}

impl OutputSink for RecordingOutput {
    fn emit(&self, text: &str, severity: Severity) {
        self.messages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(Emitted {
                text: text.to_string(),
                severity,
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds() {
        assert_eq!(Severity::Error.threshold(), Verbosity::Quiet);
        assert_eq!(Severity::INFO.threshold(), Verbosity::Normal);
        assert_eq!(Severity::Info(Verbosity::High).threshold(), Verbosity::High);
        assert_eq!(Severity::Debug.threshold(), Verbosity::Debug);
    }

    #[test]
    fn test_console_filtering() {
        let quiet = ConsoleOutput::from_flags(true, 0);
        assert_eq!(quiet.format("boom", Severity::Error).as_deref(), Some("Error: boom"));
        assert_eq!(quiet.format("fyi", Severity::INFO), None);
        assert_eq!(
            quiet.format("careful", Severity::Warning(Verbosity::Quiet)).as_deref(),
            Some("Warning: careful")
        );

        let normal = ConsoleOutput::default();
        assert_eq!(normal.format("fyi", Severity::INFO).as_deref(), Some("fyi"));
        assert_eq!(normal.format("detail", Severity::Info(Verbosity::High)), None);

        let verbose = ConsoleOutput::from_flags(false, 1);
        assert_eq!(verbose.verbosity(), Verbosity::High);
        assert!(verbose.format("detail", Severity::Info(Verbosity::High)).is_some());
        assert!(verbose.format("trace", Severity::Debug).is_none());

        let chatty = ConsoleOutput::from_flags(false, 3);
        assert_eq!(chatty.verbosity(), Verbosity::Debug);
        assert_eq!(chatty.format("trace", Severity::Debug).as_deref(), Some("trace"));
    }

    #[test]
    fn test_recording_output() {
        let out = RecordingOutput::new();
        assert!(out.is_empty());

        out.emit("first", Severity::INFO);
        out.emit("second", Severity::Error);
        let messages = out.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].severity, Severity::Error);

        assert_eq!(out.drain().len(), 2);
        assert!(out.is_empty());
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::INFO.to_string(), "info");
        assert_eq!(Severity::Info(Verbosity::High).to_string(), "info@High");
        assert_eq!(Severity::Warning(Verbosity::Quiet).to_string(), "warning@Quiet");
    }
}
