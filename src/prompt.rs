// src/prompt.rs

//! Yes/no questions put to the operator
//!
//! The trust engine never reads the terminal itself; it goes through an
//! [`InteractionGateway`]. `TerminalPrompt` is the real one, `ScriptedPrompt`
//! answers from a script and records every question it was asked.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::io::{self, BufRead, IsTerminal, Write};
use std::sync::Mutex;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};
use tracing::{debug, warn};

/// Stable identifier of a question class
///
/// Used to look up preset answers and by anything upstream that remembers
/// answers. The string forms are part of the configuration format.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PromptId {
    GpgUnsignedFileAccept,
    GpgKeyImportTrusted,
    GpgUnknownKeyAccept,
    GpgKeyTrust,
    GpgCheckFailedIgnore,
    GpgNoDigestAccept,
    GpgUnknownDigestAccept,
    GpgWrongDigestAccept,
}

/// Something that can answer a yes/no question
pub trait InteractionGateway: Send + Sync {
    /// Ask `question`; `default` is used when nobody can answer
    fn ask(&self, id: PromptId, question: &str, default: bool) -> bool;
}

/// How many unparseable answers are tolerated before using the default
const MAX_ATTEMPTS: usize = 5;

/// Gateway reading answers from the controlling terminal
#[derive(Debug, Clone, Default)]
pub struct TerminalPrompt {
    non_interactive: bool,
    presets: HashMap<PromptId, bool>,
}

impl TerminalPrompt {
    pub fn new(non_interactive: bool) -> Self {
        Self {
            non_interactive,
            presets: HashMap::new(),
        }
    }

    /// Non-interactive unless stdin is a terminal
    pub fn detect() -> Self {
        Self::new(!io::stdin().is_terminal())
    }

    /// Force non-interactive mode regardless of the terminal
    pub fn non_interactive(mut self, non_interactive: bool) -> Self {
        self.non_interactive |= non_interactive;
        self
    }

    /// Preset answers that are used without asking
    pub fn with_presets(mut self, presets: HashMap<PromptId, bool>) -> Self {
        self.presets = presets;
        self
    }

    pub fn is_interactive(&self) -> bool {
        !self.non_interactive
    }

    /// Ask on the given streams
    ///
    /// Returns the default on end of input or after too many answers that
    /// are neither yes nor no.
    pub fn ask_on<R: BufRead, W: Write>(
        &self,
        input: &mut R,
        output: &mut W,
        id: PromptId,
        question: &str,
        default: bool,
    ) -> io::Result<bool> {
        let hint = if default { "Y/n" } else { "y/N" };

        if let Some(&preset) = self.presets.get(&id) {
            debug!("Answering '{}' from preset: {}", id, preset);
            writeln!(output, "{} [{}]: {}", question, hint, yes_no(preset))?;
            return Ok(preset);
        }

        if self.non_interactive {
            debug!("Answering '{}' with default: {}", id, default);
            writeln!(output, "{} [{}]: {}", question, hint, yes_no(default))?;
            return Ok(default);
        }

        for _ in 0..MAX_ATTEMPTS {
            write!(output, "{} [{}]: ", question, hint)?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                writeln!(output)?;
                return Ok(default);
            }

            match parse_answer(&line) {
                Some(answer) => return Ok(answer.unwrap_or(default)),
                None => writeln!(output, "Invalid answer '{}'. Please enter y or n.", line.trim())?,
            }
        }

        Ok(default)
    }
}

impl InteractionGateway for TerminalPrompt {
    fn ask(&self, id: PromptId, question: &str, default: bool) -> bool {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut output = io::stdout();
        match self.ask_on(&mut input, &mut output, id, question, default) {
            Ok(answer) => answer,
            Err(e) => {
                warn!("Failed to read answer for '{}', using default: {}", id, e);
                default
            }
        }
    }
}

fn yes_no(answer: bool) -> &'static str {
    if answer { "yes" } else { "no" }
}

/// Parse a typed answer
///
/// `Some(None)` means an empty line (take the default), `None` means the
/// text was not understood.
fn parse_answer(line: &str) -> Option<Option<bool>> {
    match line.trim().to_lowercase().as_str() {
        "" => Some(None),
        "y" | "yes" => Some(Some(true)),
        "n" | "no" => Some(Some(false)),
        _ => None,
    }
}

/// A question as seen by [`ScriptedPrompt`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AskedQuestion {
    pub id: PromptId,
    pub question: String,
    pub default: bool,
}

/// Gateway answering from a script
///
/// Scripted answers are consumed in order; once exhausted the fallback is
/// used (a fixed answer, or the question's default).
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: Mutex<VecDeque<bool>>,
    fallback: Option<bool>,
    asked: Mutex<Vec<AskedQuestion>>,
}

impl ScriptedPrompt {
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            ..Self::default()
        }
    }

    /// Always give the same answer
    pub fn always(answer: bool) -> Self {
        Self {
            fallback: Some(answer),
            ..Self::default()
        }
    }

    /// Always take the suggested default
    pub fn defaults() -> Self {
        Self::default()
    }

    /// Every question asked so far
    pub fn asked(&self) -> Vec<AskedQuestion> {
        self.asked
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.asked().len()
    }
}

impl InteractionGateway for ScriptedPrompt {
    fn ask(&self, id: PromptId, question: &str, default: bool) -> bool {
        self.asked
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(AskedQuestion {
                id,
                question: question.to_string(),
                default,
            });

        let scripted = self
            .answers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front();
        scripted.or(self.fallback).unwrap_or(default)
    }
}
