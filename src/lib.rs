// src/lib.rs

//! pkgsentry
//!
//! The layer between a package resolver and its operator. It explains why a
//! request turned out the way it did, and it decides whether to accept
//! files and keys whose signatures or digests could not be fully verified.
//!
//! # Architecture
//!
//! - Feedback: resolver outcomes become [`FeedbackEvent`]s, rendered to text
//!   and routed to an [`OutputSink`] at a fixed severity per kind
//! - Trust: verification problems become [`TrustEvent`]s; the
//!   [`TrustEngine`] accepts, rejects, or asks through an
//!   [`InteractionGateway`]
//! - Policy: a read-only [`Policy`] snapshot is passed into every decision
//! - Faults: impossible states are reported through one path and never
//!   panic

pub mod candidate;
pub mod config;
mod error;
pub mod fault;
pub mod feedback;
pub mod output;
pub mod policy;
pub mod prompt;
pub mod report;
pub mod request;
pub mod trust;
pub mod version;

pub use candidate::{Candidate, RepoInfo, Resolvable};
pub use config::Config;
pub use error::{Error, Result};
pub use feedback::{FeedbackEvent, FeedbackKind, RequestOutcome, report_outcome};
pub use output::{ConsoleOutput, OutputSink, RecordingOutput, Severity, Verbosity};
pub use policy::Policy;
pub use prompt::{InteractionGateway, PromptId, ScriptedPrompt, TerminalPrompt};
pub use request::{Capability, RequestedItem, ResKind};
pub use trust::{Assessment, KeyIdentity, TrustEngine, TrustEvent, TrustKind};
pub use version::{Edition, VersionConstraint};
