// src/trust/mod.rs

//! Trust decisions for verification events
//!
//! The verification subsystem reports every trust-sensitive situation
//! (unsigned file, unknown key, failed signature, digest problems) as a
//! [`TrustEvent`]. [`TrustEvent::assess`] turns it into an [`Assessment`]
//! without side effects; the [`TrustEngine`] carries the assessment out.

mod engine;

pub use engine::TrustEngine;

use crate::error::{Error, Result};
use crate::output::{Severity, Verbosity};
use crate::policy::Policy;
use crate::prompt::PromptId;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Identity of a signing key
///
/// Always shown as a whole; a trust decision is never presented with only
/// part of the key identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyIdentity {
    pub id: String,
    pub name: String,
    pub fingerprint: String,
}

impl KeyIdentity {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        fingerprint: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            fingerprint: fingerprint.into(),
        }
    }
}

impl fmt::Display for KeyIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "key id {}, {}, fingerprint {}",
            self.id, self.name, self.fingerprint
        )
    }
}

/// Trust-sensitive event reported by the verification subsystem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TrustEvent {
    /// File carries no signature
    UnsignedFile { file: PathBuf },
    /// File is signed with a key that is not in any keyring
    UnknownKey { file: PathBuf, key_id: String },
    /// Key offered for import into the trusted keyring
    ImportKey { key: KeyIdentity },
    /// Key needs to be trusted before it can be used
    TrustKey { key: KeyIdentity },
    /// Signature check of a file failed
    VerificationFailed { file: PathBuf, key: KeyIdentity },
    /// No digest is available for a file
    NoDigest { file: PathBuf },
    /// Digest uses an algorithm we cannot compute
    UnknownDigest { file: PathBuf, algorithm: String },
    /// Computed digest differs from the expected one
    WrongDigest {
        file: PathBuf,
        expected: String,
        found: String,
    },
}

/// Fieldless mirror of [`TrustEvent`] used for identifiers and listings
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TrustKind {
    UnsignedFile,
    UnknownKey,
    ImportKey,
    TrustKey,
    VerificationFailed,
    NoDigest,
    UnknownDigest,
    WrongDigest,
}

impl TrustKind {
    /// Parse an event identifier coming from outside the process
    pub fn from_id(id: &str) -> Result<Self> {
        id.parse().map_err(|_| Error::UnrecognizedKind {
            family: "trust",
            kind: id.to_string(),
        })
    }

    /// Question class used when the event is put to the operator
    pub fn prompt_id(self) -> PromptId {
        match self {
            TrustKind::UnsignedFile => PromptId::GpgUnsignedFileAccept,
            TrustKind::UnknownKey => PromptId::GpgUnknownKeyAccept,
            TrustKind::ImportKey => PromptId::GpgKeyImportTrusted,
            TrustKind::TrustKey => PromptId::GpgKeyTrust,
            TrustKind::VerificationFailed => PromptId::GpgCheckFailedIgnore,
            TrustKind::NoDigest => PromptId::GpgNoDigestAccept,
            TrustKind::UnknownDigest => PromptId::GpgUnknownDigestAccept,
            TrustKind::WrongDigest => PromptId::GpgWrongDigestAccept,
        }
    }
}

/// What to do about a trust event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assessment {
    /// Accept without asking; the notice tells the operator why
    Accept { notice: String, severity: Severity },
    /// Reject without asking or telling the operator
    Reject { reason: &'static str },
    /// Put the question to the operator
    Ask {
        id: PromptId,
        question: String,
        default: bool,
    },
}

impl TrustEvent {
    pub fn kind(&self) -> TrustKind {
        match self {
            TrustEvent::UnsignedFile { .. } => TrustKind::UnsignedFile,
            TrustEvent::UnknownKey { .. } => TrustKind::UnknownKey,
            TrustEvent::ImportKey { .. } => TrustKind::ImportKey,
            TrustEvent::TrustKey { .. } => TrustKind::TrustKey,
            TrustEvent::VerificationFailed { .. } => TrustKind::VerificationFailed,
            TrustEvent::NoDigest { .. } => TrustKind::NoDigest,
            TrustEvent::UnknownDigest { .. } => TrustKind::UnknownDigest,
            TrustEvent::WrongDigest { .. } => TrustKind::WrongDigest,
        }
    }

    /// Decide how the event is resolved under `policy`
    pub fn assess(&self, policy: &Policy) -> Assessment {
        let skip_checks = policy.no_gpg_checks;
        let ask = |question: String, default: bool| Assessment::Ask {
            id: self.kind().prompt_id(),
            question,
            default,
        };

        match self {
            TrustEvent::UnsignedFile { file } => {
                if skip_checks {
                    Assessment::Accept {
                        notice: format!("Accepting an unsigned file {}.", file.display()),
                        severity: Severity::Info(Verbosity::High),
                    }
                } else {
                    ask(format!("{} is unsigned, continue?", file.display()), false)
                }
            }

            TrustEvent::ImportKey { key } => {
                if !policy.can_import_keys() {
                    Assessment::Reject {
                        reason: "only a privileged user can import keys into the system keyring",
                    }
                } else if skip_checks {
                    Assessment::Accept {
                        notice: format!("Automatically importing {} to trusted keyring.", key),
                        severity: Severity::INFO,
                    }
                } else {
                    ask(format!("Import {} to trusted keyring?", key), false)
                }
            }

            TrustEvent::UnknownKey { file, key_id } => {
                if skip_checks {
                    Assessment::Accept {
                        notice: format!(
                            "Accepting file {} signed with an unknown key {}.",
                            file.display(),
                            key_id
                        ),
                        severity: Severity::WARNING,
                    }
                } else {
                    ask(
                        format!(
                            "{} is signed with an unknown key {}. Continue?",
                            file.display(),
                            key_id
                        ),
                        false,
                    )
                }
            }

            TrustEvent::TrustKey { key } => {
                if skip_checks {
                    Assessment::Accept {
                        notice: format!("Automatically trusting {}.", key),
                        severity: Severity::INFO,
                    }
                } else {
                    ask(format!("Do you want to trust {}?", key), false)
                }
            }

            TrustEvent::VerificationFailed { file, key } => {
                if skip_checks {
                    Assessment::Accept {
                        notice: format!(
                            "Ignoring failed signature verification for {} with public {}!\n\
                             Double-check this is not caused by some malicious changes in the file!",
                            file.display(),
                            key
                        ),
                        severity: Severity::Warning(Verbosity::Quiet),
                    }
                } else {
                    ask(
                        format!(
                            "Signature verification failed for {} with public {}.\n\
                             Warning: This might be caused by a malicious change in the file!\n\
                             Continuing is risky! Continue anyway?",
                            file.display(),
                            key
                        ),
                        false,
                    )
                }
            }

            // Disabled checks only flip the default; the question is still asked
            TrustEvent::NoDigest { file } => ask(
                format!("No digest for file {}. Continue?", file.display()),
                skip_checks,
            ),

            TrustEvent::UnknownDigest { file, algorithm } => ask(
                format!(
                    "Unknown digest {} for file {}. Continue?",
                    algorithm,
                    file.display()
                ),
                skip_checks,
            ),

            TrustEvent::WrongDigest {
                file,
                expected,
                found,
            } => {
                if skip_checks {
                    Assessment::Accept {
                        notice: format!(
                            "Ignoring failed digest verification for {} (expected {}, found {}).",
                            basename(file),
                            expected,
                            found
                        ),
                        severity: Severity::Warning(Verbosity::Quiet),
                    }
                } else {
                    ask(
                        format!(
                            "Digest verification failed for {}. Expected {}, found {}. Continue?",
                            basename(file),
                            expected,
                            found
                        ),
                        false,
                    )
                }
            }
        }
    }
}

/// Last path component, or the whole path if there is none
fn basename(path: &Path) -> Cow<'_, str> {
    match path.file_name() {
        Some(name) => name.to_string_lossy(),
        None => path.to_string_lossy(),
    }
}
