// src/feedback/mod.rs

//! Request feedback classification
//!
//! Every outcome the resolver reports for an operator request is mapped to
//! one [`FeedbackEvent`]. Each event kind has exactly one rendering rule
//! (see `render.rs`) and exactly one severity, which depends on the kind
//! alone.
//!
//! # Flow
//!
//! ```text
//! RequestOutcome --from_outcome--> FeedbackEvent --render--> text
//!                                        |
//!                                        +--kind().severity()--> OutputSink
//! ```

mod render;

use crate::candidate::Resolvable;
use crate::error::{Error, Result};
use crate::fault::report_internal_fault;
use crate::output::{OutputSink, Severity, Verbosity};
use crate::policy::Policy;
use crate::request::RequestedItem;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};
use tracing::debug;

/// Closed set of request feedback kinds
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
pub enum FeedbackKind {
    /// Literal name lookup failed, falling back to capabilities
    NameLookupFallback,
    NameNotFound,
    CapabilityNotFound,
    NotInstalled,
    NoInstalledProvider,
    AlreadyInstalled,
    NoUpdateCandidate,
    /// Update exists but does not match the requested version/arch/repo
    UpdateCandidateRestricted,
    UpdateCandidateVendorChange,
    UpdateCandidateLowerPriority,
    UpdateCandidateLocked,
    /// Selected object is older than the installed one
    SelectedIsOlder,
    PatchInteractiveSkipped,
    PatchNotNeeded,
    SetToInstall,
    SetToRemove,
    RequirementAdded,
    ConflictAdded,
    ForcedInstall,
}

impl FeedbackKind {
    /// Parse an outcome identifier coming from outside the process
    pub fn from_id(id: &str) -> Result<Self> {
        id.parse().map_err(|_| Error::UnrecognizedKind {
            family: "feedback",
            kind: id.to_string(),
        })
    }

    /// Severity the event is emitted at
    pub fn severity(self) -> Severity {
        match self {
            FeedbackKind::NameNotFound | FeedbackKind::CapabilityNotFound => Severity::Error,
            FeedbackKind::NameLookupFallback
            | FeedbackKind::NotInstalled
            | FeedbackKind::NoInstalledProvider
            | FeedbackKind::AlreadyInstalled
            | FeedbackKind::NoUpdateCandidate
            | FeedbackKind::UpdateCandidateRestricted
            | FeedbackKind::UpdateCandidateVendorChange
            | FeedbackKind::UpdateCandidateLowerPriority
            | FeedbackKind::UpdateCandidateLocked
            | FeedbackKind::SelectedIsOlder
            | FeedbackKind::PatchNotNeeded
            | FeedbackKind::ForcedInstall => Severity::INFO,
            FeedbackKind::SetToInstall
            | FeedbackKind::SetToRemove
            | FeedbackKind::RequirementAdded
            | FeedbackKind::ConflictAdded => Severity::Info(Verbosity::High),
            FeedbackKind::PatchInteractiveSkipped => Severity::WARNING,
        }
    }
}

/// A classified request outcome carrying exactly what its message needs
#[derive(Debug, Clone, Copy)]
pub enum FeedbackEvent<'a> {
    NameLookupFallback {
        requested: &'a RequestedItem,
    },
    NameNotFound {
        requested: &'a RequestedItem,
    },
    CapabilityNotFound {
        requested: &'a RequestedItem,
    },
    NotInstalled {
        requested: &'a RequestedItem,
    },
    NoInstalledProvider {
        requested: &'a RequestedItem,
    },
    AlreadyInstalled {
        requested: &'a RequestedItem,
        installed: &'a dyn Resolvable,
    },
    NoUpdateCandidate {
        installed: &'a dyn Resolvable,
        /// Highest available version, if any exists at all
        highest: Option<&'a dyn Resolvable>,
    },
    UpdateCandidateRestricted {
        installed: &'a dyn Resolvable,
        candidate: &'a dyn Resolvable,
    },
    UpdateCandidateVendorChange {
        installed: &'a dyn Resolvable,
        candidate: &'a dyn Resolvable,
    },
    UpdateCandidateLowerPriority {
        installed: &'a dyn Resolvable,
        candidate: &'a dyn Resolvable,
    },
    UpdateCandidateLocked {
        installed: &'a dyn Resolvable,
        candidate: &'a dyn Resolvable,
    },
    SelectedIsOlder {
        selected: &'a dyn Resolvable,
    },
    PatchInteractiveSkipped {
        patch: &'a dyn Resolvable,
    },
    PatchNotNeeded {
        patch: &'a dyn Resolvable,
    },
    SetToInstall {
        selected: &'a dyn Resolvable,
    },
    SetToRemove {
        selected: &'a dyn Resolvable,
    },
    RequirementAdded {
        requested: &'a RequestedItem,
    },
    ConflictAdded {
        requested: &'a RequestedItem,
    },
    ForcedInstall {
        selected: &'a dyn Resolvable,
    },
}

/// Outcome notification as delivered by the resolver
///
/// The resolver fills in whichever candidates it has; the mapper picks the
/// ones the kind needs.
#[derive(Debug, Clone, Copy)]
pub struct RequestOutcome<'a> {
    pub kind: FeedbackKind,
    pub requested: &'a RequestedItem,
    /// Installed object the request concerns
    pub installed: Option<&'a dyn Resolvable>,
    /// Object selected for the transaction
    pub selected: Option<&'a dyn Resolvable>,
    /// Highest available version (the update candidate)
    pub candidate: Option<&'a dyn Resolvable>,
}

impl<'a> RequestOutcome<'a> {
    pub fn new(kind: FeedbackKind, requested: &'a RequestedItem) -> Self {
        Self {
            kind,
            requested,
            installed: None,
            selected: None,
            candidate: None,
        }
    }

    pub fn with_installed(mut self, installed: &'a dyn Resolvable) -> Self {
        self.installed = Some(installed);
        self
    }

    pub fn with_selected(mut self, selected: &'a dyn Resolvable) -> Self {
        self.selected = Some(selected);
        self
    }

    pub fn with_candidate(mut self, candidate: &'a dyn Resolvable) -> Self {
        self.candidate = Some(candidate);
        self
    }
}

impl<'a> FeedbackEvent<'a> {
    /// Map a resolver outcome to its event
    ///
    /// Fails only when the outcome lacks a candidate its kind requires,
    /// which is a bug in the resolver glue.
    pub fn from_outcome(outcome: &RequestOutcome<'a>) -> Result<Self> {
        let requested = outcome.requested;
        let need = |slot: Option<&'a dyn Resolvable>, role: &'static str| {
            slot.ok_or_else(|| Error::MissingCandidate {
                kind: outcome.kind.to_string(),
                role,
            })
        };
        let installed = || need(outcome.installed, "installed");
        let selected = || need(outcome.selected, "selected");
        let candidate = || need(outcome.candidate, "update");

        Ok(match outcome.kind {
            FeedbackKind::NameLookupFallback => FeedbackEvent::NameLookupFallback { requested },
            FeedbackKind::NameNotFound => FeedbackEvent::NameNotFound { requested },
            FeedbackKind::CapabilityNotFound => FeedbackEvent::CapabilityNotFound { requested },
            FeedbackKind::NotInstalled => FeedbackEvent::NotInstalled { requested },
            FeedbackKind::NoInstalledProvider => FeedbackEvent::NoInstalledProvider { requested },
            FeedbackKind::AlreadyInstalled => FeedbackEvent::AlreadyInstalled {
                requested,
                installed: installed()?,
            },
            FeedbackKind::NoUpdateCandidate => FeedbackEvent::NoUpdateCandidate {
                installed: installed()?,
                highest: outcome.candidate,
            },
            FeedbackKind::UpdateCandidateRestricted => FeedbackEvent::UpdateCandidateRestricted {
                installed: installed()?,
                candidate: candidate()?,
            },
            FeedbackKind::UpdateCandidateVendorChange => {
                FeedbackEvent::UpdateCandidateVendorChange {
                    installed: installed()?,
                    candidate: candidate()?,
                }
            }
            FeedbackKind::UpdateCandidateLowerPriority => {
                FeedbackEvent::UpdateCandidateLowerPriority {
                    installed: installed()?,
                    candidate: candidate()?,
                }
            }
            FeedbackKind::UpdateCandidateLocked => FeedbackEvent::UpdateCandidateLocked {
                installed: installed()?,
                candidate: candidate()?,
            },
            FeedbackKind::SelectedIsOlder => FeedbackEvent::SelectedIsOlder {
                selected: selected()?,
            },
            FeedbackKind::PatchInteractiveSkipped => FeedbackEvent::PatchInteractiveSkipped {
                patch: selected()?,
            },
            FeedbackKind::PatchNotNeeded => FeedbackEvent::PatchNotNeeded {
                patch: selected()?,
            },
            FeedbackKind::SetToInstall => FeedbackEvent::SetToInstall {
                selected: selected()?,
            },
            FeedbackKind::SetToRemove => FeedbackEvent::SetToRemove {
                selected: selected()?,
            },
            FeedbackKind::RequirementAdded => FeedbackEvent::RequirementAdded { requested },
            FeedbackKind::ConflictAdded => FeedbackEvent::ConflictAdded { requested },
            FeedbackKind::ForcedInstall => FeedbackEvent::ForcedInstall {
                selected: selected()?,
            },
        })
    }

    pub fn kind(&self) -> FeedbackKind {
        match self {
            FeedbackEvent::NameLookupFallback { .. } => FeedbackKind::NameLookupFallback,
            FeedbackEvent::NameNotFound { .. } => FeedbackKind::NameNotFound,
            FeedbackEvent::CapabilityNotFound { .. } => FeedbackKind::CapabilityNotFound,
            FeedbackEvent::NotInstalled { .. } => FeedbackKind::NotInstalled,
            FeedbackEvent::NoInstalledProvider { .. } => FeedbackKind::NoInstalledProvider,
            FeedbackEvent::AlreadyInstalled { .. } => FeedbackKind::AlreadyInstalled,
            FeedbackEvent::NoUpdateCandidate { .. } => FeedbackKind::NoUpdateCandidate,
            FeedbackEvent::UpdateCandidateRestricted { .. } => {
                FeedbackKind::UpdateCandidateRestricted
            }
            FeedbackEvent::UpdateCandidateVendorChange { .. } => {
                FeedbackKind::UpdateCandidateVendorChange
            }
            FeedbackEvent::UpdateCandidateLowerPriority { .. } => {
                FeedbackKind::UpdateCandidateLowerPriority
            }
            FeedbackEvent::UpdateCandidateLocked { .. } => FeedbackKind::UpdateCandidateLocked,
            FeedbackEvent::SelectedIsOlder { .. } => FeedbackKind::SelectedIsOlder,
            FeedbackEvent::PatchInteractiveSkipped { .. } => FeedbackKind::PatchInteractiveSkipped,
            FeedbackEvent::PatchNotNeeded { .. } => FeedbackKind::PatchNotNeeded,
            FeedbackEvent::SetToInstall { .. } => FeedbackKind::SetToInstall,
            FeedbackEvent::SetToRemove { .. } => FeedbackKind::SetToRemove,
            FeedbackEvent::RequirementAdded { .. } => FeedbackKind::RequirementAdded,
            FeedbackEvent::ConflictAdded { .. } => FeedbackKind::ConflictAdded,
            FeedbackEvent::ForcedInstall { .. } => FeedbackKind::ForcedInstall,
        }
    }

    pub fn severity(&self) -> Severity {
        self.kind().severity()
    }

    /// Render and send the event to the sink
    pub fn emit(&self, policy: &Policy, out: &dyn OutputSink) {
        let text = self.render(policy);
        debug!("feedback {}: {}", self.kind(), text);
        out.emit(&text, self.severity());
    }
}

/// Classify a resolver outcome and emit it
///
/// Outcomes that cannot be mapped are reported as internal faults; nothing
/// is propagated back to the resolver.
pub fn report_outcome(outcome: &RequestOutcome<'_>, policy: &Policy, out: &dyn OutputSink) {
    match FeedbackEvent::from_outcome(outcome) {
        Ok(event) => event.emit(policy, out),
        Err(e) => report_internal_fault(out, &e),
    }
}
