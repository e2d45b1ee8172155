// src/trust/engine.rs

//! Carries out trust assessments

use super::{Assessment, TrustEvent};
use crate::fault::report_internal_fault;
use crate::output::{OutputSink, Severity};
use crate::policy::Policy;
use crate::prompt::InteractionGateway;
use tracing::{debug, info, warn};

/// Resolves trust events to accept/reject decisions
///
/// Holds only borrowed collaborators; one engine is created per operation
/// and called once per event, in order.
pub struct TrustEngine<'a> {
    policy: &'a Policy,
    gateway: &'a dyn InteractionGateway,
    out: &'a dyn OutputSink,
}

impl<'a> TrustEngine<'a> {
    pub fn new(
        policy: &'a Policy,
        gateway: &'a dyn InteractionGateway,
        out: &'a dyn OutputSink,
    ) -> Self {
        Self {
            policy,
            gateway,
            out,
        }
    }

    /// Accept (`true`) or reject (`false`) the event
    ///
    /// Automatic accepts are logged and announced on the output sink,
    /// questions go to the gateway, rejects are only logged.
    pub fn decide(&self, event: &TrustEvent) -> bool {
        let kind = event.kind();
        match event.assess(self.policy) {
            Assessment::Accept { notice, severity } => {
                if matches!(severity, Severity::Warning(_)) {
                    warn!(kind = %kind, "verification problem ignored: {}", notice);
                } else {
                    info!(kind = %kind, "automatically accepted: {}", notice);
                }
                self.out.emit(&notice, severity);
                true
            }
            Assessment::Reject { reason } => {
                debug!(kind = %kind, "rejected without asking: {}", reason);
                false
            }
            Assessment::Ask {
                id,
                question,
                default,
            } => {
                let answer = self.gateway.ask(id, &question, default);
                debug!(kind = %kind, prompt = %id, answer, "operator answered");
                answer
            }
        }
    }

    /// Resolve something that could not be turned into a trust event
    ///
    /// Reported as an internal fault and always rejected.
    pub fn reject_fault(&self, detail: &dyn std::fmt::Display) -> bool {
        report_internal_fault(self.out, detail);
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::RecordingOutput;
    use crate::prompt::{PromptId, ScriptedPrompt};
    use crate::trust::KeyIdentity;
    use std::path::PathBuf;

    #[test]
    fn test_auto_accept_announces() {
        let policy = Policy::default().with_no_gpg_checks(true);
        let gateway = ScriptedPrompt::always(false);
        let out = RecordingOutput::new();
        let engine = TrustEngine::new(&policy, &gateway, &out);

        let event = TrustEvent::UnknownKey {
            file: PathBuf::from("repomd.xml"),
            key_id: "DEADBEEF".to_string(),
        };
        assert!(engine.decide(&event));
        assert_eq!(gateway.call_count(), 0);

        let messages = out.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(
            messages[0].text,
            "Accepting file repomd.xml signed with an unknown key DEADBEEF."
        );
    }

    #[test]
    fn test_question_goes_to_gateway() {
        let policy = Policy::default();
        let gateway = ScriptedPrompt::new([true]);
        let out = RecordingOutput::new();
        let engine = TrustEngine::new(&policy, &gateway, &out);

        let event = TrustEvent::TrustKey {
            key: KeyIdentity::new("DEADBEEF", "Example", "AAAA BBBB"),
        };
        assert!(engine.decide(&event));

        let asked = gateway.asked();
        assert_eq!(asked.len(), 1);
        assert_eq!(asked[0].id, PromptId::GpgKeyTrust);
        assert!(!asked[0].default);
        assert!(out.is_empty());
    }

    #[test]
    fn test_silent_reject() {
        let policy = Policy::default().with_privileged(false);
        let gateway = ScriptedPrompt::always(true);
        let out = RecordingOutput::new();
        let engine = TrustEngine::new(&policy, &gateway, &out);

        let event = TrustEvent::ImportKey {
            key: KeyIdentity::new("DEADBEEF", "Example", "AAAA BBBB"),
        };
        assert!(!engine.decide(&event));
        assert_eq!(gateway.call_count(), 0);
        assert!(out.is_empty());
    }

    #[test]
    fn test_fault_rejects() {
        let policy = Policy::default().with_no_gpg_checks(true);
        let gateway = ScriptedPrompt::always(true);
        let out = RecordingOutput::new();
        let engine = TrustEngine::new(&policy, &gateway, &out);

        assert!(!engine.reject_fault(&"unknown trust event 'maybe'"));
        assert_eq!(gateway.call_count(), 0);
        assert_eq!(out.messages()[0].text, crate::fault::BUG_MESSAGE);
    }
}
