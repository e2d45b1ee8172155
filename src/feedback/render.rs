// src/feedback/render.rs

//! Operator messages for request feedback

use super::FeedbackEvent;
use crate::candidate::Resolvable;
use crate::policy::Policy;

/// Flag suggested when the selected package is older than the installed one
const FORCE_FLAG: &str = "--force";

impl FeedbackEvent<'_> {
    /// Render the event as an operator message
    ///
    /// Pure: depends only on the event and the policy, never fails and
    /// never returns an empty string.
    pub fn render(&self, policy: &Policy) -> String {
        let cmd = &policy.command_name;

        match *self {
            FeedbackEvent::NameLookupFallback { requested } => format!(
                "'{}' not found in package names. Trying capabilities.",
                requested.orig_str
            ),

            FeedbackEvent::NameNotFound { requested } => {
                let scope = if requested.repo_alias.is_some() || policy.restricts_repos() {
                    " in specified repositories"
                } else {
                    ""
                };
                format!(
                    "{} '{}' not found{}.",
                    requested.kind().noun(),
                    requested.typed_name(),
                    scope
                )
            }

            FeedbackEvent::CapabilityNotFound { requested } => {
                format!("No provider of '{}' found.", requested.parsed_cap)
            }

            FeedbackEvent::NotInstalled { requested } => {
                if requested.has_wildcards() {
                    format!("No package matching '{}' are installed.", requested.orig_str)
                } else {
                    format!("Package '{}' is not installed.", requested.orig_str)
                }
            }

            FeedbackEvent::NoInstalledProvider { requested } => {
                format!("No provider of '{}' is installed.", requested.parsed_cap)
            }

            FeedbackEvent::AlreadyInstalled {
                requested,
                installed,
            } => {
                if installed.name() == requested.name() {
                    format!("'{}' is already installed.", requested.parsed_cap)
                } else {
                    format!(
                        "'{}' providing '{}' is already installed.",
                        installed.name(),
                        requested.parsed_cap
                    )
                }
            }

            FeedbackEvent::NoUpdateCandidate { installed, highest } => {
                let newest_installed = highest.is_some_and(|highest| {
                    installed.is_identical(highest) || highest.edition() <= installed.edition()
                });
                if newest_installed {
                    format!(
                        "No update candidate for '{}'. The highest available version is already installed.",
                        installed.user_string()
                    )
                } else {
                    format!("No update candidate for '{}'.", installed.name())
                }
            }

            FeedbackEvent::UpdateCandidateRestricted {
                installed,
                candidate,
            } => format!(
                "There is an update candidate '{}' for '{}', but it does not match the specified version, architecture, or repository.",
                candidate.user_string(),
                installed.user_string()
            ),

            FeedbackEvent::UpdateCandidateVendorChange {
                installed,
                candidate,
            } => format!(
                "There is an update candidate for '{}', but it is from a different vendor. Use '{} install {}' to install this candidate.",
                installed.name(),
                cmd,
                candidate.user_string()
            ),

            FeedbackEvent::UpdateCandidateLowerPriority {
                installed,
                candidate,
            } => format!(
                "There is an update candidate for '{}', but it comes from a repository with a lower priority. Use '{} install {}-{}.{}' to install this candidate.",
                installed.name(),
                cmd,
                candidate.name(),
                candidate.edition(),
                candidate.arch()
            ),

            FeedbackEvent::UpdateCandidateLocked {
                installed,
                candidate,
            } => format!(
                "There is an update candidate for '{}', but it is locked. Use '{} removelock {}' to unlock it.",
                installed.name(),
                cmd,
                candidate.name()
            ),

            FeedbackEvent::SelectedIsOlder { selected } => format!(
                "The selected package '{}' from repository '{}' has lower version than the installed one. Use '{}' to force installation of the package.",
                selected.user_string(),
                repo_label(selected, policy),
                FORCE_FLAG
            ),

            FeedbackEvent::PatchInteractiveSkipped { patch } => format!(
                "Patch '{}-{}' is interactive, skipping.",
                patch.name(),
                patch.edition()
            ),

            FeedbackEvent::PatchNotNeeded { patch } => {
                format!("Patch '{}-{}' is not needed.", patch.name(), patch.edition())
            }

            FeedbackEvent::SetToInstall { selected } => format!(
                "Selecting '{}' from repository '{}' for installation.",
                selected.user_string(),
                repo_label(selected, policy)
            ),

            FeedbackEvent::SetToRemove { selected } => {
                format!("Selecting '{}' for removal.", selected.user_string())
            }

            FeedbackEvent::RequirementAdded { requested } => {
                format!("Adding requirement: '{}'.", requested.parsed_cap)
            }

            FeedbackEvent::ConflictAdded { requested } => {
                format!("Adding conflict: '{}'.", requested.parsed_cap)
            }

            FeedbackEvent::ForcedInstall { selected } => format!(
                "Forcing installation of '{}' from repository '{}'.",
                selected.user_string(),
                repo_label(selected, policy)
            ),
        }
    }
}

fn repo_label<'r>(obj: &'r dyn Resolvable, policy: &Policy) -> &'r str {
    obj.repository().label(policy.show_alias)
}

#[cfg(test)]
mod tests {
    use crate::candidate::{Candidate, RepoInfo};
    use crate::feedback::{FeedbackEvent, FeedbackKind, RequestOutcome};
    use crate::policy::Policy;
    use crate::request::{RequestedItem, ResKind};
    use crate::version::Edition;

    fn pkg(name: &str, edition: &str) -> Candidate {
        Candidate::new(
            ResKind::Package,
            name,
            Edition::parse(edition).unwrap(),
            "x86_64",
            RepoInfo::new("repo-oss", "Main Repository"),
        )
    }

    fn patch(name: &str, edition: &str) -> Candidate {
        Candidate::new(
            ResKind::Patch,
            name,
            Edition::parse(edition).unwrap(),
            "noarch",
            RepoInfo::new("repo-update", "Update Repository"),
        )
    }

    fn render(outcome: RequestOutcome<'_>, policy: &Policy) -> String {
        FeedbackEvent::from_outcome(&outcome).unwrap().render(policy)
    }

    #[test]
    fn test_name_not_found_per_kind() {
        let policy = Policy::default();
        let cases = [
            ("foo", "Package 'foo' not found."),
            ("patch:foo", "Patch 'foo' not found."),
            ("pattern:foo", "Pattern 'foo' not found."),
            ("product:foo", "Product 'foo' not found."),
            ("srcpackage:foo", "Source package 'foo' not found."),
            ("application:foo", "Object 'foo' not found."),
        ];
        for (raw, expected) in cases {
            let requested = RequestedItem::parse(raw).unwrap();
            let outcome = RequestOutcome::new(FeedbackKind::NameNotFound, &requested);
            assert_eq!(render(outcome, &policy), expected);
        }
    }

    #[test]
    fn test_product_not_found_in_pinned_repository() {
        let policy = Policy::default();
        let requested = RequestedItem::with_kind("foo", ResKind::Product)
            .unwrap()
            .with_repository("repo-oss");
        let outcome = RequestOutcome::new(FeedbackKind::NameNotFound, &requested);
        assert_eq!(
            render(outcome, &policy),
            "Product 'foo' not found in specified repositories."
        );

        let typed = RequestedItem::parse("product:foo")
            .unwrap()
            .with_repository("repo-oss");
        let outcome = RequestOutcome::new(FeedbackKind::NameNotFound, &typed);
        assert_eq!(
            render(outcome, &policy),
            "Product 'foo' not found in specified repositories."
        );
    }

    #[test]
    fn test_name_not_found_with_repo_restriction() {
        let requested = RequestedItem::parse("foo").unwrap();
        let policy = Policy::default().with_from_repos(vec!["oss".to_string()]);
        let outcome = RequestOutcome::new(FeedbackKind::NameNotFound, &requested);
        assert_eq!(
            render(outcome, &policy),
            "Package 'foo' not found in specified repositories."
        );
    }

    #[test]
    fn test_capability_messages() {
        let policy = Policy::default();
        let requested = RequestedItem::parse("libfoo>=2.0").unwrap();

        let outcome = RequestOutcome::new(FeedbackKind::CapabilityNotFound, &requested);
        assert_eq!(render(outcome, &policy), "No provider of 'libfoo >= 2.0' found.");

        let outcome = RequestOutcome::new(FeedbackKind::NoInstalledProvider, &requested);
        assert_eq!(
            render(outcome, &policy),
            "No provider of 'libfoo >= 2.0' is installed."
        );

        let outcome = RequestOutcome::new(FeedbackKind::RequirementAdded, &requested);
        assert_eq!(render(outcome, &policy), "Adding requirement: 'libfoo >= 2.0'.");

        let outcome = RequestOutcome::new(FeedbackKind::ConflictAdded, &requested);
        assert_eq!(render(outcome, &policy), "Adding conflict: 'libfoo >= 2.0'.");

        let outcome = RequestOutcome::new(FeedbackKind::NameLookupFallback, &requested);
        assert_eq!(
            render(outcome, &policy),
            "'libfoo>=2.0' not found in package names. Trying capabilities."
        );
    }

    #[test]
    fn test_not_installed_wildcards() {
        let policy = Policy::default();
        let plain = RequestedItem::parse("vim").unwrap();
        let outcome = RequestOutcome::new(FeedbackKind::NotInstalled, &plain);
        assert_eq!(render(outcome, &policy), "Package 'vim' is not installed.");

        let glob = RequestedItem::parse("vim-*").unwrap();
        let outcome = RequestOutcome::new(FeedbackKind::NotInstalled, &glob);
        assert_eq!(
            render(outcome, &policy),
            "No package matching 'vim-*' are installed."
        );

        let single = RequestedItem::parse("vim-?").unwrap();
        let outcome = RequestOutcome::new(FeedbackKind::NotInstalled, &single);
        assert_eq!(
            render(outcome, &policy),
            "No package matching 'vim-?' are installed."
        );
    }

    #[test]
    fn test_no_update_candidate_variants() {
        let policy = Policy::default();
        let requested = RequestedItem::parse("vim").unwrap();
        let installed = pkg("vim", "9.1-2");

        let outcome = RequestOutcome::new(FeedbackKind::NoUpdateCandidate, &requested)
            .with_installed(&installed);
        assert_eq!(render(outcome, &policy), "No update candidate for 'vim'.");

        let older = pkg("vim", "9.0-1");
        let outcome = outcome.with_candidate(&older);
        assert_eq!(
            render(outcome, &policy),
            "No update candidate for 'vim-9.1-2.x86_64'. The highest available version is already installed."
        );

        let newer = pkg("vim", "9.2-1");
        let outcome = outcome.with_candidate(&newer);
        assert_eq!(render(outcome, &policy), "No update candidate for 'vim'.");
    }

    #[test]
    fn test_update_candidate_hints() {
        let policy = Policy::default().with_command_name("zz");
        let requested = RequestedItem::parse("vim").unwrap();
        let installed = pkg("vim", "9.1-2");
        let candidate = pkg("vim", "9.2-1");

        let base = RequestOutcome::new(FeedbackKind::UpdateCandidateVendorChange, &requested)
            .with_installed(&installed)
            .with_candidate(&candidate);
        assert_eq!(
            render(base, &policy),
            "There is an update candidate for 'vim', but it is from a different vendor. Use 'zz install vim-9.2-1.x86_64' to install this candidate."
        );

        let prio = RequestOutcome {
            kind: FeedbackKind::UpdateCandidateLowerPriority,
            ..base
        };
        assert!(
            render(prio, &policy)
                .ends_with("Use 'zz install vim-9.2-1.x86_64' to install this candidate.")
        );

        let locked = RequestOutcome {
            kind: FeedbackKind::UpdateCandidateLocked,
            ..base
        };
        assert_eq!(
            render(locked, &policy),
            "There is an update candidate for 'vim', but it is locked. Use 'zz removelock vim' to unlock it."
        );

        let restricted = RequestOutcome {
            kind: FeedbackKind::UpdateCandidateRestricted,
            ..base
        };
        assert_eq!(
            render(restricted, &policy),
            "There is an update candidate 'vim-9.2-1.x86_64' for 'vim-9.1-2.x86_64', but it does not match the specified version, architecture, or repository."
        );
    }

    #[test]
    fn test_repository_alias_or_name() {
        let requested = RequestedItem::parse("vim").unwrap();
        let selected = pkg("vim", "9.0-1");
        let outcome =
            RequestOutcome::new(FeedbackKind::SetToInstall, &requested).with_selected(&selected);

        assert_eq!(
            render(outcome, &Policy::default()),
            "Selecting 'vim-9.0-1.x86_64' from repository 'Main Repository' for installation."
        );
        assert_eq!(
            render(outcome, &Policy::default().with_show_alias(true)),
            "Selecting 'vim-9.0-1.x86_64' from repository 'repo-oss' for installation."
        );

        let older = RequestOutcome {
            kind: FeedbackKind::SelectedIsOlder,
            ..outcome
        };
        assert_eq!(
            render(older, &Policy::default()),
            "The selected package 'vim-9.0-1.x86_64' from repository 'Main Repository' has lower version than the installed one. Use '--force' to force installation of the package."
        );

        let forced = RequestOutcome {
            kind: FeedbackKind::ForcedInstall,
            ..outcome
        };
        assert_eq!(
            render(forced, &Policy::default().with_show_alias(true)),
            "Forcing installation of 'vim-9.0-1.x86_64' from repository 'repo-oss'."
        );

        let removal = RequestOutcome {
            kind: FeedbackKind::SetToRemove,
            ..outcome
        };
        assert_eq!(
            render(removal, &Policy::default()),
            "Selecting 'vim-9.0-1.x86_64' for removal."
        );
    }

    #[test]
    fn test_patch_messages() {
        let policy = Policy::default();
        let requested = RequestedItem::parse("patch:SUSE-2024-77").unwrap();
        let selected = patch("SUSE-2024-77", "1");

        let outcome = RequestOutcome::new(FeedbackKind::PatchInteractiveSkipped, &requested)
            .with_selected(&selected);
        assert_eq!(
            render(outcome, &policy),
            "Patch 'SUSE-2024-77-1' is interactive, skipping."
        );

        let outcome = RequestOutcome {
            kind: FeedbackKind::PatchNotNeeded,
            ..outcome
        };
        assert_eq!(render(outcome, &policy), "Patch 'SUSE-2024-77-1' is not needed.");
    }
}
