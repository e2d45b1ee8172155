// src/policy.rs

//! Operator policy snapshot
//!
//! A [`Policy`] is built once at startup from the configuration file and
//! command-line flags and then passed by reference to everything that needs
//! it. Nothing mutates it afterwards.

use std::path::Path;

/// Command name used in corrective hints when none is configured
pub const DEFAULT_COMMAND_NAME: &str = "pkgsentry";

/// Read-only snapshot of operator-configured behavior
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    /// Skip signature and digest verification checks
    pub no_gpg_checks: bool,
    /// Show repository aliases instead of repository names
    pub show_alias: bool,
    /// Acting principal can write the system trust store
    pub privileged: bool,
    /// Operation targets an alternate root directory
    pub changed_root: bool,
    /// Repositories the operator restricted the search to
    pub from_repos: Vec<String>,
    /// Command named in corrective hints ("Use 'CMD install ...'")
    pub command_name: String,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            no_gpg_checks: false,
            show_alias: false,
            privileged: false,
            changed_root: false,
            from_repos: Vec::new(),
            command_name: DEFAULT_COMMAND_NAME.to_string(),
        }
    }
}

impl Policy {
    /// Policy with privilege detected from the effective uid
    pub fn detect() -> Self {
        Self {
            privileged: nix::unistd::geteuid().is_root(),
            ..Self::default()
        }
    }

    /// Disable or enable verification checks
    pub fn with_no_gpg_checks(mut self, no_gpg_checks: bool) -> Self {
        self.no_gpg_checks = no_gpg_checks;
        self
    }

    /// Show repository aliases instead of names
    pub fn with_show_alias(mut self, show_alias: bool) -> Self {
        self.show_alias = show_alias;
        self
    }

    /// Override detected privilege
    pub fn with_privileged(mut self, privileged: bool) -> Self {
        self.privileged = privileged;
        self
    }

    /// Record the target root; anything other than `/` counts as changed
    pub fn with_root(mut self, root: &Path) -> Self {
        self.changed_root = root != Path::new("/");
        self
    }

    /// Restrict the search to the given repositories
    pub fn with_from_repos(mut self, repos: Vec<String>) -> Self {
        self.from_repos = repos;
        self
    }

    /// Set the command named in corrective hints
    pub fn with_command_name(mut self, name: impl Into<String>) -> Self {
        self.command_name = name.into();
        self
    }

    /// Whether the search was limited to specific repositories
    pub fn restricts_repos(&self) -> bool {
        !self.from_repos.is_empty()
    }

    /// Whether importing keys into the trusted keyring can take effect
    ///
    /// Only a privileged principal can write the system keyring; with an
    /// alternate root the target keyring lives under that root instead.
    pub fn can_import_keys(&self) -> bool {
        self.privileged || self.changed_root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_defaults() {
        let policy = Policy::default();
        assert!(!policy.no_gpg_checks);
        assert!(!policy.restricts_repos());
        assert_eq!(policy.command_name, DEFAULT_COMMAND_NAME);
    }

    #[test]
    fn test_changed_root() {
        let policy = Policy::default().with_root(Path::new("/"));
        assert!(!policy.changed_root);

        let policy = Policy::default().with_root(&PathBuf::from("/mnt/sysroot"));
        assert!(policy.changed_root);
    }

    #[test]
    fn test_can_import_keys() {
        assert!(!Policy::default().can_import_keys());
        assert!(Policy::default().with_privileged(true).can_import_keys());
        assert!(Policy::default().with_root(Path::new("/mnt")).can_import_keys());
    }
}
