// src/config.rs

//! Configuration file
//!
//! ```toml
//! [policy]
//! no_gpg_checks = false
//! show_alias = true
//! from_repos = ["repo-oss"]
//! command_name = "pkgsentry"
//!
//! [prompts]
//! non_interactive = false
//!
//! [prompts.answers]
//! gpg_key_trust = false
//! gpg_no_digest_accept = true
//! ```
//!
//! Every key is optional. Command-line flags are applied on top of the
//! resulting policy by the binary.

use crate::error::{Error, Result};
use crate::policy::Policy;
use crate::prompt::PromptId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming an alternate configuration file
pub const CONFIG_ENV: &str = "PKGSENTRY_CONFIG";

/// `[policy]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub no_gpg_checks: bool,
    pub show_alias: bool,
    pub from_repos: Vec<String>,
    pub command_name: Option<String>,
}

/// `[prompts]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    /// Never wait for the operator; use defaults
    pub non_interactive: bool,
    /// Preset answers keyed by prompt id
    pub answers: HashMap<String, bool>,
}

/// Parsed configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub policy: PolicyConfig,
    pub prompts: PromptConfig,
}

impl Config {
    /// Parse configuration text; `origin` is only used in error messages
    pub fn parse(text: &str, origin: &str) -> Result<Self> {
        let config: Config = toml::from_str(text).map_err(|e| Error::ConfigError {
            path: origin.to_string(),
            reason: e.to_string(),
        })?;
        // Reject unknown prompt ids early rather than silently ignoring them
        config.prompt_presets().map_err(|e| Error::ConfigError {
            path: origin.to_string(),
            reason: e.to_string(),
        })?;
        Ok(config)
    }

    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text, &path.display().to_string())
    }

    /// Default location: `<config dir>/pkgsentry/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("pkgsentry").join("config.toml"))
    }

    /// Load the configuration the operator asked for
    ///
    /// An explicit path (argument, then environment) must exist. The
    /// default location is optional; without it the defaults apply.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Self::load(Path::new(&path));
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => {
                debug!("No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Policy described by this configuration on top of `base`
    pub fn apply_to(&self, base: Policy) -> Policy {
        let mut policy = base
            .with_no_gpg_checks(self.policy.no_gpg_checks)
            .with_show_alias(self.policy.show_alias)
            .with_from_repos(self.policy.from_repos.clone());
        if let Some(ref name) = self.policy.command_name {
            policy = policy.with_command_name(name.clone());
        }
        policy
    }

    /// Preset answers with their ids parsed
    pub fn prompt_presets(&self) -> Result<HashMap<PromptId, bool>> {
        self.prompts
            .answers
            .iter()
            .map(|(id, answer)| {
                id.parse::<PromptId>()
                    .map(|id| (id, *answer))
                    .map_err(|_| Error::UnrecognizedKind {
                        family: "prompt",
                        kind: id.clone(),
                    })
            })
            .collect()
    }
}
