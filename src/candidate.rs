// src/candidate.rs

//! Resolvables handed over by the resolver
//!
//! The resolver owns its result set; this crate only ever borrows
//! candidates through the [`Resolvable`] trait. [`Candidate`] is a plain
//! value implementation used by the event records and by tests.

use crate::request::ResKind;
use crate::version::Edition;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of the repository a resolvable comes from
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoInfo {
    /// Short unique alias (e.g., "repo-oss")
    pub alias: String,
    /// Human readable name (e.g., "Main Repository (OSS)")
    pub name: String,
}

impl RepoInfo {
    pub fn new(alias: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            name: name.into(),
        }
    }

    /// Label shown to the operator: alias or name
    pub fn label(&self, show_alias: bool) -> &str {
        if show_alias { &self.alias } else { &self.name }
    }
}

/// Read-only view of a concrete resolvable object
pub trait Resolvable: fmt::Debug {
    fn kind(&self) -> ResKind;

    fn name(&self) -> &str;

    fn edition(&self) -> &Edition;

    fn arch(&self) -> &str;

    fn repository(&self) -> &RepoInfo;

    /// `name-edition.arch`, prefixed with the kind for non-packages
    fn user_string(&self) -> String {
        let nea = format!("{}-{}.{}", self.name(), self.edition(), self.arch());
        match self.kind() {
            ResKind::Package => nea,
            kind => format!("{}:{}", kind, nea),
        }
    }

    /// Whether both refer to the same object in the pool
    fn is_identical(&self, other: &dyn Resolvable) -> bool {
        self.kind() == other.kind()
            && self.name() == other.name()
            && self.edition() == other.edition()
            && self.arch() == other.arch()
            && self.repository() == other.repository()
    }
}

/// Owned resolvable description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub kind: ResKind,
    pub name: String,
    pub edition: Edition,
    pub arch: String,
    pub repository: RepoInfo,
}

impl Candidate {
    pub fn new(
        kind: ResKind,
        name: impl Into<String>,
        edition: Edition,
        arch: impl Into<String>,
        repository: RepoInfo,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            edition,
            arch: arch.into(),
            repository,
        }
    }
}

impl Resolvable for Candidate {
    fn kind(&self) -> ResKind {
        self.kind
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn edition(&self) -> &Edition {
        &self.edition
    }

    fn arch(&self) -> &str {
        &self.arch
    }

    fn repository(&self) -> &RepoInfo {
        &self.repository
    }
}
