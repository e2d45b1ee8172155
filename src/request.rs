// src/request.rs

//! Operator requests and the capability expressions parsed from them
//!
//! A request is what the operator typed (`foo`, `patch:bar`,
//! `libfoo.x86_64 >= 1.2`), optionally pinned to a repository. It is
//! parsed once and then only read by the feedback and trust layers.

use crate::error::{Error, Result};
use crate::version::VersionConstraint;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Kind of resolvable a request or candidate refers to
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ResKind {
    #[default]
    Package,
    Patch,
    Pattern,
    Product,
    #[strum(serialize = "srcpackage")]
    SrcPackage,
    Application,
}

impl ResKind {
    /// Capitalized noun used at the start of operator messages
    pub fn noun(&self) -> &'static str {
        match self {
            ResKind::Package => "Package",
            ResKind::Patch => "Patch",
            ResKind::Pattern => "Pattern",
            ResKind::Product => "Product",
            ResKind::SrcPackage => "Source package",
            // No dedicated wording; reported as a generic object
            ResKind::Application => "Object",
        }
    }

    /// Split a `kind:name` identifier
    ///
    /// Only known kind prefixes are stripped, so `repo:name` style strings
    /// stay intact and are treated as package names.
    pub fn split_ident(ident: &str) -> (ResKind, &str) {
        if let Some((prefix, rest)) = ident.split_once(':') {
            if let Ok(kind) = prefix.parse::<ResKind>() {
                return (kind, rest);
            }
        }
        (ResKind::Package, ident)
    }
}

/// A parsed capability expression: `[kind:]name[.arch] [op edition]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capability {
    pub kind: ResKind,
    pub name: String,
    pub arch: Option<String>,
    pub constraint: VersionConstraint,
}

/// Architectures recognized as a `.arch` suffix on a name
const KNOWN_ARCHES: &[&str] = &[
    "noarch", "x86_64", "i586", "i686", "aarch64", "armv7hl", "ppc64le", "s390x", "riscv64",
    "src", "nosrc",
];

impl Capability {
    /// Parse a capability expression
    ///
    /// - "foo" → package foo, any edition
    /// - "patch:bar" → patch bar
    /// - "foo.x86_64 >= 1.2" → package foo, x86_64, at least 1.2
    /// - "foo>=1.2" → operators need not be surrounded by spaces
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::InvalidRequest {
                raw: s.to_string(),
                reason: "empty capability".to_string(),
            });
        }

        let (ident, constraint) = match find_operator(s) {
            Some((pos, op)) => {
                let ident = s[..pos].trim();
                let edition = s[pos + op.len()..].trim();
                if edition.is_empty() {
                    return Err(Error::InvalidRequest {
                        raw: s.to_string(),
                        reason: format!("missing edition after '{}'", op),
                    });
                }
                let constraint = VersionConstraint::from_parts(op, edition).map_err(|_| {
                    Error::InvalidRequest {
                        raw: s.to_string(),
                        reason: format!("invalid edition '{}'", edition),
                    }
                })?;
                (ident, constraint)
            }
            None => (s, VersionConstraint::Any),
        };

        let (kind, name) = ResKind::split_ident(ident);
        let (name, arch) = match name.rsplit_once('.') {
            Some((base, arch)) if !base.is_empty() && KNOWN_ARCHES.contains(&arch) => {
                (base, Some(arch.to_string()))
            }
            _ => (name, None),
        };

        if name.is_empty() {
            return Err(Error::InvalidRequest {
                raw: s.to_string(),
                reason: "missing name".to_string(),
            });
        }

        Ok(Self {
            kind,
            name: name.to_string(),
            arch,
            constraint,
        })
    }
}

fn find_operator(s: &str) -> Option<(usize, &'static str)> {
    let pos = s.find(['<', '>', '=', '!'])?;
    VersionConstraint::OPERATORS
        .iter()
        .find(|op| s[pos..].starts_with(**op))
        .map(|op| (pos, *op))
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind != ResKind::Package {
            write!(f, "{}:", self.kind)?;
        }
        write!(f, "{}", self.name)?;
        if let Some(ref arch) = self.arch {
            write!(f, ".{}", arch)?;
        }
        if self.constraint != VersionConstraint::Any {
            write!(f, " {}", self.constraint)?;
        }
        Ok(())
    }
}

/// The operator's original request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestedItem {
    /// Text exactly as typed
    pub orig_str: String,
    /// Capability parsed from `orig_str`
    pub parsed_cap: Capability,
    /// Repository the operator pinned this request to, if any
    pub repo_alias: Option<String>,
}

impl RequestedItem {
    /// Parse a request as typed by the operator
    pub fn parse(raw: &str) -> Result<Self> {
        Ok(Self {
            orig_str: raw.to_string(),
            parsed_cap: Capability::parse(raw)?,
            repo_alias: None,
        })
    }

    /// Parse a request whose kind was chosen apart from the text
    ///
    /// This is the `--type product foo` form. A kind prefix typed in the
    /// text still wins over `kind`.
    pub fn with_kind(raw: &str, kind: ResKind) -> Result<Self> {
        let mut item = Self::parse(raw)?;
        if strip_kind_prefix(item.orig_str.trim()).is_none() {
            item.parsed_cap.kind = kind;
        }
        Ok(item)
    }

    /// The typed text without its kind prefix
    pub fn typed_name(&self) -> &str {
        let text = self.orig_str.trim();
        strip_kind_prefix(text).unwrap_or(text)
    }

    /// Pin the request to a repository
    pub fn with_repository(mut self, alias: impl Into<String>) -> Self {
        let alias = alias.into();
        self.repo_alias = (!alias.is_empty()).then_some(alias);
        self
    }

    /// Whether the typed text contains glob metacharacters
    pub fn has_wildcards(&self) -> bool {
        self.orig_str.contains(['?', '*'])
    }

    pub fn kind(&self) -> ResKind {
        self.parsed_cap.kind
    }

    pub fn name(&self) -> &str {
        &self.parsed_cap.name
    }
}

fn strip_kind_prefix(text: &str) -> Option<&str> {
    let (prefix, rest) = text.split_once(':')?;
    prefix.parse::<ResKind>().ok().map(|_| rest)
}
