// src/version/mod.rs

//! Editions and version constraints for resolvables
//!
//! An edition is the `[epoch:]version[-release]` triple every resolvable
//! carries. Constraints are the relational part of a capability
//! expression such as `foo >= 1.2`.

use crate::error::{Error, Result};
use semver::Version;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A parsed edition with epoch, version, and release components
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Edition {
    pub epoch: u64,
    pub version: String,
    pub release: Option<String>,
}

impl Edition {
    /// Parse an edition string
    ///
    /// Format: [epoch:]version[-release]
    /// - "1.2.3" → epoch=0, version="1.2.3", release=None
    /// - "2:1.2.3-4.1" → epoch=2, version="1.2.3", release=Some("4.1")
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let (epoch, rest) = match s.split_once(':') {
            Some(("", rest)) => (0, rest),
            Some((e, rest)) => {
                let epoch = e
                    .parse::<u64>()
                    .map_err(|_| Error::InvalidEdition(s.to_string()))?;
                (epoch, rest)
            }
            None => (0, s),
        };

        // The release is everything after the last dash
        let (version, release) = match rest.rsplit_once('-') {
            Some((v, r)) if !r.is_empty() => (v, Some(r.to_string())),
            _ => (rest, None),
        };

        if version.is_empty() {
            return Err(Error::InvalidEdition(s.to_string()));
        }

        Ok(Self {
            epoch,
            version: version.to_string(),
            release,
        })
    }

    /// Compare two editions the way constraints match them
    ///
    /// Epochs first, then versions, then releases. A missing release on
    /// either side matches any release, so this is not the total order of
    /// `Ord`: `1.0` matches `1.0-7` here but sorts below it.
    pub fn compare(&self, other: &Edition) -> Ordering {
        match self.epoch.cmp(&other.epoch) {
            Ordering::Equal => {}
            ord => return ord,
        }

        match compare_segments(&self.version, &other.version) {
            Ordering::Equal => {}
            ord => return ord,
        }

        match (&self.release, &other.release) {
            (Some(a), Some(b)) => compare_segments(a, b),
            _ => Ordering::Equal,
        }
    }
}

/// Compare version strings
///
/// Semver-compliant strings are compared as semver. Anything else is split
/// into numeric and alphabetic runs, numeric runs compare by value and are
/// newer than alphabetic ones.
fn compare_segments(a: &str, b: &str) -> Ordering {
    if let (Ok(va), Ok(vb)) = (Version::parse(a), Version::parse(b)) {
        return va.cmp(&vb);
    }

    let sa = segments(a);
    let sb = segments(b);
    for (x, y) in sa.iter().zip(sb.iter()) {
        let ord = match (x.parse::<u64>(), y.parse::<u64>()) {
            (Ok(nx), Ok(ny)) => nx.cmp(&ny),
            (Ok(_), Err(_)) => Ordering::Greater,
            (Err(_), Ok(_)) => Ordering::Less,
            (Err(_), Err(_)) => x.cmp(y),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    sa.len().cmp(&sb.len())
}

fn segments(s: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = None;
    let mut numeric = false;

    for (i, c) in s.char_indices() {
        if !c.is_ascii_alphanumeric() {
            if let Some(st) = start.take() {
                out.push(&s[st..i]);
            }
            continue;
        }
        match start {
            Some(st) if c.is_ascii_digit() != numeric => {
                out.push(&s[st..i]);
                start = Some(i);
                numeric = c.is_ascii_digit();
            }
            Some(_) => {}
            None => {
                start = Some(i);
                numeric = c.is_ascii_digit();
            }
        }
    }
    if let Some(st) = start {
        out.push(&s[st..]);
    }
    out
}

impl fmt::Display for Edition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.epoch > 0 {
            write!(f, "{}:", self.epoch)?;
        }
        write!(f, "{}", self.version)?;
        if let Some(ref release) = self.release {
            write!(f, "-{}", release)?;
        }
        Ok(())
    }
}

impl TryFrom<String> for Edition {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Edition::parse(&s)
    }
}

impl From<Edition> for String {
    fn from(e: Edition) -> Self {
        e.to_string()
    }
}

/// Total order consistent with `Eq`
///
/// A missing release sorts below any release. Editions that only differ in
/// spelling (`1.01` and `1.1`) are ordered by their text.
impl Ord for Edition {
    fn cmp(&self, other: &Self) -> Ordering {
        self.epoch
            .cmp(&other.epoch)
            .then_with(|| compare_segments(&self.version, &other.version))
            .then_with(|| match (&self.release, &other.release) {
                (Some(a), Some(b)) => compare_segments(a, b),
                (a, b) => a.is_some().cmp(&b.is_some()),
            })
            .then_with(|| self.version.cmp(&other.version))
            .then_with(|| self.release.cmp(&other.release))
    }
}

impl PartialOrd for Edition {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Relational constraint on an edition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionConstraint {
    /// Any edition is acceptable
    Any,
    Exact(Edition),
    NotEqual(Edition),
    GreaterThan(Edition),
    GreaterOrEqual(Edition),
    LessThan(Edition),
    LessOrEqual(Edition),
}

impl VersionConstraint {
    /// Operators recognized in capability expressions, longest first
    pub const OPERATORS: [&'static str; 7] = [">=", "<=", "!=", "==", ">", "<", "="];

    /// Build a constraint from an operator and an edition string
    pub fn from_parts(op: &str, edition: &str) -> Result<Self> {
        let edition = Edition::parse(edition)?;
        Ok(match op {
            ">=" => VersionConstraint::GreaterOrEqual(edition),
            "<=" => VersionConstraint::LessOrEqual(edition),
            "!=" => VersionConstraint::NotEqual(edition),
            ">" => VersionConstraint::GreaterThan(edition),
            "<" => VersionConstraint::LessThan(edition),
            _ => VersionConstraint::Exact(edition),
        })
    }

    /// Check if an edition satisfies this constraint
    pub fn satisfies(&self, edition: &Edition) -> bool {
        match self {
            VersionConstraint::Any => true,
            VersionConstraint::Exact(e) => edition.compare(e) == Ordering::Equal,
            VersionConstraint::NotEqual(e) => edition.compare(e) != Ordering::Equal,
            VersionConstraint::GreaterThan(e) => edition.compare(e) == Ordering::Greater,
            VersionConstraint::GreaterOrEqual(e) => edition.compare(e) != Ordering::Less,
            VersionConstraint::LessThan(e) => edition.compare(e) == Ordering::Less,
            VersionConstraint::LessOrEqual(e) => edition.compare(e) != Ordering::Greater,
        }
    }
}

impl fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionConstraint::Any => Ok(()),
            VersionConstraint::Exact(e) => write!(f, "= {}", e),
            VersionConstraint::NotEqual(e) => write!(f, "!= {}", e),
            VersionConstraint::GreaterThan(e) => write!(f, "> {}", e),
            VersionConstraint::GreaterOrEqual(e) => write!(f, ">= {}", e),
            VersionConstraint::LessThan(e) => write!(f, "< {}", e),
            VersionConstraint::LessOrEqual(e) => write!(f, "<= {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edition_parse_full() {
        let e = Edition::parse("1:2.3.4-5.1").unwrap();
        assert_eq!(e.epoch, 1);
        assert_eq!(e.version, "2.3.4");
        assert_eq!(e.release, Some("5.1".to_string()));
    }

    #[test]
    fn test_edition_parse_empty_epoch() {
        let e = Edition::parse(":1.02-2").unwrap();
        assert_eq!(e.epoch, 0);
        assert_eq!(e.version, "1.02");
    }

    #[test]
    fn test_edition_parse_rejects_garbage() {
        assert!(Edition::parse("").is_err());
        assert!(Edition::parse("x:1.0").is_err());
    }

    #[test]
    fn test_edition_ordering() {
        let older = Edition::parse("1.2.3-1").unwrap();
        let newer = Edition::parse("1.2.3-2").unwrap();
        assert!(older < newer);

        // Higher epoch wins even with lower version
        let epoch = Edition::parse("1:0.1").unwrap();
        assert!(epoch > Edition::parse("9.9").unwrap());

        // Non-semver versions compare by segment
        assert!(Edition::parse("1.10").unwrap() > Edition::parse("1.9").unwrap());
        assert!(Edition::parse("2.0a").unwrap() < Edition::parse("2.0.1").unwrap());
    }

    #[test]
    fn test_missing_release_matches_any() {
        let bare = Edition::parse("1.0").unwrap();
        let released = Edition::parse("1.0-7").unwrap();
        assert_eq!(bare.compare(&released), Ordering::Equal);
        assert!(VersionConstraint::Exact(bare.clone()).satisfies(&released));
        assert!(VersionConstraint::LessOrEqual(bare.clone()).satisfies(&released));
        assert!(!VersionConstraint::GreaterThan(bare.clone()).satisfies(&released));
    }

    #[test]
    fn test_order_agrees_with_equality() {
        let bare = Edition::parse("1.0").unwrap();
        let released = Edition::parse("1.0-7").unwrap();
        assert_ne!(bare, released);
        assert_eq!(bare.cmp(&released), Ordering::Less);
        assert_eq!(released.cmp(&bare), Ordering::Greater);

        let padded = Edition::parse("1.01").unwrap();
        let plain = Edition::parse("1.1").unwrap();
        assert_eq!(padded.compare(&plain), Ordering::Equal);
        assert_ne!(padded.cmp(&plain), Ordering::Equal);

        let same = Edition::parse("1.0-7").unwrap();
        assert_eq!(released.cmp(&same), Ordering::Equal);
        assert_eq!(released, same);
    }

    #[test]
    fn test_edition_display() {
        assert_eq!(Edition::parse("1.2.3").unwrap().to_string(), "1.2.3");
        assert_eq!(Edition::parse("2:1.2.3-4").unwrap().to_string(), "2:1.2.3-4");
    }

    #[test]
    fn test_constraint_satisfies() {
        let c = VersionConstraint::from_parts(">=", "1.2").unwrap();
        assert!(c.satisfies(&Edition::parse("1.2").unwrap()));
        assert!(c.satisfies(&Edition::parse("1.3").unwrap()));
        assert!(!c.satisfies(&Edition::parse("1.1").unwrap()));
        assert!(VersionConstraint::Any.satisfies(&Edition::parse("0.1").unwrap()));
    }

    #[test]
    fn test_constraint_display() {
        let c = VersionConstraint::from_parts("<", "2.0").unwrap();
        assert_eq!(c.to_string(), "< 2.0");
        assert_eq!(VersionConstraint::Any.to_string(), "");
    }
}
