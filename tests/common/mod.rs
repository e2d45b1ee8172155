// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.

#![allow(dead_code)]

use pkgsentry::{Candidate, Edition, KeyIdentity, RepoInfo, ResKind, TrustEvent};
use std::path::PathBuf;

pub fn oss() -> RepoInfo {
    RepoInfo::new("repo-oss", "Main Repository")
}

pub fn update_repo() -> RepoInfo {
    RepoInfo::new("repo-update", "Main Update Repository")
}

/// Package candidate from the main repository
pub fn package(name: &str, edition: &str) -> Candidate {
    Candidate::new(
        ResKind::Package,
        name,
        Edition::parse(edition).unwrap(),
        "x86_64",
        oss(),
    )
}

/// Package instance as found in the installed system
pub fn installed(name: &str, edition: &str) -> Candidate {
    Candidate::new(
        ResKind::Package,
        name,
        Edition::parse(edition).unwrap(),
        "x86_64",
        RepoInfo::new("@System", "@System"),
    )
}

pub fn patch(name: &str, edition: &str) -> Candidate {
    Candidate::new(
        ResKind::Patch,
        name,
        Edition::parse(edition).unwrap(),
        "noarch",
        update_repo(),
    )
}

pub fn test_key() -> KeyIdentity {
    KeyIdentity::new(
        "70AF9E8139DB7C82",
        "SuSE Package Signing Key <build@suse.de>",
        "FEAB 5025 39D8 46DB 2C09 61CA 70AF 9E81 39DB 7C82",
    )
}

/// One event of every trust kind
pub fn every_trust_event() -> Vec<TrustEvent> {
    let file = PathBuf::from("/var/cache/pkgsentry/raw/repo-oss/repodata/repomd.xml");
    vec![
        TrustEvent::UnsignedFile { file: file.clone() },
        TrustEvent::UnknownKey {
            file: file.clone(),
            key_id: "DEADBEEFDEADBEEF".to_string(),
        },
        TrustEvent::ImportKey { key: test_key() },
        TrustEvent::TrustKey { key: test_key() },
        TrustEvent::VerificationFailed {
            file: file.clone(),
            key: test_key(),
        },
        TrustEvent::NoDigest { file: file.clone() },
        TrustEvent::UnknownDigest {
            file: file.clone(),
            algorithm: "md2".to_string(),
        },
        TrustEvent::WrongDigest {
            file,
            expected: "sha256:aaaa".to_string(),
            found: "sha256:bbbb".to_string(),
        },
    ]
}
