//! Commit identifiers and commit-header parsing.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Length of a SHA-1 object name in hex.
const SHA1_HEX_LEN: usize = 40;
/// Length of a SHA-256 object name in hex.
const SHA256_HEX_LEN: usize = 64;

/// An opaque commit identifier, as written in the shallow file.
///
/// Only equality and hashing are meaningful; the string is never
/// normalized.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommitId(String);

impl CommitId {
    /// Get the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if this is a full lowercase hex object name (SHA-1 or SHA-256).
    #[must_use]
    pub fn is_full_hash(&self) -> bool {
        is_full_hash(&self.0)
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CommitId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CommitId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for CommitId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

fn is_full_hash(s: &str) -> bool {
    matches!(s.len(), SHA1_HEX_LEN | SHA256_HEX_LEN)
        && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// Match a single `parent <hash>` header line.
fn parent_header(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("parent")?;
    let hash = rest.trim_start();
    // At least one separator between keyword and hash.
    if hash.len() == rest.len() || !is_full_hash(hash) {
        return None;
    }
    Some(hash)
}

/// Extract the parent hashes from the text of a commit object.
///
/// Parent headers are contiguous: lines before the first one are skipped,
/// and the first non-matching line after it ends the scan. The header ends
/// at the first blank line, so nothing in the message is ever read.
/// A root commit yields an empty list.
#[must_use]
pub fn parse_parents(text: &str) -> Vec<CommitId> {
    let mut parents = Vec::new();

    for line in text.lines() {
        if line.is_empty() {
            break;
        }
        match parent_header(line) {
            Some(hash) => parents.push(CommitId::from(hash)),
            None if !parents.is_empty() => break,
            None => {}
        }
    }

    parents
}
