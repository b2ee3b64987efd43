// SPDX-License-Identifier: AGPL-3.0
// Copyright (C) 2026 Gitview Contributors

//! Transport-neutral views of git objects
//!
//! Modes are decoded from libgit2's native representation into a plain
//! `u32` so that downstream layers (JSON shaping in particular) never see
//! library types.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Directory bit in a tree entry mode (octal 040000)
pub const MODE_TREE: u32 = 0o040000;

/// One entry of a directory snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEntry {
    /// Content hash of the entry, hex encoded
    pub hash: String,
    /// Entry name; [`RepoHandle::find`](crate::RepoHandle::find) rewrites
    /// this to a path relative to the find root
    pub name: String,
    /// File mode bitmask; [`MODE_TREE`] distinguishes subtrees
    pub mode: u32,
}

impl TreeEntry {
    /// Whether the entry names a subtree rather than a blob
    pub fn is_tree(&self) -> bool {
        self.mode & MODE_TREE != 0
    }
}

/// Metadata of one file resolved at a revision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStat {
    /// Blob hash, hex encoded
    pub id: String,
    /// Path of the file relative to the repository root
    pub name: String,
    /// File mode bitmask
    pub mode: u32,
    /// Exact decoded byte length of the blob
    pub size: u64,
    /// Heuristic classification from the object store (nul byte in a
    /// sampled prefix), surfaced verbatim
    pub is_binary: bool,
}

/// Author or committer identity with timestamp
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    /// Person name
    pub name: String,
    /// Email address
    pub email: String,
    /// Signature time, carrying the original UTC offset
    pub when: DateTime<FixedOffset>,
}

/// Immutable commit snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Commit hash, hex encoded
    pub id: String,
    /// Full commit message
    pub message: String,
    /// Author signature
    pub author: Signature,
    /// Committer signature
    pub committer: Signature,
    /// Parent commit hashes: 0 for a root commit, 1 normally, 2+ for merges
    pub parent_ids: Vec<String>,
    /// Files changed relative to the first parent; a root commit lists
    /// every file it introduced
    pub files: Vec<FileStat>,
}
