// SPDX-License-Identifier: AGPL-3.0
// Copyright (C) 2026 Gitview Contributors

//! Filesystem repository discovery
//!
//! Walks a root directory looking for git repositories, in the manner of
//! ghq-style local repository roots: any directory containing a `.git`
//! subdirectory is a repository, recognized VCS metadata directories are
//! skipped, and symbolic links are followed at most one hop (a symlink
//! whose target is itself a repository is registered, but nothing beyond
//! it is walked).

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

/// Version-control metadata directory names that never contain browsable
/// repositories
const VCS_DIR_NAMES: &[&str] = &[
    ".git",
    ".hg",
    ".svn",
    "_darcs",
    ".bzr",
    ".fslckout",
    "_FOSSIL_",
];

/// One repository found under a discovery root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredRepo {
    /// Path of the repository relative to the root, e.g. `alice/project`
    pub name: String,
    /// Location of the repository's `.git` directory
    pub path: PathBuf,
}

/// Walk `root` and collect every repository beneath it
///
/// Unreadable entries are skipped with a warning rather than aborting the
/// walk; discovery runs at startup against operator-supplied paths and a
/// single bad permission bit should not take the registry down.
pub fn discover(root: &Path) -> Vec<DiscoveredRepo> {
    let mut found = Vec::new();
    let mut walker = WalkDir::new(root).follow_links(false).into_iter();
    while let Some(entry) = walker.next() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("Skipping unreadable entry under {}: {}", root.display(), err);
                continue;
            }
        };
        let is_symlink = entry.file_type().is_symlink();
        let is_dir = if is_symlink {
            // one-hop follow: stat the target without walking into it
            fs::metadata(entry.path())
                .map(|meta| meta.is_dir())
                .unwrap_or(false)
        } else {
            entry.file_type().is_dir()
        };
        if !is_dir {
            continue;
        }
        let base = entry.file_name().to_string_lossy();
        if VCS_DIR_NAMES.contains(&base.as_ref()) {
            if !is_symlink {
                walker.skip_current_dir();
            }
            continue;
        }
        let git_dir = entry.path().join(".git");
        let has_git = fs::metadata(&git_dir)
            .map(|meta| meta.is_dir())
            .unwrap_or(false);
        if !has_git {
            continue;
        }
        let name = entry
            .path()
            .strip_prefix(root)
            .unwrap_or(entry.path())
            .to_string_lossy()
            .into_owned();
        debug!("Discovered repository '{}' at {}", name, git_dir.display());
        found.push(DiscoveredRepo {
            name,
            path: git_dir,
        });
        if !is_symlink {
            // repositories nested under a working tree are not browsable
            walker.skip_current_dir();
        }
    }
    found
}

/// Split a discovered name into its tenant key components
///
/// The first path component is the user, the remainder the repository
/// name. Names with fewer than two components cannot be keyed into the
/// site → user → repo tree and yield `None`.
pub fn split_tenant(name: &str) -> Option<(&str, &str)> {
    let (user, repo) = name.split_once('/')?;
    if user.is_empty() || repo.is_empty() {
        return None;
    }
    Some((user, repo))
}
