// SPDX-License-Identifier: AGPL-3.0
// Copyright (C) 2026 Gitview Contributors

//! Repository handle: revision and path resolution
//!
//! [`RepoHandle`] wraps one git object store at a filesystem location. It
//! stores only the resolved paths and opens a fresh [`git2::Repository`]
//! per operation, so the handle is `Send + Sync + Clone` and every call
//! observes the store as it is on disk at that moment. Revisions are never
//! cached across calls.

use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset};
use git2::{ObjectType, Oid, Repository};
use tracing::debug;

use crate::error::{RepoError, RepoResult};
use crate::model::{Commit, FileStat, Signature, TreeEntry};
use crate::source::{read_all, OdbSource};

/// Opaque handle onto one git repository
///
/// Immutable once opened; many concurrent read operations may be issued
/// against the same handle. There is no close operation: the handle holds
/// no live resources between calls.
#[derive(Debug, Clone)]
pub struct RepoHandle {
    git_dir: PathBuf,
    workdir: Option<PathBuf>,
}

impl RepoHandle {
    /// Open the repository at `path`
    ///
    /// Accepts either a working tree containing `.git` or a git directory
    /// itself. The store is opened once to validate the location and
    /// capture the resolved paths, then released.
    pub fn open(path: impl AsRef<Path>) -> RepoResult<Self> {
        let path = path.as_ref();
        let repo = Repository::open(path).map_err(|source| RepoError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let handle = Self {
            git_dir: repo.path().to_path_buf(),
            workdir: repo.workdir().map(Path::to_path_buf),
        };
        debug!("Opened repository at {}", handle.git_dir.display());
        Ok(handle)
    }

    /// Location of the git directory backing this handle
    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    /// Working tree location, if the repository is not bare
    pub fn workdir(&self) -> Option<&Path> {
        self.workdir.as_deref()
    }

    fn repo(&self) -> RepoResult<Repository> {
        Ok(Repository::open(&self.git_dir)?)
    }

    fn resolve<'r>(&self, repo: &'r Repository, rev: &str) -> RepoResult<git2::Commit<'r>> {
        let object = repo
            .revparse_single(rev)
            .map_err(|e| {
                debug!("Revision '{}' did not resolve: {}", rev, e);
                RepoError::RevisionNotFound(rev.to_string())
            })?;
        object
            .peel_to_commit()
            .map_err(|_| RepoError::RevisionNotFound(rev.to_string()))
    }

    /// Resolve a revision expression to a full hex commit id
    ///
    /// Accepts anything the object store understands: branch names, tags,
    /// short and long hashes, relative expressions such as `HEAD~2`.
    pub fn resolve_revision(&self, rev: &str) -> RepoResult<String> {
        let repo = self.repo()?;
        let id = self.resolve(&repo, rev)?.id().to_string();
        Ok(id)
    }

    /// Load the commit named by `rev` with its full metadata
    ///
    /// The file list is the change set relative to the first parent; a
    /// root commit is diffed against the empty tree and therefore lists
    /// every file it introduced.
    pub fn commit(&self, rev: &str) -> RepoResult<Commit> {
        let repo = self.repo()?;
        let commit = self.resolve(&repo, rev)?;
        let files = change_set(&repo, &commit)?;
        let parent_ids = commit.parent_ids().map(|id| id.to_string()).collect();
        let result = Commit {
            id: commit.id().to_string(),
            message: String::from_utf8_lossy(commit.message_bytes()).into_owned(),
            author: convert_signature(&commit.author()),
            committer: convert_signature(&commit.committer()),
            parent_ids,
            files,
        };
        Ok(result)
    }

    /// List the immediate children of the tree at `path` in revision `rev`
    ///
    /// An empty `path` names the root tree. Fails with
    /// [`RepoError::PathNotFound`] when the path does not name a tree,
    /// including when it names a file.
    pub fn tree(&self, path: &str, rev: &str) -> RepoResult<Vec<TreeEntry>> {
        let repo = self.repo()?;
        let commit = self.resolve(&repo, rev)?;
        let root = commit.tree()?;
        let target = if path.is_empty() {
            root
        } else {
            let entry = root
                .get_path(Path::new(path))
                .map_err(|_| RepoError::PathNotFound(path.to_string()))?;
            entry
                .to_object(&repo)
                .map_err(|_| RepoError::PathNotFound(path.to_string()))?
                .into_tree()
                .map_err(|_| RepoError::PathNotFound(path.to_string()))?
        };
        Ok(target
            .iter()
            .map(|entry| TreeEntry {
                hash: entry.id().to_string(),
                name: String::from_utf8_lossy(entry.name_bytes()).into_owned(),
                mode: entry.filemode() as u32,
            })
            .collect())
    }

    /// Recursively enumerate descendants of `path` at revision `rev`
    ///
    /// Traversal uses an explicit LIFO work-stack seeded with the empty
    /// relative path; every listed entry is emitted with its path rewritten
    /// relative to `path`, and directory entries are pushed back for
    /// expansion. Output order is LIFO expansion order (the last
    /// discovered subtree expands next), not lexical or breadth-first.
    ///
    /// When `max_depth > 0`, a popped path is discarded unexpanded while
    /// the stack is longer than `max_depth`. The stack length stands in
    /// for depth here, so the bound limits traversal breadth-position, not
    /// true tree depth; a single chain of nested directories is followed
    /// regardless of the bound. `max_depth == 0` means unbounded.
    pub fn find(&self, path: &str, rev: &str, max_depth: usize) -> RepoResult<Vec<TreeEntry>> {
        let mut results = Vec::new();
        let mut stack = vec![String::new()];
        while let Some(current) = stack.pop() {
            // the bound compares the pre-pop stack length, so a popped
            // entry is discarded unexpanded while the stack is full
            if max_depth > 0 && stack.len() >= max_depth {
                continue;
            }
            let tree_path = join_rel(path, &current);
            for entry in self.tree(&tree_path, rev)? {
                let child = join_rel(&current, &entry.name);
                if entry.is_tree() {
                    stack.push(child.clone());
                }
                results.push(TreeEntry {
                    hash: entry.hash,
                    name: child,
                    mode: entry.mode,
                });
            }
        }
        Ok(results)
    }

    /// Resolve `path` at `rev` to a deferred opener plus file metadata
    ///
    /// Fails with [`RepoError::IsADirectory`] when the path names a tree,
    /// distinct from plain [`RepoError::PathNotFound`]. No content is read
    /// until the returned source is opened.
    pub fn file_opener(&self, path: &str, rev: &str) -> RepoResult<(OdbSource, FileStat)> {
        let repo = self.repo()?;
        let commit = self.resolve(&repo, rev)?;
        let root = commit.tree()?;
        let entry = root
            .get_path(Path::new(path))
            .map_err(|_| RepoError::PathNotFound(path.to_string()))?;
        if entry.kind() == Some(ObjectType::Tree) {
            return Err(RepoError::IsADirectory(path.to_string()));
        }
        let blob = repo
            .find_blob(entry.id())
            .map_err(|_| RepoError::PathNotFound(path.to_string()))?;
        let stat = FileStat {
            id: entry.id().to_string(),
            name: path.to_string(),
            mode: entry.filemode() as u32,
            size: blob.size() as u64,
            is_binary: blob.is_binary(),
        };
        Ok((OdbSource::new(self.git_dir.clone(), entry.id()), stat))
    }

    /// Read the file at `path` in revision `rev` into memory
    pub fn file(&self, path: &str, rev: &str) -> RepoResult<(Vec<u8>, FileStat)> {
        let (source, stat) = self.file_opener(path, rev)?;
        let bytes = read_all(&source)?;
        Ok((bytes, stat))
    }

    /// Deferred opener for a blob addressed purely by hash
    ///
    /// Bypasses revision and path resolution entirely. The blob's
    /// existence is verified up front; reading is deferred.
    pub fn blob_opener(&self, hash: &str) -> RepoResult<OdbSource> {
        let oid = Oid::from_str(hash).map_err(|_| RepoError::BlobNotFound(hash.to_string()))?;
        let repo = self.repo()?;
        repo.find_blob(oid)
            .map_err(|_| RepoError::BlobNotFound(hash.to_string()))?;
        Ok(OdbSource::new(self.git_dir.clone(), oid))
    }

    /// Read the blob with the given hash into memory
    pub fn blob(&self, hash: &str) -> RepoResult<Vec<u8>> {
        let source = self.blob_opener(hash)?;
        Ok(read_all(&source)?)
    }
}

/// Join repository-relative path segments, skipping empty ones
fn join_rel(base: &str, rest: &str) -> String {
    let mut parts = Vec::new();
    if !base.is_empty() {
        parts.push(base);
    }
    if !rest.is_empty() {
        parts.push(rest);
    }
    parts.join("/")
}

fn convert_signature(sig: &git2::Signature<'_>) -> Signature {
    Signature {
        name: String::from_utf8_lossy(sig.name_bytes()).into_owned(),
        email: String::from_utf8_lossy(sig.email_bytes()).into_owned(),
        when: convert_time(sig.when()),
    }
}

fn convert_time(time: git2::Time) -> DateTime<FixedOffset> {
    let utc = DateTime::from_timestamp(time.seconds(), 0).unwrap_or(DateTime::UNIX_EPOCH);
    match FixedOffset::east_opt(time.offset_minutes() * 60) {
        Some(offset) => utc.with_timezone(&offset),
        None => utc.fixed_offset(),
    }
}

/// Files changed by `commit` relative to its first parent
///
/// Deltas without a surviving new side (deletions) and entries that do not
/// resolve to blobs (submodule links) are skipped.
fn change_set(repo: &Repository, commit: &git2::Commit<'_>) -> RepoResult<Vec<FileStat>> {
    let tree = commit.tree()?;
    let parent_tree = if commit.parent_count() > 0 {
        Some(commit.parent(0)?.tree()?)
    } else {
        None
    };
    let diff = repo.diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), None)?;
    let mut files = Vec::new();
    for delta in diff.deltas() {
        let new = delta.new_file();
        if new.id().is_zero() {
            continue;
        }
        let Ok(blob) = repo.find_blob(new.id()) else {
            debug!("Skipping non-blob delta {} in change set", new.id());
            continue;
        };
        files.push(FileStat {
            id: new.id().to_string(),
            name: new
                .path()
                .map(|p| p.to_string_lossy().into_owned())
                .unwrap_or_default(),
            mode: u32::from(new.mode()),
            size: blob.size() as u64,
            is_binary: blob.is_binary(),
        });
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_rel_skips_empty_segments() {
        assert_eq!(join_rel("", ""), "");
        assert_eq!(join_rel("a", ""), "a");
        assert_eq!(join_rel("", "b"), "b");
        assert_eq!(join_rel("a", "b/c"), "a/b/c");
    }
}
