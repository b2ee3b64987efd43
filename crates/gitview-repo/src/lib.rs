// SPDX-License-Identifier: AGPL-3.0
// Copyright (C) 2026 Gitview Contributors

//! # Gitview Repository Layer
//!
//! This crate turns a human-supplied revision string plus a path into an
//! immutable byte stream, backed by a git object store. It is the core of
//! Gitview's read-only browsing service.
//!
//! The entry point is [`RepoHandle`], an opaque handle onto one repository:
//!
//! - **Revision resolution**: any expression libgit2 understands (branch,
//!   tag, short/long hash, `HEAD~2`, ...) resolves to a commit at call time.
//! - **Tree browsing**: immediate children of a directory at a revision, or
//!   a depth-bounded recursive enumeration ([`RepoHandle::find`]).
//! - **Content access**: lazy openers and eager readers for files addressed
//!   by `(path, revision)` and blobs addressed purely by hash.
//!
//! Every operation re-reads the backing store, so a handle is cheap to
//! clone and safe for unbounded concurrent use.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use gitview_repo::RepoHandle;
//!
//! let repo = RepoHandle::open("/srv/git/alice/project")?;
//! let (bytes, stat) = repo.file("src/main.rs", "main")?;
//! assert_eq!(bytes.len() as u64, stat.size);
//! # Ok::<(), gitview_repo::RepoError>(())
//! ```

pub mod error;
pub mod handle;
pub mod model;
pub mod source;

pub use error::{RepoError, RepoResult};
pub use handle::RepoHandle;
pub use model::{Commit, FileStat, Signature, TreeEntry, MODE_TREE};
pub use source::{read_all, ByteSource, FsSource, OdbSource};
