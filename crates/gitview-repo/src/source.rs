// SPDX-License-Identifier: AGPL-3.0
// Copyright (C) 2026 Gitview Contributors

//! Lazy byte sources
//!
//! A [`ByteSource`] is a deferred opener: constructing one performs no I/O,
//! and nothing is read until [`ByteSource::open`] is invoked. Producers are
//! the object store ([`OdbSource`]) and the plain filesystem
//! ([`FsSource`]); consumers that need the whole content use [`read_all`],
//! which releases the stream on every exit path.

use std::fs::File;
use std::io::{self, Cursor, Read};
use std::path::PathBuf;

use git2::{Oid, Repository};

/// A lazily-opened, immutable byte stream
pub trait ByteSource: Send + Sync {
    /// Acquire a readable stream over the content
    fn open(&self) -> io::Result<Box<dyn Read + Send>>;
}

/// Blob content out of a git object store, addressed by hash
pub struct OdbSource {
    git_dir: PathBuf,
    oid: Oid,
}

impl OdbSource {
    pub(crate) fn new(git_dir: PathBuf, oid: Oid) -> Self {
        Self { git_dir, oid }
    }
}

impl ByteSource for OdbSource {
    fn open(&self) -> io::Result<Box<dyn Read + Send>> {
        let repo = Repository::open(&self.git_dir).map_err(io::Error::other)?;
        let blob = repo.find_blob(self.oid).map_err(io::Error::other)?;
        // libgit2 decodes the blob in one piece; hand the bytes out as a
        // stream so all sources share the Read-based contract
        Ok(Box::new(Cursor::new(blob.content().to_vec())))
    }
}

/// A file on the local filesystem
///
/// Used for working-tree and whitelisted external reads. The path must be
/// validated by the caller before the source is constructed; `FsSource`
/// itself performs no sandbox checks.
pub struct FsSource {
    path: PathBuf,
}

impl FsSource {
    /// Wrap an already-validated filesystem path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ByteSource for FsSource {
    fn open(&self) -> io::Result<Box<dyn Read + Send>> {
        Ok(Box::new(File::open(&self.path)?))
    }
}

/// Open a source and read it to the end
///
/// The underlying stream is dropped on every exit path, including a failed
/// read after a successful open.
pub fn read_all(source: &dyn ByteSource) -> io::Result<Vec<u8>> {
    let mut reader = source.open()?;
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    Ok(buf)
}
