// SPDX-License-Identifier: AGPL-3.0
// Copyright (C) 2026 Gitview Contributors

//! # Gitview Resolver Chain
//!
//! A [`Resolver`] maps a flat list of string arguments onto a lazily-opened
//! byte stream. Four variants compose into a chain:
//!
//! - [`RevResolver`] — `[revision, path]`, content out of the object store
//! - [`WorktreeResolver`] — `[file]`, the live checkout, sandboxed to the
//!   project root
//! - [`ExternalResolver`] — `[path]`, filesystem reads gated by a prefix
//!   whitelist
//! - [`RouteResolver`] — dispatches on a leading scheme token and forwards
//!   the remaining arguments to a sub-resolver
//!
//! Resolvers are stateless functions of their configuration; a single
//! instance is safe for unlimited concurrent invocations. Sandbox
//! violations fail closed before any filesystem access.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use gitview_resolver::{default_resolver, Resolver};
//! use gitview_repo::RepoHandle;
//!
//! let repo = RepoHandle::open("/srv/git/alice/project")?;
//! let chain = default_resolver(repo, Some("/srv/git/alice/project".into()), vec![]);
//! let resolved = chain.resolve(&["rev".into(), "main".into(), "README.md".into()])?;
//! let reader = resolved.source.open()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod path;

pub use error::{ResolveError, ResolveResult};
pub use path::normalize;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use gitview_repo::{ByteSource, FileStat, FsSource, RepoHandle};

/// Outcome of a successful resolution: a deferred byte source plus
/// whatever metadata the resolver could compute
pub struct Resolved {
    /// Lazily-opened content
    pub source: Box<dyn ByteSource>,
    /// File metadata, when the source came out of the object store
    pub stat: Option<FileStat>,
}

/// Maps an argument list onto a byte stream
///
/// Interpretation of the arguments is resolver-specific; no invocation
/// carries state across calls.
pub trait Resolver: Send + Sync {
    /// Resolve `args` to a lazily-opened byte source
    fn resolve(&self, args: &[String]) -> ResolveResult<Resolved>;
}

/// Resolves `[revision, path]` out of a repository's object store
pub struct RevResolver {
    repo: RepoHandle,
}

impl RevResolver {
    /// Wrap a repository handle
    pub fn new(repo: RepoHandle) -> Self {
        Self { repo }
    }
}

impl Resolver for RevResolver {
    fn resolve(&self, args: &[String]) -> ResolveResult<Resolved> {
        let [rev, path] = args else {
            return Err(ResolveError::Arity {
                resolver: "RevResolver",
                expected: 2,
                got: args.len(),
            });
        };
        let (source, stat) = self.repo.file_opener(path, rev)?;
        Ok(Resolved {
            source: Box::new(source),
            stat: Some(stat),
        })
    }
}

/// Resolves `[file]` against the live working tree
///
/// The joined path must keep the project root as a component-wise prefix
/// after lexical normalization; any escape fails with
/// [`ResolveError::InvalidPath`] before the filesystem is touched.
pub struct WorktreeResolver {
    project_root: PathBuf,
}

impl WorktreeResolver {
    /// Sandbox worktree reads to `project_root`
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: normalize(&project_root.into()),
        }
    }
}

impl Resolver for WorktreeResolver {
    fn resolve(&self, args: &[String]) -> ResolveResult<Resolved> {
        let [name] = args else {
            return Err(ResolveError::Arity {
                resolver: "WorktreeResolver",
                expected: 1,
                got: args.len(),
            });
        };
        let joined = normalize(&self.project_root.join(name));
        if !joined.starts_with(&self.project_root) {
            debug!("Worktree path '{}' escapes the project root", name);
            return Err(ResolveError::InvalidPath(name.clone()));
        }
        Ok(Resolved {
            source: Box::new(FsSource::new(joined)),
            stat: None,
        })
    }
}

/// Resolves `[path]` anywhere on the filesystem, gated by a whitelist
///
/// The argument is lexically normalized first and the whitelist is checked
/// against the normalized path, never the raw input. The whitelist is the
/// sole safety boundary for these reads; an empty whitelist admits
/// nothing.
pub struct ExternalResolver {
    whitelist: Vec<PathBuf>,
}

impl ExternalResolver {
    /// Allow reads under the given path prefixes
    pub fn new(whitelist: Vec<PathBuf>) -> Self {
        Self {
            whitelist: whitelist.into_iter().map(|p| normalize(&p)).collect(),
        }
    }
}

impl Resolver for ExternalResolver {
    fn resolve(&self, args: &[String]) -> ResolveResult<Resolved> {
        let [raw] = args else {
            return Err(ResolveError::Arity {
                resolver: "ExternalResolver",
                expected: 1,
                got: args.len(),
            });
        };
        let path = normalize(Path::new(raw));
        if !self.whitelist.iter().any(|prefix| path.starts_with(prefix)) {
            debug!("External path '{}' matches no whitelisted prefix", path.display());
            return Err(ResolveError::NotWhitelisted(path));
        }
        Ok(Resolved {
            source: Box::new(FsSource::new(path)),
            stat: None,
        })
    }
}

/// Dispatches on a leading scheme token
///
/// The first argument selects a sub-resolver; the remaining arguments are
/// forwarded to it. Sub-resolvers may themselves be `RouteResolver`s,
/// giving natural recursive composition.
#[derive(Default)]
pub struct RouteResolver {
    routes: HashMap<String, Box<dyn Resolver>>,
}

impl RouteResolver {
    /// An empty routing table
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `resolver` under `scheme`, replacing any previous entry
    pub fn route(mut self, scheme: impl Into<String>, resolver: impl Resolver + 'static) -> Self {
        self.routes.insert(scheme.into(), Box::new(resolver));
        self
    }
}

impl Resolver for RouteResolver {
    fn resolve(&self, args: &[String]) -> ResolveResult<Resolved> {
        let Some((scheme, rest)) = args.split_first() else {
            return Err(ResolveError::Arity {
                resolver: "RouteResolver",
                expected: 1,
                got: 0,
            });
        };
        match self.routes.get(scheme) {
            Some(resolver) => resolver.resolve(rest),
            None => Err(ResolveError::UnknownScheme(scheme.clone())),
        }
    }
}

/// The default wiring: `rev`, `work` and `ext` schemes under one router
///
/// `work` is only registered when the repository has a working tree;
/// driving it against a bare repository yields
/// [`ResolveError::UnknownScheme`].
pub fn default_resolver(
    repo: RepoHandle,
    project_root: Option<PathBuf>,
    whitelist: Vec<PathBuf>,
) -> RouteResolver {
    let mut router = RouteResolver::new()
        .route("rev", RevResolver::new(repo))
        .route("ext", ExternalResolver::new(whitelist));
    if let Some(root) = project_root {
        router = router.route("work", WorktreeResolver::new(root));
    }
    router
}
