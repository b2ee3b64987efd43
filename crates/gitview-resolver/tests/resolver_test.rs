// SPDX-License-Identifier: AGPL-3.0
// Copyright (C) 2026 Gitview Contributors

//! Integration tests for the resolver chain

use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;
use std::process::Command;

use gitview_repo::{read_all, ByteSource, RepoHandle};
use gitview_resolver::{
    default_resolver, ExternalResolver, Resolved, ResolveError, Resolver, RouteResolver,
    WorktreeResolver,
};
use tempfile::TempDir;

fn git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("Failed to run git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
}

/// A repository with one committed README and a matching working tree
fn fixture_repo() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    git(dir.path(), &["init"]);
    git(dir.path(), &["checkout", "-b", "main"]);
    git(dir.path(), &["config", "user.name", "Test User"]);
    git(dir.path(), &["config", "user.email", "test@example.com"]);
    fs::write(dir.path().join("README.md"), "# fixture\n").unwrap();
    git(dir.path(), &["add", "-A"]);
    git(dir.path(), &["commit", "-m", "initial"]);
    dir
}

fn args(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

/// Test resolver that answers with a fixed tag
struct Tagged(&'static str);

impl Resolver for Tagged {
    fn resolve(&self, _args: &[String]) -> Result<Resolved, ResolveError> {
        struct Fixed(&'static str);
        impl ByteSource for Fixed {
            fn open(&self) -> std::io::Result<Box<dyn Read + Send>> {
                Ok(Box::new(Cursor::new(self.0.as_bytes().to_vec())))
            }
        }
        Ok(Resolved {
            source: Box::new(Fixed(self.0)),
            stat: None,
        })
    }
}

#[test]
fn rev_resolver_reads_committed_content() {
    let dir = fixture_repo();
    let repo = RepoHandle::open(dir.path()).unwrap();
    let chain = default_resolver(repo, None, vec![]);

    let resolved = chain.resolve(&args(&["rev", "main", "README.md"])).unwrap();
    assert_eq!(read_all(resolved.source.as_ref()).unwrap(), b"# fixture\n");
    let stat = resolved.stat.expect("rev resolution carries metadata");
    assert_eq!(stat.name, "README.md");
    assert_eq!(stat.size, b"# fixture\n".len() as u64);
}

#[test]
fn rev_resolver_rejects_wrong_arity() {
    let dir = fixture_repo();
    let repo = RepoHandle::open(dir.path()).unwrap();
    let chain = default_resolver(repo, None, vec![]);

    assert!(matches!(
        chain.resolve(&args(&["rev", "main"])),
        Err(ResolveError::Arity { got: 1, .. })
    ));
    assert!(matches!(
        chain.resolve(&args(&["rev", "main", "README.md", "extra"])),
        Err(ResolveError::Arity { got: 3, .. })
    ));
}

#[test]
fn worktree_resolver_reads_the_live_checkout() {
    let dir = fixture_repo();
    fs::write(dir.path().join("untracked.txt"), "not committed\n").unwrap();
    let resolver = WorktreeResolver::new(dir.path());

    let resolved = resolver.resolve(&args(&["untracked.txt"])).unwrap();
    assert_eq!(
        read_all(resolved.source.as_ref()).unwrap(),
        b"not committed\n"
    );
    assert!(resolved.stat.is_none());
}

#[test]
fn worktree_escape_fails_before_any_filesystem_access() {
    // A root that does not exist on disk: if validation ran after I/O the
    // error would be a filesystem one, not InvalidPath.
    let resolver = WorktreeResolver::new("/no/such/project/root");

    assert!(matches!(
        resolver.resolve(&args(&["../../etc/passwd"])),
        Err(ResolveError::InvalidPath(_))
    ));
    assert!(matches!(
        resolver.resolve(&args(&["a/../../../etc/passwd"])),
        Err(ResolveError::InvalidPath(_))
    ));
    assert!(matches!(
        resolver.resolve(&args(&["/etc/passwd"])),
        Err(ResolveError::InvalidPath(_))
    ));
}

#[test]
fn worktree_allows_dotdot_that_stays_inside() {
    let dir = fixture_repo();
    let resolver = WorktreeResolver::new(dir.path());

    let resolved = resolver
        .resolve(&args(&["subdir/../README.md"]))
        .unwrap();
    assert_eq!(read_all(resolved.source.as_ref()).unwrap(), b"# fixture\n");
}

#[test]
fn external_resolver_checks_the_normalized_path() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("allowed.txt"), "external\n").unwrap();
    let resolver = ExternalResolver::new(vec![dir.path().to_path_buf()]);

    let inside = format!("{}/sub/../allowed.txt", dir.path().display());
    let resolved = resolver.resolve(&args(&[&inside])).unwrap();
    assert_eq!(read_all(resolved.source.as_ref()).unwrap(), b"external\n");

    // Normalization runs before the whitelist check, so a path that
    // lexically escapes the prefix is rejected even though its raw form
    // starts with a whitelisted string
    let escape = format!("{}/../etc/passwd", dir.path().display());
    assert!(matches!(
        resolver.resolve(&args(&[&escape])),
        Err(ResolveError::NotWhitelisted(_))
    ));
}

#[test]
fn external_resolver_with_empty_whitelist_admits_nothing() {
    let resolver = ExternalResolver::new(vec![]);
    assert!(matches!(
        resolver.resolve(&args(&["/etc/hostname"])),
        Err(ResolveError::NotWhitelisted(_))
    ));
}

#[test]
fn route_resolver_dispatches_by_scheme() {
    let router = RouteResolver::new()
        .route("rev", Tagged("rev"))
        .route("work", Tagged("work"));

    let resolved = router.resolve(&args(&["work", "README.md"])).unwrap();
    assert_eq!(read_all(resolved.source.as_ref()).unwrap(), b"work");

    assert!(matches!(
        router.resolve(&args(&["nope", "x"])),
        Err(ResolveError::UnknownScheme(scheme)) if scheme == "nope"
    ));
    assert!(matches!(
        router.resolve(&[]),
        Err(ResolveError::Arity { got: 0, .. })
    ));
}

#[test]
fn route_resolver_forwards_remaining_arguments() {
    struct Probe;
    impl Resolver for Probe {
        fn resolve(&self, args: &[String]) -> Result<Resolved, ResolveError> {
            assert_eq!(args, ["README.md"]);
            Err(ResolveError::UnknownScheme("probe-done".into()))
        }
    }
    let router = RouteResolver::new().route("work", Probe);
    assert!(matches!(
        router.resolve(&args(&["work", "README.md"])),
        Err(ResolveError::UnknownScheme(s)) if s == "probe-done"
    ));
}

#[test]
fn routers_nest_recursively() {
    let inner = RouteResolver::new().route("deep", Tagged("nested"));
    let outer = RouteResolver::new().route("sub", inner);

    let resolved = outer.resolve(&args(&["sub", "deep", "x"])).unwrap();
    assert_eq!(read_all(resolved.source.as_ref()).unwrap(), b"nested");
}

#[test]
fn default_wiring_covers_all_three_schemes() {
    let dir = fixture_repo();
    let repo = RepoHandle::open(dir.path()).unwrap();
    let chain = default_resolver(
        repo,
        Some(dir.path().to_path_buf()),
        vec![dir.path().to_path_buf()],
    );

    assert!(chain.resolve(&args(&["rev", "main", "README.md"])).is_ok());
    assert!(chain.resolve(&args(&["work", "README.md"])).is_ok());
    let external = format!("{}/README.md", dir.path().display());
    assert!(chain.resolve(&args(&["ext", &external])).is_ok());
}

#[test]
fn bare_repositories_expose_no_work_scheme() {
    let dir = fixture_repo();
    let repo = RepoHandle::open(dir.path()).unwrap();
    let chain = default_resolver(repo, None, vec![]);

    assert!(matches!(
        chain.resolve(&args(&["work", "README.md"])),
        Err(ResolveError::UnknownScheme(_))
    ));
}
