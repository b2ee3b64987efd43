// SPDX-License-Identifier: AGPL-3.0
// Copyright (C) 2026 Gitview Contributors

//! Lexical path normalization
//!
//! Sandbox checks must run before any filesystem access, so `.` and `..`
//! segments are resolved purely lexically: no symlink resolution, no
//! existence checks.

use std::path::{Component, Path, PathBuf};

/// Resolve `.` and `..` segments without touching the filesystem
///
/// For absolute paths, `..` at the root stays at the root. For relative
/// paths, `..` with nothing left to pop is kept, so a caller comparing the
/// result against an allowed prefix still sees the escape.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(Component::ParentDir.as_os_str()),
            },
            Component::Normal(part) => out.push(part),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}
