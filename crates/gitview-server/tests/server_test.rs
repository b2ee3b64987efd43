// SPDX-License-Identifier: AGPL-3.0
// Copyright (C) 2026 Gitview Contributors

//! Router-level tests: envelope shape, status mapping, raw content routes

use std::fs;
use std::path::Path;
use std::process::Command;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use gitview_config::{Config, RepoConfig, RootConfig, SiteConfig, UserConfig};
use gitview_server::{create_router, AppState};

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

fn make_repo(dir: &Path) {
    git(dir, &["init"]);
    git(dir, &["checkout", "-b", "main"]);
    git(dir, &["config", "user.name", "Test User"]);
    git(dir, &["config", "user.email", "test@example.com"]);
    fs::write(dir.join("top.txt"), "top v1\n").unwrap();
    fs::create_dir(dir.join("d1")).unwrap();
    fs::write(dir.join("d1/f1.txt"), "one\n").unwrap();
    git(dir, &["add", "-A"]);
    git(dir, &["commit", "-m", "initial"]);
}

/// A router serving one explicitly-configured repository as
/// `local/alice/project`, plus the extra whitelisted directory
fn fixture() -> (Router, TempDir, TempDir) {
    let root = TempDir::new().unwrap();
    let repo_dir = root.path().join("alice/project");
    fs::create_dir_all(&repo_dir).unwrap();
    make_repo(&repo_dir);

    let external = TempDir::new().unwrap();
    fs::write(external.path().join("note.txt"), "external note\n").unwrap();

    let mut user = UserConfig::default();
    user.repos
        .insert("project".to_string(), RepoConfig { path: repo_dir });
    let mut site = SiteConfig::default();
    site.users.insert("alice".to_string(), user);
    let config = Config {
        browse: gitview_config::BrowseConfig {
            max_find_depth: 0,
            external_whitelist: vec![external.path().to_path_buf()],
        },
        sites: std::collections::HashMap::from([("local".to_string(), site)]),
        ..Config::default()
    };

    let state = Arc::new(AppState::from_config(&config).unwrap());
    (create_router(state), root, external)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get(app, uri).await;
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn commit_endpoint_wraps_the_envelope() {
    let (app, _root, _ext) = fixture();
    let (status, body) = get_json(&app, "/api/local/alice/project/commit/main").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert_eq!(body["commit"]["message"].as_str().unwrap().trim(), "initial");
    assert_eq!(body["commit"]["author"]["name"], "Test User");
    assert!(body["commit"]["files"].as_array().unwrap().len() >= 2);
}

#[tokio::test]
async fn tree_endpoint_lists_root_and_subtrees() {
    let (app, _root, _ext) = fixture();
    let (status, body) = get_json(&app, "/api/local/alice/project/tree/main").await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["d1", "top.txt"]);

    let (status, body) = get_json(&app, "/api/local/alice/project/tree/main/d1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["entries"][0]["name"], "f1.txt");
}

#[tokio::test]
async fn find_endpoint_honors_the_depth_query() {
    let (app, _root, _ext) = fixture();
    let (status, body) = get_json(&app, "/api/local/alice/project/find/main").await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["d1", "top.txt", "d1/f1.txt"]);

    let (_, bounded) = get_json(&app, "/api/local/alice/project/find/main?depth=1").await;
    assert!(bounded["ok"].as_bool().unwrap());
}

#[tokio::test]
async fn file_endpoint_serves_raw_bytes_with_mime() {
    let (app, _root, _ext) = fixture();
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/local/alice/project/file/main/top.txt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("text/plain"));
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], b"top v1\n");
}

#[tokio::test]
async fn blob_endpoint_round_trips_tree_hashes() {
    let (app, _root, _ext) = fixture();
    let (_, tree) = get_json(&app, "/api/local/alice/project/tree/main/d1").await;
    let hash = tree["entries"][0]["hash"].as_str().unwrap();

    let (status, body) = get(&app, &format!("/api/local/alice/project/blob/{hash}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"one\n");
}

#[tokio::test]
async fn missing_levels_map_to_distinct_404_messages() {
    let (app, _root, _ext) = fixture();

    let (status, body) = get_json(&app, "/api/nowhere/alice/project/commit/main").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["ok"], false);
    assert!(body["error"].as_str().unwrap().contains("Site not found"));

    let (status, body) = get_json(&app, "/api/local/bob/project/commit/main").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("User not found"));

    let (status, body) = get_json(&app, "/api/local/alice/other/commit/main").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("Repository not found"));
}

#[tokio::test]
async fn core_failures_all_map_to_404() {
    let (app, _root, _ext) = fixture();

    let (status, body) = get_json(&app, "/api/local/alice/project/commit/no-branch").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["ok"], false);

    let (status, _) = get_json(&app, "/api/local/alice/project/tree/main/absent").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = get_json(&app, "/api/local/alice/project/file/main/d1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("directory"));

    let (status, _) = get_json(
        &app,
        "/api/local/alice/project/blob/0000000000000000000000000000000000000000",
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn resolver_route_dispatches_schemes() {
    let (app, _root, external) = fixture();

    let (status, body) = get(&app, "/api/local/alice/project/x/rev/main/top.txt").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"top v1\n");

    let (status, body) = get(&app, "/api/local/alice/project/x/work/top.txt").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"top v1\n");

    let ext_uri = format!(
        "/api/local/alice/project/x/ext{}/note.txt",
        external.path().display()
    );
    let (status, body) = get(&app, &ext_uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"external note\n");

    let (status, body) = get_json(&app, "/api/local/alice/project/x/nope/z").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn resolver_route_rejects_worktree_escapes() {
    let (app, _root, _ext) = fixture();
    let (status, body) = get_json(
        &app,
        "/api/local/alice/project/x/work/sub/../../../../etc/passwd",
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("Invalid path"));
}

#[tokio::test]
async fn discovery_and_explicit_config_compose() {
    let root = TempDir::new().unwrap();
    let discovered = root.path().join("carol/tools");
    fs::create_dir_all(&discovered).unwrap();
    make_repo(&discovered);

    let config = Config {
        roots: vec![RootConfig {
            site: "local".to_string(),
            path: root.path().to_path_buf(),
        }],
        ..Config::default()
    };
    let state = Arc::new(AppState::from_config(&config).unwrap());
    assert_eq!(state.registry.len(), 1);
    let app = create_router(state);

    let (status, body) = get_json(&app, "/api/local/carol/tools/commit/main").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
}
