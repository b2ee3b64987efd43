// SPDX-License-Identifier: AGPL-3.0
// Copyright (C) 2026 Gitview Contributors

//! HTTP request handlers
//!
//! Thin glue over the core: each handler looks the repository up in the
//! registry, runs the (synchronous) git work on the blocking pool, and
//! shapes the result into the JSON envelope or a raw byte response.

use std::path::Path;
use std::sync::Arc;

use axum::extract::{Path as UrlPath, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::task;

use gitview_repo::{read_all, RepoError, RepoHandle};
use gitview_resolver::{default_resolver, Resolver};

use crate::response::ApiError;
use crate::state::AppState;

fn lookup(state: &AppState, site: &str, user: &str, repo: &str) -> Result<RepoHandle, ApiError> {
    Ok(state.registry.lookup(site, user, repo)?.clone())
}

/// Run synchronous git work on the blocking pool
async fn blocking<T, F>(work: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, ApiError> + Send + 'static,
{
    task::spawn_blocking(work)
        .await
        .map_err(|err| ApiError::internal(err.to_string()))?
}

/// GET /api/:site/:user/:repo/commit/:rev
pub async fn commit(
    State(state): State<Arc<AppState>>,
    UrlPath((site, user, repo, rev)): UrlPath<(String, String, String, String)>,
) -> Result<Json<Value>, ApiError> {
    tracing::debug!("GET commit {}/{}/{} @ {}", site, user, repo, rev);
    let handle = lookup(&state, &site, &user, &repo)?;
    let commit = blocking(move || Ok(handle.commit(&rev)?)).await?;
    Ok(Json(json!({ "ok": true, "commit": commit })))
}

/// GET /api/:site/:user/:repo/tree/:rev — root tree listing
pub async fn tree_root(
    State(state): State<Arc<AppState>>,
    UrlPath((site, user, repo, rev)): UrlPath<(String, String, String, String)>,
) -> Result<Json<Value>, ApiError> {
    tree_inner(&state, &site, &user, &repo, rev, String::new()).await
}

/// GET /api/:site/:user/:repo/tree/:rev/*path
pub async fn tree(
    State(state): State<Arc<AppState>>,
    UrlPath((site, user, repo, rev, path)): UrlPath<(String, String, String, String, String)>,
) -> Result<Json<Value>, ApiError> {
    tree_inner(&state, &site, &user, &repo, rev, path).await
}

async fn tree_inner(
    state: &AppState,
    site: &str,
    user: &str,
    repo: &str,
    rev: String,
    path: String,
) -> Result<Json<Value>, ApiError> {
    tracing::debug!("GET tree {}/{}/{} @ {} '{}'", site, user, repo, rev, path);
    let handle = lookup(state, site, user, repo)?;
    let entries = blocking(move || Ok(handle.tree(&path, &rev)?)).await?;
    Ok(Json(json!({ "ok": true, "entries": entries })))
}

/// Query parameters of the find routes
#[derive(Debug, Deserialize)]
pub struct FindQuery {
    /// Override for the configured traversal bound; 0 means unbounded
    pub depth: Option<usize>,
}

/// GET /api/:site/:user/:repo/find/:rev — recursive enumeration from root
pub async fn find_root(
    State(state): State<Arc<AppState>>,
    UrlPath((site, user, repo, rev)): UrlPath<(String, String, String, String)>,
    Query(query): Query<FindQuery>,
) -> Result<Json<Value>, ApiError> {
    find_inner(&state, &site, &user, &repo, rev, String::new(), query).await
}

/// GET /api/:site/:user/:repo/find/:rev/*path
pub async fn find(
    State(state): State<Arc<AppState>>,
    UrlPath((site, user, repo, rev, path)): UrlPath<(String, String, String, String, String)>,
    Query(query): Query<FindQuery>,
) -> Result<Json<Value>, ApiError> {
    find_inner(&state, &site, &user, &repo, rev, path, query).await
}

async fn find_inner(
    state: &AppState,
    site: &str,
    user: &str,
    repo: &str,
    rev: String,
    path: String,
    query: FindQuery,
) -> Result<Json<Value>, ApiError> {
    let depth = query.depth.unwrap_or(state.max_find_depth);
    tracing::debug!(
        "GET find {}/{}/{} @ {} '{}' depth {}",
        site,
        user,
        repo,
        rev,
        path,
        depth
    );
    let handle = lookup(state, site, user, repo)?;
    let entries = blocking(move || Ok(handle.find(&path, &rev, depth)?)).await?;
    Ok(Json(json!({ "ok": true, "entries": entries })))
}

/// GET /api/:site/:user/:repo/file/:rev/*path — raw content at a revision
pub async fn file(
    State(state): State<Arc<AppState>>,
    UrlPath((site, user, repo, rev, path)): UrlPath<(String, String, String, String, String)>,
) -> Result<Response, ApiError> {
    tracing::debug!("GET file {}/{}/{} @ {} '{}'", site, user, repo, rev, path);
    let handle = lookup(&state, &site, &user, &repo)?;
    let mime = mime_guess::from_path(&path).first_or_octet_stream();
    let bytes = blocking(move || Ok(handle.file(&path, &rev)?.0)).await?;
    Ok(([(header::CONTENT_TYPE, mime.to_string())], bytes).into_response())
}

/// GET /api/:site/:user/:repo/blob/:hash — raw content by hash
pub async fn blob(
    State(state): State<Arc<AppState>>,
    UrlPath((site, user, repo, hash)): UrlPath<(String, String, String, String)>,
) -> Result<Response, ApiError> {
    tracing::debug!("GET blob {}/{}/{} {}", site, user, repo, hash);
    let handle = lookup(&state, &site, &user, &repo)?;
    let bytes = blocking(move || Ok(handle.blob(&hash)?)).await?;
    Ok((
        [(header::CONTENT_TYPE, mime_guess::mime::APPLICATION_OCTET_STREAM.to_string())],
        bytes,
    )
        .into_response())
}

/// GET /api/:site/:user/:repo/x/*args — drive the resolver chain
///
/// The first wildcard segment is the scheme; the remainder is passed as
/// one argument, except for `rev`, which takes the revision from the
/// next segment and the path from the rest. External (`ext`) paths are
/// absolute; the URL form omits the leading slash.
pub async fn resolve(
    State(state): State<Arc<AppState>>,
    UrlPath((site, user, repo, args_path)): UrlPath<(String, String, String, String)>,
) -> Result<Response, ApiError> {
    tracing::debug!("GET x {}/{}/{} '{}'", site, user, repo, args_path);
    let handle = lookup(&state, &site, &user, &repo)?;
    let args = split_resolver_args(&args_path);
    let mime = mime_guess::from_path(&args_path).first_or_octet_stream();

    let workdir = handle.workdir().map(Path::to_path_buf);
    let whitelist = state.external_whitelist.clone();
    let bytes = blocking(move || {
        let chain = default_resolver(handle, workdir, whitelist);
        let resolved = chain.resolve(&args)?;
        Ok(read_all(resolved.source.as_ref()).map_err(RepoError::Io)?)
    })
    .await?;
    Ok(([(header::CONTENT_TYPE, mime.to_string())], bytes).into_response())
}

/// Translate the `x` route wildcard into a resolver argument list
fn split_resolver_args(args_path: &str) -> Vec<String> {
    match args_path.split_once('/') {
        Some(("rev", rest)) => match rest.split_once('/') {
            Some((rev, path)) => vec!["rev".into(), rev.into(), path.into()],
            None => vec!["rev".into(), rest.into()],
        },
        Some(("ext", rest)) => vec!["ext".into(), format!("/{rest}")],
        Some((scheme, rest)) => vec![scheme.into(), rest.into()],
        None => vec![args_path.to_string()],
    }
}
