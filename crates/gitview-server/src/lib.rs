// SPDX-License-Identifier: AGPL-3.0
// Copyright (C) 2026 Gitview Contributors

//! # Gitview HTTP Layer
//!
//! Thin glue exposing the browsing core over HTTP: one GET surface per
//! core operation, a uniform `{"ok": bool, ...}` JSON envelope, and a
//! resolver-driven raw route. Every core failure maps to a 404 with an
//! opaque message; success bodies are either the envelope or raw bytes
//! with a MIME type inferred from the file extension.

pub mod handlers;
pub mod response;
pub mod state;

pub use response::ApiError;
pub use state::AppState;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Create the axum router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/:site/:user/:repo/commit/:rev", get(handlers::commit))
        .route("/api/:site/:user/:repo/tree/:rev", get(handlers::tree_root))
        .route("/api/:site/:user/:repo/tree/:rev/*path", get(handlers::tree))
        .route("/api/:site/:user/:repo/find/:rev", get(handlers::find_root))
        .route("/api/:site/:user/:repo/find/:rev/*path", get(handlers::find))
        .route("/api/:site/:user/:repo/file/:rev/*path", get(handlers::file))
        .route("/api/:site/:user/:repo/blob/:hash", get(handlers::blob))
        .route("/api/:site/:user/:repo/x/*args", get(handlers::resolve))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
