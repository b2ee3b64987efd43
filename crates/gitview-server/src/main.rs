// SPDX-License-Identifier: AGPL-3.0
// Copyright (C) 2026 Gitview Contributors

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gitview_config::{Config, ConfigLoader};
use gitview_server::{create_router, AppState};

/// Read-only multi-tenant git browsing service
#[derive(Parser, Debug)]
#[command(name = "gitview-server", version)]
struct Args {
    /// Configuration file (TOML, YAML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured listen host
    #[arg(long)]
    host: Option<String>,

    /// Override the configured listen port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Setup tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gitview=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    // Load configuration
    let mut config = match &args.config {
        Some(path) => ConfigLoader::new()
            .load_file(path)
            .await
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    // Registry construction must complete before any request is served
    let state = Arc::new(AppState::from_config(&config).context("building the tenant registry")?);
    if state.registry.is_empty() {
        tracing::warn!("Registry is empty: no discovery roots matched and no explicit entries");
    }

    let app = create_router(Arc::clone(&state));

    let bind_addr = config.server.bind_addr();
    tracing::info!("Gitview server listening on {}", bind_addr);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding {bind_addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}
