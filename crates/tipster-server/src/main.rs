//! tipster server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens an
//! in-process SQLite store and the configured image host, and serves the
//! JSON API over HTTP.

use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::Context as _;
use axum::Router;
use clap::Parser;
use tipster_assets::{FsAssetStore, HttpAssetStore};
use tipster_server::{AssetConfig, ServerConfig, expand_tilde, router};
use tipster_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Tipster prediction feed server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let server_cfg = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to load configuration from {:?}", cli.config))?;

  let store_path = expand_tilde(&server_cfg.store_path);
  if let Some(parent) = store_path.parent()
    && !parent.as_os_str().is_empty()
  {
    tokio::fs::create_dir_all(parent)
      .await
      .with_context(|| format!("failed to create {parent:?}"))?;
  }
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;
  let store = Arc::new(store);

  let app = match &server_cfg.assets {
    AssetConfig::Filesystem { dir, public_base_url } => {
      let dir = expand_tilde(dir);
      let assets = FsAssetStore::open(&dir, public_base_url.as_str())
        .await
        .with_context(|| format!("failed to open image directory {dir:?}"))?;
      tracing::info!(?dir, "storing images on local disk");
      router(store, Arc::new(assets), Some(dir.as_path()))
    }
    AssetConfig::Http { base_url, timeout_secs } => {
      let assets = HttpAssetStore::new(base_url.as_str(), Duration::from_secs(*timeout_secs))
        .context("failed to build image host client")?;
      tracing::info!(%base_url, "using remote image host");
      router(store, Arc::new(assets), None)
    }
  };

  serve(app, &format!("{}:{}", server_cfg.host, server_cfg.port)).await
}

async fn serve(app: Router, address: &str) -> anyhow::Result<()> {
  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
