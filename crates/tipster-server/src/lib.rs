//! HTTP front end for Tipster.
//!
//! Mounts the JSON API under `/api`, optionally serves locally stored images
//! under `/assets`, and wraps everything in a request-tracing layer.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use serde::Deserialize;
use tipster_api::{Backend, api_router};
use tipster_core::asset::AssetStore;
use tower_http::{services::ServeDir, trace::TraceLayer};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `TIPSTER_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
  pub assets:     AssetConfig,
}

/// Where post images are kept.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AssetConfig {
  /// Files in `dir`, served by this process at `public_base_url`.
  Filesystem { dir: PathBuf, public_base_url: String },
  /// A remote asset host.
  Http {
    base_url:     String,
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,
  },
}

fn default_timeout_secs() -> u64 { 10 }

impl ServerConfig {
  /// Layer `file` (optional) under `TIPSTER_*` environment variables.
  ///
  /// Nested keys use a double underscore, e.g. `TIPSTER_ASSETS__DIR`.
  pub fn load(file: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(file).required(false))
      .add_source(
        config::Environment::with_prefix("TIPSTER")
          .prefix_separator("_")
          .separator("__"),
      )
      .build()?
      .try_deserialize()
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router.
///
/// `asset_dir` is served under `/assets` when images live on local disk.
pub fn router<S, A>(store: Arc<S>, assets: Arc<A>, asset_dir: Option<&Path>) -> Router
where
  S: Backend,
  A: AssetStore + 'static,
{
  let mut app = Router::new().nest("/api", api_router(store, assets));
  if let Some(dir) = asset_dir {
    app = app.nest_service("/assets", ServeDir::new(dir));
  }
  app.layer(TraceLayer::new_for_http())
}
