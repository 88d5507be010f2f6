//! Error types for `tipster-core`.
//!
//! Every backend and asset store converts its own error type into [`Error`]
//! so callers can branch on [`ErrorKind`] without knowing which backend is in
//! use.

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// A boxed error from a backend or asset host.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum Error {
  #[error("validation failed: {0}")]
  Validation(String),

  #[error("post not found: {0}")]
  PostNotFound(Uuid),

  #[error("comment not found: {0}")]
  CommentNotFound(Uuid),

  #[error("user not found: {0}")]
  UserNotFound(Uuid),

  #[error("asset store error: {0}")]
  AssetStore(#[source] BoxError),

  #[error("store error: {0}")]
  Store(#[source] BoxError),
}

/// Coarse classification of an [`Error`], for mapping onto responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
  Validation,
  NotFound,
  AssetStore,
  Store,
}

impl Error {
  pub fn validation(msg: impl Into<String>) -> Self {
    Self::Validation(msg.into())
  }

  pub fn asset_store(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::AssetStore(Box::new(e))
  }

  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::Validation(_) => ErrorKind::Validation,
      Self::PostNotFound(_) | Self::CommentNotFound(_) | Self::UserNotFound(_) => {
        ErrorKind::NotFound
      }
      Self::AssetStore(_) => ErrorKind::AssetStore,
      Self::Store(_) => ErrorKind::Store,
    }
  }

  pub fn is_not_found(&self) -> bool { self.kind() == ErrorKind::NotFound }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
