//! Error type for `tipster-assets`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid asset id: {0:?}")]
  InvalidAssetId(String),

  #[error("filesystem error: {0}")]
  Io(#[from] std::io::Error),

  #[error("asset host request failed: {0}")]
  Http(#[from] reqwest::Error),

  #[error("asset host returned {status}: {body}")]
  Status { status: u16, body: String },
}

impl From<Error> for tipster_core::Error {
  fn from(e: Error) -> Self { tipster_core::Error::asset_store(e) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
