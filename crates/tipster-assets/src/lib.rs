//! Image hosts for post attachments.
//!
//! Two [`AssetStore`](tipster_core::asset::AssetStore) implementations:
//!
//! - [`FsAssetStore`] keeps one file per upload in a local directory that
//!   is served under a public base URL.
//! - [`HttpAssetStore`] talks to a remote asset host over HTTP.

pub mod error;
mod fs;
mod http;

pub use error::{Error, Result};
pub use fs::FsAssetStore;
pub use http::HttpAssetStore;

/// Reject anything that is not a bare file name.
///
/// Asset ids end up as path components (on disk) or path segments (in URLs),
/// so separators, parent references and hidden names are never accepted.
pub(crate) fn check_asset_id(asset_id: &str) -> Result<()> {
  let bad = asset_id.is_empty()
    || asset_id.starts_with('.')
    || asset_id.contains(['/', '\\', '\0', '?', '#']);
  if bad {
    return Err(Error::InvalidAssetId(asset_id.to_owned()));
  }
  Ok(())
}
