//! The [`AssetStore`] trait: the external host for post images.

use std::future::Future;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Where an uploaded asset can be fetched from and how to delete it later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedAsset {
  pub url:      String,
  pub asset_id: String,
}

/// Abstraction over an image host.
pub trait AssetStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Store `bytes` and return its public URL and handle.
  fn upload<'a>(
    &'a self,
    bytes: Bytes,
    content_type: &'a str,
  ) -> impl Future<Output = Result<UploadedAsset, Self::Error>> + Send + 'a;

  /// Remove an asset. Deleting an asset that is already gone succeeds.
  fn delete<'a>(
    &'a self,
    asset_id: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}
