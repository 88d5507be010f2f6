//! Client for a remote image host.
//!
//! The host exposes two endpoints:
//!
//! - `POST {base}/assets` with the raw bytes and a `Content-Type` header,
//!   answering `{"url": ..., "asset_id": ...}`.
//! - `DELETE {base}/assets/{asset_id}`; `404` counts as already deleted.

use std::time::Duration;

use bytes::Bytes;
use reqwest::{Client, StatusCode, header::CONTENT_TYPE};
use tipster_core::asset::{AssetStore, UploadedAsset};

use crate::{Error, Result, check_asset_id};

/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Debug, Clone)]
pub struct HttpAssetStore {
  client:   Client,
  base_url: String,
}

impl HttpAssetStore {
  pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
    let client = Client::builder().timeout(timeout).build()?;
    let base_url = base_url.into().trim_end_matches('/').to_owned();
    Ok(Self { client, base_url })
  }

  fn url(&self, path: &str) -> String { format!("{}{}", self.base_url, path) }
}

/// Turn a non-success response into [`Error::Status`], keeping the body for
/// the log.
async fn status_error(resp: reqwest::Response) -> Error {
  let status = resp.status().as_u16();
  let body = resp.text().await.unwrap_or_default();
  Error::Status { status, body }
}

impl AssetStore for HttpAssetStore {
  type Error = Error;

  async fn upload<'a>(&'a self, bytes: Bytes, content_type: &'a str) -> Result<UploadedAsset> {
    let size = bytes.len();
    let resp = self
      .client
      .post(self.url("/assets"))
      .header(CONTENT_TYPE, content_type)
      .body(bytes)
      .send()
      .await?;

    if !resp.status().is_success() {
      return Err(status_error(resp).await);
    }
    let asset: UploadedAsset = resp.json().await?;
    // An id we could never pass back to `delete` would strand the image.
    if let Err(e) = check_asset_id(&asset.asset_id) {
      tracing::warn!(asset_id = %asset.asset_id, "asset host returned an unusable id");
      return Err(e);
    }
    tracing::debug!(asset_id = %asset.asset_id, size, "asset uploaded");
    Ok(asset)
  }

  async fn delete<'a>(&'a self, asset_id: &'a str) -> Result<()> {
    check_asset_id(asset_id)?;
    let resp = self
      .client
      .delete(self.url(&format!("/assets/{asset_id}")))
      .send()
      .await?;

    match resp.status() {
      s if s.is_success() => Ok(()),
      StatusCode::NOT_FOUND => {
        tracing::debug!(%asset_id, "asset already gone");
        Ok(())
      }
      _ => Err(status_error(resp).await),
    }
  }
}
