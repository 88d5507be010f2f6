//! Image storage on the local filesystem.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use sha2::{Digest, Sha256};
use tipster_core::asset::{AssetStore, UploadedAsset};
use uuid::Uuid;

use crate::{Error, Result, check_asset_id};

/// Stores each upload as `{uuid}.{ext}` inside `dir`.
///
/// Every upload gets its own file, even for identical bytes, so deleting one
/// post's image never touches another post's.
#[derive(Debug, Clone)]
pub struct FsAssetStore {
  dir:             PathBuf,
  public_base_url: String,
}

impl FsAssetStore {
  /// Create the store, creating `dir` if it does not exist yet.
  pub async fn open(
    dir: impl Into<PathBuf>,
    public_base_url: impl Into<String>,
  ) -> Result<Self> {
    let dir = dir.into();
    tokio::fs::create_dir_all(&dir).await?;
    let public_base_url = public_base_url.into().trim_end_matches('/').to_owned();
    Ok(Self { dir, public_base_url })
  }

  pub fn dir(&self) -> &Path { &self.dir }

  pub fn url_for(&self, asset_id: &str) -> String {
    format!("{}/{}", self.public_base_url, asset_id)
  }

  fn path_for(&self, asset_id: &str) -> Result<PathBuf> {
    check_asset_id(asset_id)?;
    Ok(self.dir.join(asset_id))
  }
}

/// File extension for a MIME type; parameters such as `charset` are ignored.
fn extension_for(content_type: &str) -> &'static str {
  let essence = content_type.split(';').next().unwrap_or_default().trim();
  match essence.to_ascii_lowercase().as_str() {
    "image/png" => "png",
    "image/jpeg" | "image/jpg" => "jpg",
    "image/gif" => "gif",
    "image/webp" => "webp",
    "image/avif" => "avif",
    _ => "bin",
  }
}

impl AssetStore for FsAssetStore {
  type Error = Error;

  async fn upload<'a>(&'a self, bytes: Bytes, content_type: &'a str) -> Result<UploadedAsset> {
    let asset_id = format!("{}.{}", Uuid::new_v4(), extension_for(content_type));
    let path = self.path_for(&asset_id)?;

    // Write beside the target and rename so readers never see a partial file.
    let partial = self.dir.join(format!("{asset_id}.partial"));
    tokio::fs::write(&partial, &bytes).await?;
    tokio::fs::rename(&partial, &path).await?;

    let sha256 = hex::encode(Sha256::digest(&bytes));
    tracing::debug!(%asset_id, %sha256, size = bytes.len(), "asset stored");

    Ok(UploadedAsset { url: self.url_for(&asset_id), asset_id })
  }

  async fn delete<'a>(&'a self, asset_id: &'a str) -> Result<()> {
    let path = self.path_for(asset_id)?;
    match tokio::fs::remove_file(&path).await {
      Ok(()) => {
        tracing::debug!(%asset_id, "asset removed");
        Ok(())
      }
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
      Err(e) => Err(e.into()),
    }
  }
}
