//! Creating posts, including the optional image upload.

use std::sync::Arc;

use bytes::Bytes;
use uuid::Uuid;

use crate::{
  Error, Result,
  asset::AssetStore,
  post::{NewPost, Post, PostImage},
  store::PostRepository,
};

/// Raw image bytes handed over by the upload layer.
#[derive(Debug, Clone)]
pub struct ImageUpload {
  pub bytes:        Bytes,
  pub content_type: String,
}

/// Everything the author submits when creating a post.
#[derive(Debug, Clone)]
pub struct PostDraft {
  pub sport:      String,
  pub prediction: String,
  pub reasoning:  String,
  pub tracked:    bool,
  pub image:      Option<ImageUpload>,
}

pub struct PostPublisher<S, A> {
  store:  Arc<S>,
  assets: Arc<A>,
}

impl<S, A> Clone for PostPublisher<S, A> {
  fn clone(&self) -> Self {
    Self { store: Arc::clone(&self.store), assets: Arc::clone(&self.assets) }
  }
}

impl<S, A> PostPublisher<S, A>
where
  S: PostRepository,
  A: AssetStore,
{
  pub fn new(store: Arc<S>, assets: Arc<A>) -> Self { Self { store, assets } }

  /// Validate the draft, upload its image if it has one, and persist it.
  ///
  /// A failed upload fails the whole create. If the store rejects the post
  /// after the upload succeeded, the uploaded image is removed again.
  #[tracing::instrument(skip(self, draft), fields(sport = %draft.sport))]
  pub async fn publish(&self, draft: PostDraft, creator_id: Uuid) -> Result<Post> {
    let PostDraft { sport, prediction, reasoning, tracked, image } = draft;

    let mut input = NewPost::new(creator_id, sport, prediction, reasoning);
    input.tracked = tracked;
    input.validate()?;

    if let Some(upload) = image {
      let asset = self
        .assets
        .upload(upload.bytes, &upload.content_type)
        .await
        .map_err(|e| {
          tracing::warn!(error = %e, "image upload failed");
          Error::asset_store(e)
        })?;
      let uploaded_id = asset.asset_id.clone();
      input.image = PostImage::new(asset.url, asset.asset_id);
      if input.image.is_none() {
        self.discard_upload(&uploaded_id).await;
        return Err(Error::AssetStore(
          "asset host returned an empty url or asset id".into(),
        ));
      }
    }

    let asset_id = input.image.as_ref().map(|i| i.asset_id.clone());

    match self.store.create_post(input).await {
      Ok(post) => {
        tracing::info!(post_id = %post.post_id, "post published");
        Ok(post)
      }
      Err(e) => {
        if let Some(asset_id) = asset_id {
          self.discard_upload(&asset_id).await;
        }
        Err(e.into())
      }
    }
  }

  async fn discard_upload(&self, asset_id: &str) {
    if asset_id.is_empty() {
      return;
    }
    if let Err(e) = self.assets.delete(asset_id).await {
      tracing::warn!(asset_id, error = %e, "failed to remove orphaned upload");
    }
  }
}
