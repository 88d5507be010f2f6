//! Cascading post deletion across the store and the image host.

use std::sync::Arc;

use uuid::Uuid;

use crate::{
  Error, Result,
  asset::AssetStore,
  store::{CommentRepository, PostRepository},
};

/// Deletes a post, its comments and its hosted image as one logical unit.
///
/// The steps are sequential, not transactional. The image goes first: if the
/// host refuses, nothing is removed and the post stays discoverable so the
/// deletion can be retried.
pub struct PostDeletionCoordinator<S, A> {
  store:  Arc<S>,
  assets: Arc<A>,
}

impl<S, A> Clone for PostDeletionCoordinator<S, A> {
  fn clone(&self) -> Self {
    Self { store: Arc::clone(&self.store), assets: Arc::clone(&self.assets) }
  }
}

impl<S, A> PostDeletionCoordinator<S, A>
where
  S: PostRepository + CommentRepository,
  A: AssetStore,
{
  pub fn new(store: Arc<S>, assets: Arc<A>) -> Self { Self { store, assets } }

  /// Delete `post_id`.
  ///
  /// Ownership must already have been checked by the caller; `requester_id`
  /// is only recorded on the tracing span.
  #[tracing::instrument(skip(self))]
  pub async fn delete_post(&self, post_id: Uuid, requester_id: Uuid) -> Result<()> {
    let post = self
      .store
      .find_post(post_id)
      .await
      .map_err(Into::into)?
      .ok_or(Error::PostNotFound(post_id))?;

    if let Some(asset_id) = post.asset_id()
      && let Err(e) = self.assets.delete(asset_id).await
    {
      tracing::warn!(asset_id, error = %e, "image deletion failed, post left intact");
      return Err(Error::asset_store(e));
    }

    let mut comments = self
      .store
      .delete_comments_by_post(post_id)
      .await
      .map_err(Into::into)?;

    let removed = match self.store.delete_post(post_id).await {
      Ok(removed) => removed,
      Err(e) => {
        // A comment added after the cascade blocks the delete through the
        // foreign key. Sweep once more before giving up.
        let e: Error = e.into();
        tracing::warn!(error = %e, "post delete failed after comment cascade, sweeping comments again");
        comments += self
          .store
          .delete_comments_by_post(post_id)
          .await
          .map_err(Into::into)?;
        self.store.delete_post(post_id).await.map_err(|e| {
          let e: Error = e.into();
          tracing::warn!(
            error = %e,
            image_removed = post.asset_id().is_some(),
            "post kept after a second comment sweep; repeat the delete to finish"
          );
          e
        })?
      }
    };
    if !removed {
      tracing::debug!("post vanished before the final delete");
    }

    tracing::info!(comments, "post deleted");
    Ok(())
  }
}
