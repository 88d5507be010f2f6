//! Applying likes to posts and comments.

use std::sync::Arc;

use uuid::Uuid;

use crate::{
  Result,
  store::{CommentRepository, PostRepository},
};

/// Applies at most one like per user to each post or comment.
///
/// The membership check and the counter increment happen inside the store in
/// a single atomic step, so `like_count` always equals the number of distinct
/// likers.
pub struct LikeCoordinator<S> {
  store: Arc<S>,
}

impl<S> Clone for LikeCoordinator<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S> LikeCoordinator<S>
where
  S: PostRepository + CommentRepository,
{
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// Like a post on behalf of `user_id` and return the post's like count.
  ///
  /// A repeated like from the same user leaves the count unchanged.
  #[tracing::instrument(skip(self))]
  pub async fn like_post(&self, post_id: Uuid, user_id: Uuid) -> Result<u64> {
    let outcome = self
      .store
      .record_post_like(post_id, user_id)
      .await
      .map_err(Into::into)?;
    if !outcome.newly_liked {
      tracing::debug!("post already liked by user");
    }
    Ok(outcome.like_count)
  }

  /// Like a comment on behalf of `user_id`; same contract as
  /// [`like_post`](Self::like_post).
  #[tracing::instrument(skip(self))]
  pub async fn like_comment(&self, comment_id: Uuid, user_id: Uuid) -> Result<u64> {
    let outcome = self
      .store
      .record_comment_like(comment_id, user_id)
      .await
      .map_err(Into::into)?;
    if !outcome.newly_liked {
      tracing::debug!("comment already liked by user");
    }
    Ok(outcome.like_count)
  }
}
