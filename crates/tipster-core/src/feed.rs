//! Feed assembly: posts joined with creator summaries, newest first.

use std::{collections::HashMap, sync::Arc};

use uuid::Uuid;

use crate::{
  Error, Result,
  comment::Comment,
  post::{Post, Visibility},
  store::{CommentRepository, PostRepository, UserDirectory},
  user::CreatorSummary,
  view::{CommentView, PostThread, PostView, Profile},
};

/// Canonical form of a sport name: first character upper-cased, the rest
/// lower-cased (`"BASEBALL"` and `"baseball"` both become `"Baseball"`).
pub fn normalize_sport(raw: &str) -> String {
  let mut chars = raw.chars();
  match chars.next() {
    Some(first) => {
      let mut out: String = first.to_uppercase().collect();
      out.push_str(&chars.as_str().to_lowercase());
      out
    }
    None => String::new(),
  }
}

/// Builds the read models served to feed, profile and post pages.
pub struct FeedAssembler<S> {
  store: Arc<S>,
}

impl<S> Clone for FeedAssembler<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S> FeedAssembler<S>
where
  S: PostRepository + CommentRepository + UserDirectory,
{
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  // ── Feeds ─────────────────────────────────────────────────────────────────

  /// Every live post, newest first.
  pub async fn get_feed(&self) -> Result<Vec<PostView>> {
    self.get_feed_with(Visibility::Live).await
  }

  pub async fn get_feed_with(&self, visibility: Visibility) -> Result<Vec<PostView>> {
    let posts = self.store.find_all_posts(visibility).await.map_err(Into::into)?;
    self.attach_creators(posts).await
  }

  /// Live posts for one sport. `sport_raw` may use any capitalisation.
  pub async fn get_feed_by_sport(&self, sport_raw: &str) -> Result<Vec<PostView>> {
    self.get_feed_by_sport_with(sport_raw, Visibility::Live).await
  }

  pub async fn get_feed_by_sport_with(
    &self,
    sport_raw: &str,
    visibility: Visibility,
  ) -> Result<Vec<PostView>> {
    let sport = normalize_sport(sport_raw);
    let posts = self
      .store
      .find_posts_by_sport(&sport, visibility)
      .await
      .map_err(Into::into)?;
    self.attach_creators(posts).await
  }

  /// Posts created by `user_id`, newest first. An unknown user simply has
  /// no posts.
  pub async fn get_profile_feed(&self, user_id: Uuid) -> Result<Vec<PostView>> {
    self.get_profile_feed_with(user_id, Visibility::Live).await
  }

  pub async fn get_profile_feed_with(
    &self,
    user_id: Uuid,
    visibility: Visibility,
  ) -> Result<Vec<PostView>> {
    let posts = self
      .store
      .find_posts_by_creator(user_id, visibility)
      .await
      .map_err(Into::into)?;
    self.attach_creators(posts).await
  }

  /// The full user record together with their posts.
  pub async fn get_profile(&self, user_id: Uuid) -> Result<Profile> {
    let user = self
      .store
      .get_user(user_id)
      .await
      .map_err(Into::into)?
      .ok_or(Error::UserNotFound(user_id))?;
    let posts = self.get_profile_feed(user_id).await?;
    Ok(Profile { user, posts })
  }

  // ── Single post ───────────────────────────────────────────────────────────

  /// A post with its comments, newest comment first.
  pub async fn get_post_view(&self, post_id: Uuid) -> Result<PostThread> {
    self.get_post_view_with(post_id, Visibility::Live).await
  }

  pub async fn get_post_view_with(
    &self,
    post_id: Uuid,
    visibility: Visibility,
  ) -> Result<PostThread> {
    let post = self
      .store
      .find_post(post_id)
      .await
      .map_err(Into::into)?
      .filter(|p| visibility.admits(p))
      .ok_or(Error::PostNotFound(post_id))?;

    let mut views = self.attach_creators(vec![post]).await?;
    let post = views.pop().ok_or(Error::PostNotFound(post_id))?;

    let comments = self
      .store
      .find_comments_by_post(post_id)
      .await
      .map_err(Into::into)?;
    let comments = self.attach_authors(comments).await?;

    Ok(PostThread { post, comments })
  }

  // ── Projection ────────────────────────────────────────────────────────────

  async fn summaries_for(
    &self,
    ids: impl Iterator<Item = Uuid>,
  ) -> Result<HashMap<Uuid, CreatorSummary>> {
    let mut ids: Vec<Uuid> = ids.collect();
    ids.sort_unstable();
    ids.dedup();
    self.store.creator_summaries(&ids).await.map_err(Into::into)
  }

  async fn attach_creators(&self, mut posts: Vec<Post>) -> Result<Vec<PostView>> {
    // Stable, so ties keep the store's order.
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    let summaries = self.summaries_for(posts.iter().map(|p| p.creator_id)).await?;

    posts
      .into_iter()
      .map(|post| {
        let creator = summaries
          .get(&post.creator_id)
          .cloned()
          .ok_or(Error::UserNotFound(post.creator_id))?;
        Ok(PostView { post, creator })
      })
      .collect()
  }

  async fn attach_authors(&self, mut comments: Vec<Comment>) -> Result<Vec<CommentView>> {
    comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    let summaries = self.summaries_for(comments.iter().map(|c| c.author_id)).await?;

    comments
      .into_iter()
      .map(|comment| {
        let author = summaries
          .get(&comment.author_id)
          .ok_or(Error::UserNotFound(comment.author_id))?;
        Ok(CommentView {
          author_display_name: author.display_name.clone(),
          comment,
        })
      })
      .collect()
  }
}
