//! Repository traits implemented by storage backends (e.g.
//! `tipster-store-sqlite`).
//!
//! The coordinators in this crate are generic over these traits and never
//! see a concrete backend.

use std::{collections::HashMap, future::Future};

use uuid::Uuid;

use crate::{
  comment::{Comment, NewComment},
  post::{LikeOutcome, NewPost, Post, Visibility},
  user::{CreatorSummary, User},
};

// ─── Backend ─────────────────────────────────────────────────────────────────

/// Shared error type for every repository a backend implements.
///
/// Backends convert into [`crate::Error`] so validation and not-found
/// failures keep their kind when they pass through a coordinator.
pub trait Store: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static + Into<crate::Error>;
}

// ─── Posts ───────────────────────────────────────────────────────────────────

/// All methods return `Send` futures so the traits can be used in
/// multi-threaded async runtimes.
pub trait PostRepository: Store {
  /// Validate and persist a new post. `like_count` starts at zero and
  /// `created_at` is set by the store.
  ///
  /// Fails with a validation error on an empty required field and with
  /// `UserNotFound` if the creator does not exist.
  fn create_post(
    &self,
    input: NewPost,
  ) -> impl Future<Output = Result<Post, Self::Error>> + Send + '_;

  /// Retrieve a post by id. Returns `None` if not found.
  fn find_post(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Post>, Self::Error>> + Send + '_;

  /// Posts created by `creator_id`, newest first.
  fn find_posts_by_creator(
    &self,
    creator_id: Uuid,
    visibility: Visibility,
  ) -> impl Future<Output = Result<Vec<Post>, Self::Error>> + Send + '_;

  /// Every post, newest first.
  fn find_all_posts(
    &self,
    visibility: Visibility,
  ) -> impl Future<Output = Result<Vec<Post>, Self::Error>> + Send + '_;

  /// Posts whose sport equals `sport` exactly, newest first. Callers
  /// normalise the sport name before querying.
  fn find_posts_by_sport<'a>(
    &'a self,
    sport: &'a str,
    visibility: Visibility,
  ) -> impl Future<Output = Result<Vec<Post>, Self::Error>> + Send + 'a;

  /// Atomically add one to the post's like counter without consulting the
  /// liker set. Fails with `PostNotFound` if the post is absent.
  fn increment_post_likes(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// Add `user_id` to the post's likers and, only if it was not already
  /// there, increment the counter. Both happen in one atomic step.
  fn record_post_like(
    &self,
    post_id: Uuid,
    user_id: Uuid,
  ) -> impl Future<Output = Result<LikeOutcome, Self::Error>> + Send + '_;

  /// Remove the post record. Returns `false` if nothing was removed.
  ///
  /// Comments and hosted images are left alone.
  fn delete_post(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}

// ─── Comments ────────────────────────────────────────────────────────────────

pub trait CommentRepository: Store {
  /// Fails with a validation error if the text is empty or the post does not
  /// exist (or is soft-deleted), and with `UserNotFound` for an unknown
  /// author.
  fn create_comment(
    &self,
    input: NewComment,
  ) -> impl Future<Output = Result<Comment, Self::Error>> + Send + '_;

  fn find_comment(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Comment>, Self::Error>> + Send + '_;

  /// Comments on a post, newest first.
  fn find_comments_by_post(
    &self,
    post_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Comment>, Self::Error>> + Send + '_;

  /// Same contract as [`PostRepository::record_post_like`].
  fn record_comment_like(
    &self,
    comment_id: Uuid,
    user_id: Uuid,
  ) -> impl Future<Output = Result<LikeOutcome, Self::Error>> + Send + '_;

  /// Delete every comment on a post and return how many were removed.
  fn delete_comments_by_post(
    &self,
    post_id: Uuid,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;
}

// ─── Users ───────────────────────────────────────────────────────────────────

pub trait UserDirectory: Store {
  /// Register a user with a zero win/loss record.
  fn add_user<'a>(
    &'a self,
    display_name: &'a str,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + 'a;

  fn get_user(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  /// Resolve creator summaries for a batch of user ids. Unknown ids are
  /// absent from the returned map.
  fn creator_summaries<'a>(
    &'a self,
    ids: &'a [Uuid],
  ) -> impl Future<Output = Result<HashMap<Uuid, CreatorSummary>, Self::Error>>
  + Send
  + 'a;
}
