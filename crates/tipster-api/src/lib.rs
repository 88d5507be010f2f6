//! JSON REST API for Tipster.
//!
//! Exposes an axum [`Router`] backed by any store implementing the
//! `tipster-core` repository traits and any [`AssetStore`]. The caller's
//! identity arrives in the `X-User-Id` header; authentication, TLS and other
//! transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", tipster_api::api_router(store.clone(), assets.clone()))
//! ```

pub mod comments;
pub mod error;
pub mod feed;
pub mod identity;
pub mod posts;
pub mod users;


use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use tipster_core::{
  asset::AssetStore,
  deletion::PostDeletionCoordinator,
  feed::FeedAssembler,
  likes::LikeCoordinator,
  publish::PostPublisher,
  store::{CommentRepository, PostRepository, UserDirectory},
};

pub use error::ApiError;
pub use identity::{Caller, USER_ID_HEADER};

/// Everything a storage backend must provide to serve the API.
pub trait Backend: PostRepository + CommentRepository + UserDirectory + 'static {}

impl<T> Backend for T where T: PostRepository + CommentRepository + UserDirectory + 'static {}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
pub struct AppState<S, A> {
  pub store:     Arc<S>,
  pub feed:      FeedAssembler<S>,
  pub likes:     LikeCoordinator<S>,
  pub deletion:  PostDeletionCoordinator<S, A>,
  pub publisher: PostPublisher<S, A>,
}

impl<S, A> Clone for AppState<S, A> {
  fn clone(&self) -> Self {
    Self {
      store:     Arc::clone(&self.store),
      feed:      self.feed.clone(),
      likes:     self.likes.clone(),
      deletion:  self.deletion.clone(),
      publisher: self.publisher.clone(),
    }
  }
}

impl<S: Backend, A: AssetStore + 'static> AppState<S, A> {
  pub fn new(store: Arc<S>, assets: Arc<A>) -> Self {
    Self {
      feed:      FeedAssembler::new(store.clone()),
      likes:     LikeCoordinator::new(store.clone()),
      deletion:  PostDeletionCoordinator::new(store.clone(), assets.clone()),
      publisher: PostPublisher::new(store.clone(), assets),
      store,
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S, A>(store: Arc<S>, assets: Arc<A>) -> Router<()>
where
  S: Backend,
  A: AssetStore + 'static,
{
  Router::new()
    // Users
    .route("/users", post(users::register::<S, A>))
    .route("/users/{id}", get(users::profile::<S, A>))
    .route("/profile", get(users::own_profile::<S, A>))
    // Feed
    .route("/feed", get(feed::list::<S, A>))
    .route("/feed/{sport}", get(feed::by_sport::<S, A>))
    // Posts
    .route("/posts", post(posts::create::<S, A>))
    .route("/posts/{id}", get(posts::get_one::<S, A>).delete(posts::delete_one::<S, A>))
    .route("/posts/{id}/like", post(posts::like::<S, A>))
    .route("/posts/{id}/comments", post(comments::create::<S, A>))
    // Comments
    .route("/comments/{id}/like", post(comments::like::<S, A>))
    .with_state(AppState::new(store, assets))
}
