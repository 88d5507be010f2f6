//! Read models assembled by [`FeedAssembler`](crate::feed::FeedAssembler).
//!
//! Never stored; always derived from posts, comments and user projections.

use serde::{Deserialize, Serialize};

use crate::{comment::Comment, post::Post, user::{CreatorSummary, User}};

/// A post with its creator's summary denormalised alongside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostView {
  #[serde(flatten)]
  pub post:    Post,
  pub creator: CreatorSummary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentView {
  #[serde(flatten)]
  pub comment:             Comment,
  pub author_display_name: String,
}

/// A single post together with its comments, newest comment first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostThread {
  pub post:     PostView,
  pub comments: Vec<CommentView>,
}

/// A user's full record and the posts they created, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
  pub user:  User,
  pub posts: Vec<PostView>,
}
