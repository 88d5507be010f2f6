//! Comments: replies attached to a single post.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Result, post::require};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
  pub comment_id: Uuid,
  pub text:       String,
  pub like_count: u64,
  pub post_id:    Uuid,
  pub author_id:  Uuid,
  pub created_at: DateTime<Utc>,
  pub liked_by:   BTreeSet<Uuid>,
}

/// Input for [`CommentRepository::create_comment`](crate::store::CommentRepository::create_comment).
#[derive(Debug, Clone)]
pub struct NewComment {
  pub post_id:   Uuid,
  pub author_id: Uuid,
  pub text:      String,
}

impl NewComment {
  pub fn new(post_id: Uuid, author_id: Uuid, text: impl Into<String>) -> Self {
    Self { post_id, author_id, text: text.into() }
  }

  pub fn validate(&self) -> Result<()> { require("comment text", &self.text) }
}
