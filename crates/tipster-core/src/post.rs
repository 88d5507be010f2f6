//! Post types: a sport prediction authored by a user.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Image ───────────────────────────────────────────────────────────────────

/// An externally hosted image attached to a post.
///
/// The URL and the asset handle travel together: a post either has both or
/// neither.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostImage {
  pub url:      String,
  /// Opaque handle used to delete the asset from its host.
  pub asset_id: String,
}

impl PostImage {
  /// Pair a URL with its asset handle. Returns `None` if either is empty.
  pub fn new(url: impl Into<String>, asset_id: impl Into<String>) -> Option<Self> {
    let url = url.into();
    let asset_id = asset_id.into();
    if url.is_empty() || asset_id.is_empty() {
      return None;
    }
    Some(Self { url, asset_id })
  }
}

// ─── Post ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
  pub post_id:    Uuid,
  pub sport:      String,
  pub prediction: String,
  pub reasoning:  String,
  pub image:      Option<PostImage>,
  pub like_count: u64,
  pub liked_by:   BTreeSet<Uuid>,
  pub creator_id: Uuid,
  pub created_at: DateTime<Utc>,
  /// The prediction's outcome is being tracked against the creator's record.
  pub tracked:    bool,
  pub deleted:    bool,
}

impl Post {
  pub fn asset_id(&self) -> Option<&str> {
    self.image.as_ref().map(|i| i.asset_id.as_str())
  }
}

/// Input for [`PostRepository::create_post`](crate::store::PostRepository::create_post).
#[derive(Debug, Clone)]
pub struct NewPost {
  pub creator_id: Uuid,
  pub sport:      String,
  pub prediction: String,
  pub reasoning:  String,
  pub image:      Option<PostImage>,
  pub tracked:    bool,
}

impl NewPost {
  pub fn new(
    creator_id: Uuid,
    sport: impl Into<String>,
    prediction: impl Into<String>,
    reasoning: impl Into<String>,
  ) -> Self {
    Self {
      creator_id,
      sport: sport.into(),
      prediction: prediction.into(),
      reasoning: reasoning.into(),
      image: None,
      tracked: false,
    }
  }

  pub fn validate(&self) -> Result<()> {
    require("sport", &self.sport)?;
    require("prediction", &self.prediction)?;
    require("reasoning", &self.reasoning)
  }
}

pub(crate) fn require(field: &str, value: &str) -> Result<()> {
  if value.trim().is_empty() {
    return Err(Error::validation(format!("{field} is required")));
  }
  Ok(())
}

// ─── Read filter ─────────────────────────────────────────────────────────────

/// Which posts a listing returns with respect to the soft-delete flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
  /// Only posts whose `deleted` flag is unset.
  #[default]
  Live,
  All,
}

impl Visibility {
  pub fn admits(self, post: &Post) -> bool {
    match self {
      Self::Live => !post.deleted,
      Self::All => true,
    }
  }
}

/// Result of recording a like against a post or comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeOutcome {
  pub like_count:  u64,
  /// `false` if the user had already liked the subject.
  pub newly_liked: bool,
}
