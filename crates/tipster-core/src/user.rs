//! Users as seen by the content layer.
//!
//! Accounts and credentials belong to the auth layer. This crate only needs
//! the display name and the prediction record shown next to posts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  pub user_id:      Uuid,
  pub display_name: String,
  pub wins:         u32,
  pub losses:       u32,
  pub created_at:   DateTime<Utc>,
}

/// The narrow projection of a [`User`] embedded in feed entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatorSummary {
  pub display_name: String,
  pub wins:         u32,
  pub losses:       u32,
}

impl From<&User> for CreatorSummary {
  fn from(u: &User) -> Self {
    Self { display_name: u.display_name.clone(), wins: u.wins, losses: u.losses }
  }
}
