//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as fixed-width RFC 3339 strings with microsecond
//! precision so lexical order matches chronological order. UUIDs are stored
//! as hyphenated lowercase strings.

use std::collections::BTreeSet;

use chrono::{DateTime, SecondsFormat, SubsecRound as _, Utc};
use tipster_core::{
  comment::Comment,
  post::{Post, PostImage},
  user::{CreatorSummary, User},
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

/// Decode a `group_concat` of UUIDs (comma-separated, possibly NULL).
pub fn decode_uuid_set(s: Option<&str>) -> Result<BTreeSet<Uuid>> {
  match s {
    None | Some("") => Ok(BTreeSet::new()),
    Some(list) => list.split(',').map(decode_uuid).collect(),
  }
}

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

/// The current time, truncated to what the database stores.
pub fn now() -> DateTime<Utc> { Utc::now().trunc_subsecs(6) }

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Counters ────────────────────────────────────────────────────────────────

pub fn decode_count(column: &str, v: i64) -> Result<u64> {
  u64::try_from(v).map_err(|_| Error::Decode(format!("negative {column}: {v}")))
}

fn decode_record(column: &str, v: i64) -> Result<u32> {
  u32::try_from(v).map_err(|_| Error::Decode(format!("{column} out of range: {v}")))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Columns selected by every post query, in order.
pub const POST_COLUMNS: &str = "
  p.post_id, p.sport, p.prediction, p.reasoning, p.image_url, p.asset_id,
  p.like_count, p.creator_id, p.created_at, p.tracked, p.deleted,
  group_concat(l.user_id) AS liked_by";

/// Raw values read from a `posts` row joined with its likers.
pub struct RawPost {
  pub post_id:    String,
  pub sport:      String,
  pub prediction: String,
  pub reasoning:  String,
  pub image_url:  Option<String>,
  pub asset_id:   Option<String>,
  pub like_count: i64,
  pub creator_id: String,
  pub created_at: String,
  pub tracked:    bool,
  pub deleted:    bool,
  pub liked_by:   Option<String>,
}

impl RawPost {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      post_id:    row.get(0)?,
      sport:      row.get(1)?,
      prediction: row.get(2)?,
      reasoning:  row.get(3)?,
      image_url:  row.get(4)?,
      asset_id:   row.get(5)?,
      like_count: row.get(6)?,
      creator_id: row.get(7)?,
      created_at: row.get(8)?,
      tracked:    row.get(9)?,
      deleted:    row.get(10)?,
      liked_by:   row.get(11)?,
    })
  }

  pub fn into_post(self) -> Result<Post> {
    let image = match (self.image_url, self.asset_id) {
      (Some(url), Some(asset_id)) => PostImage::new(url, asset_id),
      _ => None,
    };
    Ok(Post {
      post_id: decode_uuid(&self.post_id)?,
      sport: self.sport,
      prediction: self.prediction,
      reasoning: self.reasoning,
      image,
      like_count: decode_count("like_count", self.like_count)?,
      liked_by: decode_uuid_set(self.liked_by.as_deref())?,
      creator_id: decode_uuid(&self.creator_id)?,
      created_at: decode_dt(&self.created_at)?,
      tracked: self.tracked,
      deleted: self.deleted,
    })
  }
}

pub const COMMENT_COLUMNS: &str = "
  c.comment_id, c.text, c.like_count, c.post_id, c.author_id, c.created_at,
  group_concat(l.user_id) AS liked_by";

/// Raw values read from a `comments` row joined with its likers.
pub struct RawComment {
  pub comment_id: String,
  pub text:       String,
  pub like_count: i64,
  pub post_id:    String,
  pub author_id:  String,
  pub created_at: String,
  pub liked_by:   Option<String>,
}

impl RawComment {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      comment_id: row.get(0)?,
      text:       row.get(1)?,
      like_count: row.get(2)?,
      post_id:    row.get(3)?,
      author_id:  row.get(4)?,
      created_at: row.get(5)?,
      liked_by:   row.get(6)?,
    })
  }

  pub fn into_comment(self) -> Result<Comment> {
    Ok(Comment {
      comment_id: decode_uuid(&self.comment_id)?,
      text:       self.text,
      like_count: decode_count("like_count", self.like_count)?,
      post_id:    decode_uuid(&self.post_id)?,
      author_id:  decode_uuid(&self.author_id)?,
      created_at: decode_dt(&self.created_at)?,
      liked_by:   decode_uuid_set(self.liked_by.as_deref())?,
    })
  }
}

/// Raw values read from a `users` row.
pub struct RawUser {
  pub user_id:      String,
  pub display_name: String,
  pub wins:         i64,
  pub losses:       i64,
  pub created_at:   String,
}

impl RawUser {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      user_id:      row.get(0)?,
      display_name: row.get(1)?,
      wins:         row.get(2)?,
      losses:       row.get(3)?,
      created_at:   row.get(4)?,
    })
  }

  pub fn into_user(self) -> Result<User> {
    Ok(User {
      user_id:      decode_uuid(&self.user_id)?,
      display_name: self.display_name,
      wins:         decode_record("wins", self.wins)?,
      losses:       decode_record("losses", self.losses)?,
      created_at:   decode_dt(&self.created_at)?,
    })
  }

  pub fn into_summary(self) -> Result<(Uuid, CreatorSummary)> {
    let user = self.into_user()?;
    Ok((user.user_id, CreatorSummary::from(&user)))
  }
}
