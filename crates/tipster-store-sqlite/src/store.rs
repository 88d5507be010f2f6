//! [`SqliteStore`]: the SQLite implementation of the Tipster repositories.

use std::{collections::HashMap, path::Path};

use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use tipster_core::{
  comment::{Comment, NewComment},
  post::{LikeOutcome, NewPost, Post, Visibility},
  store::{CommentRepository, PostRepository, Store, UserDirectory},
  user::{CreatorSummary, User},
};

use crate::{
  Error, Result,
  encode::{
    COMMENT_COLUMNS, POST_COLUMNS, RawComment, RawPost, RawUser, decode_count,
    encode_dt, encode_uuid, now,
  },
  schema::SCHEMA,
};

// ─── SQL fragments ───────────────────────────────────────────────────────────

/// `filter` binds `?1`; `?2` is 1 when soft-deleted posts are included.
fn select_posts(filter: &str) -> String {
  format!(
    "SELECT {POST_COLUMNS}
     FROM posts p
     LEFT JOIN post_likes l ON l.post_id = p.post_id
     WHERE {filter} AND (?2 = 1 OR p.deleted = 0)
     GROUP BY p.post_id
     ORDER BY p.created_at DESC, p.rowid DESC"
  )
}

fn select_comments(filter: &str) -> String {
  format!(
    "SELECT {COMMENT_COLUMNS}
     FROM comments c
     LEFT JOIN comment_likes l ON l.comment_id = c.comment_id
     WHERE {filter}
     GROUP BY c.comment_id
     ORDER BY c.created_at DESC, c.rowid DESC"
  )
}

/// The two likeable tables share one shape.
#[derive(Clone, Copy)]
enum LikeTarget {
  Post,
  Comment,
}

impl LikeTarget {
  fn current_count_sql(self) -> &'static str {
    match self {
      Self::Post => "SELECT like_count FROM posts WHERE post_id = ?1",
      Self::Comment => "SELECT like_count FROM comments WHERE comment_id = ?1",
    }
  }

  fn insert_liker_sql(self) -> &'static str {
    match self {
      Self::Post => {
        "INSERT OR IGNORE INTO post_likes (post_id, user_id, liked_at) VALUES (?1, ?2, ?3)"
      }
      Self::Comment => {
        "INSERT OR IGNORE INTO comment_likes (comment_id, user_id, liked_at) VALUES (?1, ?2, ?3)"
      }
    }
  }

  fn increment_sql(self) -> &'static str {
    match self {
      Self::Post => {
        "UPDATE posts SET like_count = like_count + 1 WHERE post_id = ?1 RETURNING like_count"
      }
      Self::Comment => {
        "UPDATE comments SET like_count = like_count + 1 WHERE comment_id = ?1 RETURNING like_count"
      }
    }
  }

  fn not_found(self, id: Uuid) -> tipster_core::Error {
    match self {
      Self::Post => tipster_core::Error::PostNotFound(id),
      Self::Comment => tipster_core::Error::CommentNotFound(id),
    }
  }
}

/// What a guarded write found when it checked its references.
enum Guarded<T> {
  Done(T),
  SubjectMissing,
  UserMissing,
}

fn user_exists(conn: &rusqlite::Connection, user_id: &str) -> rusqlite::Result<bool> {
  Ok(
    conn
      .query_row(
        "SELECT 1 FROM users WHERE user_id = ?1",
        rusqlite::params![user_id],
        |_| Ok(true),
      )
      .optional()?
      .unwrap_or(false),
  )
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Tipster store backed by a single SQLite file.
///
/// Every call runs on the connection's dedicated thread, so each operation
/// below is one atomic round-trip. Cloning is cheap; the inner connection is
/// reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  #[cfg(test)]
  pub(crate) fn connection(&self) -> &tokio_rusqlite::Connection { &self.conn }

  async fn query_posts(
    &self,
    filter: &'static str,
    key: Option<String>,
    visibility: Visibility,
  ) -> Result<Vec<Post>> {
    let include_deleted = visibility == Visibility::All;
    let sql = select_posts(filter);

    let raws: Vec<RawPost> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params![key, include_deleted], RawPost::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPost::into_post).collect()
  }

  /// Insert `(subject, user)` into the liker table and bump the counter only
  /// if the row is new, inside one transaction.
  async fn record_like(
    &self,
    target: LikeTarget,
    subject_id: Uuid,
    user_id: Uuid,
  ) -> Result<LikeOutcome> {
    let subject_str = encode_uuid(subject_id);
    let user_str    = encode_uuid(user_id);
    let at_str      = encode_dt(now());

    let guarded = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let current: Option<i64> = tx
          .query_row(target.current_count_sql(), rusqlite::params![subject_str], |r| {
            r.get(0)
          })
          .optional()?;
        let Some(current) = current else {
          return Ok(Guarded::SubjectMissing);
        };
        if !user_exists(&tx, &user_str)? {
          return Ok(Guarded::UserMissing);
        }

        let inserted = tx.execute(
          target.insert_liker_sql(),
          rusqlite::params![subject_str, user_str, at_str],
        )? == 1;

        let like_count = if inserted {
          tx.query_row(target.increment_sql(), rusqlite::params![subject_str], |r| r.get(0))?
        } else {
          current
        };

        tx.commit()?;
        Ok(Guarded::Done((like_count, inserted)))
      })
      .await?;

    match guarded {
      Guarded::Done((count, newly_liked)) => Ok(LikeOutcome {
        like_count: decode_count("like_count", count)?,
        newly_liked,
      }),
      Guarded::SubjectMissing => Err(target.not_found(subject_id).into()),
      Guarded::UserMissing => Err(tipster_core::Error::UserNotFound(user_id).into()),
    }
  }
}

impl Store for SqliteStore {
  type Error = Error;
}

// ─── PostRepository impl ─────────────────────────────────────────────────────

impl PostRepository for SqliteStore {
  async fn create_post(&self, input: NewPost) -> Result<Post> {
    input.validate()?;

    let post = Post {
      post_id:    Uuid::new_v4(),
      sport:      input.sport,
      prediction: input.prediction,
      reasoning:  input.reasoning,
      image:      input.image,
      like_count: 0,
      liked_by:   Default::default(),
      creator_id: input.creator_id,
      created_at: now(),
      tracked:    input.tracked,
      deleted:    false,
    };

    let id_str      = encode_uuid(post.post_id);
    let creator_str = encode_uuid(post.creator_id);
    let at_str      = encode_dt(post.created_at);
    let sport       = post.sport.clone();
    let prediction  = post.prediction.clone();
    let reasoning   = post.reasoning.clone();
    let image_url   = post.image.as_ref().map(|i| i.url.clone());
    let asset_id    = post.image.as_ref().map(|i| i.asset_id.clone());
    let tracked     = post.tracked;

    let guarded = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        if !user_exists(&tx, &creator_str)? {
          return Ok(Guarded::UserMissing);
        }
        tx.execute(
          "INSERT INTO posts (
             post_id, sport, prediction, reasoning, image_url, asset_id,
             like_count, creator_id, created_at, tracked, deleted
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0, ?7, ?8, ?9, 0)",
          rusqlite::params![
            id_str,
            sport,
            prediction,
            reasoning,
            image_url,
            asset_id,
            creator_str,
            at_str,
            tracked,
          ],
        )?;
        tx.commit()?;
        Ok(Guarded::Done(()))
      })
      .await?;

    match guarded {
      Guarded::Done(()) => Ok(post),
      _ => Err(tipster_core::Error::UserNotFound(post.creator_id).into()),
    }
  }

  async fn find_post(&self, id: Uuid) -> Result<Option<Post>> {
    let posts = self
      .query_posts("p.post_id = ?1", Some(encode_uuid(id)), Visibility::All)
      .await?;
    Ok(posts.into_iter().next())
  }

  async fn find_posts_by_creator(
    &self,
    creator_id: Uuid,
    visibility: Visibility,
  ) -> Result<Vec<Post>> {
    self.query_posts("p.creator_id = ?1", Some(encode_uuid(creator_id)), visibility).await
  }

  async fn find_all_posts(&self, visibility: Visibility) -> Result<Vec<Post>> {
    // `?1` is bound to NULL and unused.
    self.query_posts("?1 IS NULL", None, visibility).await
  }

  async fn find_posts_by_sport<'a>(
    &'a self,
    sport: &'a str,
    visibility: Visibility,
  ) -> Result<Vec<Post>> {
    self.query_posts("p.sport = ?1", Some(sport.to_owned()), visibility).await
  }

  async fn increment_post_likes(&self, id: Uuid) -> Result<u64> {
    let id_str = encode_uuid(id);

    let count: Option<i64> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(LikeTarget::Post.increment_sql(), rusqlite::params![id_str], |r| {
              r.get(0)
            })
            .optional()?,
        )
      })
      .await?;

    match count {
      Some(c) => decode_count("like_count", c),
      None => Err(tipster_core::Error::PostNotFound(id).into()),
    }
  }

  async fn record_post_like(&self, post_id: Uuid, user_id: Uuid) -> Result<LikeOutcome> {
    self.record_like(LikeTarget::Post, post_id, user_id).await
  }

  async fn delete_post(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);

    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM posts WHERE post_id = ?1", rusqlite::params![id_str])?)
      })
      .await?;

    Ok(removed > 0)
  }
}

// ─── CommentRepository impl ──────────────────────────────────────────────────

impl CommentRepository for SqliteStore {
  async fn create_comment(&self, input: NewComment) -> Result<Comment> {
    input.validate()?;

    let comment = Comment {
      comment_id: Uuid::new_v4(),
      text:       input.text,
      like_count: 0,
      post_id:    input.post_id,
      author_id:  input.author_id,
      created_at: now(),
      liked_by:   Default::default(),
    };

    let id_str     = encode_uuid(comment.comment_id);
    let post_str   = encode_uuid(comment.post_id);
    let author_str = encode_uuid(comment.author_id);
    let at_str     = encode_dt(comment.created_at);
    let text       = comment.text.clone();

    let guarded = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let post_live: bool = tx
          .query_row(
            "SELECT 1 FROM posts WHERE post_id = ?1 AND deleted = 0",
            rusqlite::params![post_str],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);
        if !post_live {
          return Ok(Guarded::SubjectMissing);
        }
        if !user_exists(&tx, &author_str)? {
          return Ok(Guarded::UserMissing);
        }
        tx.execute(
          "INSERT INTO comments (comment_id, post_id, author_id, text, like_count, created_at)
           VALUES (?1, ?2, ?3, ?4, 0, ?5)",
          rusqlite::params![id_str, post_str, author_str, text, at_str],
        )?;
        tx.commit()?;
        Ok(Guarded::Done(()))
      })
      .await?;

    match guarded {
      Guarded::Done(()) => Ok(comment),
      Guarded::SubjectMissing => Err(
        tipster_core::Error::validation(format!(
          "cannot comment on post {}: it does not exist",
          comment.post_id
        ))
        .into(),
      ),
      Guarded::UserMissing => Err(tipster_core::Error::UserNotFound(comment.author_id).into()),
    }
  }

  async fn find_comment(&self, id: Uuid) -> Result<Option<Comment>> {
    let id_str = encode_uuid(id);
    let sql    = select_comments("c.comment_id = ?1");

    let raw: Option<RawComment> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(&sql, rusqlite::params![id_str], RawComment::from_row)
            .optional()?,
        )
      })
      .await?;

    raw.map(RawComment::into_comment).transpose()
  }

  async fn find_comments_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>> {
    let post_str = encode_uuid(post_id);
    let sql      = select_comments("c.post_id = ?1");

    let raws: Vec<RawComment> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params![post_str], RawComment::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawComment::into_comment).collect()
  }

  async fn record_comment_like(&self, comment_id: Uuid, user_id: Uuid) -> Result<LikeOutcome> {
    self.record_like(LikeTarget::Comment, comment_id, user_id).await
  }

  async fn delete_comments_by_post(&self, post_id: Uuid) -> Result<u64> {
    let post_str = encode_uuid(post_id);

    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM comments WHERE post_id = ?1", rusqlite::params![post_str])?)
      })
      .await?;

    Ok(removed as u64)
  }
}

// ─── UserDirectory impl ──────────────────────────────────────────────────────

impl UserDirectory for SqliteStore {
  async fn add_user<'a>(&'a self, display_name: &'a str) -> Result<User> {
    if display_name.trim().is_empty() {
      return Err(tipster_core::Error::validation("display name is required").into());
    }

    let user = User {
      user_id:      Uuid::new_v4(),
      display_name: display_name.to_owned(),
      wins:         0,
      losses:       0,
      created_at:   now(),
    };

    let id_str = encode_uuid(user.user_id);
    let name   = user.display_name.clone();
    let at_str = encode_dt(user.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO users (user_id, display_name, wins, losses, created_at)
           VALUES (?1, ?2, 0, 0, ?3)",
          rusqlite::params![id_str, name, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(user)
  }

  async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT user_id, display_name, wins, losses, created_at
               FROM users WHERE user_id = ?1",
              rusqlite::params![id_str],
              RawUser::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawUser::into_user).transpose()
  }

  async fn creator_summaries<'a>(
    &'a self,
    ids: &'a [Uuid],
  ) -> Result<HashMap<Uuid, CreatorSummary>> {
    if ids.is_empty() {
      return Ok(HashMap::new());
    }

    let id_strs: Vec<String> = ids.iter().copied().map(encode_uuid).collect();
    let placeholders = vec!["?"; id_strs.len()].join(", ");
    let sql = format!(
      "SELECT user_id, display_name, wins, losses, created_at
       FROM users WHERE user_id IN ({placeholders})"
    );

    let raws: Vec<RawUser> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(id_strs.iter()), RawUser::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawUser::into_summary).collect()
  }
}
