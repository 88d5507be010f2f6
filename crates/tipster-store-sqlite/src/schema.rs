//! SQL schema for the Tipster SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS users (
    user_id      TEXT PRIMARY KEY,
    display_name TEXT NOT NULL,
    wins         INTEGER NOT NULL DEFAULT 0 CHECK (wins >= 0),
    losses       INTEGER NOT NULL DEFAULT 0 CHECK (losses >= 0),
    created_at   TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS posts (
    post_id     TEXT PRIMARY KEY,
    sport       TEXT NOT NULL,
    prediction  TEXT NOT NULL,
    reasoning   TEXT NOT NULL,
    image_url   TEXT,
    asset_id    TEXT,
    like_count  INTEGER NOT NULL DEFAULT 0 CHECK (like_count >= 0),
    creator_id  TEXT NOT NULL REFERENCES users(user_id),
    created_at  TEXT NOT NULL,             -- RFC 3339 UTC, microseconds
    tracked     INTEGER NOT NULL DEFAULT 0,
    deleted     INTEGER NOT NULL DEFAULT 0, -- soft-delete flag; read-only here
    CHECK ((image_url IS NULL) = (asset_id IS NULL))
);

-- One row per (post, liker); the primary key makes a second like a no-op.
CREATE TABLE IF NOT EXISTS post_likes (
    post_id   TEXT NOT NULL REFERENCES posts(post_id) ON DELETE CASCADE,
    user_id   TEXT NOT NULL REFERENCES users(user_id),
    liked_at  TEXT NOT NULL,
    PRIMARY KEY (post_id, user_id)
);

-- No ON DELETE CASCADE: a post cannot be removed while comments remain.
CREATE TABLE IF NOT EXISTS comments (
    comment_id  TEXT PRIMARY KEY,
    post_id     TEXT NOT NULL REFERENCES posts(post_id),
    author_id   TEXT NOT NULL REFERENCES users(user_id),
    text        TEXT NOT NULL,
    like_count  INTEGER NOT NULL DEFAULT 0 CHECK (like_count >= 0),
    created_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS comment_likes (
    comment_id TEXT NOT NULL REFERENCES comments(comment_id) ON DELETE CASCADE,
    user_id    TEXT NOT NULL REFERENCES users(user_id),
    liked_at   TEXT NOT NULL,
    PRIMARY KEY (comment_id, user_id)
);

CREATE INDEX IF NOT EXISTS posts_created_idx  ON posts(created_at);
CREATE INDEX IF NOT EXISTS posts_sport_idx    ON posts(sport, created_at);
CREATE INDEX IF NOT EXISTS posts_creator_idx  ON posts(creator_id, created_at);
CREATE INDEX IF NOT EXISTS comments_post_idx  ON comments(post_id, created_at);

PRAGMA user_version = 1;
";
