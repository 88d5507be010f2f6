//! End-to-end tests of the `tipster-core` coordinators running on
//! `SqliteStore`, with an in-memory image host that can be told to fail.
//! The last sections swap in the real on-disk host and a store that races
//! a comment against deletion.

use std::{
  collections::HashMap,
  future::Future,
  sync::{
    Arc, Mutex,
    atomic::{AtomicBool, AtomicUsize, Ordering},
  },
};

use bytes::Bytes;
use tipster_assets::FsAssetStore;
use tipster_core::{
  Error as CoreError, ErrorKind,
  asset::{AssetStore, UploadedAsset},
  comment::{Comment, NewComment},
  deletion::PostDeletionCoordinator,
  feed::FeedAssembler,
  likes::LikeCoordinator,
  post::{LikeOutcome, NewPost, Post, Visibility},
  publish::{ImageUpload, PostDraft, PostPublisher},
  store::{CommentRepository, PostRepository, Store, UserDirectory},
  user::User,
};
use uuid::Uuid;

use crate::SqliteStore;

// ─── Fake image host ─────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
#[error("image host unavailable")]
struct HostDown;

#[derive(Default)]
struct FakeAssets {
  stored:       Mutex<HashMap<String, Bytes>>,
  uploads:      AtomicUsize,
  fail_upload:  AtomicBool,
  fail_delete:  AtomicBool,
}

impl FakeAssets {
  fn holds(&self, asset_id: &str) -> bool {
    self.stored.lock().unwrap().contains_key(asset_id)
  }

  fn len(&self) -> usize { self.stored.lock().unwrap().len() }
}

impl AssetStore for FakeAssets {
  type Error = HostDown;

  async fn upload<'a>(
    &'a self,
    bytes: Bytes,
    _content_type: &'a str,
  ) -> Result<UploadedAsset, HostDown> {
    if self.fail_upload.load(Ordering::SeqCst) {
      return Err(HostDown);
    }
    let n = self.uploads.fetch_add(1, Ordering::SeqCst);
    let asset_id = format!("asset-{n}");
    self.stored.lock().unwrap().insert(asset_id.clone(), bytes);
    Ok(UploadedAsset { url: format!("https://img.example/{asset_id}"), asset_id })
  }

  async fn delete<'a>(&'a self, asset_id: &'a str) -> Result<(), HostDown> {
    if self.fail_delete.load(Ordering::SeqCst) {
      return Err(HostDown);
    }
    self.stored.lock().unwrap().remove(asset_id);
    Ok(())
  }
}

// ─── Fixture ─────────────────────────────────────────────────────────────────

struct Fixture {
  store:     Arc<SqliteStore>,
  assets:    Arc<FakeAssets>,
  feed:      FeedAssembler<SqliteStore>,
  likes:     LikeCoordinator<SqliteStore>,
  deletion:  PostDeletionCoordinator<SqliteStore, FakeAssets>,
  publisher: PostPublisher<SqliteStore, FakeAssets>,
}

async fn fixture() -> Fixture {
  let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
  let assets = Arc::new(FakeAssets::default());
  Fixture {
    feed:      FeedAssembler::new(store.clone()),
    likes:     LikeCoordinator::new(store.clone()),
    deletion:  PostDeletionCoordinator::new(store.clone(), assets.clone()),
    publisher: PostPublisher::new(store.clone(), assets.clone()),
    store,
    assets,
  }
}

impl Fixture {
  async fn user(&self, name: &str) -> User { self.store.add_user(name).await.unwrap() }

  async fn set_record(&self, user_id: Uuid, wins: u32, losses: u32) {
    let id = user_id.to_string();
    self
      .store
      .connection()
      .call(move |conn| {
        conn.execute(
          "UPDATE users SET wins = ?1, losses = ?2 WHERE user_id = ?3",
          rusqlite::params![wins, losses, id],
        )?;
        Ok(())
      })
      .await
      .unwrap();
  }
}

fn draft(sport: &str, prediction: &str) -> PostDraft {
  PostDraft {
    sport:      sport.into(),
    prediction: prediction.into(),
    reasoning:  "strong defense".into(),
    tracked:    false,
    image:      None,
  }
}

fn with_image(mut d: PostDraft) -> PostDraft {
  d.image = Some(ImageUpload {
    bytes:        Bytes::from_static(b"\x89PNG fake"),
    content_type: "image/png".into(),
  });
  d
}

// ─── Scenario ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn hockey_prediction_scenario() {
  let f = fixture().await;
  let u1 = f.user("u1").await;
  let u2 = f.user("u2").await;
  let u3 = f.user("u3").await;

  let post = f
    .publisher
    .publish(draft("Hockey", "Team A wins"), u1.user_id)
    .await
    .unwrap();

  let feed = f.feed.get_feed().await.unwrap();
  assert_eq!(feed.len(), 1);
  assert_eq!(feed[0].post.post_id, post.post_id);
  assert_eq!(feed[0].post.like_count, 0);
  assert_eq!(feed[0].creator.display_name, "u1");

  assert_eq!(f.likes.like_post(post.post_id, u2.user_id).await.unwrap(), 1);
  assert_eq!(f.likes.like_post(post.post_id, u2.user_id).await.unwrap(), 1);
  assert_eq!(f.likes.like_post(post.post_id, u3.user_id).await.unwrap(), 2);
}

// ─── Likes ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn like_count_matches_distinct_likers() {
  let f = fixture().await;
  let author = f.user("author").await;
  let fans = [f.user("a").await, f.user("b").await, f.user("c").await];
  let post = f.publisher.publish(draft("Soccer", "Draw"), author.user_id).await.unwrap();

  for fan in fans.iter().chain(fans.iter()).chain(fans.iter().take(1)) {
    f.likes.like_post(post.post_id, fan.user_id).await.unwrap();
  }

  let stored = f.store.find_post(post.post_id).await.unwrap().unwrap();
  assert_eq!(stored.like_count, 3);
  assert_eq!(stored.like_count as usize, stored.liked_by.len());
}

#[tokio::test]
async fn liking_missing_subjects_is_not_found() {
  let f = fixture().await;
  let u = f.user("u").await;

  let err = f.likes.like_post(Uuid::new_v4(), u.user_id).await.unwrap_err();
  assert!(matches!(err, CoreError::PostNotFound(_)));

  let err = f.likes.like_comment(Uuid::new_v4(), u.user_id).await.unwrap_err();
  assert!(matches!(err, CoreError::CommentNotFound(_)));
}

#[tokio::test]
async fn comment_likes_go_through_the_coordinator() {
  let f = fixture().await;
  let u = f.user("u").await;
  let fan = f.user("fan").await;
  let post = f.publisher.publish(draft("Tennis", "Upset"), u.user_id).await.unwrap();
  let comment = f
    .store
    .create_comment(NewComment::new(post.post_id, fan.user_id, "bold"))
    .await
    .unwrap();

  assert_eq!(f.likes.like_comment(comment.comment_id, u.user_id).await.unwrap(), 1);
  assert_eq!(f.likes.like_comment(comment.comment_id, u.user_id).await.unwrap(), 1);
  assert_eq!(f.likes.like_comment(comment.comment_id, fan.user_id).await.unwrap(), 2);
}

// ─── Feed ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn feed_is_newest_first_with_creator_records() {
  let f = fixture().await;
  let alice = f.user("alice").await;
  let bob = f.user("bob").await;
  f.set_record(bob.user_id, 7, 3).await;

  for (i, who) in [&alice, &bob, &alice, &bob].into_iter().enumerate() {
    f.publisher
      .publish(draft("Hockey", &format!("pick {i}")), who.user_id)
      .await
      .unwrap();
  }

  let feed = f.feed.get_feed().await.unwrap();
  assert_eq!(feed.len(), 4);
  assert!(feed.windows(2).all(|w| w[0].post.created_at >= w[1].post.created_at));
  assert_eq!(feed[0].post.prediction, "pick 3");

  let bobs = feed.iter().find(|v| v.post.creator_id == bob.user_id).unwrap();
  assert_eq!((bobs.creator.wins, bobs.creator.losses), (7, 3));
}

#[tokio::test]
async fn sport_feed_ignores_capitalisation() {
  let f = fixture().await;
  let u = f.user("u").await;
  f.publisher.publish(draft("Baseball", "Cubs"), u.user_id).await.unwrap();
  f.publisher.publish(draft("Baseball", "Mets"), u.user_id).await.unwrap();
  f.publisher.publish(draft("Hockey", "Leafs"), u.user_id).await.unwrap();

  let upper = f.feed.get_feed_by_sport("BASEBALL").await.unwrap();
  let lower = f.feed.get_feed_by_sport("baseball").await.unwrap();
  let title = f.feed.get_feed_by_sport("Baseball").await.unwrap();

  assert_eq!(upper.len(), 2);
  assert_eq!(upper, lower);
  assert_eq!(lower, title);
  assert!(upper.iter().all(|v| v.post.sport == "Baseball"));
}

#[tokio::test]
async fn post_view_includes_comments_newest_first() {
  let f = fixture().await;
  let author = f.user("author").await;
  let fan = f.user("fan").await;
  let post = f.publisher.publish(draft("Hockey", "Team A wins"), author.user_id).await.unwrap();

  f.store
    .create_comment(NewComment::new(post.post_id, fan.user_id, "first"))
    .await
    .unwrap();
  f.store
    .create_comment(NewComment::new(post.post_id, author.user_id, "second"))
    .await
    .unwrap();

  let thread = f.feed.get_post_view(post.post_id).await.unwrap();
  assert_eq!(thread.post.creator.display_name, "author");
  let texts: Vec<&str> = thread.comments.iter().map(|c| c.comment.text.as_str()).collect();
  assert_eq!(texts, ["second", "first"]);
  assert_eq!(thread.comments[0].author_display_name, "author");
  assert_eq!(thread.comments[1].author_display_name, "fan");
}

#[tokio::test]
async fn post_view_of_missing_post_is_not_found() {
  let f = fixture().await;
  let err = f.feed.get_post_view(Uuid::new_v4()).await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn soft_deleted_posts_only_show_when_asked_for() {
  let f = fixture().await;
  let u = f.user("u").await;
  let post = f.publisher.publish(draft("Golf", "Birdie"), u.user_id).await.unwrap();
  let id = post.post_id.to_string();
  f.store
    .connection()
    .call(move |conn| {
      conn.execute("UPDATE posts SET deleted = 1 WHERE post_id = ?1", [id])?;
      Ok(())
    })
    .await
    .unwrap();

  assert!(f.feed.get_feed().await.unwrap().is_empty());
  assert_eq!(f.feed.get_feed_with(Visibility::All).await.unwrap().len(), 1);
  assert!(f.feed.get_post_view(post.post_id).await.unwrap_err().is_not_found());
  assert!(f
    .feed
    .get_post_view_with(post.post_id, Visibility::All)
    .await
    .is_ok());
}

#[tokio::test]
async fn profile_returns_user_and_their_posts() {
  let f = fixture().await;
  let alice = f.user("alice").await;
  let bob = f.user("bob").await;
  f.publisher.publish(draft("Hockey", "a1"), alice.user_id).await.unwrap();
  f.publisher.publish(draft("Hockey", "b1"), bob.user_id).await.unwrap();
  f.publisher.publish(draft("Hockey", "a2"), alice.user_id).await.unwrap();

  let profile = f.feed.get_profile(alice.user_id).await.unwrap();
  assert_eq!(profile.user, alice);
  let picks: Vec<&str> = profile.posts.iter().map(|v| v.post.prediction.as_str()).collect();
  assert_eq!(picks, ["a2", "a1"]);

  let feed = f.feed.get_profile_feed(bob.user_id).await.unwrap();
  assert_eq!(feed.len(), 1);

  let err = f.feed.get_profile(Uuid::new_v4()).await.unwrap_err();
  assert!(matches!(err, CoreError::UserNotFound(_)));
}

// ─── Publishing ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn publish_with_image_stores_url_and_asset_id() {
  let f = fixture().await;
  let u = f.user("u").await;

  let post = f
    .publisher
    .publish(with_image(draft("Hockey", "Team A wins")), u.user_id)
    .await
    .unwrap();

  let image = post.image.clone().unwrap();
  assert!(f.assets.holds(&image.asset_id));
  assert!(image.url.ends_with(&image.asset_id));
  assert_eq!(f.store.find_post(post.post_id).await.unwrap().unwrap(), post);
}

#[tokio::test]
async fn failed_upload_fails_the_whole_create() {
  let f = fixture().await;
  let u = f.user("u").await;
  f.assets.fail_upload.store(true, Ordering::SeqCst);

  let err = f
    .publisher
    .publish(with_image(draft("Hockey", "Team A wins")), u.user_id)
    .await
    .unwrap_err();
  assert_eq!(err.kind(), ErrorKind::AssetStore);
  assert!(f.store.find_all_posts(Visibility::All).await.unwrap().is_empty());
}

#[tokio::test]
async fn invalid_draft_never_reaches_the_image_host() {
  let f = fixture().await;
  let u = f.user("u").await;

  let err = f
    .publisher
    .publish(with_image(draft("", "Team A wins")), u.user_id)
    .await
    .unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Validation);
  assert_eq!(f.assets.uploads.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn rejected_post_removes_its_upload() {
  let f = fixture().await;
  let ghost = Uuid::new_v4();

  let err = f
    .publisher
    .publish(with_image(draft("Hockey", "Team A wins")), ghost)
    .await
    .unwrap_err();
  assert!(matches!(err, CoreError::UserNotFound(id) if id == ghost));
  assert_eq!(f.assets.uploads.load(Ordering::SeqCst), 1);
  assert_eq!(f.assets.len(), 0);
}

// ─── Deletion ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_cascades_to_comments_and_image() {
  let f = fixture().await;
  let author = f.user("author").await;
  let fan = f.user("fan").await;
  let post = f
    .publisher
    .publish(with_image(draft("Hockey", "Team A wins")), author.user_id)
    .await
    .unwrap();
  let asset_id = post.asset_id().unwrap().to_owned();
  f.likes.like_post(post.post_id, fan.user_id).await.unwrap();
  for text in ["nice", "no way"] {
    f.store
      .create_comment(NewComment::new(post.post_id, fan.user_id, text))
      .await
      .unwrap();
  }

  f.deletion.delete_post(post.post_id, author.user_id).await.unwrap();

  assert!(f.store.find_post(post.post_id).await.unwrap().is_none());
  assert!(f.store.find_comments_by_post(post.post_id).await.unwrap().is_empty());
  assert!(!f.assets.holds(&asset_id));
  assert!(f.feed.get_post_view(post.post_id).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn delete_without_image_skips_the_host() {
  let f = fixture().await;
  let u = f.user("u").await;
  let post = f.publisher.publish(draft("Hockey", "Team A wins"), u.user_id).await.unwrap();
  f.assets.fail_delete.store(true, Ordering::SeqCst);

  f.deletion.delete_post(post.post_id, u.user_id).await.unwrap();
  assert!(f.store.find_post(post.post_id).await.unwrap().is_none());
}

#[tokio::test]
async fn failed_image_delete_leaves_everything_in_place() {
  let f = fixture().await;
  let u = f.user("u").await;
  let post = f
    .publisher
    .publish(with_image(draft("Hockey", "Team A wins")), u.user_id)
    .await
    .unwrap();
  f.store
    .create_comment(NewComment::new(post.post_id, u.user_id, "keep me"))
    .await
    .unwrap();
  f.assets.fail_delete.store(true, Ordering::SeqCst);

  let err = f.deletion.delete_post(post.post_id, u.user_id).await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::AssetStore);

  assert!(f.store.find_post(post.post_id).await.unwrap().is_some());
  assert_eq!(f.store.find_comments_by_post(post.post_id).await.unwrap().len(), 1);
  assert!(f.assets.holds(post.asset_id().unwrap()));

  // Retrying once the host recovers completes the deletion.
  f.assets.fail_delete.store(false, Ordering::SeqCst);
  f.deletion.delete_post(post.post_id, u.user_id).await.unwrap();
  assert!(f.store.find_post(post.post_id).await.unwrap().is_none());
}

#[tokio::test]
async fn deleting_missing_post_is_not_found() {
  let f = fixture().await;
  let err = f
    .deletion
    .delete_post(Uuid::new_v4(), Uuid::new_v4())
    .await
    .unwrap_err();
  assert!(matches!(err, CoreError::PostNotFound(_)));
}

// ─── On-disk image host ──────────────────────────────────────────────────────

async fn fs_store() -> (tempfile::TempDir, Arc<FsAssetStore>) {
  let tmp = tempfile::tempdir().unwrap();
  let fs = FsAssetStore::open(tmp.path().join("images"), "https://cdn.example/img")
    .await
    .unwrap();
  (tmp, Arc::new(fs))
}

fn files_in(fs: &FsAssetStore) -> usize { std::fs::read_dir(fs.dir()).unwrap().count() }

#[tokio::test]
async fn rejected_post_keeps_another_posts_identical_image() {
  let f = fixture().await;
  let (_tmp, fs) = fs_store().await;
  let publisher = PostPublisher::new(f.store.clone(), fs.clone());
  let alice = f.user("alice").await;

  let kept = publisher
    .publish(with_image(draft("Hockey", "Team A wins")), alice.user_id)
    .await
    .unwrap();
  let ghost = Uuid::new_v4();
  let err = publisher
    .publish(with_image(draft("Hockey", "Team A wins")), ghost)
    .await
    .unwrap_err();
  assert!(matches!(err, CoreError::UserNotFound(id) if id == ghost));

  let on_disk = tokio::fs::read(fs.dir().join(kept.asset_id().unwrap())).await.unwrap();
  assert_eq!(on_disk, b"\x89PNG fake");
  assert_eq!(files_in(&fs), 1);
}

#[tokio::test]
async fn deleting_one_post_keeps_another_posts_identical_image() {
  let f = fixture().await;
  let (_tmp, fs) = fs_store().await;
  let publisher = PostPublisher::new(f.store.clone(), fs.clone());
  let deletion = PostDeletionCoordinator::new(f.store.clone(), fs.clone());
  let u = f.user("u").await;

  let first = publisher
    .publish(with_image(draft("Hockey", "Team A wins")), u.user_id)
    .await
    .unwrap();
  let second = publisher
    .publish(with_image(draft("Hockey", "Team B wins")), u.user_id)
    .await
    .unwrap();
  assert_ne!(first.asset_id(), second.asset_id());

  deletion.delete_post(first.post_id, u.user_id).await.unwrap();

  assert!(!fs.dir().join(first.asset_id().unwrap()).exists());
  assert!(fs.dir().join(second.asset_id().unwrap()).exists());
  let thread = f.feed.get_post_view(second.post_id).await.unwrap();
  assert_eq!(thread.post.post.asset_id(), second.asset_id());
}

// ─── Comment racing a deletion ───────────────────────────────────────────────

/// Delegates to `SqliteStore`, but the first `late_sweeps` comment cascades
/// are each followed by a fresh comment, as if a reader replied mid-delete.
struct LateCommenter {
  inner:       Arc<SqliteStore>,
  commenter:   Uuid,
  late_sweeps: AtomicUsize,
}

impl Store for LateCommenter {
  type Error = crate::Error;
}

impl PostRepository for LateCommenter {
  fn create_post(
    &self,
    input: NewPost,
  ) -> impl Future<Output = Result<Post, crate::Error>> + Send + '_ {
    self.inner.create_post(input)
  }

  fn find_post(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Post>, crate::Error>> + Send + '_ {
    self.inner.find_post(id)
  }

  fn find_posts_by_creator(
    &self,
    creator_id: Uuid,
    visibility: Visibility,
  ) -> impl Future<Output = Result<Vec<Post>, crate::Error>> + Send + '_ {
    self.inner.find_posts_by_creator(creator_id, visibility)
  }

  fn find_all_posts(
    &self,
    visibility: Visibility,
  ) -> impl Future<Output = Result<Vec<Post>, crate::Error>> + Send + '_ {
    self.inner.find_all_posts(visibility)
  }

  fn find_posts_by_sport<'a>(
    &'a self,
    sport: &'a str,
    visibility: Visibility,
  ) -> impl Future<Output = Result<Vec<Post>, crate::Error>> + Send + 'a {
    self.inner.find_posts_by_sport(sport, visibility)
  }

  fn increment_post_likes(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<u64, crate::Error>> + Send + '_ {
    self.inner.increment_post_likes(id)
  }

  fn record_post_like(
    &self,
    post_id: Uuid,
    user_id: Uuid,
  ) -> impl Future<Output = Result<LikeOutcome, crate::Error>> + Send + '_ {
    self.inner.record_post_like(post_id, user_id)
  }

  fn delete_post(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, crate::Error>> + Send + '_ {
    self.inner.delete_post(id)
  }
}

impl CommentRepository for LateCommenter {
  fn create_comment(
    &self,
    input: NewComment,
  ) -> impl Future<Output = Result<Comment, crate::Error>> + Send + '_ {
    self.inner.create_comment(input)
  }

  fn find_comment(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Comment>, crate::Error>> + Send + '_ {
    self.inner.find_comment(id)
  }

  fn find_comments_by_post(
    &self,
    post_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Comment>, crate::Error>> + Send + '_ {
    self.inner.find_comments_by_post(post_id)
  }

  fn record_comment_like(
    &self,
    comment_id: Uuid,
    user_id: Uuid,
  ) -> impl Future<Output = Result<LikeOutcome, crate::Error>> + Send + '_ {
    self.inner.record_comment_like(comment_id, user_id)
  }

  fn delete_comments_by_post(
    &self,
    post_id: Uuid,
  ) -> impl Future<Output = Result<u64, crate::Error>> + Send + '_ {
    async move {
      let removed = self.inner.delete_comments_by_post(post_id).await?;
      let late = self
        .late_sweeps
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        .is_ok();
      if late {
        self
          .inner
          .create_comment(NewComment::new(post_id, self.commenter, "wait, hear me out"))
          .await?;
      }
      Ok(removed)
    }
  }
}

fn racing_deletion(
  f: &Fixture,
  commenter: Uuid,
  late_sweeps: usize,
) -> PostDeletionCoordinator<LateCommenter, FakeAssets> {
  let store = LateCommenter {
    inner: f.store.clone(),
    commenter,
    late_sweeps: AtomicUsize::new(late_sweeps),
  };
  PostDeletionCoordinator::new(Arc::new(store), f.assets.clone())
}

#[tokio::test]
async fn comment_added_during_delete_is_swept_up() {
  let f = fixture().await;
  let author = f.user("author").await;
  let fan = f.user("fan").await;
  let post = f
    .publisher
    .publish(with_image(draft("Hockey", "Team A wins")), author.user_id)
    .await
    .unwrap();
  f.store
    .create_comment(NewComment::new(post.post_id, fan.user_id, "nice"))
    .await
    .unwrap();

  let deletion = racing_deletion(&f, fan.user_id, 1);
  deletion.delete_post(post.post_id, author.user_id).await.unwrap();

  assert!(f.store.find_post(post.post_id).await.unwrap().is_none());
  assert!(f.store.find_comments_by_post(post.post_id).await.unwrap().is_empty());
  assert!(!f.assets.holds(post.asset_id().unwrap()));
}

#[tokio::test]
async fn persistent_late_comments_fail_the_delete_after_one_retry() {
  let f = fixture().await;
  let author = f.user("author").await;
  let fan = f.user("fan").await;
  let post = f
    .publisher
    .publish(with_image(draft("Hockey", "Team A wins")), author.user_id)
    .await
    .unwrap();

  let deletion = racing_deletion(&f, fan.user_id, 2);
  assert!(deletion.delete_post(post.post_id, author.user_id).await.is_err());

  // The image is already gone; the post and the last late comment remain
  // until the delete is repeated.
  assert!(!f.assets.holds(post.asset_id().unwrap()));
  assert!(f.store.find_post(post.post_id).await.unwrap().is_some());
  assert_eq!(f.store.find_comments_by_post(post.post_id).await.unwrap().len(), 1);

  deletion.delete_post(post.post_id, author.user_id).await.unwrap();
  assert!(f.store.find_post(post.post_id).await.unwrap().is_none());
}
