//! Handlers for `/posts` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `POST`   | `/posts` | Body: `{sport, prediction, reasoning, tracked?, image?}` |
//! | `GET`    | `/posts/{id}` | Post with creator summary and comments |
//! | `POST`   | `/posts/{id}/like` | Returns `{"like_count": n}` |
//! | `DELETE` | `/posts/{id}` | Creator only; removes comments and image too |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use base64::{Engine as _, engine::general_purpose::STANDARD as B64};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tipster_core::{
  asset::AssetStore,
  publish::{ImageUpload, PostDraft},
  store::PostRepository,
  view::PostThread,
};
use uuid::Uuid;

use crate::{AppState, Backend, Caller, error::ApiError};

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ImageBody {
  pub data_base64:  String,
  pub content_type: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub sport:      String,
  pub prediction: String,
  pub reasoning:  String,
  #[serde(default)]
  pub tracked:    bool,
  pub image:      Option<ImageBody>,
}

impl TryFrom<CreateBody> for PostDraft {
  type Error = ApiError;

  fn try_from(body: CreateBody) -> Result<Self, ApiError> {
    let image = body
      .image
      .map(|img| {
        let bytes = B64
          .decode(img.data_base64.trim())
          .map_err(|e| ApiError::BadRequest(format!("image is not valid base64: {e}")))?;
        if bytes.is_empty() {
          return Err(ApiError::BadRequest("image is empty".into()));
        }
        Ok(ImageUpload { bytes: Bytes::from(bytes), content_type: img.content_type })
      })
      .transpose()?;

    Ok(PostDraft {
      sport: body.sport,
      prediction: body.prediction,
      reasoning: body.reasoning,
      tracked: body.tracked,
      image,
    })
  }
}

/// `POST /posts`
pub async fn create<S, A>(
  State(state): State<AppState<S, A>>,
  Caller(me): Caller,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Backend,
  A: AssetStore + 'static,
{
  let draft = PostDraft::try_from(body)?;
  let post = state.publisher.publish(draft, me).await?;
  Ok((StatusCode::CREATED, Json(post)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /posts/{id}`
pub async fn get_one<S, A>(
  State(state): State<AppState<S, A>>,
  _caller: Caller,
  Path(id): Path<Uuid>,
) -> Result<Json<PostThread>, ApiError>
where
  S: Backend,
  A: AssetStore + 'static,
{
  Ok(Json(state.feed.get_post_view(id).await?))
}

// ─── Like ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct LikeCount {
  pub like_count: u64,
}

/// `POST /posts/{id}/like`
pub async fn like<S, A>(
  State(state): State<AppState<S, A>>,
  Caller(me): Caller,
  Path(id): Path<Uuid>,
) -> Result<Json<LikeCount>, ApiError>
where
  S: Backend,
  A: AssetStore + 'static,
{
  let like_count = state.likes.like_post(id, me).await?;
  Ok(Json(LikeCount { like_count }))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /posts/{id}`
pub async fn delete_one<S, A>(
  State(state): State<AppState<S, A>>,
  Caller(me): Caller,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: Backend,
  A: AssetStore + 'static,
{
  let post = state
    .store
    .find_post(id)
    .await
    .map_err(|e| ApiError::Core(e.into()))?
    .ok_or(tipster_core::Error::PostNotFound(id))?;

  if post.creator_id != me {
    return Err(ApiError::Forbidden(format!("post {id} belongs to another user")));
  }

  state.deletion.delete_post(id, me).await?;
  Ok(StatusCode::NO_CONTENT)
}
