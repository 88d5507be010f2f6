//! Handlers for comments.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/posts/{id}/comments` | Body: `{"text":"..."}` |
//! | `POST` | `/comments/{id}/like` | Returns `{"like_count": n}` |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use tipster_core::{asset::AssetStore, comment::NewComment, store::CommentRepository};
use uuid::Uuid;

use crate::{AppState, Backend, Caller, error::ApiError, posts::LikeCount};

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub text: String,
}

/// `POST /posts/{id}/comments`
pub async fn create<S, A>(
  State(state): State<AppState<S, A>>,
  Caller(me): Caller,
  Path(post_id): Path<Uuid>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Backend,
  A: AssetStore + 'static,
{
  let comment = state
    .store
    .create_comment(NewComment::new(post_id, me, body.text))
    .await
    .map_err(|e| ApiError::Core(e.into()))?;
  Ok((StatusCode::CREATED, Json(comment)))
}

/// `POST /comments/{id}/like`
pub async fn like<S, A>(
  State(state): State<AppState<S, A>>,
  Caller(me): Caller,
  Path(id): Path<Uuid>,
) -> Result<Json<LikeCount>, ApiError>
where
  S: Backend,
  A: AssetStore + 'static,
{
  let like_count = state.likes.like_comment(id, me).await?;
  Ok(Json(LikeCount { like_count }))
}
