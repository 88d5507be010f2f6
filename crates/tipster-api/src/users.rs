//! Handlers for user registration and profiles.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/users` | Body: `{"display_name":"..."}`; no caller header needed |
//! | `GET`  | `/users/{id}` | 404 if the user does not exist |
//! | `GET`  | `/profile` | The caller's own profile |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use tipster_core::{asset::AssetStore, store::UserDirectory, view::Profile};
use uuid::Uuid;

use crate::{AppState, Backend, Caller, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct RegisterBody {
  pub display_name: String,
}

/// `POST /users`
pub async fn register<S, A>(
  State(state): State<AppState<S, A>>,
  Json(body): Json<RegisterBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Backend,
  A: AssetStore + 'static,
{
  let user = state
    .store
    .add_user(&body.display_name)
    .await
    .map_err(|e| ApiError::Core(e.into()))?;
  Ok((StatusCode::CREATED, Json(user)))
}

/// `GET /users/{id}`
pub async fn profile<S, A>(
  State(state): State<AppState<S, A>>,
  _caller: Caller,
  Path(id): Path<Uuid>,
) -> Result<Json<Profile>, ApiError>
where
  S: Backend,
  A: AssetStore + 'static,
{
  Ok(Json(state.feed.get_profile(id).await?))
}

/// `GET /profile`
pub async fn own_profile<S, A>(
  State(state): State<AppState<S, A>>,
  Caller(me): Caller,
) -> Result<Json<Profile>, ApiError>
where
  S: Backend,
  A: AssetStore + 'static,
{
  Ok(Json(state.feed.get_profile(me).await?))
}
