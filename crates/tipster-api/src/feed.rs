//! Handlers for `/feed` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/feed` | Optional `?include_deleted=true` |
//! | `GET`  | `/feed/{sport}` | Sport matched case-insensitively |

use axum::{
  Json,
  extract::{Path, Query, State},
};
use serde::Deserialize;
use tipster_core::{asset::AssetStore, post::Visibility, view::PostView};

use crate::{AppState, Backend, Caller, error::ApiError};

#[derive(Debug, Default, Deserialize)]
pub struct FeedParams {
  #[serde(default)]
  pub include_deleted: bool,
}

impl FeedParams {
  fn visibility(&self) -> Visibility {
    if self.include_deleted { Visibility::All } else { Visibility::Live }
  }
}

/// `GET /feed[?include_deleted=true]`
pub async fn list<S, A>(
  State(state): State<AppState<S, A>>,
  _caller: Caller,
  Query(params): Query<FeedParams>,
) -> Result<Json<Vec<PostView>>, ApiError>
where
  S: Backend,
  A: AssetStore + 'static,
{
  Ok(Json(state.feed.get_feed_with(params.visibility()).await?))
}

/// `GET /feed/{sport}[?include_deleted=true]`
pub async fn by_sport<S, A>(
  State(state): State<AppState<S, A>>,
  _caller: Caller,
  Path(sport): Path<String>,
  Query(params): Query<FeedParams>,
) -> Result<Json<Vec<PostView>>, ApiError>
where
  S: Backend,
  A: AssetStore + 'static,
{
  let views = state
    .feed
    .get_feed_by_sport_with(&sport, params.visibility())
    .await?;
  Ok(Json(views))
}
