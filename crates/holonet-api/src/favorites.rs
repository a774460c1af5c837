//! Handlers for the acting account's favorites.
//!
//! | Method   | Path                     | Notes |
//! |----------|--------------------------|-------|
//! | `GET`    | `/users/favorites`       | `{"favorites": [...]}` |
//! | `POST`   | `/favorite/people/:id`   | 404 if the person is unknown, 400 if already a favorite |
//! | `DELETE` | `/favorite/people/:id`   | 404 if not a favorite |
//! | `POST`   | `/favorite/planets/:id`  | as for people |
//! | `DELETE` | `/favorite/planets/:id`  | as for people |
//!
//! Every handler takes an [`Actor`]; none of them decides who is asking.

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use holonet_core::{
  account::Account,
  favorite::{FavoriteKind, FavoriteTarget},
  store::RecordStore,
};
use serde_json::{Value, json};

use crate::{
  ApiState,
  error::{ApiError, already_favorited},
  extract::ApiPath,
  session::Actor,
};

/// Capitalised name of a catalog kind, for messages.
pub(crate) fn label(kind: FavoriteKind) -> &'static str {
  match kind {
    FavoriteKind::Person => "Person",
    FavoriteKind::Planet => "Planet",
  }
}

/// `GET /users/favorites`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
  Actor(actor): Actor,
) -> Result<Json<Value>, ApiError>
where
  S: RecordStore + 'static,
{
  let favorites = state
    .store
    .list_favorites(actor.id)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(json!({ "favorites": favorites })))
}

/// `POST /favorite/people/:id`
pub async fn add_person<S>(
  State(state): State<ApiState<S>>,
  Actor(actor): Actor,
  ApiPath(id): ApiPath<i64>,
) -> Result<Response, ApiError>
where
  S: RecordStore + 'static,
{
  add(state.store.as_ref(), &actor, FavoriteTarget::Person(id)).await
}

/// `DELETE /favorite/people/:id`
pub async fn remove_person<S>(
  State(state): State<ApiState<S>>,
  Actor(actor): Actor,
  ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError>
where
  S: RecordStore + 'static,
{
  remove(state.store.as_ref(), &actor, FavoriteTarget::Person(id)).await
}

/// `POST /favorite/planets/:id`
pub async fn add_planet<S>(
  State(state): State<ApiState<S>>,
  Actor(actor): Actor,
  ApiPath(id): ApiPath<i64>,
) -> Result<Response, ApiError>
where
  S: RecordStore + 'static,
{
  add(state.store.as_ref(), &actor, FavoriteTarget::Planet(id)).await
}

/// `DELETE /favorite/planets/:id`
pub async fn remove_planet<S>(
  State(state): State<ApiState<S>>,
  Actor(actor): Actor,
  ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError>
where
  S: RecordStore + 'static,
{
  remove(state.store.as_ref(), &actor, FavoriteTarget::Planet(id)).await
}

// ─── Shared ───────────────────────────────────────────────────────────────────

async fn target_exists<S: RecordStore>(
  store: &S,
  target: FavoriteTarget,
) -> Result<bool, ApiError> {
  let exists = match target {
    FavoriteTarget::Person(id) => {
      store.get_person(id).await.map_err(ApiError::store)?.is_some()
    }
    FavoriteTarget::Planet(id) => {
      store.get_planet(id).await.map_err(ApiError::store)?.is_some()
    }
  };
  Ok(exists)
}

async fn add<S: RecordStore>(
  store: &S,
  actor: &Account,
  target: FavoriteTarget,
) -> Result<Response, ApiError> {
  let name = label(target.kind());

  if !target_exists(store, target).await? {
    return Err(ApiError::NotFound(format!("{name} not found")));
  }

  // Fast path; the UNIQUE constraint still catches a concurrent insert.
  let existing = store
    .find_favorite(actor.id, target)
    .await
    .map_err(ApiError::store)?;
  if existing.is_some() {
    return Err(ApiError::Conflict(already_favorited(target)));
  }

  let favorite = store
    .add_favorite(actor.id, target)
    .await
    .map_err(ApiError::store)?;
  tracing::info!(
    favorite_id = favorite.id,
    user_id = actor.id,
    %target,
    "favorite added"
  );

  Ok(
    (
      StatusCode::CREATED,
      Json(json!({
        "message":  format!("{name} added to favorites successfully"),
        "favorite": favorite,
      })),
    )
      .into_response(),
  )
}

async fn remove<S: RecordStore>(
  store: &S,
  actor: &Account,
  target: FavoriteTarget,
) -> Result<StatusCode, ApiError> {
  let removed = store
    .remove_favorite(actor.id, target)
    .await
    .map_err(ApiError::store)?;
  if !removed {
    return Err(ApiError::NotFound(format!(
      "Favorite {} not found",
      target.kind()
    )));
  }
  tracing::info!(user_id = actor.id, %target, "favorite deleted successfully");
  Ok(StatusCode::NO_CONTENT)
}
