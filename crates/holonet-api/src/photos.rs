//! Handlers for `/photos` endpoints.
//!
//! | Method   | Path          | Notes |
//! |----------|---------------|-------|
//! | `GET`    | `/photos`     | Each photo embeds its owner |
//! | `POST`   | `/photos`     | Body: `{"url":"...","user_id":1}`; owner must exist |
//! | `GET`    | `/photos/:id` | Embeds owner |
//! | `PUT`    | `/photos/:id` | Body: `{"url":"..."}`; a missing url keeps the old one |
//! | `DELETE` | `/photos/:id` | 204 |

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use holonet_core::{
  photo::{NewPhoto, OwnedPhoto, PhotoPatch},
  store::RecordStore,
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
  ApiState,
  error::ApiError,
  extract::{ApiJson, ApiPath, present},
};

fn not_found() -> ApiError { ApiError::NotFound("Photo not found".to_string()) }

/// JSON body accepted by `POST /photos` and `PUT /photos/:id`.
#[derive(Debug, Deserialize)]
pub struct PhotoBody {
  pub url:     Option<String>,
  pub user_id: Option<i64>,
}

/// `GET /photos`
pub async fn list<S>(State(state): State<ApiState<S>>) -> Result<Json<Value>, ApiError>
where
  S: RecordStore,
{
  let photos = state.store.list_photos().await.map_err(ApiError::store)?;
  Ok(Json(json!({ "photos": photos })))
}

/// `POST /photos`, returns 201 + `{"message", "photo"}`.
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  ApiJson(body): ApiJson<PhotoBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecordStore,
{
  let (Some(url), Some(user_id)) = (present(body.url), body.user_id) else {
    return Err(ApiError::Validation(
      "URL and user_id are required".to_string(),
    ));
  };

  let owner = state
    .store
    .get_account(user_id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

  let photo = state
    .store
    .create_photo(NewPhoto { user_id: owner.id, url })
    .await
    .map_err(ApiError::store)?;
  tracing::info!(photo_id = photo.id, user_id = owner.id, "photo created");

  Ok((
    StatusCode::CREATED,
    Json(json!({ "message": "Photo created successfully", "photo": photo })),
  ))
}

/// `GET /photos/:id`
pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  ApiPath(id): ApiPath<i64>,
) -> Result<Json<OwnedPhoto>, ApiError>
where
  S: RecordStore,
{
  let photo = state
    .store
    .get_photo(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(not_found)?;
  Ok(Json(photo))
}

/// `PUT /photos/:id`, only `url` is updatable.
pub async fn update<S>(
  State(state): State<ApiState<S>>,
  ApiPath(id): ApiPath<i64>,
  ApiJson(body): ApiJson<PhotoBody>,
) -> Result<Json<Value>, ApiError>
where
  S: RecordStore,
{
  let patch = PhotoPatch { url: present(body.url) };
  let photo = state
    .store
    .update_photo(id, patch)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(not_found)?;
  tracing::info!(photo_id = photo.id, "photo updated");

  Ok(Json(json!({ "message": "Photo updated successfully", "photo": photo })))
}

/// `DELETE /photos/:id`
pub async fn delete<S>(
  State(state): State<ApiState<S>>,
  ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError>
where
  S: RecordStore,
{
  if !state.store.delete_photo(id).await.map_err(ApiError::store)? {
    return Err(not_found());
  }
  tracing::info!(photo_id = id, "photo deleted successfully");
  Ok(StatusCode::NO_CONTENT)
}
