//! Handlers for `/users` endpoints.
//!
//! | Method   | Path           | Notes |
//! |----------|----------------|-------|
//! | `GET`    | `/users`       | `{"users": [...]}` |
//! | `POST`   | `/users`       | Body: `{"handle":"...","secret":"..."}` |
//! | `GET`    | `/users/:key`  | Numeric key is an id, anything else a handle; `?include_photos=true` |
//! | `DELETE` | `/users/:key`  | Cascades to photos, collections and favorites |

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use holonet_core::{
  account::{Account, NewAccount},
  store::RecordStore,
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
  ApiState,
  error::ApiError,
  extract::{ApiJson, ApiPath, ApiQuery, present},
};

fn not_found() -> ApiError { ApiError::NotFound("User not found".to_string()) }

/// Look an account up by id when `key` is numeric, by handle otherwise.
async fn resolve<S: RecordStore>(store: &S, key: String) -> Result<Account, ApiError> {
  let found = match key.parse::<i64>() {
    Ok(id) => store.get_account(id).await,
    Err(_) => store.find_account_by_handle(key).await,
  };
  found.map_err(ApiError::store)?.ok_or_else(not_found)
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /users`
pub async fn list<S>(State(state): State<ApiState<S>>) -> Result<Json<Value>, ApiError>
where
  S: RecordStore,
{
  let users = state.store.list_accounts().await.map_err(ApiError::store)?;
  Ok(Json(json!({ "users": users })))
}

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub handle: Option<String>,
  pub secret: Option<String>,
}

/// `POST /users`, returns 201 + `{"message", "user"}`.
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  ApiJson(body): ApiJson<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecordStore,
{
  let (Some(handle), Some(secret)) = (present(body.handle), present(body.secret))
  else {
    return Err(ApiError::Validation(
      "Handle and secret are required".to_string(),
    ));
  };

  // Fast path; the UNIQUE constraint still catches a concurrent insert.
  let existing = state
    .store
    .find_account_by_handle(handle.clone())
    .await
    .map_err(ApiError::store)?;
  if existing.is_some() {
    return Err(ApiError::Conflict("Handle already exists".to_string()));
  }

  let user = state
    .store
    .create_account(NewAccount { handle, secret })
    .await
    .map_err(ApiError::store)?;
  tracing::info!(user_id = user.id, handle = %user.handle, "user created");

  Ok((
    StatusCode::CREATED,
    Json(json!({ "message": "User created successfully", "user": user })),
  ))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct GetParams {
  /// Embed every photo the account owns.
  #[serde(default)]
  pub include_photos: bool,
}

/// `GET /users/:key[?include_photos=true]`
pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  ApiPath(key): ApiPath<String>,
  ApiQuery(params): ApiQuery<GetParams>,
) -> Result<Response, ApiError>
where
  S: RecordStore,
{
  let user = resolve(state.store.as_ref(), key).await?;
  if !params.include_photos {
    return Ok(Json(user).into_response());
  }

  let view = state
    .store
    .get_account_with_photos(user.id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(not_found)?;
  Ok(Json(view).into_response())
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /users/:key`
pub async fn delete<S>(
  State(state): State<ApiState<S>>,
  ApiPath(key): ApiPath<String>,
) -> Result<StatusCode, ApiError>
where
  S: RecordStore,
{
  let user = resolve(state.store.as_ref(), key).await?;
  let removed = state
    .store
    .delete_account(user.id)
    .await
    .map_err(ApiError::store)?;
  if !removed {
    return Err(not_found());
  }
  tracing::info!(user_id = user.id, "user deleted successfully");
  Ok(StatusCode::NO_CONTENT)
}
