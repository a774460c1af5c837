//! Acting-account resolution.
//!
//! There is no authentication: the acting account is the one named by
//! [`SessionConfig::actor_id`]. Handlers never read that id directly; they
//! take an [`Actor`], so a credential-checking extractor can replace this one
//! without touching them.

use axum::{extract::FromRequestParts, http::request::Parts};
use holonet_core::{account::Account, store::RecordStore};

use crate::{ApiState, error::ApiError};

/// Per-deployment session settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
  /// Account every favorites request acts on behalf of.
  pub actor_id: i64,
}

impl Default for SessionConfig {
  fn default() -> Self { Self { actor_id: 1 } }
}

/// The account a request acts on behalf of. Rejects with 404 if the
/// configured account does not exist.
#[derive(Debug, Clone)]
pub struct Actor(pub Account);

impl<S> FromRequestParts<ApiState<S>> for Actor
where
  S: RecordStore + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    _parts: &mut Parts,
    state: &ApiState<S>,
  ) -> Result<Self, Self::Rejection> {
    let account = state
      .store
      .get_account(state.session.actor_id)
      .await
      .map_err(ApiError::store)?
      .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;
    Ok(Actor(account))
  }
}
