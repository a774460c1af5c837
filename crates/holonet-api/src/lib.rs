//! JSON REST API for Holonet.
//!
//! Exposes an axum [`Router`] backed by any [`holonet_core::store::RecordStore`].
//! CORS and transport are left to the caller (see `holonet-server`).
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", holonet_api::api_router(store.clone(), SessionConfig::default()))
//! ```

pub mod error;
pub mod extract;
pub mod favorites;
pub mod people;
pub mod photos;
pub mod planets;
pub mod session;
pub mod users;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use holonet_core::store::RecordStore;

pub use error::ApiError;
pub use session::{Actor, SessionConfig};

/// Shared state threaded through all API handlers.
pub struct ApiState<S> {
  pub store:   Arc<S>,
  pub session: SessionConfig,
}

impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self {
      store:   Arc::clone(&self.store),
      session: self.session,
    }
  }
}

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>, session: SessionConfig) -> Router<()>
where
  S: RecordStore + 'static,
{
  Router::new()
    // Accounts. The static segment wins over `{key}`.
    .route("/users", get(users::list::<S>).post(users::create::<S>))
    .route("/users/favorites", get(favorites::list::<S>))
    .route("/users/{key}", get(users::get_one::<S>).delete(users::delete::<S>))
    // Photos
    .route("/photos", get(photos::list::<S>).post(photos::create::<S>))
    .route(
      "/photos/{id}",
      get(photos::get_one::<S>)
        .put(photos::update::<S>)
        .delete(photos::delete::<S>),
    )
    // Favorites
    .route(
      "/favorite/people/{id}",
      post(favorites::add_person::<S>).delete(favorites::remove_person::<S>),
    )
    .route(
      "/favorite/planets/{id}",
      post(favorites::add_planet::<S>).delete(favorites::remove_planet::<S>),
    )
    // Catalogs
    .route("/people", get(people::list::<S>).post(people::create::<S>))
    .route(
      "/people/{id}",
      get(people::get_one::<S>)
        .put(people::update::<S>)
        .delete(people::delete::<S>),
    )
    .route("/planets", get(planets::list::<S>).post(planets::create::<S>))
    .route(
      "/planets/{id}",
      get(planets::get_one::<S>)
        .put(planets::update::<S>)
        .delete(planets::delete::<S>),
    )
    .with_state(ApiState { store, session })
}

#[cfg(test)]
mod tests;
