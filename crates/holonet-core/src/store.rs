//! The `RecordStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `holonet-store-sqlite`).
//! The HTTP layer depends on this abstraction, not on any concrete backend,
//! and receives the store handle explicitly through router state.

use std::future::Future;

use crate::{
  account::{Account, AccountWithPhotos, NewAccount},
  catalog::{NewPerson, NewPlanet, Person, PersonPatch, Planet, PlanetPatch},
  collection::{Collection, NewCollection},
  favorite::{Favorite, FavoriteTarget},
  photo::{NewPhoto, OwnedPhoto, Photo, PhotoPatch},
};

/// Abstraction over a Holonet storage backend.
///
/// Every mutation commits before its future resolves. Lookups of a missing
/// record return `Ok(None)`; deletes of a missing record return `Ok(false)`.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait RecordStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + Into<crate::Error> + 'static;

  // ── Accounts ──────────────────────────────────────────────────────────

  /// Persist a new active account.
  ///
  /// Fails with [`crate::Error::HandleTaken`] if the handle is in use.
  fn create_account(
    &self,
    input: NewAccount,
  ) -> impl Future<Output = Result<Account, Self::Error>> + Send + '_;

  fn list_accounts(
    &self,
  ) -> impl Future<Output = Result<Vec<Account>, Self::Error>> + Send + '_;

  fn get_account(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Account>, Self::Error>> + Send + '_;

  fn find_account_by_handle(
    &self,
    handle: String,
  ) -> impl Future<Output = Result<Option<Account>, Self::Error>> + Send + '_;

  /// The account plus every photo it owns.
  fn get_account_with_photos(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<AccountWithPhotos>, Self::Error>>
  + Send
  + '_;

  /// Delete an account together with its photos, collections and favorites.
  fn delete_account(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Photos ────────────────────────────────────────────────────────────

  /// The caller is responsible for checking that the owner exists first; the
  /// backend only guarantees referential integrity.
  fn create_photo(
    &self,
    input: NewPhoto,
  ) -> impl Future<Output = Result<Photo, Self::Error>> + Send + '_;

  fn list_photos(
    &self,
  ) -> impl Future<Output = Result<Vec<OwnedPhoto>, Self::Error>> + Send + '_;

  fn get_photo(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<OwnedPhoto>, Self::Error>> + Send + '_;

  fn update_photo(
    &self,
    id: i64,
    patch: PhotoPatch,
  ) -> impl Future<Output = Result<Option<Photo>, Self::Error>> + Send + '_;

  fn delete_photo(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Collections ───────────────────────────────────────────────────────

  fn create_collection(
    &self,
    input: NewCollection,
  ) -> impl Future<Output = Result<Collection, Self::Error>> + Send + '_;

  fn list_collections(
    &self,
    user_id: i64,
  ) -> impl Future<Output = Result<Vec<Collection>, Self::Error>> + Send + '_;

  // ── Favorites ─────────────────────────────────────────────────────────

  /// Record `target` as a favorite of `user_id`.
  ///
  /// Fails with [`crate::Error::AlreadyFavorited`] if the pair exists. The
  /// backend enforces this even when two requests race past a pre-check.
  fn add_favorite(
    &self,
    user_id: i64,
    target: FavoriteTarget,
  ) -> impl Future<Output = Result<Favorite, Self::Error>> + Send + '_;

  fn find_favorite(
    &self,
    user_id: i64,
    target: FavoriteTarget,
  ) -> impl Future<Output = Result<Option<Favorite>, Self::Error>> + Send + '_;

  fn remove_favorite(
    &self,
    user_id: i64,
    target: FavoriteTarget,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  fn list_favorites(
    &self,
    user_id: i64,
  ) -> impl Future<Output = Result<Vec<Favorite>, Self::Error>> + Send + '_;

  // ── People ────────────────────────────────────────────────────────────

  fn create_person(
    &self,
    input: NewPerson,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + '_;

  fn list_people(
    &self,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + '_;

  fn get_person(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + '_;

  /// Apply `patch` and return the updated record, or `None` if absent.
  fn update_person(
    &self,
    id: i64,
    patch: PersonPatch,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + '_;

  /// Delete a person and every favorite that points at them.
  fn delete_person(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Planets ───────────────────────────────────────────────────────────

  fn create_planet(
    &self,
    input: NewPlanet,
  ) -> impl Future<Output = Result<Planet, Self::Error>> + Send + '_;

  fn list_planets(
    &self,
  ) -> impl Future<Output = Result<Vec<Planet>, Self::Error>> + Send + '_;

  fn get_planet(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Planet>, Self::Error>> + Send + '_;

  fn update_planet(
    &self,
    id: i64,
    patch: PlanetPatch,
  ) -> impl Future<Output = Result<Option<Planet>, Self::Error>> + Send + '_;

  /// Delete a planet and every favorite that points at it.
  fn delete_planet(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
