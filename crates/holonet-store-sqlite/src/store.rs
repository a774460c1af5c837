//! [`SqliteStore`], the SQLite implementation of [`RecordStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;

use holonet_core::{
  account::{Account, AccountWithPhotos, NewAccount},
  catalog::{NewPerson, NewPlanet, Person, PersonPatch, Planet, PlanetPatch},
  collection::{Collection, NewCollection},
  favorite::{Favorite, FavoriteTarget},
  photo::{NewPhoto, OwnedPhoto, Photo, PhotoPatch},
  store::RecordStore,
};

use crate::{
  Result,
  encode::{
    ACCOUNT_COLUMNS, COLLECTION_COLUMNS, FAVORITE_COLUMNS, PERSON_COLUMNS,
    PHOTO_COLUMNS, PLANET_COLUMNS, RawFavorite, account_from_row,
    collection_from_row, encode_kind, is_unique_violation, owned_photo_from_row,
    person_from_row, photo_from_row, planet_from_row,
  },
  schema::SCHEMA,
};

const OWNED_PHOTO_SELECT: &str = "
  SELECT p.id, p.user_id, p.url, u.id, u.handle, u.secret, u.active
  FROM photos p
  JOIN users  u ON u.id = p.user_id";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Holonet record store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    tracing::debug!("sqlite schema initialised");
    Ok(())
  }

  /// Run a single `DELETE ... WHERE id = ?1` and report whether a row went.
  async fn delete_by_id(&self, sql: &'static str, id: i64) -> Result<bool> {
    let changed = self
      .conn
      .call(move |conn| Ok(conn.execute(sql, rusqlite::params![id])?))
      .await?;
    Ok(changed > 0)
  }

  /// Delete a catalog row and every favorite that references it, atomically.
  async fn delete_catalog_entry(
    &self,
    table: &'static str,
    target: FavoriteTarget,
  ) -> Result<bool> {
    let kind = encode_kind(target.kind());
    let id   = target.referenced_id();

    let changed = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "DELETE FROM favorites WHERE kind = ?1 AND referenced_id = ?2",
          rusqlite::params![kind, id],
        )?;
        let changed = tx.execute(
          &format!("DELETE FROM {table} WHERE id = ?1"),
          rusqlite::params![id],
        )?;
        tx.commit()?;
        Ok(changed)
      })
      .await?;
    Ok(changed > 0)
  }
}

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl RecordStore for SqliteStore {
  type Error = crate::Error;

  // ── Accounts ──────────────────────────────────────────────────────────────

  async fn create_account(&self, input: NewAccount) -> Result<Account> {
    let NewAccount { handle, secret } = input;
    let handle_col = handle.clone();

    let inserted = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO users (handle, secret, active) VALUES (?1, ?2, 1)",
          rusqlite::params![handle_col, secret],
        )?;
        Ok(Account {
          id: conn.last_insert_rowid(),
          handle: handle_col,
          secret,
          active: true,
        })
      })
      .await;

    match inserted {
      Ok(account) => Ok(account),
      Err(e) if is_unique_violation(&e) => {
        Err(holonet_core::Error::HandleTaken(handle).into())
      }
      Err(e) => Err(e.into()),
    }
  }

  async fn list_accounts(&self) -> Result<Vec<Account>> {
    let accounts = self
      .conn
      .call(|conn| {
        let mut stmt = conn
          .prepare(&format!("SELECT {ACCOUNT_COLUMNS} FROM users ORDER BY id"))?;
        let rows = stmt
          .query_map([], account_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(accounts)
  }

  async fn get_account(&self, id: i64) -> Result<Option<Account>> {
    let account = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {ACCOUNT_COLUMNS} FROM users WHERE id = ?1"),
              rusqlite::params![id],
              account_from_row,
            )
            .optional()?,
        )
      })
      .await?;
    Ok(account)
  }

  async fn find_account_by_handle(&self, handle: String) -> Result<Option<Account>> {
    let account = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {ACCOUNT_COLUMNS} FROM users WHERE handle = ?1"),
              rusqlite::params![handle],
              account_from_row,
            )
            .optional()?,
        )
      })
      .await?;
    Ok(account)
  }

  async fn get_account_with_photos(
    &self,
    id: i64,
  ) -> Result<Option<AccountWithPhotos>> {
    let view = self
      .conn
      .call(move |conn| {
        let account = conn
          .query_row(
            &format!("SELECT {ACCOUNT_COLUMNS} FROM users WHERE id = ?1"),
            rusqlite::params![id],
            account_from_row,
          )
          .optional()?;

        let Some(account) = account else {
          return Ok(None);
        };

        let mut stmt = conn.prepare(&format!(
          "SELECT {PHOTO_COLUMNS} FROM photos WHERE user_id = ?1 ORDER BY id"
        ))?;
        let photos = stmt
          .query_map(rusqlite::params![id], photo_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(Some(AccountWithPhotos { account, photos }))
      })
      .await?;
    Ok(view)
  }

  async fn delete_account(&self, id: i64) -> Result<bool> {
    // Photos, collections and favorites follow via ON DELETE CASCADE.
    self.delete_by_id("DELETE FROM users WHERE id = ?1", id).await
  }

  // ── Photos ────────────────────────────────────────────────────────────────

  async fn create_photo(&self, input: NewPhoto) -> Result<Photo> {
    let photo = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO photos (user_id, url) VALUES (?1, ?2)",
          rusqlite::params![input.user_id, input.url],
        )?;
        Ok(Photo {
          id:      conn.last_insert_rowid(),
          user_id: input.user_id,
          url:     input.url,
        })
      })
      .await?;
    Ok(photo)
  }

  async fn list_photos(&self) -> Result<Vec<OwnedPhoto>> {
    let photos = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!("{OWNED_PHOTO_SELECT} ORDER BY p.id"))?;
        let rows = stmt
          .query_map([], owned_photo_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(photos)
  }

  async fn get_photo(&self, id: i64) -> Result<Option<OwnedPhoto>> {
    let photo = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("{OWNED_PHOTO_SELECT} WHERE p.id = ?1"),
              rusqlite::params![id],
              owned_photo_from_row,
            )
            .optional()?,
        )
      })
      .await?;
    Ok(photo)
  }

  async fn update_photo(&self, id: i64, patch: PhotoPatch) -> Result<Option<Photo>> {
    let photo = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let current = tx
          .query_row(
            &format!("SELECT {PHOTO_COLUMNS} FROM photos WHERE id = ?1"),
            rusqlite::params![id],
            photo_from_row,
          )
          .optional()?;

        let Some(mut photo) = current else {
          return Ok(None);
        };
        patch.apply(&mut photo);

        tx.execute(
          "UPDATE photos SET url = ?2 WHERE id = ?1",
          rusqlite::params![photo.id, photo.url],
        )?;
        tx.commit()?;
        Ok(Some(photo))
      })
      .await?;
    Ok(photo)
  }

  async fn delete_photo(&self, id: i64) -> Result<bool> {
    self.delete_by_id("DELETE FROM photos WHERE id = ?1", id).await
  }

  // ── Collections ───────────────────────────────────────────────────────────

  async fn create_collection(&self, input: NewCollection) -> Result<Collection> {
    let collection = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO collections (name, description, user_id) VALUES (?1, ?2, ?3)",
          rusqlite::params![input.name, input.description, input.user_id],
        )?;
        Ok(Collection {
          id:          conn.last_insert_rowid(),
          name:        input.name,
          description: input.description,
          user_id:     input.user_id,
        })
      })
      .await?;
    Ok(collection)
  }

  async fn list_collections(&self, user_id: i64) -> Result<Vec<Collection>> {
    let collections = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {COLLECTION_COLUMNS} FROM collections WHERE user_id = ?1 ORDER BY id"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![user_id], collection_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(collections)
  }

  // ── Favorites ─────────────────────────────────────────────────────────────

  async fn add_favorite(&self, user_id: i64, target: FavoriteTarget) -> Result<Favorite> {
    let kind          = encode_kind(target.kind());
    let referenced_id = target.referenced_id();

    let inserted = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO favorites (user_id, kind, referenced_id) VALUES (?1, ?2, ?3)",
          rusqlite::params![user_id, kind, referenced_id],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await;

    match inserted {
      Ok(id) => Ok(Favorite { id, user_id, target }),
      Err(e) if is_unique_violation(&e) => {
        Err(holonet_core::Error::AlreadyFavorited(target, user_id).into())
      }
      Err(e) => Err(e.into()),
    }
  }

  async fn find_favorite(
    &self,
    user_id: i64,
    target: FavoriteTarget,
  ) -> Result<Option<Favorite>> {
    let kind          = encode_kind(target.kind());
    let referenced_id = target.referenced_id();

    let raw: Option<RawFavorite> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {FAVORITE_COLUMNS} FROM favorites
                 WHERE user_id = ?1 AND kind = ?2 AND referenced_id = ?3"
              ),
              rusqlite::params![user_id, kind, referenced_id],
              RawFavorite::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawFavorite::into_favorite).transpose()
  }

  async fn remove_favorite(&self, user_id: i64, target: FavoriteTarget) -> Result<bool> {
    let kind          = encode_kind(target.kind());
    let referenced_id = target.referenced_id();

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM favorites WHERE user_id = ?1 AND kind = ?2 AND referenced_id = ?3",
          rusqlite::params![user_id, kind, referenced_id],
        )?)
      })
      .await?;
    Ok(changed > 0)
  }

  async fn list_favorites(&self, user_id: i64) -> Result<Vec<Favorite>> {
    let raws: Vec<RawFavorite> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {FAVORITE_COLUMNS} FROM favorites WHERE user_id = ?1 ORDER BY id"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![user_id], RawFavorite::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawFavorite::into_favorite).collect()
  }

  // ── People ────────────────────────────────────────────────────────────────

  async fn create_person(&self, input: NewPerson) -> Result<Person> {
    let person = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO people (
             name, height, mass, hair_color, skin_color, eye_color, birth_year, gender
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
          rusqlite::params![
            input.name,
            input.height,
            input.mass,
            input.hair_color,
            input.skin_color,
            input.eye_color,
            input.birth_year,
            input.gender,
          ],
        )?;
        Ok(input.into_person(conn.last_insert_rowid()))
      })
      .await?;
    Ok(person)
  }

  async fn list_people(&self) -> Result<Vec<Person>> {
    let people = self
      .conn
      .call(|conn| {
        let mut stmt = conn
          .prepare(&format!("SELECT {PERSON_COLUMNS} FROM people ORDER BY id"))?;
        let rows = stmt
          .query_map([], person_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(people)
  }

  async fn get_person(&self, id: i64) -> Result<Option<Person>> {
    let person = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {PERSON_COLUMNS} FROM people WHERE id = ?1"),
              rusqlite::params![id],
              person_from_row,
            )
            .optional()?,
        )
      })
      .await?;
    Ok(person)
  }

  async fn update_person(&self, id: i64, patch: PersonPatch) -> Result<Option<Person>> {
    let person = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let current = tx
          .query_row(
            &format!("SELECT {PERSON_COLUMNS} FROM people WHERE id = ?1"),
            rusqlite::params![id],
            person_from_row,
          )
          .optional()?;

        let Some(mut person) = current else {
          return Ok(None);
        };
        patch.apply(&mut person);

        tx.execute(
          "UPDATE people SET
             name = ?2, height = ?3, mass = ?4, hair_color = ?5,
             skin_color = ?6, eye_color = ?7, birth_year = ?8, gender = ?9
           WHERE id = ?1",
          rusqlite::params![
            person.id,
            person.name,
            person.height,
            person.mass,
            person.hair_color,
            person.skin_color,
            person.eye_color,
            person.birth_year,
            person.gender,
          ],
        )?;
        tx.commit()?;
        Ok(Some(person))
      })
      .await?;
    Ok(person)
  }

  async fn delete_person(&self, id: i64) -> Result<bool> {
    self
      .delete_catalog_entry("people", FavoriteTarget::Person(id))
      .await
  }

  // ── Planets ───────────────────────────────────────────────────────────────

  async fn create_planet(&self, input: NewPlanet) -> Result<Planet> {
    let planet = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO planets (
             name, diameter, climate, gravity, terrain, population
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![
            input.name,
            input.diameter,
            input.climate,
            input.gravity,
            input.terrain,
            input.population,
          ],
        )?;
        Ok(input.into_planet(conn.last_insert_rowid()))
      })
      .await?;
    Ok(planet)
  }

  async fn list_planets(&self) -> Result<Vec<Planet>> {
    let planets = self
      .conn
      .call(|conn| {
        let mut stmt = conn
          .prepare(&format!("SELECT {PLANET_COLUMNS} FROM planets ORDER BY id"))?;
        let rows = stmt
          .query_map([], planet_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(planets)
  }

  async fn get_planet(&self, id: i64) -> Result<Option<Planet>> {
    let planet = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {PLANET_COLUMNS} FROM planets WHERE id = ?1"),
              rusqlite::params![id],
              planet_from_row,
            )
            .optional()?,
        )
      })
      .await?;
    Ok(planet)
  }

  async fn update_planet(&self, id: i64, patch: PlanetPatch) -> Result<Option<Planet>> {
    let planet = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let current = tx
          .query_row(
            &format!("SELECT {PLANET_COLUMNS} FROM planets WHERE id = ?1"),
            rusqlite::params![id],
            planet_from_row,
          )
          .optional()?;

        let Some(mut planet) = current else {
          return Ok(None);
        };
        patch.apply(&mut planet);

        tx.execute(
          "UPDATE planets SET
             name = ?2, diameter = ?3, climate = ?4,
             gravity = ?5, terrain = ?6, population = ?7
           WHERE id = ?1",
          rusqlite::params![
            planet.id,
            planet.name,
            planet.diameter,
            planet.climate,
            planet.gravity,
            planet.terrain,
            planet.population,
          ],
        )?;
        tx.commit()?;
        Ok(Some(planet))
      })
      .await?;
    Ok(planet)
  }

  async fn delete_planet(&self, id: i64) -> Result<bool> {
    self
      .delete_catalog_entry("planets", FavoriteTarget::Planet(id))
      .await
  }
}
