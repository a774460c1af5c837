//! Encoding and decoding helpers between Rust domain types and SQLite rows.
//!
//! Catalog and account columns map one-to-one onto struct fields. Favorites
//! are the exception: the domain [`FavoriteTarget`] is flattened into a
//! `(kind, referenced_id)` column pair here and nowhere else.

use std::str::FromStr as _;

use holonet_core::{
  account::Account,
  catalog::{Person, Planet},
  collection::Collection,
  favorite::{Favorite, FavoriteKind, FavoriteTarget},
  photo::{OwnedPhoto, Photo},
};

use crate::Result;

// ─── Column lists ────────────────────────────────────────────────────────────

pub const ACCOUNT_COLUMNS: &str = "id, handle, secret, active";
pub const PHOTO_COLUMNS: &str = "id, user_id, url";
pub const COLLECTION_COLUMNS: &str = "id, name, description, user_id";
pub const FAVORITE_COLUMNS: &str = "id, user_id, kind, referenced_id";
pub const PERSON_COLUMNS: &str =
  "id, name, height, mass, hair_color, skin_color, eye_color, birth_year, gender";
pub const PLANET_COLUMNS: &str =
  "id, name, diameter, climate, gravity, terrain, population";

// ─── Row readers ─────────────────────────────────────────────────────────────

pub fn account_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Account> {
  account_at(row, 0)
}

fn account_at(row: &rusqlite::Row<'_>, at: usize) -> rusqlite::Result<Account> {
  Ok(Account {
    id:     row.get(at)?,
    handle: row.get(at + 1)?,
    secret: row.get(at + 2)?,
    active: row.get(at + 3)?,
  })
}

pub fn photo_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Photo> {
  Ok(Photo {
    id:      row.get(0)?,
    user_id: row.get(1)?,
    url:     row.get(2)?,
  })
}

/// Reads a `photos p JOIN users u` row selected as
/// `p.id, p.user_id, p.url, u.id, u.handle, u.secret, u.active`.
pub fn owned_photo_from_row(
  row: &rusqlite::Row<'_>,
) -> rusqlite::Result<OwnedPhoto> {
  Ok(OwnedPhoto {
    photo: photo_from_row(row)?,
    user:  account_at(row, 3)?,
  })
}

pub fn collection_from_row(
  row: &rusqlite::Row<'_>,
) -> rusqlite::Result<Collection> {
  Ok(Collection {
    id:          row.get(0)?,
    name:        row.get(1)?,
    description: row.get(2)?,
    user_id:     row.get(3)?,
  })
}

pub fn person_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Person> {
  Ok(Person {
    id:         row.get(0)?,
    name:       row.get(1)?,
    height:     row.get(2)?,
    mass:       row.get(3)?,
    hair_color: row.get(4)?,
    skin_color: row.get(5)?,
    eye_color:  row.get(6)?,
    birth_year: row.get(7)?,
    gender:     row.get(8)?,
  })
}

pub fn planet_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Planet> {
  Ok(Planet {
    id:         row.get(0)?,
    name:       row.get(1)?,
    diameter:   row.get(2)?,
    climate:    row.get(3)?,
    gravity:    row.get(4)?,
    terrain:    row.get(5)?,
    population: row.get(6)?,
  })
}

// ─── Favorites ───────────────────────────────────────────────────────────────

pub fn encode_kind(kind: FavoriteKind) -> &'static str { kind.into() }

pub fn decode_kind(s: &str) -> Result<FavoriteKind> {
  FavoriteKind::from_str(s)
    .map_err(|_| holonet_core::Error::UnknownFavoriteKind(s.to_owned()).into())
}

/// Raw values read directly from a `favorites` row.
pub struct RawFavorite {
  pub id:            i64,
  pub user_id:       i64,
  pub kind:          String,
  pub referenced_id: i64,
}

impl RawFavorite {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:            row.get(0)?,
      user_id:       row.get(1)?,
      kind:          row.get(2)?,
      referenced_id: row.get(3)?,
    })
  }

  pub fn into_favorite(self) -> Result<Favorite> {
    let kind = decode_kind(&self.kind)?;
    Ok(Favorite {
      id:      self.id,
      user_id: self.user_id,
      target:  FavoriteTarget::from_parts(kind, self.referenced_id),
    })
  }
}

// ─── Constraint classification ───────────────────────────────────────────────

/// Whether `e` is a `UNIQUE` constraint violation raised by SQLite.
pub fn is_unique_violation(e: &tokio_rusqlite::Error) -> bool {
  matches!(
    e,
    tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(f, _))
      if f.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
  )
}
