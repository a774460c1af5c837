//! Favorites: an account's bookmarks into the reference catalogs.
//!
//! In the domain a favorite points at a [`FavoriteTarget`]. The flat
//! `(kind, referenced_id)` pair exists only in storage and on the wire.

use std::fmt;

use serde::Serialize;
use strum::{EnumString, IntoStaticStr};

/// The discriminant stored in the `kind` column.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, IntoStaticStr,
  strum::Display,
)]
#[strum(serialize_all = "lowercase")]
pub enum FavoriteKind {
  Person,
  Planet,
}

/// The catalog record a favorite refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "referenced_id", rename_all = "lowercase")]
pub enum FavoriteTarget {
  Person(i64),
  Planet(i64),
}

impl FavoriteTarget {
  pub fn from_parts(kind: FavoriteKind, referenced_id: i64) -> Self {
    match kind {
      FavoriteKind::Person => Self::Person(referenced_id),
      FavoriteKind::Planet => Self::Planet(referenced_id),
    }
  }

  pub fn kind(&self) -> FavoriteKind {
    match self {
      Self::Person(_) => FavoriteKind::Person,
      Self::Planet(_) => FavoriteKind::Planet,
    }
  }

  pub fn referenced_id(&self) -> i64 {
    match self {
      Self::Person(id) | Self::Planet(id) => *id,
    }
  }
}

impl fmt::Display for FavoriteTarget {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} {}", self.kind(), self.referenced_id())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Favorite {
  pub id:      i64,
  pub user_id: i64,
  #[serde(flatten)]
  pub target:  FavoriteTarget,
}

#[cfg(test)]
mod tests {
  use std::str::FromStr;

  use serde_json::json;

  use super::*;

  #[test]
  fn serialises_as_flat_tag_and_id() {
    let fav = Favorite { id: 4, user_id: 1, target: FavoriteTarget::Planet(9) };
    assert_eq!(
      serde_json::to_value(fav).unwrap(),
      json!({ "id": 4, "user_id": 1, "kind": "planet", "referenced_id": 9 })
    );
  }

  #[test]
  fn kind_tag_matches_storage_strings() {
    let tag: &'static str = FavoriteKind::Person.into();
    assert_eq!(tag, "person");
    assert_eq!(FavoriteKind::from_str("planet").unwrap(), FavoriteKind::Planet);
    assert!(FavoriteKind::from_str("starship").is_err());
  }

  #[test]
  fn parts_round_trip() {
    let target = FavoriteTarget::Person(12);
    assert_eq!(
      FavoriteTarget::from_parts(target.kind(), target.referenced_id()),
      target
    );
  }
}
