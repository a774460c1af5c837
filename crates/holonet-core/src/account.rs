//! Accounts: the owners of photos, collections and favorites.

use serde::Serialize;

use crate::photo::Photo;

/// A registered account.
///
/// The secret is stored verbatim and is never part of the serialised form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
  pub id:     i64,
  pub handle: String,
  #[serde(skip_serializing)]
  pub secret: String,
  pub active: bool,
}

/// Input to [`crate::store::RecordStore::create_account`].
#[derive(Debug, Clone)]
pub struct NewAccount {
  pub handle: String,
  pub secret: String,
}

/// An account with every photo it owns embedded one level deep.
///
/// Embedded photos never carry their owner back, so the nesting is bounded.
#[derive(Debug, Clone, Serialize)]
pub struct AccountWithPhotos {
  #[serde(flatten)]
  pub account: Account,
  pub photos:  Vec<Photo>,
}
