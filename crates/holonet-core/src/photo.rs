//! Photos owned by an account.

use serde::Serialize;

use crate::account::Account;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Photo {
  pub id:      i64,
  pub user_id: i64,
  pub url:     String,
}

/// Input to [`crate::store::RecordStore::create_photo`].
#[derive(Debug, Clone)]
pub struct NewPhoto {
  pub user_id: i64,
  pub url:     String,
}

/// Partial update; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct PhotoPatch {
  pub url: Option<String>,
}

impl PhotoPatch {
  pub fn apply(self, photo: &mut Photo) {
    if let Some(url) = self.url {
      photo.url = url;
    }
  }
}

/// A photo with its owning account embedded. The account carries no photo
/// list of its own.
#[derive(Debug, Clone, Serialize)]
pub struct OwnedPhoto {
  #[serde(flatten)]
  pub photo: Photo,
  pub user:  Account,
}
