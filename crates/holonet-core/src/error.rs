//! Error types for `holonet-core`.

use thiserror::Error;

use crate::favorite::FavoriteTarget;

#[derive(Debug, Error)]
pub enum Error {
  #[error("handle {0:?} is already taken")]
  HandleTaken(String),

  #[error("{0} is already a favorite of account {1}")]
  AlreadyFavorited(FavoriteTarget, i64),

  #[error("unknown favorite kind: {0:?}")]
  UnknownFavoriteKind(String),

  /// Any backend failure that has no domain meaning (I/O, corrupt rows, …).
  #[error("storage error: {0}")]
  Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
