//! Named photo collections. Modelled and stored; not yet exposed over HTTP.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Collection {
  pub id:          i64,
  pub name:        String,
  pub description: Option<String>,
  pub user_id:     i64,
}

#[derive(Debug, Clone)]
pub struct NewCollection {
  pub name:        String,
  pub description: Option<String>,
  pub user_id:     i64,
}
