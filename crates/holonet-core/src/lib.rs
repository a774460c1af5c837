//! Record types and the storage trait shared by every Holonet crate.
//!
//! Nothing here knows about HTTP or SQL: handlers and backends meet at
//! [`store::RecordStore`].

// Backends implement `RecordStore` with `async fn`.
#![allow(async_fn_in_trait)]

pub mod account;
pub mod catalog;
pub mod collection;
pub mod error;
pub mod favorite;
pub mod photo;
pub mod store;

pub use error::{Error, Result};
