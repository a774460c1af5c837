//! HTTP front for Holonet.
//!
//! Mounts [`holonet_api::api_router`] under `/api`, wraps it in permissive
//! CORS and request tracing, and loads the deployment settings.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use holonet_api::{SessionConfig, api_router};
use holonet_core::store::RecordStore;
use serde::Deserialize;
use tower_http::{
  cors::{Any, CorsLayer},
  trace::TraceLayer,
};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `HOLONET_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
  /// Account that favorites requests act on behalf of.
  pub actor_id:   i64,
}

impl ServerConfig {
  /// Layer defaults, the TOML file at `path` (if it exists) and the
  /// environment, in increasing precedence.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .set_default("host", "127.0.0.1")?
      .set_default("port", 3000)?
      .set_default("store_path", "holonet.db")?
      .set_default("actor_id", 1)?
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("HOLONET"))
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  pub fn session(&self) -> SessionConfig {
    SessionConfig { actor_id: self.actor_id }
  }

  /// The store path with a leading `~/` expanded to the home directory.
  pub fn resolved_store_path(&self) -> PathBuf { expand_tilde(&self.store_path) }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router.
pub fn app<S>(store: Arc<S>, config: &ServerConfig) -> Router
where
  S: RecordStore + 'static,
{
  let cors = CorsLayer::new()
    .allow_origin(Any)
    .allow_methods(Any)
    .allow_headers(Any);

  Router::new()
    .nest("/api", api_router(store, config.session()))
    .layer(cors)
    .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use holonet_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  use super::*;

  fn test_config() -> ServerConfig {
    ServerConfig {
      host:       "127.0.0.1".to_string(),
      port:       0,
      store_path: PathBuf::from(":memory:"),
      actor_id:   1,
    }
  }

  async fn test_app() -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();
    app(Arc::new(store), &test_config())
  }

  async fn json_body(resp: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  #[tokio::test]
  async fn cors_preflight_allows_any_origin() {
    let app = test_app().await;
    let req = Request::builder()
      .method("OPTIONS")
      .uri("/api/planets")
      .header(header::ORIGIN, "https://example.com")
      .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
      .body(Body::empty())
      .unwrap();
    let resp = app.oneshot(req).await.unwrap();

    assert!(resp.status().is_success());
    assert_eq!(
      resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
      "*"
    );
  }

  #[tokio::test]
  async fn api_is_mounted_under_prefix() {
    let app = test_app().await;

    let req = Request::builder()
      .method("POST")
      .uri("/api/planets")
      .header(header::CONTENT_TYPE, "application/json")
      .header(header::ORIGIN, "https://example.com")
      .body(Body::from(
        json!({
          "name": "Tatooine",
          "diameter": "10465",
          "climate": "Arid",
          "gravity": "1 standard",
          "terrain": "Desert",
          "population": "200000",
        })
        .to_string(),
      ))
      .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(
      resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
      "*"
    );
    let created = json_body(resp).await;
    let id = created["planet"]["id"].as_i64().unwrap();

    let req = Request::builder()
      .uri(format!("/api/planets/{id}"))
      .body(Body::empty())
      .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["climate"], "Arid");

    let req = Request::builder().uri("/planets").body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[test]
  fn missing_config_file_falls_back_to_defaults() {
    let cfg = ServerConfig::load(Path::new("/nonexistent/holonet.toml")).unwrap();
    assert_eq!(cfg.host, "127.0.0.1");
    assert_eq!(cfg.port, 3000);
    assert_eq!(cfg.store_path, PathBuf::from("holonet.db"));
    assert_eq!(cfg.session(), SessionConfig::default());
    assert_eq!(cfg.address(), "127.0.0.1:3000");
  }

  #[test]
  fn tilde_is_expanded_only_as_a_prefix() {
    let plain = Path::new("data/holonet.db");
    assert_eq!(expand_tilde(plain), plain.to_path_buf());

    if let Ok(home) = std::env::var("HOME") {
      assert_eq!(
        expand_tilde(Path::new("~/holonet.db")),
        PathBuf::from(home).join("holonet.db")
      );
    }
  }
}
