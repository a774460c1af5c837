//! Router-level tests against an in-memory SQLite store.

use std::sync::Arc;

use axum::{
  Router,
  body::Body,
  http::{Request, StatusCode, header},
};
use holonet_store_sqlite::SqliteStore;
use serde_json::{Value, json};
use tower::ServiceExt as _;

use crate::{SessionConfig, api_router};

async fn app() -> Router {
  let store = SqliteStore::open_in_memory().await.unwrap();
  api_router(Arc::new(store), SessionConfig::default())
}

async fn call(
  app: &Router,
  method: &str,
  uri: &str,
  body: Option<Value>,
) -> (StatusCode, Value) {
  let builder = Request::builder().method(method).uri(uri);
  let req = match body {
    Some(json) => builder
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from(json.to_string()))
      .unwrap(),
    None => builder.body(Body::empty()).unwrap(),
  };

  let resp   = app.clone().oneshot(req).await.unwrap();
  let status = resp.status();
  let bytes  = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  let value  = if bytes.is_empty() {
    Value::Null
  } else {
    serde_json::from_slice(&bytes).unwrap()
  };
  (status, value)
}

fn luke() -> Value {
  json!({
    "name": "Luke Skywalker",
    "height": "172",
    "mass": "77",
    "hair_color": "blond",
    "skin_color": "fair",
    "eye_color": "blue",
    "birth_year": "19BBY",
    "gender": "male",
  })
}

fn tatooine() -> Value {
  json!({
    "name": "Tatooine",
    "diameter": "10465",
    "climate": "Arid",
    "gravity": "1 standard",
    "terrain": "Desert",
    "population": "200000",
  })
}

async fn create_user(app: &Router, handle: &str) -> Value {
  let (status, body) = call(
    app,
    "POST",
    "/users",
    Some(json!({ "handle": handle, "secret": "littleblueparrot" })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED, "{body}");
  body["user"].clone()
}

// ── Users ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_user_returns_serialised_account_without_secret() {
  let app = app().await;
  let user = create_user(&app, "sombra").await;

  assert_eq!(user["handle"], "sombra");
  assert_eq!(user["active"], true);
  assert!(user["id"].is_i64());
  assert!(user.get("secret").is_none());
}

#[tokio::test]
async fn create_user_requires_handle_and_secret() {
  let app = app().await;
  for body in [
    json!({ "handle": "x" }),
    json!({ "secret": "x" }),
    json!({ "handle": "", "secret": "x" }),
    json!({ "handle": "x", "secret": "   " }),
  ] {
    let (status, resp) = call(&app, "POST", "/users", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(resp["message"], "Handle and secret are required");
  }
}

#[tokio::test]
async fn duplicate_handle_is_rejected_and_not_stored() {
  let app = app().await;
  create_user(&app, "vader").await;

  let (status, body) = call(
    &app,
    "POST",
    "/users",
    Some(json!({ "handle": "vader", "secret": "other" })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["message"], "Handle already exists");

  let (_, list) = call(&app, "GET", "/users", None).await;
  assert_eq!(list["users"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn get_user_by_id_and_by_handle() {
  let app = app().await;
  let user = create_user(&app, "ahsoka").await;
  let id = user["id"].as_i64().unwrap();

  let (status, by_id) = call(&app, "GET", &format!("/users/{id}"), None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(by_id, user);

  let (status, by_handle) = call(&app, "GET", "/users/ahsoka", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(by_handle, user);

  let (status, body) = call(&app, "GET", "/users/999", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body["message"], "User not found");

  let (status, _) = call(&app, "GET", "/users/nobody", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_user_can_embed_photos() {
  let app = app().await;
  let user = create_user(&app, "din").await;
  let id = user["id"].as_i64().unwrap();
  call(
    &app,
    "POST",
    "/photos",
    Some(json!({ "url": "https://wob.site/grogu.jpg", "user_id": id })),
  )
  .await;

  let (_, plain) = call(&app, "GET", &format!("/users/{id}"), None).await;
  assert!(plain.get("photos").is_none());

  let (status, with_photos) =
    call(&app, "GET", &format!("/users/{id}?include_photos=true"), None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(with_photos["handle"], "din");
  assert_eq!(with_photos["photos"][0]["url"], "https://wob.site/grogu.jpg");
  assert!(with_photos["photos"][0].get("user").is_none());
}

#[tokio::test]
async fn delete_user_cascades_to_photos() {
  let app = app().await;
  let user = create_user(&app, "jyn").await;
  let id = user["id"].as_i64().unwrap();
  let (_, created) = call(
    &app,
    "POST",
    "/photos",
    Some(json!({ "url": "https://wob.site/scarif.jpg", "user_id": id })),
  )
  .await;
  let photo_id = created["photo"]["id"].as_i64().unwrap();

  let (status, body) = call(&app, "DELETE", "/users/jyn", None).await;
  assert_eq!(status, StatusCode::NO_CONTENT);
  assert_eq!(body, Value::Null);

  let (status, _) = call(&app, "GET", &format!("/users/{id}"), None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  let (status, _) = call(&app, "GET", &format!("/photos/{photo_id}"), None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

// ── Photos ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn photo_for_unknown_user_is_404_and_not_stored() {
  let app = app().await;
  let (status, body) = call(
    &app,
    "POST",
    "/photos",
    Some(json!({ "url": "https://wob.site/photo.jpg", "user_id": 999 })),
  )
  .await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body, json!({ "message": "User not found" }));

  let (_, list) = call(&app, "GET", "/photos", None).await;
  assert_eq!(list["photos"], json!([]));
}

#[tokio::test]
async fn photo_requires_url_and_user_id() {
  let app = app().await;
  let (status, body) =
    call(&app, "POST", "/photos", Some(json!({ "url": "https://wob.site/a.jpg" }))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["message"], "URL and user_id are required");
}

#[tokio::test]
async fn photo_crud_flow() {
  let app = app().await;
  let user = create_user(&app, "cassian").await;
  let user_id = user["id"].as_i64().unwrap();

  let (status, created) = call(
    &app,
    "POST",
    "/photos",
    Some(json!({ "url": "https://wob.site/photo.jpg", "user_id": user_id })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(created["message"], "Photo created successfully");
  assert_eq!(created["photo"]["url"], "https://wob.site/photo.jpg");
  assert_eq!(created["photo"]["user_id"], user_id);
  let id = created["photo"]["id"].as_i64().unwrap();

  let (status, fetched) = call(&app, "GET", &format!("/photos/{id}"), None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(fetched["user"]["handle"], "cassian");
  assert!(fetched["user"].get("photos").is_none());

  let (_, list) = call(&app, "GET", "/photos", None).await;
  assert_eq!(list["photos"][0]["user"]["id"], user_id);

  let (status, updated) = call(
    &app,
    "PUT",
    &format!("/photos/{id}"),
    Some(json!({ "url": "https://wob.site/new.jpg" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(updated["photo"]["url"], "https://wob.site/new.jpg");

  // A body without url keeps the stored one.
  let (status, kept) = call(&app, "PUT", &format!("/photos/{id}"), Some(json!({}))).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(kept["photo"]["url"], "https://wob.site/new.jpg");

  let (status, _) = call(&app, "DELETE", &format!("/photos/{id}"), None).await;
  assert_eq!(status, StatusCode::NO_CONTENT);

  let (status, body) = call(&app, "GET", &format!("/photos/{id}"), None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body["message"], "Photo not found");

  let (status, _) = call(&app, "DELETE", &format!("/photos/{id}"), None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

// ── Catalogs ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn planet_create_echoes_every_field_and_round_trips() {
  let app = app().await;
  let (status, created) = call(&app, "POST", "/planets", Some(tatooine())).await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(created["message"], "Planet created successfully");

  let planet = &created["planet"];
  let id = planet["id"].as_i64().unwrap();
  for (field, value) in tatooine().as_object().unwrap() {
    assert_eq!(&planet[field], value, "field {field}");
  }

  let (status, fetched) = call(&app, "GET", &format!("/planets/{id}"), None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(&fetched, planet);
}

#[tokio::test]
async fn catalog_create_requires_every_field() {
  let app = app().await;

  let mut person = luke();
  person.as_object_mut().unwrap().remove("gender");
  let (status, body) = call(&app, "POST", "/people", Some(person)).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(
    body["message"],
    "All fields (name, height, mass, hair_color, skin_color, eye_color, birth_year, gender) are required"
  );

  let mut planet = tatooine();
  planet["climate"] = json!("");
  let (status, body) = call(&app, "POST", "/planets", Some(planet)).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(
    body["message"],
    "All fields (name, diameter, climate, gravity, terrain, population) are required"
  );

  let (_, people) = call(&app, "GET", "/people", None).await;
  assert_eq!(people["people"], json!([]));
}

#[tokio::test]
async fn partial_person_update_preserves_other_fields() {
  let app = app().await;
  let (_, created) = call(&app, "POST", "/people", Some(luke())).await;
  let id = created["person"]["id"].as_i64().unwrap();

  let (status, updated) = call(
    &app,
    "PUT",
    &format!("/people/{id}"),
    Some(json!({ "hair_color": "brown", "mass": "" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(updated["message"], "Person updated successfully");

  let (_, fetched) = call(&app, "GET", &format!("/people/{id}"), None).await;
  let mut expected = luke();
  expected["id"] = json!(id);
  expected["hair_color"] = json!("brown");
  assert_eq!(fetched, expected);
}

#[tokio::test]
async fn delete_then_get_is_404() {
  let app = app().await;
  let (_, created) = call(&app, "POST", "/people", Some(luke())).await;
  let id = created["person"]["id"].as_i64().unwrap();

  let (status, _) = call(&app, "DELETE", &format!("/people/{id}"), None).await;
  assert_eq!(status, StatusCode::NO_CONTENT);

  let (status, body) = call(&app, "GET", &format!("/people/{id}"), None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body["message"], "Person not found");

  let (status, _) = call(&app, "PUT", &format!("/people/{id}"), Some(json!({}))).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn planet_update_and_delete() {
  let app = app().await;
  let (_, created) = call(&app, "POST", "/planets", Some(tatooine())).await;
  let id = created["planet"]["id"].as_i64().unwrap();

  let (status, updated) = call(
    &app,
    "PUT",
    &format!("/planets/{id}"),
    Some(json!({ "population": "120000" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(updated["planet"]["population"], "120000");
  assert_eq!(updated["planet"]["terrain"], "Desert");

  let (_, list) = call(&app, "GET", "/planets", None).await;
  assert_eq!(list["planets"].as_array().unwrap().len(), 1);

  let (status, _) = call(&app, "DELETE", &format!("/planets/{id}"), None).await;
  assert_eq!(status, StatusCode::NO_CONTENT);
  let (status, body) = call(&app, "DELETE", &format!("/planets/{id}"), None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body["message"], "Planet not found");
}

// ── Favorites ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn favorites_without_actor_account_are_404() {
  let app = app().await;
  let (status, body) = call(&app, "GET", "/users/favorites", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body["message"], "User not found");
}

#[tokio::test]
async fn favoriting_twice_is_rejected_and_stored_once() {
  let app = app().await;
  create_user(&app, "actor").await;
  let (_, created) = call(&app, "POST", "/people", Some(luke())).await;
  let id = created["person"]["id"].as_i64().unwrap();

  let (status, first) = call(&app, "POST", &format!("/favorite/people/{id}"), None).await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(first["message"], "Person added to favorites successfully");
  assert_eq!(first["favorite"]["kind"], "person");
  assert_eq!(first["favorite"]["referenced_id"], id);
  assert_eq!(first["favorite"]["user_id"], 1);

  let (status, second) = call(&app, "POST", &format!("/favorite/people/{id}"), None).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(second["message"], "Person already favorited");

  let (status, list) = call(&app, "GET", "/users/favorites", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(list["favorites"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn favorite_of_unknown_target_is_404() {
  let app = app().await;
  create_user(&app, "actor").await;

  let (status, body) = call(&app, "POST", "/favorite/planets/7", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body["message"], "Planet not found");

  let (status, body) = call(&app, "POST", "/favorite/people/7", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body["message"], "Person not found");
}

#[tokio::test]
async fn remove_planet_favorite() {
  let app = app().await;
  create_user(&app, "actor").await;
  let (_, created) = call(&app, "POST", "/planets", Some(tatooine())).await;
  let id = created["planet"]["id"].as_i64().unwrap();

  let (status, body) = call(&app, "DELETE", &format!("/favorite/planets/{id}"), None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body["message"], "Favorite planet not found");

  call(&app, "POST", &format!("/favorite/planets/{id}"), None).await;
  let (status, _) = call(&app, "DELETE", &format!("/favorite/planets/{id}"), None).await;
  assert_eq!(status, StatusCode::NO_CONTENT);

  let (_, list) = call(&app, "GET", "/users/favorites", None).await;
  assert_eq!(list["favorites"], json!([]));
}

#[tokio::test]
async fn favorites_follow_the_configured_actor() {
  let store = SqliteStore::open_in_memory().await.unwrap();
  let app = api_router(Arc::new(store), SessionConfig { actor_id: 2 });
  create_user(&app, "first").await;
  create_user(&app, "second").await;
  let (_, created) = call(&app, "POST", "/planets", Some(tatooine())).await;
  let id = created["planet"]["id"].as_i64().unwrap();

  let (_, fav) = call(&app, "POST", &format!("/favorite/planets/{id}"), None).await;
  assert_eq!(fav["favorite"]["user_id"], 2);
}

// ── Input handling ────────────────────────────────────────────────────────────

#[tokio::test]
async fn malformed_json_is_a_json_400() {
  let app = app().await;
  let req = Request::builder()
    .method("POST")
    .uri("/planets")
    .header(header::CONTENT_TYPE, "application/json")
    .body(Body::from("{not json"))
    .unwrap();
  let resp = app.oneshot(req).await.unwrap();
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  let body: Value = serde_json::from_slice(&bytes).unwrap();
  assert!(body["message"].is_string());
}

#[tokio::test]
async fn non_numeric_id_is_a_json_400() {
  let app = app().await;
  let (status, body) = call(&app, "GET", "/planets/tatooine", None).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(body["message"].is_string());
}
