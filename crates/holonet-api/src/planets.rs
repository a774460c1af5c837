//! Handlers for the `/planets` catalog. Same rules as `/people`.

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use holonet_core::{
  catalog::{NewPlanet, Planet, PlanetPatch},
  store::RecordStore,
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
  ApiState,
  error::ApiError,
  extract::{ApiJson, ApiPath, present},
};

const FIELDS_REQUIRED: &str = "All fields (name, diameter, climate, gravity, \
                               terrain, population) are required";

fn not_found() -> ApiError { ApiError::NotFound("Planet not found".to_string()) }

#[derive(Debug, Default, Deserialize)]
pub struct PlanetBody {
  pub name:       Option<String>,
  pub diameter:   Option<String>,
  pub climate:    Option<String>,
  pub gravity:    Option<String>,
  pub terrain:    Option<String>,
  pub population: Option<String>,
}

impl PlanetBody {
  fn into_new(self) -> Result<NewPlanet, ApiError> {
    let (
      Some(name),
      Some(diameter),
      Some(climate),
      Some(gravity),
      Some(terrain),
      Some(population),
    ) = (
      present(self.name),
      present(self.diameter),
      present(self.climate),
      present(self.gravity),
      present(self.terrain),
      present(self.population),
    )
    else {
      return Err(ApiError::Validation(FIELDS_REQUIRED.to_string()));
    };

    Ok(NewPlanet { name, diameter, climate, gravity, terrain, population })
  }

  fn into_patch(self) -> PlanetPatch {
    PlanetPatch {
      name:       present(self.name),
      diameter:   present(self.diameter),
      climate:    present(self.climate),
      gravity:    present(self.gravity),
      terrain:    present(self.terrain),
      population: present(self.population),
    }
  }
}

/// `GET /planets`
pub async fn list<S>(State(state): State<ApiState<S>>) -> Result<Json<Value>, ApiError>
where
  S: RecordStore,
{
  let planets = state.store.list_planets().await.map_err(ApiError::store)?;
  Ok(Json(json!({ "planets": planets })))
}

/// `POST /planets`
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  ApiJson(body): ApiJson<PlanetBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecordStore,
{
  let input = body.into_new()?;
  let planet = state
    .store
    .create_planet(input)
    .await
    .map_err(ApiError::store)?;
  tracing::info!(planet_id = planet.id, name = %planet.name, "planet created");

  Ok((
    StatusCode::CREATED,
    Json(json!({ "message": "Planet created successfully", "planet": planet })),
  ))
}

/// `GET /planets/:id`
pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  ApiPath(id): ApiPath<i64>,
) -> Result<Json<Planet>, ApiError>
where
  S: RecordStore,
{
  let planet = state
    .store
    .get_planet(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(not_found)?;
  Ok(Json(planet))
}

/// `PUT /planets/:id`
pub async fn update<S>(
  State(state): State<ApiState<S>>,
  ApiPath(id): ApiPath<i64>,
  ApiJson(body): ApiJson<PlanetBody>,
) -> Result<Json<Value>, ApiError>
where
  S: RecordStore,
{
  let planet = state
    .store
    .update_planet(id, body.into_patch())
    .await
    .map_err(ApiError::store)?
    .ok_or_else(not_found)?;
  tracing::info!(planet_id = planet.id, "planet updated");

  Ok(Json(json!({ "message": "Planet updated successfully", "planet": planet })))
}

/// `DELETE /planets/:id`
pub async fn delete<S>(
  State(state): State<ApiState<S>>,
  ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError>
where
  S: RecordStore,
{
  if !state.store.delete_planet(id).await.map_err(ApiError::store)? {
    return Err(not_found());
  }
  tracing::info!(planet_id = id, "planet deleted successfully");
  Ok(StatusCode::NO_CONTENT)
}
