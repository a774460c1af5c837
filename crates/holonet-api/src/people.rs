//! Handlers for the `/people` catalog.
//!
//! | Method   | Path          | Notes |
//! |----------|---------------|-------|
//! | `GET`    | `/people`     | `{"people": [...]}` |
//! | `POST`   | `/people`     | Body: [`PersonBody`], every field required |
//! | `GET`    | `/people/:id` | 404 if not found |
//! | `PUT`    | `/people/:id` | Body: [`PersonBody`], partial |
//! | `DELETE` | `/people/:id` | Also drops favorites pointing at the person |

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use holonet_core::{
  catalog::{NewPerson, Person, PersonPatch},
  store::RecordStore,
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
  ApiState,
  error::ApiError,
  extract::{ApiJson, ApiPath, present},
};

const FIELDS_REQUIRED: &str = "All fields (name, height, mass, hair_color, \
                               skin_color, eye_color, birth_year, gender) are required";

fn not_found() -> ApiError { ApiError::NotFound("Person not found".to_string()) }

/// JSON body accepted by `POST /people` and `PUT /people/:id`.
#[derive(Debug, Default, Deserialize)]
pub struct PersonBody {
  pub name:       Option<String>,
  pub height:     Option<String>,
  pub mass:       Option<String>,
  pub hair_color: Option<String>,
  pub skin_color: Option<String>,
  pub eye_color:  Option<String>,
  pub birth_year: Option<String>,
  pub gender:     Option<String>,
}

impl PersonBody {
  fn into_new(self) -> Result<NewPerson, ApiError> {
    let (
      Some(name),
      Some(height),
      Some(mass),
      Some(hair_color),
      Some(skin_color),
      Some(eye_color),
      Some(birth_year),
      Some(gender),
    ) = (
      present(self.name),
      present(self.height),
      present(self.mass),
      present(self.hair_color),
      present(self.skin_color),
      present(self.eye_color),
      present(self.birth_year),
      present(self.gender),
    )
    else {
      return Err(ApiError::Validation(FIELDS_REQUIRED.to_string()));
    };

    Ok(NewPerson {
      name,
      height,
      mass,
      hair_color,
      skin_color,
      eye_color,
      birth_year,
      gender,
    })
  }

  fn into_patch(self) -> PersonPatch {
    PersonPatch {
      name:       present(self.name),
      height:     present(self.height),
      mass:       present(self.mass),
      hair_color: present(self.hair_color),
      skin_color: present(self.skin_color),
      eye_color:  present(self.eye_color),
      birth_year: present(self.birth_year),
      gender:     present(self.gender),
    }
  }
}

/// `GET /people`
pub async fn list<S>(State(state): State<ApiState<S>>) -> Result<Json<Value>, ApiError>
where
  S: RecordStore,
{
  let people = state.store.list_people().await.map_err(ApiError::store)?;
  Ok(Json(json!({ "people": people })))
}

/// `POST /people`, returns 201 + `{"message", "person"}`.
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  ApiJson(body): ApiJson<PersonBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecordStore,
{
  let input = body.into_new()?;
  let person = state
    .store
    .create_person(input)
    .await
    .map_err(ApiError::store)?;
  tracing::info!(person_id = person.id, name = %person.name, "person created");

  Ok((
    StatusCode::CREATED,
    Json(json!({ "message": "Person created successfully", "person": person })),
  ))
}

/// `GET /people/:id`
pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  ApiPath(id): ApiPath<i64>,
) -> Result<Json<Person>, ApiError>
where
  S: RecordStore,
{
  let person = state
    .store
    .get_person(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(not_found)?;
  Ok(Json(person))
}

/// `PUT /people/:id`: absent or blank fields keep their stored value.
pub async fn update<S>(
  State(state): State<ApiState<S>>,
  ApiPath(id): ApiPath<i64>,
  ApiJson(body): ApiJson<PersonBody>,
) -> Result<Json<Value>, ApiError>
where
  S: RecordStore,
{
  let person = state
    .store
    .update_person(id, body.into_patch())
    .await
    .map_err(ApiError::store)?
    .ok_or_else(not_found)?;
  tracing::info!(person_id = person.id, "person updated");

  Ok(Json(json!({ "message": "Person updated successfully", "person": person })))
}

/// `DELETE /people/:id`
pub async fn delete<S>(
  State(state): State<ApiState<S>>,
  ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError>
where
  S: RecordStore,
{
  if !state.store.delete_person(id).await.map_err(ApiError::store)? {
    return Err(not_found());
  }
  tracing::info!(person_id = id, "person deleted successfully");
  Ok(StatusCode::NO_CONTENT)
}
