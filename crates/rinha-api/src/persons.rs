//! Handlers for `/pessoas` resources.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/pessoas` | Body: person JSON; 201 + `Location`, empty body |
//! | `GET`  | `/pessoas/{id}` | 404 if not found or `id` is not a UUID |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::{StatusCode, header},
  response::IntoResponse,
};
use bytes::Bytes;
use rinha_core::{
  person::{Person, PersonCandidate},
  store::PersonStore,
  validate,
};
use uuid::Uuid;

use crate::error::ApiError;

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /pessoas`
///
/// The body is taken as raw bytes so that decode failures are classified by
/// [`PersonCandidate::from_slice`] rather than by axum's JSON rejection.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  body: Bytes,
) -> Result<impl IntoResponse, ApiError>
where
  S: PersonStore,
{
  let new_person = PersonCandidate::from_slice(&body)
    .and_then(validate)
    .inspect_err(|e| tracing::debug!(error = %e, "rejected person"))?;

  let person = store.create(new_person).await.map_err(ApiError::classify)?;

  Ok((
    StatusCode::CREATED,
    [(header::LOCATION, format!("/pessoas/{}", person.id))],
  ))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /pessoas/{id}`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Person>, ApiError>
where
  S: PersonStore,
{
  let not_found = || ApiError::NotFound(format!("person {id} not found"));

  let uuid = Uuid::parse_str(&id).map_err(|_| not_found())?;
  let person = store
    .get_person(uuid)
    .await
    .map_err(ApiError::classify)?
    .ok_or_else(not_found)?;
  Ok(Json(person))
}
