//! Handler for `GET /pessoas?t=<term>`.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State, rejection::QueryRejection},
};
use rinha_core::{
  person::Person,
  store::{PersonStore, SearchTerm},
};
use serde::Deserialize;

use crate::error::ApiError;

#[derive(Debug, Deserialize, Default)]
pub struct SearchParams {
  /// Free-text term matched against handle, name and tags.
  pub t: Option<String>,
}

/// `GET /pessoas?t=<term>`. 400 when `t` is missing or empty, or when the
/// query string does not decode.
pub async fn handler<S>(
  State(store): State<Arc<S>>,
  query: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Vec<Person>>, ApiError>
where
  S: PersonStore,
{
  let Query(params) =
    query.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
  let term = SearchTerm::new(params.t.unwrap_or_default())?;

  let people = store.search(&term).await.map_err(ApiError::classify)?;
  Ok(Json(people))
}
