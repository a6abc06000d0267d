//! Handler for `GET /contagem-pessoas`.

use std::sync::Arc;

use axum::extract::State;
use rinha_core::store::PersonStore;

use crate::error::ApiError;

/// `GET /contagem-pessoas`: the total as a plain-text integer.
pub async fn handler<S>(State(store): State<Arc<S>>) -> Result<String, ApiError>
where
  S: PersonStore,
{
  let n = store.count().await.map_err(ApiError::classify)?;
  Ok(n.to_string())
}
