//! JSON REST API for the person registry.
//!
//! Exposes an axum [`Router`] backed by any [`rinha_core::store::PersonStore`].
//! Transport concerns (listening, tracing layers) are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! Router::new().merge(rinha_api::api_router(store.clone()))
//! ```

pub mod count;
pub mod error;
pub mod persons;
pub mod search;

use std::sync::Arc;

use axum::{Router, routing::get};
use rinha_core::store::PersonStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be merged into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: PersonStore + 'static,
{
  Router::new()
    .route(
      "/pessoas",
      get(search::handler::<S>).post(persons::create::<S>),
    )
    .route("/pessoas/{id}", get(persons::get_one::<S>))
    .route("/contagem-pessoas", get(count::handler::<S>))
    .with_state(store)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
  };
  use rinha_core::person::Person;
  use rinha_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  async fn make_app() -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();
    api_router(Arc::new(store))
  }

  async fn send(
    app:    &Router,
    method: &str,
    uri:    &str,
    body:   &str,
  ) -> Response {
    let req = Request::builder()
      .method(method)
      .uri(uri)
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from(body.to_string()))
      .unwrap();
    app.clone().oneshot(req).await.unwrap()
  }

  async fn body_bytes(resp: Response) -> Vec<u8> {
    axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap()
      .to_vec()
  }

  async fn create(app: &Router, body: Value) -> Response {
    send(app, "POST", "/pessoas", &body.to_string()).await
  }

  fn joao() -> Value {
    json!({
      "apelido": "joaosilva",
      "nome": "Joao Silva",
      "nascimento": "1990-05-10",
      "stack": ["java", "go"],
    })
  }

  async fn count(app: &Router) -> String {
    let resp = send(app, "GET", "/contagem-pessoas", "").await;
    assert_eq!(resp.status(), StatusCode::OK);
    String::from_utf8(body_bytes(resp).await).unwrap()
  }

  async fn search(app: &Router, t: &str) -> Vec<Person> {
    let resp = send(app, "GET", &format!("/pessoas?t={t}"), "").await;
    assert_eq!(resp.status(), StatusCode::OK);
    serde_json::from_slice(&body_bytes(resp).await).unwrap()
  }

  // ── Create / fetch ──────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_then_fetch_returns_same_record() {
    let app = make_app().await;

    let resp = create(&app, joao()).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let location = resp
      .headers()
      .get(header::LOCATION)
      .unwrap()
      .to_str()
      .unwrap()
      .to_string();
    assert!(location.starts_with("/pessoas/"), "Location: {location}");

    let resp = send(&app, "GET", &location, "").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Value = serde_json::from_slice(&body_bytes(resp).await).unwrap();

    assert_eq!(
      format!("/pessoas/{}", fetched["id"].as_str().unwrap()),
      location
    );
    assert_eq!(fetched["apelido"], "joaosilva");
    assert_eq!(fetched["nome"], "Joao Silva");
    assert_eq!(fetched["nascimento"], "1990-05-10");
    assert_eq!(fetched["stack"], json!(["java", "go"]));
  }

  #[tokio::test]
  async fn create_without_stack_returns_empty_array() {
    let app = make_app().await;
    let mut body = joao();
    body.as_object_mut().unwrap().remove("stack");

    let resp = create(&app, body).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let location = resp.headers()[header::LOCATION].to_str().unwrap().to_string();

    let fetched: Value =
      serde_json::from_slice(&body_bytes(send(&app, "GET", &location, "").await).await)
        .unwrap();
    assert_eq!(fetched["stack"], json!([]));
  }

  #[tokio::test]
  async fn fetch_unknown_or_invalid_id_returns_404() {
    let app = make_app().await;

    let resp = send(
      &app,
      "GET",
      "/pessoas/2f1b3c0e-8b5a-4c3e-9a0b-0d7c1e2f3a4b",
      "",
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = send(&app, "GET", "/pessoas/not-a-uuid", "").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  // ── Create failures ─────────────────────────────────────────────────────────

  #[tokio::test]
  async fn malformed_requests_return_400() {
    let app = make_app().await;

    let resp = send(&app, "POST", "/pessoas", "{not json").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let mut body = joao();
    body["nascimento"] = json!("10/05/1990");
    assert_eq!(create(&app, body).await.status(), StatusCode::BAD_REQUEST);

    let mut body = joao();
    body["stack"] = json!(["go", 1]);
    assert_eq!(create(&app, body).await.status(), StatusCode::BAD_REQUEST);

    let mut body = joao();
    body.as_object_mut().unwrap().remove("apelido");
    assert_eq!(create(&app, body).await.status(), StatusCode::BAD_REQUEST);

    assert_eq!(count(&app).await, "0");
  }

  #[tokio::test]
  async fn constraint_violations_return_422() {
    let app = make_app().await;

    let mut body = joao();
    body["nome"] = Value::Null;
    assert_eq!(create(&app, body).await.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let mut body = joao();
    body["nascimento"] = json!("2023-02-30");
    assert_eq!(create(&app, body).await.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let mut body = joao();
    body["stack"] = json!([null]);
    assert_eq!(create(&app, body).await.status(), StatusCode::UNPROCESSABLE_ENTITY);

    assert_eq!(count(&app).await, "0");
  }

  #[tokio::test]
  async fn duplicate_handle_returns_422() {
    let app = make_app().await;

    assert_eq!(create(&app, joao()).await.status(), StatusCode::CREATED);

    let mut body = joao();
    body["apelido"] = json!(" joaosilva ");
    body["nome"] = json!("Outro Joao");
    assert_eq!(create(&app, body).await.status(), StatusCode::UNPROCESSABLE_ENTITY);

    assert_eq!(count(&app).await, "1");
  }

  // ── Search ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn search_by_name_and_tag() {
    let app = make_app().await;
    create(&app, joao()).await;
    create(
      &app,
      json!({ "apelido": "ana", "nome": "Ana Lima", "nascimento": "1985-01-01" }),
    )
    .await;

    let by_name = search(&app, "silva").await;
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].handle, "joaosilva");

    let by_tag = search(&app, "GO").await;
    assert_eq!(by_tag.len(), 1);
    assert_eq!(by_tag[0].tags, &["java", "go"]);

    assert!(search(&app, "cobol").await.is_empty());
  }

  #[tokio::test]
  async fn search_by_handle_only() {
    let app = make_app().await;
    create(&app, joao()).await;
    create(
      &app,
      json!({ "apelido": "zezinho", "nome": "José", "nascimento": "1980-03-03" }),
    )
    .await;

    let found = search(&app, "zinho").await;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].handle, "zezinho");
  }

  #[tokio::test]
  async fn undecodable_query_returns_400_with_json_error() {
    let app = make_app().await;

    let resp = send(&app, "GET", "/pessoas?t=a&t=b", "").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(&body_bytes(resp).await).unwrap();
    assert!(body["error"].as_str().is_some_and(|m| !m.is_empty()));
  }

  #[tokio::test]
  async fn search_without_term_returns_400_with_message() {
    let app = make_app().await;

    for uri in ["/pessoas", "/pessoas?t="] {
      let resp = send(&app, "GET", uri, "").await;
      assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
      let body: Value = serde_json::from_slice(&body_bytes(resp).await).unwrap();
      assert!(body["error"].as_str().is_some_and(|m| !m.is_empty()));
    }
  }

  // ── Count ───────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn count_is_plain_text() {
    let app = make_app().await;
    assert_eq!(count(&app).await, "0");

    create(&app, joao()).await;
    let resp = send(&app, "GET", "/contagem-pessoas", "").await;
    let ct = resp.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
    assert!(ct.starts_with("text/plain"), "Content-Type: {ct}");
    assert_eq!(String::from_utf8(body_bytes(resp).await).unwrap(), "1");
  }
}
