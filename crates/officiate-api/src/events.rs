//! Handlers for `/events` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/events` | Optional `?event_number=`, `name=`, `meet_type=`, `gender=` |
//! | `POST`   | `/events` | Body: [`NewEvent`]; 400 if the number is outside 1..=99 |
//! | `GET`    | `/events/:id` | |
//! | `PUT`    | `/events/:id` | Body: [`NewEvent`] |
//! | `DELETE` | `/events/:id` | |
//! | `POST`   | `/events/delete-selected` | Body: `{"ids":[...]}`; returns `{"removed":n}` |
//! | `POST`   | `/events/delete-all` | Returns `{"removed":n}` |

use std::sync::Arc;

use axum::{
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use officiate_core::{
  catalog::{Event, EventFilter, NewEvent},
  store::OfficiatingStore,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  error::ApiError,
  extract::{Json, Path, Query},
};

/// `GET /events[?event_number=..][&name=..][&meet_type=..][&gender=..]`
pub async fn list<S: OfficiatingStore>(
  State(store): State<Arc<S>>,
  Query(filter): Query<EventFilter>,
) -> Result<Json<Vec<Event>>, ApiError> {
  let events = store.list_events(&filter).await.map_err(ApiError::store)?;
  Ok(Json(events))
}

/// `POST /events`
pub async fn create<S: OfficiatingStore>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewEvent>,
) -> Result<impl IntoResponse, ApiError> {
  let event = store.create_event(body).await.map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(event)))
}

/// `GET /events/:id`
pub async fn get_one<S: OfficiatingStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Event>, ApiError> {
  let event = store
    .get_event(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("event {id} not found")))?;
  Ok(Json(event))
}

/// `PUT /events/:id`
pub async fn update<S: OfficiatingStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<NewEvent>,
) -> Result<Json<Event>, ApiError> {
  let event = store.update_event(id, body).await.map_err(ApiError::store)?;
  Ok(Json(event))
}

/// `DELETE /events/:id`
pub async fn delete<S: OfficiatingStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
  store.delete_event(id).await.map_err(ApiError::store)?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Bulk deletes ────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SelectedBody {
  pub ids: Vec<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct Removed {
  pub removed: usize,
}

/// `POST /events/delete-selected`, body: `{"ids":[...]}`
pub async fn delete_selected<S: OfficiatingStore>(
  State(store): State<Arc<S>>,
  Json(body): Json<SelectedBody>,
) -> Result<Json<Removed>, ApiError> {
  if body.ids.is_empty() {
    return Err(ApiError::BadRequest("no events selected for deletion".into()));
  }
  let removed = store.delete_events(body.ids).await.map_err(ApiError::store)?;
  tracing::info!(removed, "deleted selected events");
  Ok(Json(Removed { removed }))
}

/// `POST /events/delete-all`
pub async fn delete_all<S: OfficiatingStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Removed>, ApiError> {
  let removed = store.delete_all_events().await.map_err(ApiError::store)?;
  tracing::info!(removed, "deleted all events");
  Ok(Json(Removed { removed }))
}
