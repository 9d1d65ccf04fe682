//! Handlers for `/officials` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/officials` | Optional `?team_id=` |
//! | `POST`   | `/officials` | Body: [`NewOfficial`]; returns 201 |
//! | `GET`    | `/officials/:id` | |
//! | `PUT`    | `/officials/:id` | Body: [`NewOfficial`] |
//! | `DELETE` | `/officials/:id` | |

use std::sync::Arc;

use axum::{
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use officiate_core::{
  official::{NewOfficial, Official},
  store::OfficiatingStore,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
  error::ApiError,
  extract::{Json, Path, Query},
};

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub team_id: Option<Uuid>,
}

/// `GET /officials[?team_id=<id>]`
pub async fn list<S: OfficiatingStore>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Official>>, ApiError> {
  let officials = store
    .list_officials(params.team_id)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(officials))
}

/// `POST /officials`
pub async fn create<S: OfficiatingStore>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewOfficial>,
) -> Result<impl IntoResponse, ApiError> {
  let official = store.create_official(body).await.map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(official)))
}

/// `GET /officials/:id`
pub async fn get_one<S: OfficiatingStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Official>, ApiError> {
  let official = store
    .get_official(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("official {id} not found")))?;
  Ok(Json(official))
}

/// `PUT /officials/:id`
pub async fn update<S: OfficiatingStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<NewOfficial>,
) -> Result<Json<Official>, ApiError> {
  let official = store
    .update_official(id, body)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(official))
}

/// `DELETE /officials/:id`
pub async fn delete<S: OfficiatingStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
  store.delete_official(id).await.map_err(ApiError::store)?;
  Ok(StatusCode::NO_CONTENT)
}
