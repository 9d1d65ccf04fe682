//! Handlers for meets and official assignments.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/meets` | Optional `?league_id=`; ordered by date |
//! | `POST`   | `/meets` | Body: [`NewMeet`]; returns 201 |
//! | `GET`    | `/meets/:id` | |
//! | `PUT`    | `/meets/:id` | Body: [`NewMeet`]; replaces the participating teams |
//! | `DELETE` | `/meets/:id` | |
//! | `GET`    | `/assignments` | Optional `?meet_id=` |
//! | `POST`   | `/assignments` | Body: [`NewAssignment`]; returns 201 + warnings |
//! | `GET`    | `/assignments/:id` | |
//! | `PUT`    | `/assignments/:id` | Body: [`NewAssignment`]; 409 on a duplicate role |
//! | `DELETE` | `/assignments/:id` | |

use std::sync::Arc;

use axum::{
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use officiate_core::{
  meet::{Assignment, Meet, NewAssignment, NewMeet},
  store::OfficiatingStore,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
  error::ApiError,
  extract::{Json, Path, Query},
};

// ─── Meets ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct MeetParams {
  pub league_id: Option<Uuid>,
}

/// `GET /meets[?league_id=<id>]`
pub async fn list<S: OfficiatingStore>(
  State(store): State<Arc<S>>,
  Query(params): Query<MeetParams>,
) -> Result<Json<Vec<Meet>>, ApiError> {
  let meets = store
    .list_meets(params.league_id)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(meets))
}

/// `POST /meets`
pub async fn create<S: OfficiatingStore>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewMeet>,
) -> Result<impl IntoResponse, ApiError> {
  let meet = store.create_meet(body).await.map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(meet)))
}

/// `GET /meets/:id`
pub async fn get_one<S: OfficiatingStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Meet>, ApiError> {
  let meet = store
    .get_meet(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("meet {id} not found")))?;
  Ok(Json(meet))
}

/// `PUT /meets/:id`
pub async fn update<S: OfficiatingStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<NewMeet>,
) -> Result<Json<Meet>, ApiError> {
  let meet = store.update_meet(id, body).await.map_err(ApiError::store)?;
  Ok(Json(meet))
}

/// `DELETE /meets/:id`
pub async fn delete<S: OfficiatingStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
  store.delete_meet(id).await.map_err(ApiError::store)?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Assignments ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AssignmentParams {
  pub meet_id: Option<Uuid>,
}

/// `GET /assignments[?meet_id=<id>]`
pub async fn list_assignments<S: OfficiatingStore>(
  State(store): State<Arc<S>>,
  Query(params): Query<AssignmentParams>,
) -> Result<Json<Vec<Assignment>>, ApiError> {
  let assignments = store
    .list_assignments(params.meet_id)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(assignments))
}

/// `POST /assignments`
pub async fn create_assignment<S: OfficiatingStore>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewAssignment>,
) -> Result<impl IntoResponse, ApiError> {
  let receipt = store
    .create_assignment(body)
    .await
    .map_err(ApiError::store)?;
  for warning in &receipt.warnings {
    tracing::warn!(assignment = %receipt.assignment.assignment_id, "{warning}");
  }
  Ok((StatusCode::CREATED, Json(receipt)))
}

/// `GET /assignments/:id`
pub async fn get_assignment<S: OfficiatingStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Assignment>, ApiError> {
  let assignment = store
    .get_assignment(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("assignment {id} not found")))?;
  Ok(Json(assignment))
}

/// `PUT /assignments/:id`
pub async fn update_assignment<S: OfficiatingStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<NewAssignment>,
) -> Result<Json<Assignment>, ApiError> {
  let assignment = store
    .update_assignment(id, body)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(assignment))
}

/// `DELETE /assignments/:id`
pub async fn delete_assignment<S: OfficiatingStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
  store.delete_assignment(id).await.map_err(ApiError::store)?;
  Ok(StatusCode::NO_CONTENT)
}
