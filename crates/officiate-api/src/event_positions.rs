//! Handlers for `/event-positions` endpoints, including the two
//! administrative triggers.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/event-positions` | Optional `?event_id=`; joined with event and position fields |
//! | `POST`   | `/event-positions` | Body: [`SetBody`]; 201 when created, 200 when the flag was updated |
//! | `DELETE` | `/event-positions/:id` | |
//! | `POST`   | `/event-positions/auto-assign` | 422 when the catalog has no primary positions |
//! | `POST`   | `/event-positions/remove-all` | |

use std::sync::Arc;

use axum::{
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use officiate_core::{
  catalog::{EventPositionDetail, SetOutcome},
  classify::CatalogSummary,
  engine::removal_message,
  store::OfficiatingStore,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  error::ApiError,
  extract::{Json, Path, Query},
};

// ─── List ────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub event_id: Option<Uuid>,
}

/// `GET /event-positions[?event_id=<id>]`
pub async fn list<S: OfficiatingStore>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<EventPositionDetail>>, ApiError> {
  let rows = store
    .list_event_positions(params.event_id)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(rows))
}

// ─── Set ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SetBody {
  pub event_id:     Uuid,
  pub position_id:  Uuid,
  #[serde(default = "mandatory_by_default")]
  pub is_mandatory: bool,
}

fn mandatory_by_default() -> bool { true }

/// `POST /event-positions`: create the pair or update its mandatory flag.
pub async fn set<S: OfficiatingStore>(
  State(store): State<Arc<S>>,
  Json(body): Json<SetBody>,
) -> Result<impl IntoResponse, ApiError> {
  let (row, outcome) = store
    .set_event_position(body.event_id, body.position_id, body.is_mandatory)
    .await
    .map_err(ApiError::store)?;
  let status = match outcome {
    SetOutcome::Created => StatusCode::CREATED,
    SetOutcome::Updated => StatusCode::OK,
  };
  Ok((status, Json(row)))
}

/// `DELETE /event-positions/:id`
pub async fn delete<S: OfficiatingStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
  store.delete_event_position(id).await.map_err(ApiError::store)?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Administrative triggers ─────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct AutoAssignResponse {
  pub created:   usize,
  pub mandatory: usize,
  pub optional:  usize,
  pub message:   String,
  pub catalog:   CatalogSummary,
}

/// `POST /event-positions/auto-assign`
pub async fn auto_assign<S: OfficiatingStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<AutoAssignResponse>, ApiError> {
  let report = store.auto_assign_positions().await.map_err(ApiError::store)?;
  Ok(Json(AutoAssignResponse {
    created:   report.created,
    mandatory: report.mandatory,
    optional:  report.optional,
    message:   report.message(),
    catalog:   report.catalog,
  }))
}

#[derive(Debug, Serialize)]
pub struct RemoveAllResponse {
  pub removed: usize,
  pub message: String,
}

/// `POST /event-positions/remove-all`
pub async fn remove_all<S: OfficiatingStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<RemoveAllResponse>, ApiError> {
  let removed = store
    .remove_all_event_positions()
    .await
    .map_err(ApiError::store)?;
  Ok(Json(RemoveAllResponse {
    removed,
    message: removal_message(removed),
  }))
}
