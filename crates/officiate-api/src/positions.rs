//! Handlers for strategies and the position catalog.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/strategies` | Ordered by name |
//! | `POST`   | `/strategies` | Body: [`NewStrategy`]; 409 on a duplicate name |
//! | `GET`    | `/strategies/:id` | |
//! | `PUT`    | `/strategies/:id` | Body: [`NewStrategy`]; 409 on a duplicate name |
//! | `DELETE` | `/strategies/:id` | Cascades to its positions |
//! | `GET`    | `/positions` | Optional `?strategy_id=`, `role=`, `location=` |
//! | `POST`   | `/positions` | Body: [`NewPosition`]; 409 on a duplicate |
//! | `GET`    | `/positions/:id` | |
//! | `PUT`    | `/positions/:id` | Body: [`NewPosition`] |
//! | `DELETE` | `/positions/:id` | Cascades to its event positions |
//! | `GET`    | `/positions/:id/eligible-officials` | Active officials meeting the minimum certification |

use std::{collections::HashMap, sync::Arc};

use axum::{
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use officiate_core::{
  catalog::{NewPosition, NewStrategy, Position, PositionFilter, Strategy},
  official::{Official, qualifies},
  store::OfficiatingStore,
};
use uuid::Uuid;

use crate::{
  error::ApiError,
  extract::{Json, Path, Query},
};

// ─── Strategies ──────────────────────────────────────────────────────────────

/// `GET /strategies`
pub async fn list_strategies<S: OfficiatingStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Strategy>>, ApiError> {
  Ok(Json(store.list_strategies().await.map_err(ApiError::store)?))
}

/// `POST /strategies`
pub async fn create_strategy<S: OfficiatingStore>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewStrategy>,
) -> Result<impl IntoResponse, ApiError> {
  let strategy = store.create_strategy(body).await.map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(strategy)))
}

/// `GET /strategies/:id`
pub async fn get_strategy<S: OfficiatingStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Strategy>, ApiError> {
  let strategy = store
    .get_strategy(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("strategy {id} not found")))?;
  Ok(Json(strategy))
}

/// `PUT /strategies/:id`
pub async fn update_strategy<S: OfficiatingStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<NewStrategy>,
) -> Result<Json<Strategy>, ApiError> {
  let strategy = store.update_strategy(id, body).await.map_err(ApiError::store)?;
  Ok(Json(strategy))
}

/// `DELETE /strategies/:id`
pub async fn delete_strategy<S: OfficiatingStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
  store.delete_strategy(id).await.map_err(ApiError::store)?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Positions ───────────────────────────────────────────────────────────────

/// `GET /positions[?strategy_id=<id>][&role=...][&location=...]`
pub async fn list<S: OfficiatingStore>(
  State(store): State<Arc<S>>,
  Query(filter): Query<PositionFilter>,
) -> Result<Json<Vec<Position>>, ApiError> {
  let positions = store
    .list_positions(&filter)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(positions))
}

/// `POST /positions`
pub async fn create<S: OfficiatingStore>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewPosition>,
) -> Result<impl IntoResponse, ApiError> {
  let position = store.create_position(body).await.map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(position)))
}

/// `GET /positions/:id`
pub async fn get_one<S: OfficiatingStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Position>, ApiError> {
  let position = store
    .get_position(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("position {id} not found")))?;
  Ok(Json(position))
}

/// `PUT /positions/:id`
pub async fn update<S: OfficiatingStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<NewPosition>,
) -> Result<Json<Position>, ApiError> {
  let position = store
    .update_position(id, body)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(position))
}

/// `DELETE /positions/:id`
pub async fn delete<S: OfficiatingStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
  store.delete_position(id).await.map_err(ApiError::store)?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Eligibility ─────────────────────────────────────────────────────────────

/// `GET /positions/:id/eligible-officials`
///
/// Auto-assignment never consults certifications; this is the lookup a person
/// uses when choosing who fills a position.
pub async fn eligible_officials<S: OfficiatingStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Vec<Official>>, ApiError> {
  let position = store
    .get_position(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("position {id} not found")))?;

  let certifications: HashMap<Uuid, _> = store
    .list_certifications()
    .await
    .map_err(ApiError::store)?
    .into_iter()
    .map(|c| (c.certification_id, c))
    .collect();
  let minimum = position
    .minimum_certification_id
    .and_then(|id| certifications.get(&id));

  let officials = store
    .list_officials(None)
    .await
    .map_err(ApiError::store)?
    .into_iter()
    .filter(|o| o.active)
    .filter(|o| {
      let held = o.certification_id.and_then(|id| certifications.get(&id));
      qualifies(held, minimum)
    })
    .collect();
  Ok(Json(officials))
}
