//! Handlers for leagues, divisions, teams and pools.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/leagues` | |
//! | `POST`   | `/leagues` | Body: [`NewLeague`]; returns 201 |
//! | `GET`    | `/leagues/:id` | |
//! | `PUT`    | `/leagues/:id` | Body: [`NewLeague`] |
//! | `DELETE` | `/leagues/:id` | Cascades to divisions, teams and meets |
//! | `GET`    | `/divisions` | Optional `?league_id=` |
//! | `POST`   | `/divisions` | Body: [`NewDivision`] |
//! | `GET`    | `/divisions/:id` | |
//! | `PUT`    | `/divisions/:id` | Body: [`NewDivision`] |
//! | `DELETE` | `/divisions/:id` | |
//! | `GET`    | `/teams` | Optional `?division_id=` |
//! | `POST`   | `/teams` | Body: [`NewTeam`] |
//! | `GET`    | `/teams/:id` | |
//! | `PUT`    | `/teams/:id` | Body: [`NewTeam`] |
//! | `DELETE` | `/teams/:id` | |
//! | `GET`    | `/pools` | Optional `?team_id=` |
//! | `POST`   | `/pools` | Body: [`NewPool`] |
//! | `GET`    | `/pools/:id` | |
//! | `PUT`    | `/pools/:id` | Body: [`NewPool`] |
//! | `DELETE` | `/pools/:id` | |

use std::sync::Arc;

use axum::{
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use officiate_core::{
  organization::{
    Division, League, NewDivision, NewLeague, NewPool, NewTeam, Pool, Team,
  },
  store::OfficiatingStore,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
  error::ApiError,
  extract::{Json, Path, Query},
};

// ─── Leagues ─────────────────────────────────────────────────────────────────

/// `GET /leagues`
pub async fn list_leagues<S: OfficiatingStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<League>>, ApiError> {
  Ok(Json(store.list_leagues().await.map_err(ApiError::store)?))
}

/// `POST /leagues`
pub async fn create_league<S: OfficiatingStore>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewLeague>,
) -> Result<impl IntoResponse, ApiError> {
  let league = store.create_league(body).await.map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(league)))
}

/// `GET /leagues/:id`
pub async fn get_league<S: OfficiatingStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<League>, ApiError> {
  let league = store
    .get_league(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("league {id} not found")))?;
  Ok(Json(league))
}

/// `PUT /leagues/:id`
pub async fn update_league<S: OfficiatingStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<NewLeague>,
) -> Result<Json<League>, ApiError> {
  let league = store.update_league(id, body).await.map_err(ApiError::store)?;
  Ok(Json(league))
}

/// `DELETE /leagues/:id`
pub async fn delete_league<S: OfficiatingStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
  store.delete_league(id).await.map_err(ApiError::store)?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Divisions ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct DivisionParams {
  pub league_id: Option<Uuid>,
}

/// `GET /divisions[?league_id=<id>]`
pub async fn list_divisions<S: OfficiatingStore>(
  State(store): State<Arc<S>>,
  Query(params): Query<DivisionParams>,
) -> Result<Json<Vec<Division>>, ApiError> {
  let divisions = store
    .list_divisions(params.league_id)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(divisions))
}

/// `POST /divisions`
pub async fn create_division<S: OfficiatingStore>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewDivision>,
) -> Result<impl IntoResponse, ApiError> {
  let division = store.create_division(body).await.map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(division)))
}

/// `GET /divisions/:id`
pub async fn get_division<S: OfficiatingStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Division>, ApiError> {
  let division = store
    .get_division(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("division {id} not found")))?;
  Ok(Json(division))
}

/// `PUT /divisions/:id`
pub async fn update_division<S: OfficiatingStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<NewDivision>,
) -> Result<Json<Division>, ApiError> {
  let division = store.update_division(id, body).await.map_err(ApiError::store)?;
  Ok(Json(division))
}

/// `DELETE /divisions/:id`
pub async fn delete_division<S: OfficiatingStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
  store.delete_division(id).await.map_err(ApiError::store)?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Teams ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TeamParams {
  pub division_id: Option<Uuid>,
}

/// `GET /teams[?division_id=<id>]`
pub async fn list_teams<S: OfficiatingStore>(
  State(store): State<Arc<S>>,
  Query(params): Query<TeamParams>,
) -> Result<Json<Vec<Team>>, ApiError> {
  let teams = store
    .list_teams(params.division_id)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(teams))
}

/// `POST /teams`
pub async fn create_team<S: OfficiatingStore>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewTeam>,
) -> Result<impl IntoResponse, ApiError> {
  let team = store.create_team(body).await.map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(team)))
}

/// `GET /teams/:id`
pub async fn get_team<S: OfficiatingStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Team>, ApiError> {
  let team = store
    .get_team(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("team {id} not found")))?;
  Ok(Json(team))
}

/// `PUT /teams/:id`
pub async fn update_team<S: OfficiatingStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<NewTeam>,
) -> Result<Json<Team>, ApiError> {
  let team = store.update_team(id, body).await.map_err(ApiError::store)?;
  Ok(Json(team))
}

/// `DELETE /teams/:id`
pub async fn delete_team<S: OfficiatingStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
  store.delete_team(id).await.map_err(ApiError::store)?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Pools ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PoolParams {
  pub team_id: Option<Uuid>,
}

/// `GET /pools[?team_id=<id>]`
pub async fn list_pools<S: OfficiatingStore>(
  State(store): State<Arc<S>>,
  Query(params): Query<PoolParams>,
) -> Result<Json<Vec<Pool>>, ApiError> {
  let pools = store
    .list_pools(params.team_id)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(pools))
}

/// `POST /pools`
pub async fn create_pool<S: OfficiatingStore>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewPool>,
) -> Result<impl IntoResponse, ApiError> {
  let pool = store.create_pool(body).await.map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(pool)))
}

/// `GET /pools/:id`
pub async fn get_pool<S: OfficiatingStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Pool>, ApiError> {
  let pool = store
    .get_pool(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("pool {id} not found")))?;
  Ok(Json(pool))
}

/// `PUT /pools/:id`
pub async fn update_pool<S: OfficiatingStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<NewPool>,
) -> Result<Json<Pool>, ApiError> {
  let pool = store.update_pool(id, body).await.map_err(ApiError::store)?;
  Ok(Json(pool))
}

/// `DELETE /pools/:id`
pub async fn delete_pool<S: OfficiatingStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
  store.delete_pool(id).await.map_err(ApiError::store)?;
  Ok(StatusCode::NO_CONTENT)
}
