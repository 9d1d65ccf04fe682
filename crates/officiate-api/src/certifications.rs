//! Handlers for `/certifications` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/certifications` | Ordered by level, then name |
//! | `POST`   | `/certifications` | Body: [`NewCertification`]; returns 201 |
//! | `GET`    | `/certifications/:id` | 404 if not found |
//! | `PUT`    | `/certifications/:id` | Body: [`NewCertification`] |
//! | `DELETE` | `/certifications/:id` | Officials holding it keep no certification |

use std::sync::Arc;

use axum::{
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use officiate_core::{
  official::{Certification, NewCertification},
  store::OfficiatingStore,
};
use uuid::Uuid;

use crate::{
  error::ApiError,
  extract::{Json, Path},
};

/// `GET /certifications`
pub async fn list<S: OfficiatingStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Certification>>, ApiError> {
  let certifications = store.list_certifications().await.map_err(ApiError::store)?;
  Ok(Json(certifications))
}

/// `POST /certifications`
pub async fn create<S: OfficiatingStore>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewCertification>,
) -> Result<impl IntoResponse, ApiError> {
  let certification = store
    .create_certification(body)
    .await
    .map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(certification)))
}

/// `GET /certifications/:id`
pub async fn get_one<S: OfficiatingStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Certification>, ApiError> {
  let certification = store
    .get_certification(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("certification {id} not found")))?;
  Ok(Json(certification))
}

/// `PUT /certifications/:id`
pub async fn update<S: OfficiatingStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<NewCertification>,
) -> Result<Json<Certification>, ApiError> {
  let certification = store
    .update_certification(id, body)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(certification))
}

/// `DELETE /certifications/:id`
pub async fn delete<S: OfficiatingStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
  store.delete_certification(id).await.map_err(ApiError::store)?;
  Ok(StatusCode::NO_CONTENT)
}
