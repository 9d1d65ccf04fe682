//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::{JsonRejection, PathRejection, QueryRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use officiate_core::{Fault, store::StoreError};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  /// An extractor refused the request before the handler ran.
  #[error("{message}")]
  Rejected { status: StatusCode, message: String },

  #[error("{source}")]
  Store {
    fault:  Fault,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
  },
}

impl ApiError {
  /// Wrap a backend error, remembering its [`Fault`] for the status code.
  pub fn store<E: StoreError>(err: E) -> Self {
    ApiError::Store { fault: err.fault(), source: Box::new(err) }
  }

  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::Rejected { status, .. } => *status,
      ApiError::Store { fault, .. } => match fault {
        Fault::NotFound => StatusCode::NOT_FOUND,
        Fault::Conflict => StatusCode::CONFLICT,
        Fault::Invalid => StatusCode::BAD_REQUEST,
        Fault::Configuration => StatusCode::UNPROCESSABLE_ENTITY,
        Fault::Storage => StatusCode::INTERNAL_SERVER_ERROR,
      },
    }
  }
}

macro_rules! from_rejection {
  ($($rejection:ty),*) => {$(
    impl From<$rejection> for ApiError {
      fn from(rejection: $rejection) -> Self {
        ApiError::Rejected {
          status:  rejection.status(),
          message: rejection.body_text(),
        }
      }
    }
  )*};
}

from_rejection!(JsonRejection, QueryRejection, PathRejection);

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    let message = match &self {
      ApiError::NotFound(m) | ApiError::BadRequest(m) => m.clone(),
      ApiError::Rejected { message, .. } => message.clone(),
      ApiError::Store { source, .. } => source.to_string(),
    };
    if status.is_server_error() {
      tracing::error!(error = %message, "request failed");
    } else {
      tracing::debug!(%status, error = %message, "request rejected");
    }
    (status, Json(json!({ "error": message }))).into_response()
  }
}
