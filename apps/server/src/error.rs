use axum::{
    extract::rejection::JsonRejection,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use budgetary_core::errors::{DatabaseError, Error as CoreError};
use budgetary_core::Entity;
use serde::Serialize;
use thiserror::Error;

use crate::api::shared::failure_alert;

#[derive(Error, Debug)]
pub enum ApiError {
    /// A domain error raised while handling a request for one entity type.
    #[error("{source}")]
    Entity {
        entity: &'static str,
        source: CoreError,
    },
    /// Point lookup found nothing; answered with an empty body.
    #[error("Not Found")]
    NotFound,
    /// The request body could not be read as the entity type.
    #[error("{message}")]
    BadRequest {
        entity: &'static str,
        message: String,
    },
}

impl ApiError {
    pub fn rejected<E: Entity>(rejection: JsonRejection) -> Self {
        ApiError::BadRequest {
            entity: E::COLLECTION,
            message: rejection.body_text(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    code: u16,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    entity_name: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_key: Option<&'static str>,
}

/// Status, error key and entity name for a domain error.
fn classify(
    err: &CoreError,
    entity: &'static str,
) -> (StatusCode, Option<&'static str>, Option<&'static str>) {
    match err {
        CoreError::Validation(_) => (StatusCode::BAD_REQUEST, Some("validation"), Some(entity)),
        CoreError::InvalidRequest(e) => (
            StatusCode::BAD_REQUEST,
            Some(e.kind.error_key()),
            Some(e.entity_name),
        ),
        CoreError::Database(DatabaseError::NotFound(_)) => {
            (StatusCode::NOT_FOUND, None, Some(entity))
        }
        CoreError::Database(_) | CoreError::Serialization(_) | CoreError::Unexpected(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, None, None)
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_key, entity_name) = match &self {
            ApiError::Entity { entity, source } => classify(source, entity),
            ApiError::NotFound => return StatusCode::NOT_FOUND.into_response(),
            ApiError::BadRequest { entity, .. } => {
                (StatusCode::BAD_REQUEST, Some("badrequest"), Some(*entity))
            }
        };

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        let headers = match (status, error_key, entity_name) {
            (StatusCode::BAD_REQUEST, Some(key), Some(entity)) => failure_alert(entity, key),
            _ => HeaderMap::new(),
        };
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: self.to_string(),
            entity_name,
            error_key,
        });
        (status, headers, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Tags a domain result with the entity type the request was about.
pub trait ForEntity<T> {
    fn for_entity<E: Entity>(self) -> ApiResult<T>;
}

impl<T> ForEntity<T> for Result<T, CoreError> {
    fn for_entity<E: Entity>(self) -> ApiResult<T> {
        self.map_err(|source| ApiError::Entity {
            entity: E::COLLECTION,
            source,
        })
    }
}
