use actix_web::{error, http::StatusCode, HttpRequest, HttpResponse, ResponseError};
use crate::core::{DraftError, LookupError};
use crate::models::ErrorResponse;
use thiserror::Error;

/// Errors returned by page handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    NotFound(#[from] LookupError),

    #[error(transparent)]
    Draft(#[from] DraftError),

    #[error("{0}")]
    InvalidInput(String),
}

impl ApiError {
    fn kind(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "not_found",
            ApiError::Draft(DraftError::InvalidSlot(_)) => "invalid_slot",
            ApiError::Draft(DraftError::NoActiveDraft) => "no_active_draft",
            ApiError::Draft(_) => "draft_storage",
            ApiError::InvalidInput(_) => "invalid_input",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Draft(DraftError::InvalidSlot(_)) => StatusCode::BAD_REQUEST,
            ApiError::Draft(DraftError::NoActiveDraft) => StatusCode::CONFLICT,
            ApiError::Draft(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        // Storage internals stay in the log
        let message = if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
            "The booking could not be saved".to_string()
        } else {
            self.to_string()
        };

        HttpResponse::build(status).json(ErrorResponse {
            error: self.kind().to_string(),
            message,
            status_code: status.as_u16(),
        })
    }
}

/// JSON error for rejected query strings and path segments
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .json(ErrorResponse {
                error: self.error.clone(),
                message: self.message.clone(),
                status_code: self.status_code,
            })
    }
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("Query error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle path errors; a segment that does not parse names nothing that exists
pub fn handle_path_error(err: error::PathError, req: &HttpRequest) -> actix_web::Error {
    tracing::debug!("Path error on {}: {}", req.path(), err);
    JsonError {
        error: "not_found".to_string(),
        message: format!("Not found: {}", req.path()),
        status_code: 404,
    }
    .into()
}
