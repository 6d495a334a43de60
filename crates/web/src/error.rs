use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;
use storage::error::StorageError;
use validator::ValidationErrors;

/// Web layer errors
#[derive(Debug)]
pub enum WebError {
    Storage(StorageError),
    Validation(ValidationErrors),
    /// The request body, path or query string could not be decoded
    Rejected(String),
    BadRequest(String),
    /// An entity looked up by id does not exist
    NotFound(String),
    /// A category or training center named in the request does not exist
    InvalidReference { field: &'static str, name: String },
    /// A unique field already holds this value
    Conflict(String),
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "Storage error: {}", e),
            Self::Validation(e) => write!(f, "Validation error: {}", e),
            Self::Rejected(msg) => write!(f, "Malformed request: {}", msg),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::NotFound(msg) => write!(f, "{}", msg),
            Self::InvalidReference { field, name } => {
                write!(f, "{} '{}' not found", field, name)
            }
            Self::Conflict(msg) => write!(f, "{}", msg),
        }
    }
}

impl WebError {
    pub fn not_found(entity: &str, id: impl fmt::Display) -> Self {
        Self::NotFound(format!("{} not found for id: {}", entity, id))
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Storage(StorageError::NotFound) => StatusCode::NOT_FOUND,
            Self::Storage(StorageError::UniqueViolation(_)) => StatusCode::CONFLICT,
            Self::Storage(StorageError::ForeignKeyViolation(_)) => StatusCode::BAD_REQUEST,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Rejected(_) => StatusCode::BAD_REQUEST,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidReference { .. } => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        let body = match &self {
            Self::Storage(StorageError::NotFound) => {
                json!({
                    "error": "Resource not found"
                })
            }
            Self::Storage(StorageError::UniqueViolation(constraint)) => {
                json!({
                    "error": format!("Duplicate value violates {}", constraint)
                })
            }
            Self::Storage(StorageError::ForeignKeyViolation(constraint)) => {
                json!({
                    "error": format!("Referenced row does not exist ({})", constraint)
                })
            }
            Self::Storage(e) => {
                tracing::error!("Storage error: {:?}", e);
                json!({
                    "error": "An internal error occurred"
                })
            }
            Self::Validation(errors) => {
                let field_errors: Vec<String> = errors
                    .field_errors()
                    .iter()
                    .flat_map(|(field, errors)| {
                        errors.iter().map(move |e| {
                            format!(
                                "{}: {}",
                                field,
                                e.message
                                    .as_ref()
                                    .map(|m| m.to_string())
                                    .unwrap_or_else(|| e.code.to_string())
                            )
                        })
                    })
                    .collect();

                json!({
                    "error": "Validation failed",
                    "details": field_errors
                })
            }
            Self::Rejected(msg) => {
                json!({
                    "error": "Malformed request",
                    "details": [msg]
                })
            }
            Self::BadRequest(msg) | Self::NotFound(msg) | Self::Conflict(msg) => {
                json!({
                    "error": msg
                })
            }
            Self::InvalidReference { .. } => {
                json!({
                    "error": self.to_string()
                })
            }
        };

        (status_code, Json(body)).into_response()
    }
}

impl From<StorageError> for WebError {
    fn from(error: StorageError) -> Self {
        Self::Storage(error)
    }
}

impl From<ValidationErrors> for WebError {
    fn from(error: ValidationErrors) -> Self {
        Self::Validation(error)
    }
}

pub type WebResult<T> = Result<T, WebError>;
