use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum RegistryError {
    #[error("{0}")]
    Validation(String),

    #[error("employee with ID {0} not found")]
    NotFound(i64),

    #[error("Database error: {0}")]
    Database(#[from] SqlxError),

    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("unsupported database dialect: {0}")]
    UnsupportedDialect(String),

    #[error("invalid database connection settings: {0}")]
    InvalidDatabaseUrl(String),
}

impl From<figment::Error> for RegistryError {
    fn from(e: figment::Error) -> Self {
        RegistryError::Config(Box::new(e))
    }
}

impl RegistryError {
    pub fn status(&self) -> StatusCode {
        match self {
            RegistryError::Validation(_) => StatusCode::BAD_REQUEST,
            RegistryError::NotFound(_) => StatusCode::NOT_FOUND,
            RegistryError::Database(_)
            | RegistryError::Config(_)
            | RegistryError::UnsupportedDialect(_)
            | RegistryError::InvalidDatabaseUrl(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(status: StatusCode) -> &'static str {
        match status {
            StatusCode::BAD_REQUEST => "BAD_REQUEST",
            StatusCode::NOT_FOUND => "NOT_FOUND",
            _ => "INTERNAL_ERROR",
        }
    }

    /// Render with an explicit status instead of the one implied by the variant.
    pub fn into_response_with(self, status: StatusCode) -> axum::response::Response {
        let message = match self {
            RegistryError::Validation(_) | RegistryError::NotFound(_) => self.to_string(),
            _ => "An internal server error occurred.".to_string(),
        };
        let body = ApiErrorBody {
            code: Self::code(status).to_string(),
            message,
        };
        (status, Json(ApiErrorResponse { error: body })).into_response()
    }
}

impl IntoResponse for RegistryError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        self.into_response_with(status)
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}
