use std::error::Error as StdError;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

use crate::db::ConnectError;
use crate::utils::response::error as error_response;

type BoxError = Box<dyn StdError + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Connection(#[from] ConnectError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{message}")]
    Internal {
        message: String,
        #[source]
        source: Option<BoxError>,
    },
}

impl AppError {
    /// Wraps an unexpected failure, keeping the original for diagnostics.
    pub fn internal(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        AppError::Internal {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Connection(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "INVALID_INPUT",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Connection(_) => "CONNECTION_ERROR",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    /// The underlying failure text, if this error wraps one.
    pub fn detail(&self) -> Option<String> {
        match self {
            AppError::Connection(e) => Some(e.to_string()),
            AppError::Database(e) => Some(e.to_string()),
            AppError::Internal {
                source: Some(source),
                ..
            } => Some(source.to_string()),
            _ => None,
        }
    }

    fn log(&self) {
        let code = self.code();
        match self {
            AppError::InvalidInput(msg) | AppError::NotFound(msg) | AppError::Conflict(msg) => {
                warn!(code, message = %msg, "Request rejected");
            }
            AppError::Connection(e) => {
                error!(code, error = %e, "Database connection error");
            }
            AppError::Database(e) => {
                error!(code, error = ?e, "Database error");
            }
            AppError::Internal { message, source } => {
                error!(code, message = %message, source = ?source, "Internal error");
            }
        }
    }

    /// Builds the HTTP response. Server-side failure detail is only attached
    /// to the body when `expose_detail` is set.
    pub fn to_response(&self, expose_detail: bool) -> Response {
        let status = self.status_code();

        // Log internal details
        self.log();

        let public_message = match self {
            AppError::InvalidInput(msg) | AppError::NotFound(msg) | AppError::Conflict(msg) => {
                msg.clone()
            }
            AppError::Internal { message, .. } => message.clone(),
            AppError::Connection(_) | AppError::Database(_) => {
                "A database error occurred".to_string()
            }
        };

        let detail = if expose_detail && status.is_server_error() {
            self.detail()
        } else {
            None
        };

        error_response(status, public_message, detail)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_response(false)
    }
}
