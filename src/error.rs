//! Error types for the catalog server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::views;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    /// A store operation failed, including writes of malformed references
    #[error("Store failure: {0}")]
    Store(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Store(_) | AppError::Database(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message that is safe to show outside development mode
    pub fn public_message(&self) -> String {
        match self {
            AppError::NotFound(msg) => msg.clone(),
            _ => "Internal Server Error".to_string(),
        }
    }
}

/// Attached to error responses so that the error page can be re-rendered with
/// internal details when running in development mode.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub status: StatusCode,
    pub message: String,
    pub detail: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request failed: {}", self);
        }

        let report = ErrorReport {
            status,
            message: self.public_message(),
            detail: format!("{:?}", self),
        };

        let mut response = (status, views::error::page(&report, false)).into_response();
        response.extensions_mut().insert(report);
        response
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
