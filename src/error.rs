//! Error taxonomy shared by every handler and its mapping to HTTP responses.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::constants::*;
use crate::validation::ValidationError;

/// The errors that may occur while serving a request.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// User input broke one of the ledger or account rules. Nothing was
    /// written.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A write or a per-user read was attempted without a session.
    #[error("{}", ERR_UNAUTHORIZED)]
    NotAuthenticated,

    #[error("{}", ERR_INVALID_CREDENTIALS)]
    InvalidCredentials,

    /// The transaction ID does not exist in the current user's ledger.
    #[error("{}", ERR_TRANSACTION_NOT_FOUND)]
    NotFound,

    #[error("{}", ERR_USERNAME_TAKEN)]
    Conflict,

    /// The store or session layer failed.
    ///
    /// The context string is only logged. Clients receive [ERR_BACKEND].
    #[error("backend error: {0}")]
    Backend(String),
}

impl AppError {
    pub fn backend(context: impl Into<String>) -> Self {
        AppError::Backend(context.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotAuthenticated | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Conflict => StatusCode::CONFLICT,
            AppError::Backend(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<libsql::Error> for AppError {
    fn from(error: libsql::Error) -> Self {
        AppError::Backend(format!("database: {error}"))
    }
}

impl From<tower_sessions::session::Error> for AppError {
    fn from(error: tower_sessions::session::Error) -> Self {
        AppError::Backend(format!("session: {error}"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            AppError::Backend(context) => {
                tracing::error!("{context}");
                ERR_BACKEND.to_string()
            }
            other => other.to_string(),
        };

        (status, message).into_response()
    }
}
