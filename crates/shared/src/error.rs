//! Application-wide error types.

use thiserror::Error;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required request field was absent.
    #[error("Missing field '{0}'")]
    MissingField(String),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::MissingField(_) | Self::Validation(_) => 400,
            Self::NotFound(_) => 404,
            Self::Database(_) => 500,
        }
    }

    /// Returns the error code for API responses and logs.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "MISSING_FIELD",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns the message shown to API clients.
    ///
    /// Server-side failures are reduced to a generic message so store
    /// details never reach the caller.
    #[must_use]
    pub fn client_message(&self) -> String {
        match self {
            Self::MissingField(_) => self.to_string(),
            Self::Validation(msg) | Self::NotFound(msg) => msg.clone(),
            Self::Database(_) => "Internal server error".to_string(),
        }
    }
}
