use thiserror::Error;

use crate::auth::Redirect;
use crate::config::LoadError;
use crate::http::ApiError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] LoadError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Redirect(#[from] Redirect),
    #[error("{0} not found")]
    NotFound(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("telemetry initialization failed: {0}")]
    Telemetry(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn telemetry(message: impl Into<String>) -> Self {
        Self::Telemetry(message.into())
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }

    /// One-line explanation for the admin running the command.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Api(err) => err.user_message(),
            AppError::Redirect(_) => "Sign in first with `majex login`".to_string(),
            other => other.to_string(),
        }
    }
}
