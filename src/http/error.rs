use reqwest::StatusCode;
use thiserror::Error;

use crate::session::SessionError;

/// Shown when the backend rejects a request without saying why.
pub const GENERIC_MESSAGE: &str = "An error occurred";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("http error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("authorization required")]
    Unauthorized,
    #[error("request rejected with status {status}: {}", .message.as_deref().unwrap_or(GENERIC_MESSAGE))]
    Rejected {
        status: StatusCode,
        message: Option<String>,
    },
    #[error("failed to decode response: {0}")]
    Decode(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl ApiError {
    pub fn rejected(status: StatusCode, message: Option<String>) -> Self {
        Self::Rejected { status, message }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Human-readable explanation suitable for an admin: the backend's own
    /// message when it sent one, a generic sentence otherwise.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Rejected {
                message: Some(message),
                ..
            } => message.clone(),
            ApiError::InvalidInput(message) => message.clone(),
            ApiError::Unauthorized => "Your session has expired, please sign in again".to_string(),
            _ => GENERIC_MESSAGE.to_string(),
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Unauthorized => Some(StatusCode::UNAUTHORIZED),
            ApiError::Rejected { status, .. } => Some(*status),
            ApiError::Transport(err) => err.status(),
            _ => None,
        }
    }
}
