//! Structured API errors surfaced to forms and handlers.

use crate::web::http::HttpError;
use std::fmt;

/// What a failed backend call looks like to the rest of the app: a
/// human-readable message, the HTTP status when one was received, and the
/// backend's machine-readable code when it sent one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub message: String,
    pub status: Option<u16>,
    pub code: Option<String>,
}

impl ApiError {
    /// Transport-level failure; the request never got an HTTP answer.
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            code: None,
        }
    }

    /// Backend answered but refused the operation (e.g. `success: false`).
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            code: None,
        }
    }

    /// Non-2xx response, with whatever the error body carried.
    pub fn http(status: u16, message: impl Into<String>, code: Option<String>) -> Self {
        Self {
            message: message.into(),
            status: Some(status),
            code,
        }
    }

    /// A request body that could not be encoded; never leaves the client.
    pub fn encoding(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            code: None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(code) = &self.code {
            write!(f, "[{}] ", code)?;
        }
        write!(f, "{}", self.message)?;
        if let Some(status) = self.status {
            write!(f, " (HTTP {})", status)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

impl From<HttpError> for ApiError {
    fn from(e: HttpError) -> Self {
        ApiError::network(e.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
