//! Error types for book-form
//!
//! This module defines error types using thiserror for ergonomic error handling.
//! Errors fall into three groups, all of which the controller recovers from locally by
//! showing a message:
//!
//! - **Validation**: client-side field checks, reported before any network call
//! - **API/Network**: non-2xx responses and transport failures
//! - **No changes**: an update was submitted with nothing to send

use crate::form::FormField;
use thiserror::Error;

/// Result type alias using our BookFormError type
pub type Result<T> = std::result::Result<T, BookFormError>;

/// HTTP status the server uses for conflicting updates (e.g. duplicate ISBN)
pub const CONFLICT_STATUS: u16 = 409;

/// Main error type for book-form
#[derive(Error, Debug)]
pub enum BookFormError {
    // ===== Client-side Errors =====

    /// A required field is empty or malformed
    #[error("{message}")]
    Validation {
        /// First field that failed
        field: FormField,
        message: String,
    },

    /// Update submitted but no field differs from the loaded record
    #[error("No changes to save.")]
    NoChanges,

    // ===== API Errors =====

    /// Server answered with a non-2xx status
    #[error("{message}")]
    Api {
        /// Server-provided `message`, or the operation's default
        message: String,
        status: u16,
    },

    /// Server answered 2xx but the body was not what we expected
    #[error("Invalid API response: {message}")]
    InvalidApiResponse {
        message: String,
        /// Response body snippet for debugging
        response_body: Option<String>,
    },

    /// Request never got a response
    #[error("Network error: {message}")]
    Network {
        message: String,
        is_timeout: bool,
    },

    // ===== Configuration Errors =====

    /// Configuration is invalid or incomplete
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    // ===== External Library Errors =====

    /// HTTP client error from reqwest
    #[error("HTTP client error: {0}")]
    ReqwestError(#[from] reqwest::Error),

    /// Base URL could not be parsed or joined
    #[error("URL error: {0}")]
    UrlError(#[from] url::ParseError),
}

impl BookFormError {
    /// Create a Validation error for a field
    pub fn validation<S: Into<String>>(field: FormField, message: S) -> Self {
        BookFormError::Validation {
            field,
            message: message.into(),
        }
    }

    /// Create an Api error
    pub fn api<S: Into<String>>(message: S, status: u16) -> Self {
        BookFormError::Api {
            message: message.into(),
            status,
        }
    }

    /// Create a Network error from a failed reqwest call
    pub fn network(err: &reqwest::Error) -> Self {
        BookFormError::Network {
            message: err.to_string(),
            is_timeout: err.is_timeout(),
        }
    }

    /// HTTP status of an Api error
    pub fn status_code(&self) -> Option<u16> {
        match self {
            BookFormError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if the server rejected the request as conflicting
    pub fn is_conflict(&self) -> bool {
        self.status_code() == Some(CONFLICT_STATUS)
    }

    /// Check if error was raised before any request left the client
    pub fn is_client_side(&self) -> bool {
        matches!(
            self,
            BookFormError::Validation { .. } | BookFormError::NoChanges
        )
    }

    /// Get user-friendly error message suitable for the message banner
    ///
    /// Conflicts carry their status code so the user can tell them apart from other
    /// rejections.
    pub fn user_message(&self) -> String {
        match self {
            BookFormError::Api { message, status } if *status == CONFLICT_STATUS => {
                format!("{} (error code: {})", message, status)
            }
            BookFormError::Network { is_timeout: true, .. } => {
                "The server did not respond in time. Please try again.".to_string()
            }
            BookFormError::Network { .. } | BookFormError::ReqwestError(_) => {
                "Could not reach the server. Please check your connection.".to_string()
            }
            _ => self.to_string(),
        }
    }
}
