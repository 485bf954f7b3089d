//! Error types for the Globitex client library.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ConfigError;

/// The main error type for all Globitex client operations.
#[derive(Error, Debug)]
pub enum GlobitexError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP request with middleware failed
    #[error("HTTP request failed: {0}")]
    HttpMiddleware(#[from] reqwest_middleware::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The client base URL does not parse
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The API answered with a non-2xx status.
    ///
    /// `body` is always the raw response body; `errors` holds the decoded
    /// error envelope entries when the body is one.
    #[error("HTTP {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
        /// Entries of a `{"errors":[...]}` body, empty if the body was not an envelope
        errors: Vec<ApiError>,
    },
}

impl GlobitexError {
    /// Build a [`GlobitexError::Status`] from a non-2xx response body.
    pub fn from_status(status: u16, body: String) -> Self {
        let errors = serde_json::from_str::<ErrorEnvelope>(&body)
            .map(|envelope| envelope.errors)
            .unwrap_or_default();
        Self::Status {
            status,
            body,
            errors,
        }
    }

    /// The first API error carried by a [`GlobitexError::Status`], if any.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Status { errors, .. } => errors.first(),
            _ => None,
        }
    }
}

/// A single entry of the Globitex error envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Numeric application error code
    pub code: u32,
    /// Human-readable error message
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl ApiError {
    /// Create a new API error from code and message.
    pub fn new(code: u32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Check if this is an invalid nonce error.
    pub fn is_invalid_nonce(&self) -> bool {
        self.code == error_codes::INVALID_NONCE
    }

    /// Check if this is an invalid key error.
    pub fn is_invalid_key(&self) -> bool {
        self.code == error_codes::INVALID_API_KEY
    }

    /// Check if this is a header or transaction signature error.
    pub fn is_invalid_signature(&self) -> bool {
        matches!(
            self.code,
            error_codes::MISSING_SIGNATURE
                | error_codes::WRONG_SIGNATURE
                | error_codes::INVALID_TRANSACTION_SIGNATURE
        )
    }
}

/// The `{"errors":[{"code":N,"message":"..."}]}` body used for API errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// The reported errors
    pub errors: Vec<ApiError>,
}

impl From<ApiError> for ErrorEnvelope {
    fn from(error: ApiError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

/// Known Globitex error codes.
pub mod error_codes {
    /// Missing API key or nonce header
    pub const MISSING_CREDENTIAL: u32 = 10;
    /// Missing `X-Signature` header
    pub const MISSING_SIGNATURE: u32 = 30;
    /// API key does not match
    pub const INVALID_API_KEY: u32 = 40;
    /// Nonce is not an integer
    pub const INVALID_NONCE: u32 = 60;
    /// Header signature mismatch
    pub const WRONG_SIGNATURE: u32 = 70;
    /// Transaction signature mismatch
    pub const INVALID_TRANSACTION_SIGNATURE: u32 = 80;
    /// Query string or body could not be parsed
    pub const MALFORMED_PARAMETERS: u32 = 90;
    /// A mandatory parameter is missing
    pub const MANDATORY_PARAMETER_MISSING: u32 = 200;
}
