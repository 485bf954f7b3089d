//! Reasons a signed request is rejected.

use bytes::Bytes;
use http::header::{CONTENT_TYPE, HeaderValue};
use http::{Response, StatusCode};
use http_body_util::Full;
use thiserror::Error;

use crate::error::{ApiError, ErrorEnvelope, error_codes};

/// Why the validator refused a request.
///
/// Each variant maps to exactly one application code, message and HTTP
/// status. Identity and signature failures are `403`, missing or invalid
/// transaction data is `400`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rejection {
    /// `X-Signature` header absent or empty
    #[error("Missing signature")]
    MissingSignature,

    /// `X-API-Key` header absent or empty
    #[error("Missing API key")]
    MissingApiKey,

    /// `X-Nonce` header absent or empty
    #[error("Missing nonce")]
    MissingNonce,

    /// `X-API-Key` does not match the configured key
    #[error("Invalid API key")]
    InvalidApiKey,

    /// `X-Nonce` is not an integer
    #[error("Nonce is not valid")]
    InvalidNonce,

    /// Query string or body could not be parsed into parameters
    #[error("Malformed request parameters")]
    MalformedParameters,

    /// Recomputed header signature differs from `X-Signature`
    #[error("Wrong signature")]
    WrongSignature,

    /// POST body has no `transactionSignature` parameter
    #[error("Mandatory parameter missing")]
    MissingTransactionSignature,

    /// `transactionSignature` differs from the recomputed one
    #[error("Invalid transactionSignature")]
    InvalidTransactionSignature,
}

impl Rejection {
    /// Application error code.
    pub fn code(self) -> u32 {
        match self {
            Self::MissingSignature => error_codes::MISSING_SIGNATURE,
            Self::MissingApiKey | Self::MissingNonce => error_codes::MISSING_CREDENTIAL,
            Self::InvalidApiKey => error_codes::INVALID_API_KEY,
            Self::InvalidNonce => error_codes::INVALID_NONCE,
            Self::MalformedParameters => error_codes::MALFORMED_PARAMETERS,
            Self::WrongSignature => error_codes::WRONG_SIGNATURE,
            Self::MissingTransactionSignature => error_codes::MANDATORY_PARAMETER_MISSING,
            Self::InvalidTransactionSignature => error_codes::INVALID_TRANSACTION_SIGNATURE,
        }
    }

    /// HTTP status of the rejection response.
    pub fn status(self) -> StatusCode {
        match self {
            Self::MissingTransactionSignature | Self::InvalidTransactionSignature => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::FORBIDDEN,
        }
    }

    /// The rejection as an error envelope entry.
    pub fn to_api_error(self) -> ApiError {
        ApiError::new(self.code(), self.to_string())
    }

    /// JSON body: `{"errors":[{"code":N,"message":"..."}]}`.
    pub fn to_json(self) -> String {
        let envelope = ErrorEnvelope::from(self.to_api_error());
        serde_json::json!({ "errors": envelope.errors }).to_string()
    }

    /// Build the full HTTP response for this rejection.
    pub fn into_response(self) -> Response<Full<Bytes>> {
        let mut response = Response::new(Full::new(Bytes::from(self.to_json())));
        *response.status_mut() = self.status();
        response
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        response
    }
}
