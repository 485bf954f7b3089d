//! Authentication module for the Globitex API.
//!
//! This module provides:
//! - Ordered request parameters and their canonical string form
//! - Credential management with secure secret storage
//! - Nonce generation for signed requests
//! - HMAC-SHA512 header and transaction signatures

mod credentials;
mod nonce;
mod params;
mod signature;

pub use credentials::Credentials;
pub use nonce::{MillisecondNonce, NonceProvider};
pub use params::{Param, Params, ParamsError, parse_params, stringify};
pub use signature::{
    TRANSACTION_SIGNATURE_PARAM, header_signature, signatures_match, transaction_signature,
};
